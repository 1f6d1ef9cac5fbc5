//! The shared `functions.rs` artifact of the lenses package.

use proc_macro2::TokenStream;
use quote::quote;

/// Generates the setter aliases and combinators every optic builds on.
///
/// ## Examples
///
/// ```ignore
/// // generate_optics_support() produces:
/// pub type Setter<T> = Box<dyn FnOnce(T) -> T>;
/// pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T>>>;
/// pub type AsyncSetter<T> = Box<dyn FnOnce(T) -> BoxFuture<T>>;
///
/// pub fn id_setter<T: 'static>() -> Setter<T>;
/// pub fn then<T: 'static>(first: Setter<T>, second: Setter<T>) -> Setter<T>;
/// pub fn fluent<T, R>(value: T, f: impl FnOnce(T) -> R) -> R;
/// ```
pub fn generate_optics_support() -> TokenStream {
    quote! {
        //! Setters and their combinators.

        use std::future::Future;
        use std::pin::Pin;

        /// A one-shot edit of a value.
        pub type Setter<T> = Box<dyn FnOnce(T) -> T>;

        /// A boxed, pinned future.
        pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T>>>;

        /// A one-shot asynchronous edit of a value.
        pub type AsyncSetter<T> = Box<dyn FnOnce(T) -> BoxFuture<T>>;

        /// The setter leaving its value unchanged.
        pub fn id_setter<T: 'static>() -> Setter<T> {
            Box::new(|value: T| value)
        }

        /// The asynchronous setter leaving its value unchanged.
        pub fn id_async_setter<T: 'static>() -> AsyncSetter<T> {
            Box::new(|value: T| -> BoxFuture<T> { Box::pin(async move { value }) })
        }

        /// Applies `first`, then `second`.
        pub fn then<T: 'static>(first: Setter<T>, second: Setter<T>) -> Setter<T> {
            Box::new(move |value: T| second(first(value)))
        }

        /// Awaits `first`, then `second`.
        pub fn then_async<T: 'static>(first: AsyncSetter<T>, second: AsyncSetter<T>) -> AsyncSetter<T> {
            Box::new(move |value: T| -> BoxFuture<T> {
                Box::pin(async move { second(first(value).await).await })
            })
        }

        /// Passes `value` to `f`, so edits read left to right.
        pub fn fluent<T, R>(value: T, f: impl FnOnce(T) -> R) -> R {
            f(value)
        }

        /// Passes `value` to `f` and awaits the result.
        pub async fn fluent_async<T, R, V>(value: T, f: impl FnOnce(T) -> V) -> R
        where
            V: Future<Output = R>,
        {
            f(value).await
        }
    }
}
