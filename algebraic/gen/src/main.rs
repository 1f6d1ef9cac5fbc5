//! Algebraic Type Code Generator
//!
//! Generates product, sum, duality and optics modules from a model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use algebraic_define::{AlgebraicTypes, ArtifactKind};
use algebraic_definitions::{PRESET_NAMES, preset};
use algebraic_gen::cargo_gen::write_cargo_toml;
use algebraic_gen::config::load_config;
use algebraic_gen::errors::GeneratorError;
use algebraic_gen::orchestrator::{GeneratedArtifact, execute, managed_directories, plan};
use algebraic_gen::output::write_artifacts;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Algebraic type generator - turns a model into N-ary products, sums and optics
#[derive(Parser, Debug)]
#[command(name = "algebraic-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration describing what to generate
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in model to generate (e.g., "geometry")
    #[arg(short, long)]
    preset: Option<String>,

    /// Output root that source roots are resolved against
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Also write a Cargo.toml for a standalone crate with this package name (implies --root-index)
    #[arg(long, value_name = "PACKAGE")]
    cargo_toml: Option<String>,

    /// Also write lib.rs / mod.rs indexes into directories shared with host code
    #[arg(long)]
    root_index: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing based on verbosity; `RUST_LOG` takes precedence.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,algebraic_gen=info".to_string(),
            2 => "info,algebraic_gen=debug".to_string(),
            _ => "debug,algebraic_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn load(cli: &Cli) -> Result<AlgebraicTypes, GeneratorError> {
    match (&cli.config, &cli.preset) {
        (Some(path), _) => load_config(path),
        (None, Some(name)) => preset(name).ok_or_else(|| {
            GeneratorError::ConfigError(format!(
                "Unknown preset: '{}'. Available presets: {}",
                name,
                PRESET_NAMES.join(", ")
            ))
        }),
        (None, None) => Err(GeneratorError::ConfigError(
            "Either --config or --preset is required".to_string(),
        )),
    }
}

fn has_serializable(config: &AlgebraicTypes) -> bool {
    config.keys.iter().any(|k| k.serializable)
        || config.data_classes.iter().any(|r| r.serializable)
        || config.sealed_classes.iter().any(|s| s.serializable)
}

fn print_summary(artifacts: &[GeneratedArtifact], dry_run: bool) {
    let mut counts: BTreeMap<ArtifactKind, usize> = BTreeMap::new();
    for artifact in artifacts {
        *counts.entry(artifact.kind).or_default() += 1;
    }

    let verb = if dry_run { "would generate" } else { "generated" };
    for (kind, count) in counts {
        eprintln!("{} {} {} {}", "✓".green(), verb, count.to_string().bold(), kind.to_string().cyan());
    }
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load(&cli)?;
    if cli.root_index || cli.cargo_toml.is_some() {
        config.output.root_index = true;
    }
    let plan = plan(&config)?;
    let artifacts = execute(&plan)?;

    write_artifacts(&artifacts, &cli.output, &managed_directories(&plan), cli.dry_run)?;

    if let Some(package) = &cli.cargo_toml {
        write_cargo_toml(&cli.output, package, has_serializable(plan.config()), cli.dry_run)?;
    }

    print_summary(&artifacts, cli.dry_run);
    Ok(())
}
