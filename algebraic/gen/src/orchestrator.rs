//! Generation planning and execution.
//!
//! [`plan`] turns a configuration into a set of [`Job`]s: it validates every
//! declaration, propagates serialization, flattens the dimension selections
//! and adds the artifacts other artifacts reference. [`execute`] runs the
//! jobs, formats their output and appends module indexes.
//!
//! ## Example
//!
//! ```
//! use algebraic_define::prelude::*;
//! use algebraic_gen::orchestrator::{execute, plan};
//!
//! let config = AlgebraicTypes {
//!     dualities: Some(DimensionSelection::single(2)),
//!     ..AlgebraicTypes::default()
//! };
//!
//! let artifacts = execute(&plan(&config).unwrap()).unwrap();
//! let paths: Vec<_> = artifacts.iter().map(|a| a.path.display().to_string()).collect();
//! assert!(paths.contains(&"src/duality/duality_2.rs".to_string()));
//! assert!(paths.contains(&"src/products/product_2.rs".to_string()));
//! assert!(paths.contains(&"src/sums/sum_2.rs".to_string()));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use algebraic_define::location::path_segments;
use algebraic_define::{
    AlgebraicTypes, ArtifactKind, DimensionSelection, Location, OutputOptions, ResolvedLocation,
};
use proc_macro2::TokenStream;
use tracing::{debug, info, warn};

use crate::codegen::{
    OpticsPaths, generate_duality, generate_evolving_product, generate_evolving_sum,
    generate_keys, generate_lens, generate_module_index, generate_optics_support, generate_prism,
    generate_product, generate_product_arithmetic, generate_product_marker, generate_sum,
    generate_sum_marker, keys_module,
};
use crate::errors::GeneratorError;
use crate::naming::{
    FUNCTIONS_MODULE, PRODUCT_MARKER_MODULE, SUM_MARKER_MODULE, derive_package, optics_location,
    product_module, sibling, snake_case, sum_module,
};
use crate::output::render_code;
use crate::serialization::propagate_serialization;
use crate::validation::validate_types;

/// A generated source file, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// What the file holds.
    pub kind: ArtifactKind,
    /// A dimension, a type name, a key prefix or the indexed directory.
    pub name: String,
    /// Path relative to the output root.
    pub path: PathBuf,
    /// Formatted source, including the generated-code header.
    pub content: String,
}

/// One unit of generation.
///
/// Declaration jobs refer to their declaration by index into the plan's
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Job {
    ProductMarker { location: ResolvedLocation },
    Product { dimension: usize, location: ResolvedLocation },
    ProductArithmetic { dimension: usize, location: ResolvedLocation },
    SumMarker { location: ResolvedLocation },
    Sum { dimension: usize, location: ResolvedLocation },
    Duality { dimension: usize, location: ResolvedLocation },
    EvolvingProduct { dimension: usize, location: ResolvedLocation },
    EvolvingSum { dimension: usize, location: ResolvedLocation },
    Keys { group: usize, location: ResolvedLocation },
    OpticsSupport { location: ResolvedLocation },
    Lens { record: usize, location: ResolvedLocation },
    Prism { set: usize, location: ResolvedLocation },
}

impl Job {
    /// The package the job's file lives in.
    pub fn location(&self) -> &ResolvedLocation {
        match self {
            Self::ProductMarker { location }
            | Self::Product { location, .. }
            | Self::ProductArithmetic { location, .. }
            | Self::SumMarker { location }
            | Self::Sum { location, .. }
            | Self::Duality { location, .. }
            | Self::EvolvingProduct { location, .. }
            | Self::EvolvingSum { location, .. }
            | Self::Keys { location, .. }
            | Self::OpticsSupport { location }
            | Self::Lens { location, .. }
            | Self::Prism { location, .. } => location,
        }
    }

    /// The artifact kind the job produces.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::ProductMarker { .. } | Self::Product { .. } | Self::ProductArithmetic { .. } => {
                ArtifactKind::Products
            }
            Self::SumMarker { .. } | Self::Sum { .. } => ArtifactKind::Sums,
            Self::Duality { .. } => ArtifactKind::Duality,
            Self::EvolvingProduct { .. } | Self::EvolvingSum { .. } => ArtifactKind::Evoleq,
            Self::Keys { .. } => ArtifactKind::Keys,
            Self::OpticsSupport { .. } | Self::Lens { .. } => ArtifactKind::Lenses,
            Self::Prism { .. } => ArtifactKind::Prisms,
        }
    }
}

/// The validated, dependency-closed set of jobs for one configuration.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    config: AlgebraicTypes,
    jobs: BTreeSet<Job>,
}

impl GenerationPlan {
    /// The configuration after serialization propagation.
    pub fn config(&self) -> &AlgebraicTypes {
        &self.config
    }

    /// All jobs in execution order.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The module name of the job's file, without `.rs`.
    pub fn file_module(&self, job: &Job) -> String {
        match job {
            Job::ProductMarker { .. } => PRODUCT_MARKER_MODULE.to_string(),
            Job::Product { dimension, .. } => product_module(*dimension),
            Job::ProductArithmetic { dimension, .. } => format!("product_arithmetic_{dimension}"),
            Job::SumMarker { .. } => SUM_MARKER_MODULE.to_string(),
            Job::Sum { dimension, .. } => sum_module(*dimension),
            Job::Duality { dimension, .. } => format!("duality_{dimension}"),
            Job::EvolvingProduct { dimension, .. } => format!("evolving_product_{dimension}"),
            Job::EvolvingSum { dimension, .. } => format!("evolving_sum_{dimension}"),
            Job::Keys { group, .. } => keys_module(&self.config.keys[*group].prefix),
            Job::OpticsSupport { .. } => FUNCTIONS_MODULE.to_string(),
            Job::Lens { record, .. } => snake_case(&self.config.data_classes[*record].name),
            Job::Prism { set, .. } => snake_case(&self.config.sealed_classes[*set].name),
        }
    }

    /// The job's file path relative to the output root.
    pub fn path(&self, job: &Job) -> PathBuf {
        job.location()
            .directory()
            .join(format!("{}.rs", self.file_module(job)))
    }

    /// The artifact name of the job's file.
    fn artifact_name(&self, job: &Job) -> String {
        match job {
            Job::ProductMarker { .. } => PRODUCT_MARKER_MODULE.to_string(),
            Job::SumMarker { .. } => SUM_MARKER_MODULE.to_string(),
            Job::OpticsSupport { .. } => FUNCTIONS_MODULE.to_string(),
            Job::Product { dimension, .. }
            | Job::ProductArithmetic { dimension, .. }
            | Job::Sum { dimension, .. }
            | Job::Duality { dimension, .. }
            | Job::EvolvingProduct { dimension, .. }
            | Job::EvolvingSum { dimension, .. } => dimension.to_string(),
            Job::Keys { group, .. } => self.config.keys[*group].prefix.clone(),
            Job::Lens { record, .. } => self.config.data_classes[*record].name.clone(),
            Job::Prism { set, .. } => self.config.sealed_classes[*set].name.clone(),
        }
    }
}

/// Resolves a family selection location and derives the kind's package.
fn family_location(kind: ArtifactKind, location: &Location, options: &OutputOptions) -> ResolvedLocation {
    sibling(&location.resolve(options, ""), kind)
}

/// The domain-level package of `kind` in the domain of `location`.
fn domain_package(location: &ResolvedLocation, kind: ArtifactKind) -> ResolvedLocation {
    location.with_package(derive_package(kind, ""))
}

/// Where an optic at `location` finds products, sums and support functions.
fn optics_paths(location: &ResolvedLocation) -> OpticsPaths {
    OpticsPaths {
        products: domain_package(location, ArtifactKind::Products),
        sums: domain_package(location, ArtifactKind::Sums),
        support: domain_package(location, ArtifactKind::Lenses),
    }
}

/// Flattens an optional selection into `(dimension, location)` pairs of `kind`.
///
/// The configuration's `module` location overrides every node of the
/// selection before it is flattened.
fn selected(
    selection: Option<&DimensionSelection>,
    kind: ArtifactKind,
    config: &AlgebraicTypes,
) -> Result<Vec<(usize, ResolvedLocation)>, GeneratorError> {
    let Some(selection) = selection else {
        return Ok(Vec::new());
    };
    Ok(selection
        .modularize(&config.module)
        .simplify()?
        .into_iter()
        .map(|simple| (simple.dimension, family_location(kind, &simple.location, &config.output)))
        .collect())
}

/// Validates `config` and plans every artifact it requests.
///
/// ## Errors
///
/// - Any validation error of a declaration, before anything is planned
/// - `GeneratorError::ConflictingKeyGroup` when one prefix at one location
///   is declared with different counts
/// - `GeneratorError::DuplicateDeclaration` when two jobs would write the
///   same file
pub fn plan(config: &AlgebraicTypes) -> Result<GenerationPlan, GeneratorError> {
    validate_types(config)?;
    let config = propagate_serialization(config);
    let options = &config.output;
    let mut jobs = BTreeSet::new();

    for (dimension, location) in selected(config.products.as_ref(), ArtifactKind::Products, &config)? {
        jobs.insert(Job::Product { dimension, location });
    }

    for (dimension, location) in selected(config.sums.as_ref(), ArtifactKind::Sums, &config)? {
        jobs.insert(Job::Sum { dimension, location });
    }

    for (dimension, location) in selected(config.product_arithmetics.as_ref(), ArtifactKind::Products, &config)? {
        for width in 2..=dimension {
            jobs.insert(Job::Product {
                dimension: width,
                location: location.clone(),
            });
        }
        jobs.insert(Job::ProductArithmetic { dimension, location });
    }

    for (dimension, location) in selected(config.dualities.as_ref(), ArtifactKind::Duality, &config)? {
        jobs.insert(Job::Product {
            dimension,
            location: sibling(&location, ArtifactKind::Products),
        });
        jobs.insert(Job::Sum {
            dimension,
            location: sibling(&location, ArtifactKind::Sums),
        });
        jobs.insert(Job::Duality { dimension, location });
    }

    for (dimension, location) in selected(config.evoleq_products.as_ref(), ArtifactKind::Evoleq, &config)? {
        jobs.insert(Job::Product {
            dimension,
            location: sibling(&location, ArtifactKind::Products),
        });
        jobs.insert(Job::EvolvingProduct { dimension, location });
    }

    for (dimension, location) in selected(config.evoleq_sums.as_ref(), ArtifactKind::Evoleq, &config)? {
        jobs.insert(Job::Product {
            dimension,
            location: sibling(&location, ArtifactKind::Products),
        });
        jobs.insert(Job::Sum {
            dimension,
            location: sibling(&location, ArtifactKind::Sums),
        });
        jobs.insert(Job::EvolvingSum { dimension, location });
    }

    let mut key_groups: BTreeMap<(String, ResolvedLocation), usize> = BTreeMap::new();
    for (index, group) in config.keys.iter().enumerate() {
        let location = family_location(ArtifactKind::Keys, &group.location, options);
        match key_groups.get(&(group.prefix.clone(), location.clone())) {
            Some(first) if config.keys[*first].count != group.count => {
                return Err(GeneratorError::ConflictingKeyGroup {
                    prefix: group.prefix.clone(),
                    first: config.keys[*first].count,
                    second: group.count,
                });
            }
            Some(_) => debug!(prefix = %group.prefix, "Skipping repeated key group"),
            None => {
                key_groups.insert((group.prefix.clone(), location.clone()), index);
                jobs.insert(Job::Keys {
                    group: index,
                    location,
                });
            }
        }
    }

    for (index, record) in config.data_classes.iter().enumerate() {
        let location = optics_location(ArtifactKind::Lenses, &record.location, options);
        let paths = optics_paths(&location);
        let count = record.fields.len();
        if count >= 2 {
            jobs.insert(Job::Product {
                dimension: count,
                location: paths.products,
            });
        }
        jobs.insert(Job::OpticsSupport {
            location: paths.support,
        });
        jobs.insert(Job::Lens {
            record: index,
            location,
        });
    }

    for (index, set) in config.sealed_classes.iter().enumerate() {
        let location = optics_location(ArtifactKind::Prisms, &set.location, options);
        let paths = optics_paths(&location);
        jobs.insert(Job::Sum {
            dimension: set.variants.len(),
            location: paths.sums,
        });
        for variant in &set.variants {
            if variant.fields.len() >= 2 {
                jobs.insert(Job::Product {
                    dimension: variant.fields.len(),
                    location: paths.products.clone(),
                });
            }
        }
        jobs.insert(Job::OpticsSupport {
            location: paths.support,
        });
        jobs.insert(Job::Prism { set: index, location });
    }

    let markers: Vec<Job> = jobs
        .iter()
        .filter_map(|job| match job {
            Job::Product { location, .. } => Some(Job::ProductMarker {
                location: location.clone(),
            }),
            Job::Sum { location, .. } => Some(Job::SumMarker {
                location: location.clone(),
            }),
            _ => None,
        })
        .collect();
    jobs.extend(markers);

    let plan = GenerationPlan { config, jobs };
    check_unique_paths(&plan)?;

    if plan.is_empty() {
        warn!("Configuration requests no artifacts");
    }
    info!(jobs = plan.len(), "Planned generation");
    Ok(plan)
}

/// Rejects plans where two jobs write the same file.
fn check_unique_paths(plan: &GenerationPlan) -> Result<(), GeneratorError> {
    let mut seen: BTreeMap<PathBuf, &Job> = BTreeMap::new();
    for job in plan.jobs() {
        let path = plan.path(job);
        if let Some(first) = seen.insert(path.clone(), job) {
            return Err(GeneratorError::DuplicateDeclaration {
                name: plan.artifact_name(job),
                reason: format!(
                    "'{}' and '{}' would both be written to {}",
                    plan.artifact_name(first),
                    plan.artifact_name(job),
                    path.display()
                ),
            });
        }
    }
    Ok(())
}

/// Produces the tokens of one job.
fn generate_job(plan: &GenerationPlan, job: &Job) -> Result<TokenStream, GeneratorError> {
    let config = plan.config();
    let tokens = match job {
        Job::ProductMarker { .. } => generate_product_marker(),
        Job::Product { dimension, location } => generate_product(*dimension, location),
        Job::ProductArithmetic { dimension, location } => {
            generate_product_arithmetic(*dimension, location)
        }
        Job::SumMarker { .. } => generate_sum_marker(),
        Job::Sum { dimension, location } => generate_sum(*dimension, location),
        Job::Duality { dimension, location } => generate_duality(
            *dimension,
            &sibling(location, ArtifactKind::Products),
            &sibling(location, ArtifactKind::Sums),
        ),
        Job::EvolvingProduct { dimension, location } => {
            generate_evolving_product(*dimension, &sibling(location, ArtifactKind::Products))
        }
        Job::EvolvingSum { dimension, location } => generate_evolving_sum(
            *dimension,
            &sibling(location, ArtifactKind::Products),
            &sibling(location, ArtifactKind::Sums),
        ),
        Job::Keys { group, location } => generate_keys(&config.keys[*group], location),
        Job::OpticsSupport { .. } => generate_optics_support(),
        Job::Lens { record, location } => {
            generate_lens(&config.data_classes[*record], &optics_paths(location))?
        }
        Job::Prism { set, location } => {
            generate_prism(&config.sealed_classes[*set], &optics_paths(location))?
        }
    };
    Ok(tokens)
}

/// Runs every job of `plan` and returns the artifacts sorted by path.
///
/// Module indexes are appended when the configuration enables them. The
/// result is identical across runs for the same plan.
///
/// ## Errors
///
/// Returns the first job's error. A job that produces unparsable code is a
/// `GeneratorError::CodeGenError`.
pub fn execute(plan: &GenerationPlan) -> Result<Vec<GeneratedArtifact>, GeneratorError> {
    let mut artifacts = Vec::with_capacity(plan.len());

    for job in plan.jobs() {
        let path = plan.path(job);
        debug!(kind = %job.kind(), path = %path.display(), "Generating artifact");
        let content = render_code(&generate_job(plan, job)?)?;
        artifacts.push(GeneratedArtifact {
            kind: job.kind(),
            name: plan.artifact_name(job),
            path,
            content,
        });
    }

    if plan.config().output.module_index {
        artifacts.extend(module_indexes(plan)?);
    }

    artifacts.sort_by(|a, b| a.path.cmp(&b.path));
    info!(artifacts = artifacts.len(), "Generated artifacts");
    Ok(artifacts)
}

/// Plans and executes `config` in one step.
///
/// ## Errors
///
/// See [`plan`] and [`execute`].
pub fn generate(config: &AlgebraicTypes) -> Result<Vec<GeneratedArtifact>, GeneratorError> {
    execute(&plan(config)?)
}

/// Generates the `mod.rs` indexes of the generated tree.
///
/// Only the managed family directories are indexed unless
/// `output.root_index` is set. With it, every directory from the domain root
/// down is indexed. With an empty domain the root is the source root, whose
/// index is `lib.rs`; otherwise the host crate mounts the first domain
/// segment itself.
fn module_indexes(plan: &GenerationPlan) -> Result<Vec<GeneratedArtifact>, GeneratorError> {
    let owned: BTreeSet<PathBuf> = managed_directories(plan).into_iter().collect();
    let root_index = plan.config().output.root_index;
    let mut tree: BTreeMap<PathBuf, BTreeSet<String>> = BTreeMap::new();
    let mut crate_roots: BTreeSet<PathBuf> = BTreeSet::new();

    for job in plan.jobs() {
        let location = job.location();
        let source_root = PathBuf::from(&location.source_root);
        let domain_depth = path_segments(&location.domain).count();
        if domain_depth == 0 {
            crate_roots.insert(source_root.clone());
        }

        let mut directory = source_root;
        let segments = path_segments(&location.domain).chain(path_segments(&location.package));
        for (depth, segment) in segments.enumerate() {
            if depth > 0 || domain_depth == 0 {
                tree.entry(directory.clone())
                    .or_default()
                    .insert(segment.to_string());
            }
            directory.push(segment);
        }
        tree.entry(directory).or_default().insert(plan.file_module(job));
    }

    tree.into_iter()
        .filter(|(directory, _)| root_index || owned.contains(directory))
        .map(|(directory, modules)| {
            let (file, doc) = if crate_roots.contains(&directory) {
                ("lib.rs", "Generated algebraic types.".to_string())
            } else {
                ("mod.rs", format!("Generated modules in `{}`.", directory.display()))
            };
            debug!(directory = %directory.display(), modules = modules.len(), "Generating module index");
            Ok(GeneratedArtifact {
                kind: ArtifactKind::Index,
                name: directory.display().to_string(),
                path: directory.join(file),
                content: render_code(&generate_module_index(&doc, &modules))?,
            })
        })
        .collect()
}

/// The directories the generator owns for `plan`, relative to the output root.
///
/// Only family kinds are managed; optics share their packages with user
/// code and are never cleared.
pub fn managed_directories(plan: &GenerationPlan) -> Vec<PathBuf> {
    plan.jobs()
        .filter(|job| job.kind().is_managed())
        .map(|job| job.location().directory())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
