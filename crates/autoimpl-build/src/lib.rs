//! Code generation for autoimpl blueprints.
//!
//! A pass walks every blueprint in a schema, resolves each delegation
//! binding to its interface closure, synthesizes forwarding methods and
//! mirrored constructors, and hands the rendered artifact to an output sink.

pub mod artifact;
pub mod ctor;
pub mod delegate;
pub mod diagnostics;
pub mod emit;
pub mod pass;
pub mod validate;

pub use autoimpl_config_build::{Config, ConfigError};
pub use pass::{PassReport, run};

use crate::{
    diagnostics::{CollectingSink, Diagnostic, TracingSink},
    emit::{FsSink, MemorySink},
};
use autoimpl_schema::node::{NodeError, Schema};
use proc_macro2::Ident;
use quote::format_ident;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] NodeError),

    #[error("generation failed:\n{}", render_diagnostics(.0))]
    Failed(Vec<Diagnostic>),
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

///
/// Generation
/// result of a successful pass plus what it reported
///

#[derive(Debug)]
pub struct Generation {
    pub report: PassReport,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run a pass over `schema` writing into `out_dir`.
pub fn generate_to_dir(
    schema: &Schema,
    config: &Config,
    out_dir: impl AsRef<Path>,
) -> Result<Generation, BuildError> {
    let mut diags = TracingSink::new(CollectingSink::new());
    let mut sink = FsSink::new(out_dir.as_ref());

    finish(run(schema, config, &mut diags, &mut sink), diags.inner)
}

/// Load a schema file and run a pass into `out_dir`.
pub fn generate_file(
    schema_path: impl AsRef<Path>,
    config: &Config,
    out_dir: impl AsRef<Path>,
) -> Result<Generation, BuildError> {
    let schema = Schema::load(schema_path)?;

    generate_to_dir(&schema, config, out_dir)
}

///
/// BuildScript
///
/// Inputs of one `build.rs` run: the crate directory holding `autoimpl.toml`
/// and the directory generated files land in.
///

#[derive(Clone, Debug)]
pub struct BuildScript {
    pub manifest_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl BuildScript {
    /// Load config and schema, run the pass, and list the inputs cargo should
    /// watch.
    pub fn run(&self) -> Result<(Generation, Vec<PathBuf>), BuildError> {
        let config = Config::load_or_default(&self.manifest_dir)?;
        let schema_path = config.schema_path(&self.manifest_dir);
        let out_dir = config.out_dir.clone().unwrap_or_else(|| self.out_dir.clone());

        let watched = vec![
            self.manifest_dir.join(autoimpl_config_build::CONFIG_FILE),
            schema_path.clone(),
        ];
        let generation = generate_file(&schema_path, &config, out_dir)?;

        Ok((generation, watched))
    }
}

/// Render every artifact of a pass in memory, keyed by generated type name.
pub fn generate_in_memory(
    schema: &Schema,
    config: &Config,
) -> Result<(Vec<(String, String)>, Vec<Diagnostic>), BuildError> {
    let mut diags = CollectingSink::new();
    let mut sink = MemorySink::new();
    let report = run(schema, config, &mut diags, &mut sink);
    let generation = finish(report, diags)?;

    let sources = sink.units.into_iter().map(|u| (u.name, u.source)).collect();

    Ok((sources, generation.diagnostics))
}

fn finish(report: PassReport, diags: CollectingSink) -> Result<Generation, BuildError> {
    if report.is_success() {
        Ok(Generation {
            report,
            diagnostics: diags.diagnostics,
        })
    } else {
        Err(BuildError::Failed(diags.diagnostics))
    }
}

// Idents reaching codegen have passed schema validation.
pub(crate) fn ident(name: &str) -> Ident {
    format_ident!("{}", name)
}
