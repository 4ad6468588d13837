//! One generation pass over every blueprint in a schema.
//!
//! Blueprints are processed sequentially and independently; no resolution
//! state outlives the blueprint it was computed for.

use crate::{
    artifact::{Artifact, Delegation, assemble},
    ctor::mirror,
    delegate::synthesize,
    diagnostics::{Diagnostic, DiagnosticSink, Severity},
    emit::{CompilationUnit, OutputSink},
    validate::{check_blueprint, delegation_fields},
};
use autoimpl_config_build::{Config, InvalidBlueprintPolicy};
use autoimpl_schema::{
    node::{Blueprint, Schema},
    resolve::{ResolveError, closure, enumerate, extract_bindings},
    validate::validate_schema,
};

///
/// Emitted
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Emitted {
    pub blueprint: String,
    pub artifact: String,
    pub location: String,
}

///
/// PassReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PassReport {
    pub emitted: Vec<Emitted>,
    pub aborted: bool,
    pub errors: usize,
    pub warnings: usize,
}

impl PassReport {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.aborted && self.errors == 0
    }
}

// counts what flows through so the report doesn't depend on the sink
struct Counting<'a> {
    inner: &'a mut dyn DiagnosticSink,
    errors: usize,
    warnings: usize,
}

impl DiagnosticSink for Counting<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.inner.report(diagnostic);
    }
}

/// Run a full pass: validate, then build and emit each blueprint in order.
pub fn run(
    schema: &Schema,
    config: &Config,
    diags: &mut dyn DiagnosticSink,
    sink: &mut dyn OutputSink,
) -> PassReport {
    let mut diags = Counting {
        inner: diags,
        errors: 0,
        warnings: 0,
    };
    let mut report = PassReport::default();

    if let Some(blueprints) = discover(schema, config, &mut diags) {
        for blueprint in blueprints {
            if let Some(emitted) = process(schema, blueprint, config, &mut diags, sink) {
                report.emitted.push(emitted);
            }
        }
    } else {
        report.aborted = true;
    }

    report.errors = diags.errors;
    report.warnings = diags.warnings;
    tracing::info!(
        emitted = report.emitted.len(),
        errors = report.errors,
        warnings = report.warnings,
        aborted = report.aborted,
        "autoimpl pass finished"
    );

    report
}

// Validate the schema and every blueprint up front. `None` aborts the pass
// before anything is emitted.
fn discover<'a>(
    schema: &'a Schema,
    config: &Config,
    diags: &mut dyn DiagnosticSink,
) -> Option<Vec<&'a Blueprint>> {
    if let Err(errs) = validate_schema(schema) {
        for (route, message) in errs.flatten() {
            diags.report(Diagnostic::error(if route.is_empty() {
                message
            } else {
                format!("{route}: {message}")
            }));
        }

        return None;
    }

    let mut accepted = Vec::new();
    for blueprint in schema.blueprints() {
        match check_blueprint(blueprint) {
            Ok(()) => accepted.push(blueprint),
            Err(diagnostic) => {
                diags.report(diagnostic);
                if config.on_invalid_blueprint == InvalidBlueprintPolicy::Abort {
                    return None;
                }
            }
        }
    }

    Some(accepted)
}

fn process(
    schema: &Schema,
    blueprint: &Blueprint,
    config: &Config,
    diags: &mut dyn DiagnosticSink,
    sink: &mut dyn OutputSink,
) -> Option<Emitted> {
    let path = blueprint.path();
    tracing::debug!(blueprint = %path, "generating");

    delegation_fields(blueprint, diags);

    let artifact = match build_artifact(schema, blueprint, config, diags) {
        Ok(artifact) => artifact,
        Err(e) => {
            diags.report(Diagnostic::error(format!("{path}: {e}")));
            return None;
        }
    };

    let unit = CompilationUnit::from_artifact(&artifact);
    match sink.write(&unit) {
        Ok(location) => Some(Emitted {
            blueprint: path,
            artifact: artifact.path(),
            location,
        }),
        Err(e) => {
            diags.report(Diagnostic::error(format!(
                "cannot emit {} for {path}: {e}",
                artifact.name
            )));
            None
        }
    }
}

/// Resolve, synthesize and assemble the artifact for one blueprint.
pub fn build_artifact(
    schema: &Schema,
    blueprint: &Blueprint,
    config: &Config,
    diags: &mut dyn DiagnosticSink,
) -> Result<Artifact, ResolveError> {
    let mut delegations = Vec::new();

    for binding in extract_bindings(blueprint)? {
        let closure = closure(schema, &binding.interface)?;
        let methods = synthesize(&binding, &enumerate(schema, &closure)?);

        delegations.push(Delegation {
            binding,
            closure,
            methods,
        });
    }
    let constructors = mirror(blueprint, diags);

    Ok(assemble(blueprint, delegations, constructors, config))
}
