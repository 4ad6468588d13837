//! Schema validation orchestration and shared helpers.

pub mod hierarchy;
pub mod naming;

use crate::{
    Error,
    error::ErrorTree,
    node::{Schema, VisitableNode},
    visit::ValidateVisitor,
};

/// Validate a schema, wrapping failures in the crate error.
pub fn validate(schema: &Schema) -> Result<(), Error> {
    validate_schema(schema).map_err(Error::Validation)
}

/// Run full schema validation in a staged, deterministic order.
pub fn validate_schema(schema: &Schema) -> Result<(), ErrorTree> {
    // Phase 1: validate each node (structural + local invariants).
    let mut errors = validate_nodes(schema);

    // Phase 2: enforce schema-wide invariants.
    validate_global(schema, &mut errors);

    errors.result()
}

// Validate all nodes via a visitor to retain route-aware error aggregation.
fn validate_nodes(schema: &Schema) -> ErrorTree {
    let mut visitor = ValidateVisitor::new(schema);
    schema.accept(&mut visitor);

    visitor.errors
}

// Run global validation passes that require a full schema view.
fn validate_global(schema: &Schema, errors: &mut ErrorTree) {
    hierarchy::validate_interface_hierarchy(schema, errors);
}
