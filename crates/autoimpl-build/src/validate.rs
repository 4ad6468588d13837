//! Pass-level blueprint checks. Schema-wide structural validation lives in
//! `autoimpl_schema::validate`; these are the checks that feed diagnostics.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use autoimpl_schema::{node::Blueprint, types::ItemKind};

/// A blueprint must be an abstract struct to be generated.
pub fn check_blueprint(blueprint: &Blueprint) -> Result<(), Diagnostic> {
    let path = blueprint.path();

    if blueprint.kind != ItemKind::Struct {
        return Err(Diagnostic::error(format!(
            "{path} isn't an abstract struct (declared as {})",
            blueprint.kind
        )));
    }
    if !blueprint.is_abstract {
        return Err(Diagnostic::error(format!(
            "{path} isn't an abstract struct (missing `abstract`)"
        )));
    }

    Ok(())
}

/// Warn once per marked field that is private to the blueprint's module.
pub fn delegation_fields(blueprint: &Blueprint, diags: &mut dyn DiagnosticSink) {
    for field in blueprint.marked_fields() {
        if field.vis == autoimpl_schema::types::Visibility::Private {
            diags.report(Diagnostic::warning(format!(
                "delegation field '{}' on {} is private; generated code outside its module cannot reach it",
                field.ident,
                blueprint.path()
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use autoimpl_schema::{node::Field, types::Visibility};

    #[test]
    fn only_abstract_structs_pass() {
        assert!(check_blueprint(&Blueprint::new("crate::Ok")).is_ok());

        let mut concrete = Blueprint::new("crate::Concrete");
        concrete.is_abstract = false;
        let err = check_blueprint(&concrete).expect_err("concrete must fail");
        assert!(err.is_error());
        assert!(err.message.starts_with("crate::Concrete isn't an abstract struct"));

        let mut trait_kind = Blueprint::new("crate::Trait");
        trait_kind.kind = ItemKind::Trait;
        assert!(check_blueprint(&trait_kind).is_err());
    }

    #[test]
    fn private_marked_fields_warn_once_each() {
        let blueprint = Blueprint::new("crate::Greeter")
            .with_field(
                Field::new("speaker", "crate::Loud")
                    .with_vis(Visibility::Private)
                    .implementing("crate::Speaker"),
            )
            .with_field(Field::new("hidden", "u8").with_vis(Visibility::Private))
            .with_field(
                Field::new("logger", "crate::Log")
                    .with_vis(Visibility::Crate)
                    .implementing("crate::Logger"),
            );
        let mut sink = CollectingSink::new();

        delegation_fields(&blueprint, &mut sink);

        let warnings: Vec<_> = sink.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("'speaker'"));
    }
}
