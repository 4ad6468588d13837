use crate::{
    err,
    error::ErrorTree,
    node::Schema,
    resolve::{ResolveError, closure},
};

/// Every interface must have a finite, acyclic closure.
pub fn validate_interface_hierarchy(schema: &Schema, errs: &mut ErrorTree) {
    for interface in schema.interfaces() {
        let path = interface.path();

        match closure(schema, &path) {
            Ok(_) | Err(ResolveError::Node(_)) => {}
            Err(ResolveError::Cycle { chain }) if chain.last() == Some(&path) => {
                err!(errs, "interface cycle: {}", chain.join(" -> "));
            }
            Err(ResolveError::Cycle { .. }) => {}
            Err(e) => err!(errs, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Interface, SchemaNode};

    #[test]
    fn each_cycle_member_reports_its_own_cycle() {
        let mut schema = Schema::new();
        schema.insert_node(SchemaNode::Interface(
            Interface::new("crate::A").extending("crate::B"),
        ));
        schema.insert_node(SchemaNode::Interface(
            Interface::new("crate::B").extending("crate::A"),
        ));
        schema.insert_node(SchemaNode::Interface(
            Interface::new("crate::C").extending("crate::A"),
        ));

        let mut errs = ErrorTree::new();
        validate_interface_hierarchy(&schema, &mut errs);

        // C only reaches the cycle, it is not part of it
        assert_eq!(errs.len(), 2, "got: {errs}");
    }
}
