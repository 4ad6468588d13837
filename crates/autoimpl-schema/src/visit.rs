use crate::{
    error::ErrorTree,
    node::{Schema, VisitableNode},
};

///
/// Visitor
///
/// Route-aware traversal over schema nodes. `push`/`pop` bracket every node
/// that reports a non-empty route key.
///

pub trait Visitor {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N);

    fn push(&mut self, _route: &str) {}

    fn pop(&mut self) {}
}

///
/// ValidateVisitor
///

pub struct ValidateVisitor<'a> {
    schema: &'a Schema,
    route: Vec<String>,
    pub errors: ErrorTree,
}

impl<'a> ValidateVisitor<'a> {
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            route: Vec::new(),
            errors: ErrorTree::new(),
        }
    }

    fn current_route(&self) -> String {
        self.route.join("/")
    }
}

impl Visitor for ValidateVisitor<'_> {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N) {
        if let Err(errs) = node.validate(self.schema) {
            let route = self.current_route();
            if route.is_empty() {
                self.errors.merge(errs);
            } else {
                self.errors.add_child(route, errs);
            }
        }
    }

    fn push(&mut self, route: &str) {
        self.route.push(route.to_string());
    }

    fn pop(&mut self) {
        self.route.pop();
    }
}
