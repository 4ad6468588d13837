use crate::prelude::*;
use std::collections::BTreeSet;

///
/// Interface
///
/// A trait the generator can delegate. `extends` lists the direct
/// supertraits by qualified path, `methods` only what this trait declares.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Interface {
    #[serde(flatten)]
    pub def: Def,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    #[serde(default, rename = "method", skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodSignature>,
}

impl Interface {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            def: Def::from_path(path),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn extending(mut self, parent: &str) -> Self {
        self.extends.push(parent.to_string());
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn path(&self) -> String {
        self.def.path()
    }
}

impl ValidateNode for Interface {
    fn validate(&self, schema: &Schema) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let path = self.path();

        let mut parents = BTreeSet::new();
        for parent in &self.extends {
            if parent == &path {
                err!(errs, "interface '{path}' extends itself");
            } else if !parents.insert(parent.as_str()) {
                err!(errs, "supertrait '{parent}' listed twice");
            } else if let Err(e) = schema.interface(parent) {
                err!(errs, "supertrait: {e}");
            }
        }

        let mut methods = BTreeSet::new();
        for method in &self.methods {
            if !methods.insert(method.ident.as_str()) {
                err!(errs, "duplicate method '{}'", method.ident);
            }
        }

        errs.result()
    }
}

impl VisitableNode for Interface {
    fn route_key(&self) -> String {
        self.path()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        self.def.accept(v);
        for method in &self.methods {
            method.accept(v);
        }
    }
}
