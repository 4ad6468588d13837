use crate::prelude::*;
use crate::validate::naming::validate_ident;
use std::collections::BTreeSet;

///
/// Param
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Param {
    pub ident: String,
    pub ty: TypeRef,
}

impl Param {
    pub fn new(ident: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            ty: TypeRef::new(ty),
        }
    }
}

impl ValidateNode for Param {
    fn validate(&self, _schema: &Schema) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident(&self.ident) {
            err!(errs, "param: {e}");
        }
        if let Err(e) = self.ty.parse() {
            err!(errs, "param '{}' has invalid type '{}': {e}", self.ident, self.ty);
        }

        errs.result()
    }
}

impl VisitableNode for Param {}

/// Shared parameter-list checks for methods and constructors.
pub(crate) fn validate_params(params: &[Param], errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();
    for param in params {
        if !seen.insert(param.ident.as_str()) {
            err!(errs, "duplicate param '{}'", param.ident);
        }
    }
}

///
/// MethodSignature
///
/// A method declared directly on an interface.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MethodSignature {
    pub ident: String,

    #[serde(default)]
    pub receiver: Receiver,

    #[serde(default, rename = "param")]
    pub params: Vec<Param>,

    #[serde(default)]
    pub returns: ReturnType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<TypeRef>,
}

impl MethodSignature {
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            receiver: Receiver::default(),
            params: Vec::new(),
            returns: ReturnType::Unit,
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    #[must_use]
    pub fn with_param(mut self, ident: &str, ty: &str) -> Self {
        self.params.push(Param::new(ident, ty));
        self
    }

    #[must_use]
    pub fn returning(mut self, ty: &str) -> Self {
        self.returns = ReturnType::from(Some(TypeRef::new(ty)));
        self
    }

    #[must_use]
    pub fn failing_with(mut self, ty: &str) -> Self {
        self.failures.push(TypeRef::new(ty));
        self
    }
}

impl ValidateNode for MethodSignature {
    fn validate(&self, _schema: &Schema) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident(&self.ident) {
            err!(errs, "method: {e}");
        }
        validate_params(&self.params, &mut errs);
        if let ReturnType::Value(ty) = &self.returns
            && let Err(e) = ty.parse()
        {
            err!(errs, "invalid return type '{ty}': {e}");
        }
        for failure in &self.failures {
            if let Err(e) = failure.parse() {
                err!(errs, "invalid failure type '{failure}': {e}");
            }
        }

        errs.result()
    }
}

impl VisitableNode for MethodSignature {
    fn route_key(&self) -> String {
        self.ident.clone()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for param in &self.params {
            param.accept(v);
        }
    }
}
