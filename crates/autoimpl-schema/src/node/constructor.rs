use crate::prelude::*;
use super::method::validate_params;
use crate::validate::naming::validate_ident;

///
/// Constructor
///
/// An associated constructor fn on a blueprint (`Greeter::new(..)`).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Constructor {
    pub ident: String,

    #[serde(default, rename = "param", skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default)]
    pub vis: Visibility,
}

impl Constructor {
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            params: Vec::new(),
            vis: Visibility::Public,
        }
    }

    #[must_use]
    pub fn with_param(mut self, ident: &str, ty: &str) -> Self {
        self.params.push(Param::new(ident, ty));
        self
    }

    #[must_use]
    pub const fn with_vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }
}

impl ValidateNode for Constructor {
    fn validate(&self, _schema: &Schema) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident(&self.ident) {
            err!(errs, "constructor: {e}");
        }
        validate_params(&self.params, &mut errs);

        errs.result()
    }
}

impl VisitableNode for Constructor {
    fn route_key(&self) -> String {
        self.ident.clone()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for param in &self.params {
            param.accept(v);
        }
    }
}
