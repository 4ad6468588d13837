use crate::prelude::*;
use crate::validate::naming::validate_field_ident;

///
/// Field
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Field {
    pub ident: String,
    pub ty: TypeRef,

    #[serde(default)]
    pub vis: Visibility,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_of: Option<ImplementationOf>,
}

impl Field {
    pub fn new(ident: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            ty: TypeRef::new(ty),
            vis: Visibility::Public,
            implementation_of: None,
        }
    }

    #[must_use]
    pub const fn with_vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }

    /// Mark this field as the implementation of `interface`.
    #[must_use]
    pub fn implementing(mut self, interface: &str) -> Self {
        self.implementation_of = Some(ImplementationOf::mirrored(interface));
        self
    }

    #[must_use]
    pub const fn is_marked(&self) -> bool {
        self.implementation_of.is_some()
    }
}

impl ValidateNode for Field {
    fn validate(&self, schema: &Schema) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_field_ident(&self.ident) {
            err!(errs, "field: {e}");
        }
        if let Err(e) = self.ty.parse() {
            err!(errs, "field '{}' has invalid type '{}': {e}", self.ident, self.ty);
        }
        if let Some(marker) = &self.implementation_of {
            let target = marker.to_string();
            if let Err(e) = schema.interface(&target) {
                err!(errs, "implementation_of: {e}");
            }
        }

        errs.result()
    }
}

impl VisitableNode for Field {
    fn route_key(&self) -> String {
        self.ident.clone()
    }
}
