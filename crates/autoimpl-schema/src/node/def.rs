use crate::prelude::*;
use crate::validate::naming::validate_ident;

///
/// Def
///
/// Identity of a schema node. `module_path` is the package the node lives in,
/// `path()` is the qualified name used as its key.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Def {
    pub module_path: String,
    pub ident: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Def {
    pub fn new(module_path: impl Into<String>, ident: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            ident: ident.into(),
            comments: None,
        }
    }

    /// Build from a qualified path such as `crate::greet::Greeter`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match path.rsplit_once("::") {
            Some((module_path, ident)) => Self::new(module_path, ident),
            None => Self::new(String::new(), path),
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        if self.module_path.is_empty() {
            self.ident.clone()
        } else {
            format!("{}::{}", self.module_path, self.ident)
        }
    }
}

impl ValidateNode for Def {
    fn validate(&self, _schema: &Schema) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident(&self.ident) {
            err!(errs, "invalid ident: {e}");
        }
        for segment in self.module_path.split("::").filter(|s| !s.is_empty()) {
            let keyword = matches!(segment, "crate" | "self" | "super");
            if !keyword && syn::parse_str::<syn::Ident>(segment).is_err() {
                err!(errs, "invalid module path segment '{segment}'");
            }
        }

        errs.result()
    }
}

impl VisitableNode for Def {}
