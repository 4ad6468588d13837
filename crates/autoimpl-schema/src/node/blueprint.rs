use crate::prelude::*;
use std::collections::BTreeSet;

///
/// Blueprint
///
/// A hand-written struct that requests a generated delegation wrapper.
/// Generation only accepts `kind = "struct"` with `abstract = true`; that check
/// belongs to the generation pass, not schema validation.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blueprint {
    #[serde(flatten)]
    pub def: Def,

    #[serde(default)]
    pub kind: ItemKind,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, rename = "field", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,

    #[serde(default, rename = "constructor", skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<Constructor>,
}

impl Blueprint {
    /// An abstract struct blueprint at `path`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            def: Def::from_path(path),
            kind: ItemKind::Struct,
            is_abstract: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, ctor: Constructor) -> Self {
        self.constructors.push(ctor);
        self
    }

    #[must_use]
    pub fn path(&self) -> String {
        self.def.path()
    }

    /// The package (module path) the blueprint lives in.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.def.module_path
    }

    /// Fields carrying a delegation marker, in declaration order.
    pub fn marked_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_marked())
    }
}

impl ValidateNode for Blueprint {
    fn validate(&self, _schema: &Schema) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        let mut fields = BTreeSet::new();
        for field in &self.fields {
            if !fields.insert(field.ident.as_str()) {
                err!(errs, "duplicate field '{}'", field.ident);
            }
        }

        let mut ctors = BTreeSet::new();
        for ctor in &self.constructors {
            if !ctors.insert(ctor.ident.as_str()) {
                err!(errs, "duplicate constructor '{}'", ctor.ident);
            }
        }

        errs.result()
    }
}

impl VisitableNode for Blueprint {
    fn route_key(&self) -> String {
        self.path()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        self.def.accept(v);
        for field in &self.fields {
            field.accept(v);
        }
        for ctor in &self.constructors {
            ctor.accept(v);
        }
    }
}
