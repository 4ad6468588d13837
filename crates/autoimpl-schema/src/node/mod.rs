mod blueprint;
mod constructor;
mod def;
mod field;
mod interface;
mod marker;
mod method;

pub use blueprint::*;
pub use constructor::*;
pub use def::*;
pub use field::*;
pub use interface::*;
pub use marker::*;
pub use method::*;

use crate::{error::ErrorTree, visit::Visitor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// NodeError
///

#[derive(Debug, ThisError)]
pub enum NodeError {
    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("unexpected node type at '{path}': expected {expected}, found {found}")]
    IncorrectNodeType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("duplicate node path: {0}")]
    DuplicatePath(String),

    #[error("cannot read schema file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse schema: {0}")]
    Parse(String),
}

///
/// ValidateNode
///

pub trait ValidateNode {
    fn validate(&self, _schema: &Schema) -> Result<(), ErrorTree> {
        Ok(())
    }
}

///
/// VisitableNode
///

pub trait VisitableNode: ValidateNode {
    // route_key
    fn route_key(&self) -> String {
        String::new()
    }

    // accept
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        let route = self.route_key();
        let routed = !route.is_empty();

        if routed {
            visitor.push(&route);
        }
        visitor.visit(self);
        self.drive(visitor);
        if routed {
            visitor.pop();
        }
    }

    // drive
    fn drive<V: Visitor>(&self, _: &mut V) {}
}

///
/// SchemaNode
///

#[derive(Clone, Debug, Serialize)]
pub enum SchemaNode {
    Blueprint(Blueprint),
    Interface(Interface),
}

impl SchemaNode {
    #[must_use]
    pub const fn def(&self) -> &Def {
        match self {
            Self::Blueprint(n) => &n.def,
            Self::Interface(n) => &n.def,
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Blueprint(_) => "blueprint",
            Self::Interface(_) => "interface",
        }
    }
}

impl ValidateNode for SchemaNode {}

impl VisitableNode for SchemaNode {
    fn drive<V: Visitor>(&self, v: &mut V) {
        match self {
            Self::Blueprint(n) => n.accept(v),
            Self::Interface(n) => n.accept(v),
        }
    }
}

///
/// SchemaFile
/// on-disk shape; `[[interface]]` and `[[blueprint]]` tables
///

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default, rename = "interface")]
    pub interfaces: Vec<Interface>,

    #[serde(default, rename = "blueprint")]
    pub blueprints: Vec<Blueprint>,
}

///
/// Schema
///
/// The type-inspection environment consumed by the generator: every
/// blueprint and interface, keyed by qualified path, in declaration order.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Schema {
    nodes: IndexMap<String, SchemaNode>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(file: SchemaFile) -> Result<Self, NodeError> {
        let mut schema = Self::new();
        for node in file.interfaces {
            schema.try_insert_node(SchemaNode::Interface(node))?;
        }
        for node in file.blueprints {
            schema.try_insert_node(SchemaNode::Blueprint(node))?;
        }

        Ok(schema)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let file: SchemaFile = toml::from_str(s).map_err(|e| NodeError::Parse(e.to_string()))?;

        Self::from_file(file)
    }

    pub fn from_json_str(s: &str) -> Result<Self, NodeError> {
        let file: SchemaFile =
            serde_json::from_str(s).map_err(|e| NodeError::Parse(e.to_string()))?;

        Self::from_file(file)
    }

    /// Load a schema file, picking the format from the extension (`.json`, else TOML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| NodeError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }

    /// Insert a node, replacing any node already stored at the same path.
    pub fn insert_node(&mut self, node: SchemaNode) {
        self.nodes.insert(node.def().path(), node);
    }

    pub fn try_insert_node(&mut self, node: SchemaNode) -> Result<(), NodeError> {
        let path = node.def().path();
        if self.nodes.contains_key(&path) {
            return Err(NodeError::DuplicatePath(path));
        }
        self.nodes.insert(path, node);

        Ok(())
    }

    #[must_use]
    pub fn get_node(&self, path: &str) -> Option<&SchemaNode> {
        self.nodes.get(path)
    }

    pub fn blueprint(&self, path: &str) -> Result<&Blueprint, NodeError> {
        match self.get_node(path) {
            Some(SchemaNode::Blueprint(node)) => Ok(node),
            Some(other) => Err(NodeError::IncorrectNodeType {
                path: path.to_string(),
                expected: "blueprint",
                found: other.kind_name(),
            }),
            None => Err(NodeError::PathNotFound(path.to_string())),
        }
    }

    pub fn interface(&self, path: &str) -> Result<&Interface, NodeError> {
        match self.get_node(path) {
            Some(SchemaNode::Interface(node)) => Ok(node),
            Some(other) => Err(NodeError::IncorrectNodeType {
                path: path.to_string(),
                expected: "interface",
                found: other.kind_name(),
            }),
            None => Err(NodeError::PathNotFound(path.to_string())),
        }
    }

    /// Blueprints in declaration order.
    pub fn blueprints(&self) -> impl Iterator<Item = &Blueprint> {
        self.nodes.values().filter_map(|node| match node {
            SchemaNode::Blueprint(n) => Some(n),
            SchemaNode::Interface(_) => None,
        })
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.nodes.values().filter_map(|node| match node {
            SchemaNode::Interface(n) => Some(n),
            SchemaNode::Blueprint(_) => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ValidateNode for Schema {}

impl VisitableNode for Schema {
    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in self.nodes.values() {
            node.accept(v);
        }
    }
}
