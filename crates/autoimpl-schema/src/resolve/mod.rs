//! Interface resolution: bindings, closures and method enumeration.
//!
//! Everything here is a pure function of the schema and the node passed in;
//! nothing is cached between calls.

pub mod binding;
pub mod closure;
pub mod method;

pub use binding::{Binding, extract_bindings, resolve_target_interface};
pub use closure::{InterfaceClosure, closure};
pub use method::{EnumeratedMethod, declared_methods, enumerate};

use crate::node::NodeError;
use thiserror::Error as ThisError;

///
/// ResolveError
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("cannot resolve interface: {0}")]
    Node(#[from] NodeError),

    #[error("interface hierarchy contains a cycle: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("invalid delegation target '{target}': {reason}")]
    InvalidMarker { target: String, reason: String },
}
