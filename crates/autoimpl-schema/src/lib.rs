pub mod error;
pub mod node;
pub mod resolve;
pub mod types;
pub mod validate;
pub mod visit;

/// Maximum length for blueprint and interface identifiers.
pub const MAX_IDENT_LEN: usize = 64;

use crate::{node::NodeError, resolve::ResolveError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{ItemKind, Receiver, ReturnType, TypeRef, Visibility},
        visit::Visitor,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    NodeError(#[from] NodeError),

    #[error(transparent)]
    ResolveError(#[from] ResolveError),

    #[error("validation failed: {0}")]
    Validation(error::ErrorTree),
}
