//! ## Crate layout
//! - `build`: the generator, driven from `build.rs` through [`build!`].
//! - `config`: `autoimpl.toml` parsing.
//! - `schema`: blueprint/interface model, validation and resolution.
//! - `factory`: run-time construction of generated types by blueprint.
//!
//! Generated files are pulled into the blueprint's module with
//! [`include_generated!`].

pub use autoimpl_build as build;
pub use autoimpl_config_build as config;
pub use autoimpl_schema as schema;

pub mod factory;
mod macros;

/// re-exports
///
/// generated code reaches these through the runtime crate, so users do not
/// add them to their own Cargo.toml
pub mod __reexports {
    pub use ctor;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Generated
///
/// Implemented by every generated type. Carries the blueprint it wraps and
/// the explicit constructor table the factory selects from. Generated code
/// calls `register` from a load-time constructor, so the process-wide
/// registry is populated before `main`.
///

pub trait Generated: Sized + 'static {
    type Blueprint: 'static;

    /// Qualified path of the blueprint, e.g. `crate::greet::Greeter`.
    const BLUEPRINT: &'static str;

    /// Qualified path of the generated type.
    const NAME: &'static str;

    fn constructors() -> Vec<factory::Constructor>;

    /// Register with the process-wide registry.
    fn register() {
        factory::register::<Self>();
    }
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Generated,
        args,
        factory::{Args, FactoryError, Registry},
    };
}
