//! Blueprints whose wrappers are generated by `build.rs` from `schema.toml`.
//!
//! - `greet`: a single binding whose interface has one supertrait
//! - `shapes`: a diamond hierarchy below the bound interface
//! - `store`: a concrete field type, `Result` returns and an owned receiver
//!
//! Generated code must build clean, with or without the traits imported at
//! the include site.

#![deny(unused_imports, unused_variables)]

pub mod greet;
pub mod shapes;
pub mod speak;
pub mod store;
