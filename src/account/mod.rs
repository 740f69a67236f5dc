//! Phone account descriptor
//!
//! This module implements:
//! - The immutable `PhoneAccount` record and its wire encoding
//! - Lazy label/description/icon lookup through a `ResourceResolver`
//! - An in-memory `ResourceTable` resolver loadable from TOML

pub mod types;
pub mod resources;
pub mod table;

pub use types::{PhoneAccount, PhoneAccountBuilder};
pub use resources::{Density, Icon, PackageResources, ResourceId, ResourceResolver};
pub use table::ResourceTable;
