//! # shareacl-core
//!
//! Core types for a single entry of a shared resource's access control list.
//!
//! An [`AclEntry`] is either *pending* (a bag of caller-supplied parameters
//! that has not been sent anywhere yet) or *committed* (a proxy over a
//! permission object returned by the remote service, owned by an ACL
//! collection). This crate provides:
//! - The [`AclEntry`] sum type with its field accessors and role mutator
//! - Parameter normalization from the legacy key scheme (`scope_type`, `scope`, `with_key`)
//! - The [`Permission`] and [`AclCollection`] contracts for external collaborators
//! - [`ApiPermission`], a serde model of the remote permission resource
//! - [`MemoryAcl`], an in-memory collection used by the CLI and tests
//! - Role and scope type enums and the cross-cutting [`AclError`]

pub mod collection;
pub mod entry;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod memory;
pub mod params;
pub mod permission;

pub use collection::AclCollection;
pub use entry::AclEntry;
pub use enums::{Role, ScopeType};
pub use errors::AclError;
pub use memory::MemoryAcl;
pub use params::EntryParams;
pub use permission::{ApiPermission, Permission};
