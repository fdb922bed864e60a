//! Cross-cutting error type for ACL entries and their collaborators.
//!
//! Entries raise almost nothing of their own: failures reported by a remote
//! permission object or by the owning collection flow through unchanged.
//! Collection implementations reuse the same type so callers handle a single
//! error surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AclError {
    /// The collection holds no permission with this id.
    #[error("Permission not found: {id}")]
    NotFound { id: String },

    /// A collection was asked to persist an entry that has no remote id.
    #[error("Permission has no id; it was never committed")]
    MissingId,

    /// The collection a committed entry belongs to has been dropped.
    #[error("Owning ACL collection is no longer available")]
    CollectionDropped,

    /// Failure raised by a remote permission object or a collection callback.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
