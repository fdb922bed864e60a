//! Contract for the ACL collection that owns committed entries.

use crate::entry::AclEntry;
use crate::errors::AclError;

/// The owner of committed entries.
///
/// Committed entries hold a non-owning reference to their collection and call
/// back into it when their role changes locally. Everything else about the
/// collection (adding, removing, refreshing entries) is its own business.
///
/// The callback only borrows the entry, so it cannot swap the permission
/// object behind it. A collection whose service answers with a refreshed
/// permission should hand it back to the caller, who installs it with
/// [`AclEntry::replace_permission`].
pub trait AclCollection: Send + Sync {
    /// Persist the role currently reported by `entry` for that entry's
    /// permission.
    ///
    /// Called exactly once per [`AclEntry::set_role`] on a committed entry,
    /// after the new role has been written to the permission object.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures (e.g. the permission is no
    /// longer stored); [`AclEntry::set_role`] returns them unchanged.
    fn update_role(&self, entry: &AclEntry) -> Result<(), AclError>;
}
