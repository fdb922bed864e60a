//! The ACL entry: one scope→role binding, pending or committed.

use std::fmt;
use std::sync::{Arc, Weak};

use serde_json::Value;

use crate::collection::AclCollection;
use crate::enums::{Role, ScopeType};
use crate::errors::AclError;
use crate::params::{
    EntryParams, KEY_ADDITIONAL_ROLES, KEY_ID, KEY_ROLE, KEY_TYPE, KEY_VALUE, KEY_WITH_LINK,
};
use crate::permission::Permission;

/// An entry of the access control list of a shared resource.
///
/// A pending entry reads and writes a local [`EntryParams`] bag and has no
/// collection. A committed entry proxies a remote [`Permission`] and keeps a
/// weak reference to the [`AclCollection`] that owns it. Which of the two
/// backs an entry is decided at construction and never changes.
///
/// Accessors return `Ok(None)` for absent fields. Errors only come from the
/// remote permission or the collection.
pub struct AclEntry {
    backing: Backing,
}

enum Backing {
    Pending {
        params: EntryParams,
    },
    Committed {
        permission: Box<dyn Permission>,
        collection: Weak<dyn AclCollection>,
    },
}

impl AclEntry {
    /// Build a pending entry from caller-supplied key/value pairs.
    ///
    /// Keys may use the legacy names (`scope_type`, `scope`, `with_key`) or the
    /// current ones (`type`, `value`, `withLink`); see [`EntryParams::normalize`].
    pub fn from_params<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::pending(EntryParams::normalize(pairs))
    }

    /// Build a pending entry from an already normalized bag.
    #[must_use]
    pub const fn pending(params: EntryParams) -> Self {
        Self {
            backing: Backing::Pending { params },
        }
    }

    /// Wrap a permission returned by the remote service.
    ///
    /// Only collections are expected to call this; `collection` is the owner
    /// that role changes are reported to.
    pub fn from_remote<P>(permission: P, collection: Weak<dyn AclCollection>) -> Self
    where
        P: Permission + 'static,
    {
        Self {
            backing: Backing::Committed {
                permission: Box::new(permission),
                collection,
            },
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.backing, Backing::Pending { .. })
    }

    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self.backing, Backing::Committed { .. })
    }

    /// The parameter bag of a pending entry.
    #[must_use]
    pub const fn params(&self) -> Option<&EntryParams> {
        match &self.backing {
            Backing::Pending { params } => Some(params),
            Backing::Committed { .. } => None,
        }
    }

    /// Mutable access to the bag of a pending entry, for callers adjusting it
    /// before submission. Writes here are not normalized.
    pub const fn params_mut(&mut self) -> Option<&mut EntryParams> {
        match &mut self.backing {
            Backing::Pending { params } => Some(params),
            Backing::Committed { .. } => None,
        }
    }

    /// The remote permission behind a committed entry.
    #[must_use]
    pub fn permission(&self) -> Option<&dyn Permission> {
        match &self.backing {
            Backing::Pending { .. } => None,
            Backing::Committed { permission, .. } => Some(permission.as_ref()),
        }
    }

    /// The owning collection, if the entry is committed and the collection is
    /// still alive.
    #[must_use]
    pub fn collection(&self) -> Option<Arc<dyn AclCollection>> {
        match &self.backing {
            Backing::Pending { .. } => None,
            Backing::Committed { collection, .. } => collection.upgrade(),
        }
    }

    /// The role given to the scope: `owner`, `writer` or `reader`.
    ///
    /// # Errors
    ///
    /// Passes through any error the remote permission reports.
    pub fn role(&self) -> Result<Option<String>, AclError> {
        match &self.backing {
            Backing::Pending { params } => Ok(bag_string(params, KEY_ROLE)),
            Backing::Committed { permission, .. } => permission.role(),
        }
    }

    /// Type of the scope: `user`, `group`, `domain` or `anyone`.
    ///
    /// # Errors
    ///
    /// Passes through any error the remote permission reports.
    pub fn scope_type(&self) -> Result<Option<String>, AclError> {
        match &self.backing {
            Backing::Pending { params } => Ok(bag_string(params, KEY_TYPE)),
            Backing::Committed { permission, .. } => permission.scope_type(),
        }
    }

    /// The value of the scope.
    ///
    /// An email address for `user` and `group`, a domain for `domain`, and
    /// nothing for `anyone`.
    ///
    /// # Errors
    ///
    /// Passes through any error the remote permission reports.
    pub fn value(&self) -> Result<Option<String>, AclError> {
        match &self.backing {
            Backing::Pending { params } => Ok(bag_string(params, KEY_VALUE)),
            Backing::Committed { permission, .. } => {
                let Some(ty) = permission.scope_type()? else {
                    return Ok(None);
                };
                match ScopeType::parse(&ty) {
                    Some(ScopeType::User | ScopeType::Group) => permission.email_address(),
                    Some(ScopeType::Domain) => permission.domain(),
                    Some(ScopeType::Anyone) | None => Ok(None),
                }
            }
        }
    }

    /// Alias of [`Self::value`] under its legacy name.
    ///
    /// # Errors
    ///
    /// Same as [`Self::value`].
    pub fn scope(&self) -> Result<Option<String>, AclError> {
        self.value()
    }

    /// Extra roles granted on top of [`Self::role`], e.g. `commenter`.
    ///
    /// # Errors
    ///
    /// Passes through any error the remote permission reports.
    pub fn additional_roles(&self) -> Result<Option<Vec<String>>, AclError> {
        match &self.backing {
            Backing::Pending { params } => Ok(params
                .get(KEY_ADDITIONAL_ROLES)
                .and_then(|v| serde_json::from_value(v.clone()).ok())),
            Backing::Committed { permission, .. } => permission.additional_roles(),
        }
    }

    /// Id assigned by the remote service. Pending entries normally have none.
    ///
    /// # Errors
    ///
    /// Passes through any error the remote permission reports.
    pub fn id(&self) -> Result<Option<String>, AclError> {
        match &self.backing {
            Backing::Pending { params } => Ok(bag_string(params, KEY_ID)),
            Backing::Committed { permission, .. } => permission.id(),
        }
    }

    /// If `true`, the resource is shared only with people who have the link.
    ///
    /// # Errors
    ///
    /// Passes through any error the remote permission reports.
    pub fn with_link(&self) -> Result<Option<bool>, AclError> {
        match &self.backing {
            Backing::Pending { params } => Ok(params.get(KEY_WITH_LINK).and_then(Value::as_bool)),
            Backing::Committed { permission, .. } => permission.with_link(),
        }
    }

    /// Alias of [`Self::with_link`] under its legacy name.
    ///
    /// # Errors
    ///
    /// Same as [`Self::with_link`].
    pub fn with_key(&self) -> Result<Option<bool>, AclError> {
        self.with_link()
    }

    /// Change the role of the scope.
    ///
    /// A pending entry just updates its bag. A committed entry writes the role
    /// to its permission and then asks the owning collection to persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::CollectionDropped`] when a committed entry's owner
    /// is gone, and otherwise whatever the permission or the collection report.
    pub fn set_role(&mut self, role: Role) -> Result<(), AclError> {
        let owner = match &mut self.backing {
            Backing::Pending { params } => {
                params.insert(KEY_ROLE, role.as_str());
                return Ok(());
            }
            Backing::Committed {
                permission,
                collection,
            } => {
                let owner = collection.upgrade().ok_or(AclError::CollectionDropped)?;
                permission.set_role(role)?;
                owner
            }
        };

        tracing::debug!(%role, "propagating role change to owning ACL");
        owner.update_role(self)
    }

    /// Swap the permission behind a committed entry, e.g. for the copy the
    /// service returned after [`AclCollection::update_role`]. The owning
    /// collection is kept.
    ///
    /// Returns the previous permission, or `None` (leaving the entry
    /// untouched) when the entry is pending.
    pub fn replace_permission<P>(&mut self, permission: P) -> Option<Box<dyn Permission>>
    where
        P: Permission + 'static,
    {
        match &mut self.backing {
            Backing::Pending { .. } => None,
            Backing::Committed {
                permission: current,
                ..
            } => Some(std::mem::replace(current, Box::new(permission))),
        }
    }

    const fn tag(&self) -> &'static str {
        match self.backing {
            Backing::Pending { .. } => "AclEntry::Pending",
            Backing::Committed { .. } => "AclEntry::Committed",
        }
    }
}

fn bag_string(params: &EntryParams, key: &str) -> Option<String> {
    params.get_str(key).map(str::to_owned)
}

impl fmt::Debug for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.tag())
            .field("type", &self.scope_type().ok().flatten())
            .field("value", &self.value().ok().flatten())
            .field("role", &self.role().ok().flatten())
            .finish()
    }
}
