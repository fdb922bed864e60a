//! In-memory ACL collection.
//!
//! `MemoryAcl` plays the part of the remote service and the owning collection
//! at once: committing a pending entry stores an [`ApiPermission`] and hands
//! back a committed [`AclEntry`] wired to this collection. The CLI loads it
//! from and saves it to a JSON file.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use anyhow::anyhow;

use crate::collection::AclCollection;
use crate::entry::AclEntry;
use crate::enums::ScopeType;
use crate::errors::AclError;
use crate::ids::{PREFIX_PERMISSION, generate_id};
use crate::params::{
    EntryParams, KEY_ADDITIONAL_ROLES, KEY_ID, KEY_ROLE, KEY_TYPE, KEY_VALUE, KEY_WITH_LINK,
};
use crate::permission::ApiPermission;

/// Fresh ids drawn before `push` gives up on finding an unused one.
const MAX_ID_ATTEMPTS: usize = 16;

/// Bag keys `push` maps onto modelled permission fields.
const MAPPED_KEYS: [&str; 6] = [
    KEY_ROLE,
    KEY_TYPE,
    KEY_VALUE,
    KEY_ADDITIONAL_ROLES,
    KEY_ID,
    KEY_WITH_LINK,
];

pub struct MemoryAcl {
    this: Weak<Self>,
    permissions: RwLock<Vec<ApiPermission>>,
}

impl MemoryAcl {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::from_permissions(Vec::new())
    }

    /// Build a collection over permissions previously returned by the service.
    #[must_use]
    pub fn from_permissions(permissions: Vec<ApiPermission>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            permissions: RwLock::new(permissions),
        })
    }

    /// Commit a pending description and return the committed entry.
    ///
    /// `value` is stored as `emailAddress` for users and groups and as
    /// `domain` for domains. Unknown scope types are stored without a scope
    /// identifier. Any other key in the bag (e.g. `allowFileDiscovery`) is
    /// kept on the stored permission as an unmodelled field. The new id never
    /// repeats one already stored.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::Other`] if an unused id cannot be generated.
    pub fn push(&self, params: EntryParams) -> Result<AclEntry, AclError> {
        let display_name = params.get_str("displayName").map(str::to_owned);
        let extra = params
            .iter()
            .filter(|(key, _)| {
                !MAPPED_KEYS.contains(&key.as_str())
                    && !ApiPermission::KNOWN_FIELDS.contains(&key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let pending = AclEntry::pending(params);
        let scope_type = pending.scope_type()?;
        let value = pending.value()?;

        let mut permission = ApiPermission {
            scope_type: scope_type.clone(),
            role: pending.role()?,
            with_link: pending.with_link()?,
            additional_roles: pending.additional_roles()?,
            display_name,
            extra,
            ..ApiPermission::default()
        };

        match scope_type.as_deref().map(ScopeType::parse) {
            Some(Some(ty)) if ty.uses_email() => permission.email_address = value,
            Some(Some(ScopeType::Domain)) => permission.domain = value,
            Some(Some(_)) => {}
            Some(None) | None => {
                tracing::warn!(
                    scope_type = scope_type.as_deref().unwrap_or("<missing>"),
                    "committing permission with unrecognized scope type"
                );
            }
        }

        let mut permissions = self.write();
        permission.id = Some(unused_id(&permissions, || generate_id(PREFIX_PERMISSION))?);
        tracing::debug!(id = ?permission.id, "committed ACL entry");
        permissions.push(permission.clone());
        drop(permissions);
        Ok(self.wrap(permission))
    }

    /// Committed entries for every stored permission, in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<AclEntry> {
        self.read()
            .iter()
            .cloned()
            .map(|permission| self.wrap(permission))
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<AclEntry> {
        self.read()
            .iter()
            .find(|p| p.id.as_deref() == Some(id))
            .cloned()
            .map(|permission| self.wrap(permission))
    }

    /// Remove the permission with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::NotFound`] if no permission has this id.
    pub fn remove(&self, id: &str) -> Result<ApiPermission, AclError> {
        let mut permissions = self.write();
        let index = permissions
            .iter()
            .position(|p| p.id.as_deref() == Some(id))
            .ok_or_else(|| AclError::NotFound { id: id.to_owned() })?;
        Ok(permissions.remove(index))
    }

    /// Snapshot of the stored permissions.
    #[must_use]
    pub fn permissions(&self) -> Vec<ApiPermission> {
        self.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn wrap(&self, permission: ApiPermission) -> AclEntry {
        let owner: Weak<dyn AclCollection> = self.this.clone();
        AclEntry::from_remote(permission, owner)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<ApiPermission>> {
        self.permissions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ApiPermission>> {
        self.permissions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl fmt::Debug for MemoryAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryAcl")
            .field("permissions", &*self.read())
            .finish()
    }
}

/// Draw ids from `generate` until one is not taken by `stored`.
fn unused_id(
    stored: &[ApiPermission],
    mut generate: impl FnMut() -> Result<String, AclError>,
) -> Result<String, AclError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = generate()?;
        if stored.iter().all(|p| p.id.as_deref() != Some(id.as_str())) {
            return Ok(id);
        }
        tracing::debug!(%id, "generated id already stored, drawing another");
    }
    Err(AclError::Other(anyhow!(
        "no unused permission id after {MAX_ID_ATTEMPTS} attempts"
    )))
}

impl AclCollection for MemoryAcl {
    fn update_role(&self, entry: &AclEntry) -> Result<(), AclError> {
        let id = entry.id()?.ok_or(AclError::MissingId)?;
        let role = entry.role()?;

        let mut permissions = self.write();
        let stored = permissions
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(id.as_str()))
            .ok_or_else(|| AclError::NotFound { id: id.clone() })?;

        tracing::debug!(%id, role = role.as_deref().unwrap_or("<none>"), "updating stored role");
        stored.role = role;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Role;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(pairs: serde_json::Value) -> EntryParams {
        EntryParams::from_json(&pairs).unwrap()
    }

    #[test]
    fn push_maps_value_by_scope_type() {
        let acl = MemoryAcl::new();
        acl.push(params(json!({"type": "user", "value": "a@example.com", "role": "reader"})))
            .unwrap();
        acl.push(params(json!({"scope_type": "domain", "scope": "example.com", "role": "writer"})))
            .unwrap();
        acl.push(params(json!({"scope_type": "default", "role": "reader", "with_key": true})))
            .unwrap();

        let stored = acl.permissions();
        assert_eq!(stored[0].email_address.as_deref(), Some("a@example.com"));
        assert_eq!(stored[0].domain, None);
        assert_eq!(stored[1].domain.as_deref(), Some("example.com"));
        assert_eq!(stored[1].email_address, None);
        assert_eq!(stored[2].scope_type.as_deref(), Some("anyone"));
        assert_eq!(stored[2].with_link, Some(true));
        assert!(stored.iter().all(|p| p.id.is_some()));
    }

    #[test]
    fn pushed_entry_is_committed_to_this_acl() {
        let acl = MemoryAcl::new();
        let entry = acl
            .push(params(json!({"type": "group", "value": "team@example.com", "role": "reader"})))
            .unwrap();

        assert!(entry.is_committed());
        assert_eq!(entry.value().unwrap().as_deref(), Some("team@example.com"));
        assert!(entry.id().unwrap().unwrap().starts_with("perm-"));
        assert!(entry.collection().is_some());
    }

    #[test]
    fn set_role_on_entry_updates_collection() {
        let acl = MemoryAcl::new();
        let mut entry = acl
            .push(params(json!({"type": "user", "value": "a@example.com", "role": "reader"})))
            .unwrap();
        let id = entry.id().unwrap().unwrap();

        entry.set_role(Role::Writer).unwrap();

        let fresh = acl.get(&id).unwrap();
        assert_eq!(fresh.role().unwrap().as_deref(), Some("writer"));
    }

    #[test]
    fn update_role_for_removed_permission_fails() {
        let acl = MemoryAcl::new();
        let mut entry = acl
            .push(params(json!({"type": "anyone", "role": "reader"})))
            .unwrap();
        let id = entry.id().unwrap().unwrap();
        acl.remove(&id).unwrap();

        let err = entry.set_role(Role::Writer).unwrap_err();
        assert!(matches!(err, AclError::NotFound { id: missing } if missing == id));
    }

    #[test]
    fn update_role_requires_an_id() {
        let acl = MemoryAcl::from_permissions(vec![ApiPermission {
            role: Some("reader".into()),
            ..ApiPermission::default()
        }]);
        let mut entry = acl.entries().pop().unwrap();
        let err = entry.set_role(Role::Owner).unwrap_err();
        assert!(matches!(err, AclError::MissingId));
    }

    #[test]
    fn push_keeps_unmodelled_keys() {
        let acl = MemoryAcl::new();
        acl.push(params(json!({
            "type": "anyone",
            "role": "reader",
            "allowFileDiscovery": false,
            "displayName": "Everyone"
        })))
        .unwrap();

        let stored = acl.permissions();
        assert_eq!(stored[0].extra.get("allowFileDiscovery"), Some(&json!(false)));
        assert_eq!(stored[0].display_name.as_deref(), Some("Everyone"));
        assert!(!stored[0].extra.contains_key("displayName"));
        assert!(!stored[0].extra.contains_key("role"));
        let wire = serde_json::to_value(&stored[0]).unwrap();
        assert_eq!(wire["allowFileDiscovery"], json!(false));
    }

    #[test]
    fn unused_id_skips_stored_ids() {
        let stored = vec![ApiPermission {
            id: Some("perm-00000001".into()),
            ..ApiPermission::default()
        }];
        let mut draws = ["perm-00000001", "perm-00000002"].into_iter();
        let id = unused_id(&stored, || Ok(draws.next().unwrap().to_owned())).unwrap();
        assert_eq!(id, "perm-00000002");
    }

    #[test]
    fn unused_id_gives_up_when_every_draw_collides() {
        let stored = vec![ApiPermission {
            id: Some("perm-00000001".into()),
            ..ApiPermission::default()
        }];
        let mut calls = 0;
        let err = unused_id(&stored, || {
            calls += 1;
            Ok("perm-00000001".to_owned())
        })
        .unwrap_err();
        assert!(matches!(err, AclError::Other(_)));
        assert_eq!(calls, MAX_ID_ATTEMPTS);
    }

    #[test]
    fn pushed_ids_are_distinct() {
        let acl = MemoryAcl::new();
        for _ in 0..32 {
            acl.push(params(json!({"type": "anyone", "role": "reader"})))
                .unwrap();
        }
        let mut ids: Vec<String> = acl.permissions().into_iter().filter_map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn debug_lists_stored_permissions() {
        let acl = MemoryAcl::from_permissions(vec![ApiPermission {
            id: Some("perm-deadbeef".into()),
            ..ApiPermission::default()
        }]);
        let shown = format!("{acl:?}");
        assert!(shown.starts_with("MemoryAcl"));
        assert!(shown.contains("perm-deadbeef"));
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let acl = MemoryAcl::new();
        assert!(matches!(
            acl.remove("perm-00000000"),
            Err(AclError::NotFound { .. })
        ));
        assert!(acl.is_empty());
    }
}
