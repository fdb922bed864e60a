//! Contract for remote permission objects, plus a serde model of the
//! permission resource.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::Role;
use crate::errors::AclError;

/// A permission object returned by the remote service after an entry was
/// committed.
///
/// These are exactly the fields a committed [`crate::AclEntry`] reads or
/// writes. Scope identity is exposed per type: `email_address` for users and
/// groups, `domain` for domains. Readers may fail (e.g. remote state was
/// malformed); the entry passes such errors through untouched.
/// [`ApiPermission`] never fails.
pub trait Permission: fmt::Debug + Send + Sync {
    /// The granted role.
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be read.
    fn role(&self) -> Result<Option<String>, AclError>;

    /// The scope type (`type` on the wire).
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be read.
    fn scope_type(&self) -> Result<Option<String>, AclError>;

    /// Roles granted on top of [`Self::role`].
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be read.
    fn additional_roles(&self) -> Result<Option<Vec<String>>, AclError>;

    /// The id the service assigned.
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be read.
    fn id(&self) -> Result<Option<String>, AclError>;

    /// Whether access requires the link.
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be read.
    fn with_link(&self) -> Result<Option<bool>, AclError>;

    /// Scope identifier of `user` and `group` permissions.
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be read.
    fn email_address(&self) -> Result<Option<String>, AclError>;

    /// Scope identifier of `domain` permissions.
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be read.
    fn domain(&self) -> Result<Option<String>, AclError>;

    /// Write a new role to the remote object.
    ///
    /// # Errors
    ///
    /// Fails when the remote state cannot be written.
    fn set_role(&mut self, role: Role) -> Result<(), AclError>;
}

/// The permission resource as the remote service serializes it.
///
/// Every field is optional and unvalidated; the service owns validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiPermission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_link: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_roles: Option<Vec<String>>,
    /// Human-readable name of the grantee, when the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Fields this crate does not model, kept so they survive a round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiPermission {
    /// Wire names of the fields modelled above. Anything else lands in `extra`.
    pub const KNOWN_FIELDS: [&'static str; 8] = [
        "id",
        "type",
        "role",
        "emailAddress",
        "domain",
        "withLink",
        "additionalRoles",
        "displayName",
    ];
}

impl Permission for ApiPermission {
    fn role(&self) -> Result<Option<String>, AclError> {
        Ok(self.role.clone())
    }

    fn scope_type(&self) -> Result<Option<String>, AclError> {
        Ok(self.scope_type.clone())
    }

    fn additional_roles(&self) -> Result<Option<Vec<String>>, AclError> {
        Ok(self.additional_roles.clone())
    }

    fn id(&self) -> Result<Option<String>, AclError> {
        Ok(self.id.clone())
    }

    fn with_link(&self) -> Result<Option<bool>, AclError> {
        Ok(self.with_link)
    }

    fn email_address(&self) -> Result<Option<String>, AclError> {
        Ok(self.email_address.clone())
    }

    fn domain(&self) -> Result<Option<String>, AclError> {
        Ok(self.domain.clone())
    }

    fn set_role(&mut self, role: Role) -> Result<(), AclError> {
        self.role = Some(role.as_str().to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_resource() {
        let raw = json!({
            "id": "12345",
            "type": "user",
            "role": "writer",
            "emailAddress": "a@example.com",
            "withLink": false,
            "additionalRoles": ["commenter"],
            "kind": "drive#permission"
        });
        let perm: ApiPermission = serde_json::from_value(raw).unwrap();
        assert_eq!(perm.scope_type.as_deref(), Some("user"));
        assert_eq!(perm.email_address.as_deref(), Some("a@example.com"));
        assert_eq!(perm.additional_roles, Some(vec!["commenter".to_owned()]));
        assert_eq!(perm.domain, None);
        assert_eq!(perm.extra.get("kind"), Some(&json!("drive#permission")));
    }

    #[test]
    fn unmodelled_fields_round_trip() {
        let raw = json!({"id": "p1", "role": "reader", "allowFileDiscovery": true});
        let perm: ApiPermission = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(perm.extra.len(), 1);
        assert_eq!(serde_json::to_value(&perm).unwrap(), raw);
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let perm = ApiPermission {
            scope_type: Some("anyone".into()),
            role: Some("reader".into()),
            ..ApiPermission::default()
        };
        assert_eq!(
            serde_json::to_value(&perm).unwrap(),
            json!({"type": "anyone", "role": "reader"})
        );
    }

    #[test]
    fn set_role_overwrites_role_only() {
        let mut perm = ApiPermission {
            id: Some("p1".into()),
            role: Some("reader".into()),
            ..ApiPermission::default()
        };
        perm.set_role(Role::Owner).unwrap();
        assert_eq!(perm.role.as_deref(), Some("owner"));
        assert_eq!(perm.id.as_deref(), Some("p1"));
    }
}
