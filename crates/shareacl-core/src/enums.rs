//! Role and scope type enums.
//!
//! Both enums use `snake_case` serialization. Entry accessors hand out the raw
//! strings stored in the parameter bag or the remote permission; these types
//! are for callers (and the entry itself) that need a typed view.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Access level granted to a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The owner.
    Owner,
    /// Read/write access.
    Writer,
    /// Read-only access.
    Reader,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Owner, Self::Writer, Self::Reader];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Writer => "writer",
            Self::Reader => "reader",
        }
    }

    /// Parse the wire form. Unknown strings yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ScopeType
// ---------------------------------------------------------------------------

/// Kind of scope a permission is bound to.
///
/// ```text
/// user    value is a user's email address
/// group   value is a group email address
/// domain  value is a domain name
/// anyone  public; there is no value
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScopeType {
    User,
    Group,
    Domain,
    Anyone,
}

impl ScopeType {
    pub const ALL: [Self; 4] = [Self::User, Self::Group, Self::Domain, Self::Anyone];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Domain => "domain",
            Self::Anyone => "anyone",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == s)
    }

    /// Whether the scope is identified by an email address.
    #[must_use]
    pub const fn uses_email(self) -> bool {
        matches!(self, Self::User | Self::Group)
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
