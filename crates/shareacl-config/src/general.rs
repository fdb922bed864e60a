//! General application configuration.

use serde::{Deserialize, Serialize};
use shareacl_core::Role;

use crate::error::ConfigError;

fn default_role() -> String {
    Role::Reader.as_str().to_owned()
}

fn default_log_level() -> String {
    "warn".to_owned()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Role given to new entries when the caller does not pass one.
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Log filter used when neither `SHAREACL_LOG` nor a CLI flag sets one.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl GeneralConfig {
    /// `default_role` as a typed [`Role`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the configured string is not a
    /// known role.
    pub fn role(&self) -> Result<Role, ConfigError> {
        Role::parse(&self.default_role).ok_or_else(|| ConfigError::InvalidValue {
            field: "general.default_role".into(),
            reason: format!(
                "'{}' is not one of owner, writer, reader",
                self.default_role
            ),
        })
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            log_level: default_log_level(),
        }
    }
}
