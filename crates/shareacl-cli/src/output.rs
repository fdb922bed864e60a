use serde::Serialize;
use shareacl_core::{AclEntry, AclError};

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Resolved fields of an entry, as the entry accessors report them.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub state: &'static str,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub scope_type: Option<String>,
    pub value: Option<String>,
    pub role: Option<String>,
    pub with_link: Option<bool>,
    pub additional_roles: Option<Vec<String>>,
}

impl EntryView {
    pub fn from_entry(entry: &AclEntry) -> Result<Self, AclError> {
        Ok(Self {
            state: if entry.is_pending() {
                "pending"
            } else {
                "committed"
            },
            id: entry.id()?,
            scope_type: entry.scope_type()?,
            value: entry.value()?,
            role: entry.role()?,
            with_link: entry.with_link()?,
            additional_roles: entry.additional_roles()?,
        })
    }
}
