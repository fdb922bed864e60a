use clap::{Args, Subcommand};
use serde_json::Value;
use shareacl_core::Role;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Normalize parameters into a pending entry and show it.
    Normalize(PairsArgs),
    /// List committed entries in the store.
    List,
    /// Commit a new entry to the store.
    Share(PairsArgs),
    /// Change the role of a committed entry.
    SetRole(SetRoleArgs),
    /// Remove a committed entry from the store.
    Remove(RemoveArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PairsArgs {
    /// Entry parameters as KEY=VALUE (VALUE is parsed as JSON when possible)
    #[arg(required = true, value_parser = parse_pair)]
    pub pairs: Vec<(String, Value)>,
}

#[derive(Clone, Debug, Args)]
pub struct SetRoleArgs {
    /// Permission id
    pub id: String,
    /// New role: owner, writer, reader
    #[arg(value_parser = parse_role)]
    pub role: Role,
}

#[derive(Clone, Debug, Args)]
pub struct RemoveArgs {
    /// Permission id
    pub id: String,
}

fn parse_pair(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_owned(), value))
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| format!("unknown role '{raw}' (expected owner, writer, reader)"))
}
