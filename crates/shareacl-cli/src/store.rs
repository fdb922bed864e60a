//! JSON file persistence for the CLI's [`MemoryAcl`].
//!
//! The file holds an array of permission resources. A missing file reads as
//! an empty ACL. Writes go through a temp file in the same directory and are
//! renamed into place.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use shareacl_core::{ApiPermission, MemoryAcl};

pub fn load(path: &Path) -> anyhow::Result<Arc<MemoryAcl>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no ACL store yet; starting empty");
        return Ok(MemoryAcl::new());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read ACL store {}", path.display()))?;
    let permissions: Vec<ApiPermission> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse ACL store {}", path.display()))?;
    Ok(MemoryAcl::from_permissions(permissions))
}

pub fn save(path: &Path, acl: &MemoryAcl) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create store directory {}", dir.display()))?;

    let json = serde_json::to_string_pretty(&acl.permissions())?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("failed to write ACL store {}", path.display()))?;
    Ok(())
}
