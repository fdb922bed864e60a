use shareacl_core::{AclEntry, MemoryAcl, Role};

use crate::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PairsArgs;
use crate::output::{EntryView, output};
use crate::store;

/// Handle `shareacl share`.
pub fn handle(args: &PairsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let default_role = ctx.config.general.role()?;
    let acl = store::load(&ctx.store_path)?;
    let entry = commit(&acl, args, default_role)?;
    store::save(&ctx.store_path, &acl)?;
    output(&EntryView::from_entry(&entry)?, flags.format)
}

fn commit(acl: &MemoryAcl, args: &PairsArgs, default_role: Role) -> anyhow::Result<AclEntry> {
    let mut pending = AclEntry::from_params(args.pairs.iter().cloned());
    if pending.role()?.is_none() {
        pending.set_role(default_role)?;
    }

    let params = pending
        .params()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("freshly built entry is not pending"))?;
    Ok(acl.push(params)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn pairs(raw: &[(&str, Value)]) -> PairsArgs {
        PairsArgs {
            pairs: raw.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect(),
        }
    }

    #[test]
    fn missing_role_uses_configured_default() {
        let acl = MemoryAcl::new();
        let entry = commit(
            &acl,
            &pairs(&[("type", json!("user")), ("value", json!("a@example.com"))]),
            Role::Writer,
        )
        .unwrap();
        assert_eq!(entry.role().unwrap().as_deref(), Some("writer"));
        assert_eq!(acl.len(), 1);
    }

    #[test]
    fn explicit_role_is_kept() {
        let acl = MemoryAcl::new();
        let entry = commit(
            &acl,
            &pairs(&[("scope_type", json!("default")), ("role", json!("owner"))]),
            Role::Reader,
        )
        .unwrap();
        assert_eq!(entry.role().unwrap().as_deref(), Some("owner"));
        assert_eq!(entry.scope_type().unwrap().as_deref(), Some("anyone"));
    }
}
