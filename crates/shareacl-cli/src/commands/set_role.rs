use anyhow::Context;
use shareacl_core::{AclEntry, MemoryAcl, Role};

use crate::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SetRoleArgs;
use crate::output::{EntryView, output};
use crate::store;

/// Handle `shareacl set-role`.
pub fn handle(args: &SetRoleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let acl = store::load(&ctx.store_path)?;
    let entry = change_role(&acl, &args.id, args.role)?;
    store::save(&ctx.store_path, &acl)?;
    output(&EntryView::from_entry(&entry)?, flags.format)
}

fn change_role(acl: &MemoryAcl, id: &str, role: Role) -> anyhow::Result<AclEntry> {
    let mut entry = acl
        .get(id)
        .with_context(|| format!("no permission with id '{id}' in the ACL store"))?;
    entry
        .set_role(role)
        .with_context(|| format!("failed to change role of '{id}' to {role}"))?;
    Ok(entry)
}
