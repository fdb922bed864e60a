use crate::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::RemoveArgs;
use crate::output::output;
use crate::store;

/// Handle `shareacl remove`.
pub fn handle(args: &RemoveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let acl = store::load(&ctx.store_path)?;
    let removed = acl.remove(&args.id)?;
    store::save(&ctx.store_path, &acl)?;
    tracing::info!(id = %args.id, "removed permission");
    output(&removed, flags.format)
}
