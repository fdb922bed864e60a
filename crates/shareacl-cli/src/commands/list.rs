use crate::AppContext;
use crate::cli::GlobalFlags;
use crate::output::{EntryView, output};
use crate::store;

/// Handle `shareacl list`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let acl = store::load(&ctx.store_path)?;
    let views = acl
        .entries()
        .iter()
        .map(EntryView::from_entry)
        .collect::<Result<Vec<_>, _>>()?;
    output(&views, flags.format)
}
