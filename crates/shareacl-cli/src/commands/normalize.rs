use serde_json::json;
use shareacl_core::AclEntry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PairsArgs;
use crate::output::{EntryView, output};

/// Handle `shareacl normalize`.
pub fn handle(args: &PairsArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entry = AclEntry::from_params(args.pairs.iter().cloned());
    let view = EntryView::from_entry(&entry)?;
    output(
        &json!({
            "params": entry.params(),
            "entry": view,
        }),
        flags.format,
    )
}
