use crate::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Normalize(args) => commands::normalize::handle(&args, flags),
        Commands::List => commands::list::handle(ctx, flags),
        Commands::Share(args) => commands::share::handle(&args, ctx, flags),
        Commands::SetRole(args) => commands::set_role::handle(&args, ctx, flags),
        Commands::Remove(args) => commands::remove::handle(&args, ctx, flags),
    }
}
