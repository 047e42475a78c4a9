use super::feed::{
    handle_clips_command, handle_delete_command, handle_download_command, handle_watch_command,
};
use super::session::{handle_login_command, handle_logout_command};
use super::settings::handle_settings_command;
use super::*;

pub(super) fn handle_command(global: &GlobalArgs, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(global, args.timeout)?,
        Commands::Logout => handle_logout_command(global)?,
        Commands::Clips(args) => with_client(global, |c| handle_clips_command(&c, args.json))?,
        Commands::Watch(args) => with_client(global, |c| handle_watch_command(&c, args.json))?,
        Commands::Delete(args) => {
            with_client(global, |c| handle_delete_command(&c, &args.clip_id))?
        }
        Commands::Download(args) => with_client(global, |c| {
            handle_download_command(&c, &args.clip_id, args.out)
        })?,
        Commands::Settings { command } => {
            with_client(global, |c| handle_settings_command(c, command))?
        }
    }
    Ok(())
}
