use clap::Subcommand;

pub(crate) mod feed;
pub(crate) mod session;
pub(crate) mod settings;

pub(crate) use self::settings::SettingsCommands;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in to a remote store (configure remote + store token)
    Login(session::LoginArgs),

    /// Log out (clear stored remote token)
    Logout,

    /// List clips grouped by day, newest first
    Clips(feed::ClipsArgs),

    /// Print clips as the remote store records them
    Watch(feed::WatchArgs),

    /// Delete a clip
    Delete(feed::DeleteArgs),

    /// Download a clip's video
    Download(feed::DownloadArgs),

    /// Show or change device settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}
