use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub(crate) struct ClipsArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Emit one JSON object per line
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    pub(crate) clip_id: String,
}

#[derive(Args)]
pub(crate) struct DownloadArgs {
    pub(crate) clip_id: String,
    /// Destination file (defaults to <clip_id>.mp4)
    #[arg(long, value_name = "PATH")]
    pub(crate) out: Option<PathBuf>,
}
