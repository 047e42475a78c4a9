use clap::Args;

/// `--url` and `--token` come from the global arguments.
#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,
}
