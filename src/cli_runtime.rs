use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use clipwatch::model::RemoteConfig;
use clipwatch::remote::RemoteClient;
use clipwatch::store::ConfigStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "clipwatch")]
#[command(about = "Motion-capture clip dashboard", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) global: GlobalArgs,

    /// Write logs here while the dashboard owns the terminal
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Client configuration directory (defaults to ./.clipwatch)
    #[arg(long, env = "CLIPWATCH_HOME", global = true, value_name = "DIR")]
    pub(crate) home: Option<PathBuf>,

    /// Remote store base url (overrides the configured one)
    #[arg(long, env = "CLIPWATCH_URL", global = true)]
    pub(crate) url: Option<String>,

    /// Bearer token (overrides the stored one)
    #[arg(long, env = "CLIPWATCH_TOKEN", global = true, hide_env_values = true)]
    pub(crate) token: Option<String>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let client = resolve_client(&cli.global)?;
            clipwatch::tui::run(
                Arc::new(client),
                clipwatch::tui::TuiRunOptions {
                    log_file: cli.log_file,
                },
            )?;
        }
        Some(command) => {
            if cli.log_file.is_some() {
                anyhow::bail!("`--log-file` is only supported when running the TUI (no subcommand)");
            }
            clipwatch::logging::init_stderr();
            crate::cli_exec::handle_command(&cli.global, command)?
        }
    }

    Ok(())
}

pub(crate) fn store_dir(global: &GlobalArgs) -> Result<PathBuf> {
    match &global.home {
        Some(home) => Ok(home.clone()),
        None => Ok(ConfigStore::default_dir(
            &std::env::current_dir().context("get current dir")?,
        )),
    }
}

/// Remote and token from flags/env first, then the config store.
pub(crate) fn require_remote_and_token(global: &GlobalArgs) -> Result<(RemoteConfig, String)> {
    let dir = store_dir(global)?;
    let store = if dir.is_dir() {
        Some(ConfigStore::open(&dir)?)
    } else {
        None
    };

    let configured = match &store {
        Some(store) => store.read_config()?.remote,
        None => None,
    };
    let remote = match (&global.url, configured) {
        (Some(url), Some(cfg)) if RemoteConfig::new(url).base_url == cfg.base_url => cfg,
        (Some(url), _) => RemoteConfig::new(url),
        (None, Some(cfg)) => cfg,
        (None, None) => anyhow::bail!(
            "no remote configured (run `clipwatch login --url ... --token ...` or pass --url)"
        ),
    };

    let token = match (&global.token, &store) {
        (Some(token), _) => Some(token.clone()),
        (None, Some(store)) => store.get_remote_token(&remote)?,
        (None, None) => None,
    };
    let token = token.context(
        "no remote token configured (run `clipwatch login --url ... --token ...` or pass --token)",
    )?;
    Ok((remote, token))
}

pub(crate) fn resolve_client(global: &GlobalArgs) -> Result<RemoteClient> {
    let (remote, token) = require_remote_and_token(global)?;
    RemoteClient::new(remote, token).context("create remote client")
}
