use std::sync::Arc;

use anyhow::{Context, Result};

use clipwatch::remote::RemoteClient;
use clipwatch::store::ConfigStore;

use crate::cli_runtime::{GlobalArgs, resolve_client, store_dir};
use crate::{Commands, SettingsCommands};

mod dispatch;
mod feed;
mod session;
mod settings;

pub(super) fn handle_command(global: &GlobalArgs, command: Commands) -> Result<()> {
    dispatch::handle_command(global, command)
}

fn with_client<F>(global: &GlobalArgs, f: F) -> Result<()>
where
    F: FnOnce(Arc<RemoteClient>) -> Result<()>,
{
    let client = resolve_client(global)?;
    f(Arc::new(client))
}
