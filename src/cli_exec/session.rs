use super::*;

pub(super) fn handle_login_command(global: &GlobalArgs, timeout: Option<u64>) -> Result<()> {
    let url = global.url.clone().context("login requires --url")?;
    let token = global.token.clone().context("login requires --token")?;
    let store = ConfigStore::open_or_init(&store_dir(global)?)?;
    let mut cfg = store.read_config()?;
    let mut remote = clipwatch::model::RemoteConfig::new(url);
    remote.request_timeout_secs = timeout;
    store
        .set_remote_token(&remote, &token)
        .context("store remote token in state.json")?;
    println!("Logged in to {}", remote.base_url);
    cfg.remote = Some(remote);
    store.write_config(&cfg)?;
    Ok(())
}

pub(super) fn handle_logout_command(global: &GlobalArgs) -> Result<()> {
    let store = ConfigStore::open(&store_dir(global)?)?;
    let cfg = store.read_config()?;
    let remote = cfg
        .remote
        .context("no remote configured (run `clipwatch login --url ... --token ...`)")?;
    store
        .clear_remote_token(&remote)
        .context("clear remote token")?;
    println!("Logged out");
    Ok(())
}
