use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use super::*;

#[derive(Parser)]
#[command(name = "clipwatch-server")]
#[command(about = "Clipwatch remote store (development)", long_about = None)]
pub(super) struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Development bearer token
    #[arg(long, default_value = "dev")]
    dev_token: String,

    /// Fail every settings update with 503
    #[arg(long)]
    reject_settings: bool,

    /// Directory holding clip images and videos
    #[arg(long)]
    media_dir: Option<PathBuf>,

    /// Idle interval between live-stream heartbeats, in milliseconds
    #[arg(long, default_value_t = 1000)]
    heartbeat_ms: u64,
}

pub(super) fn build_state(args: &Args) -> Arc<AppState> {
    let (events, _) = broadcast::channel(EVENT_BUFFER);
    Arc::new(AppState {
        dev_token: args.dev_token.clone(),
        reject_settings: args.reject_settings,
        media_dir: args.media_dir.clone(),
        heartbeat: Duration::from_millis(args.heartbeat_ms.max(1)),
        clips: RwLock::new(BTreeMap::new()),
        settings: RwLock::new(SettingsBody::default()),
        next_clip: RwLock::new(0),
        events,
    })
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CLIPWATCH_LOG")
                .unwrap_or_else(|_| EnvFilter::new("clipwatch_server=info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    if let Some(dir) = &args.media_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create media dir {}", dir.display()))?;
    }

    let state = build_state(&args);
    let app = build_app_router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("clipwatch-server listening on {}", local_addr);
    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
