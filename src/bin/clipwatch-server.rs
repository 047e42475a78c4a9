//! Development remote store: in-memory clips and device settings behind the
//! same HTTP surface the dashboard consumes.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router, extract::Path};
use tokio::sync::{RwLock, broadcast};

#[path = "clipwatch_server/types.rs"]
mod types;
use self::types::*;
#[path = "clipwatch_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "clipwatch_server/media.rs"]
mod media;
use self::media::*;
#[path = "clipwatch_server/handlers_clips.rs"]
mod handlers_clips;
use self::handlers_clips::*;
#[path = "clipwatch_server/handlers_settings.rs"]
mod handlers_settings;
use self::handlers_settings::*;
#[path = "clipwatch_server/routes.rs"]
mod routes;
use self::routes::*;
#[path = "clipwatch_server/runtime.rs"]
mod runtime;

// Live subscribers that fall further behind than this lose records.
const EVENT_BUFFER: usize = 256;

struct AppState {
    dev_token: String,

    // Every settings update answers 503 (exercises optimistic reverts).
    reject_settings: bool,

    media_dir: Option<PathBuf>,
    heartbeat: Duration,

    clips: RwLock<BTreeMap<String, ClipRecord>>,
    settings: RwLock<SettingsBody>,
    next_clip: RwLock<u64>,

    events: broadcast::Sender<ClipRecord>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
