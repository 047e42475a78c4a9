use axum::body::{Body, Bytes};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use super::*;

pub(super) async fn list_clips(State(state): State<Arc<AppState>>) -> Json<Vec<ClipRecord>> {
    let clips = state.clips.read().await;
    Json(clips.values().cloned().collect())
}

/// Stands in for the capture backend: stores a clip and pushes it to every
/// live subscriber.
pub(super) async fn record_clip(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecordClipRequest>,
) -> Result<(StatusCode, Json<ClipRecord>), Response> {
    let now = OffsetDateTime::now_utc();
    let timestamp = match payload.timestamp {
        Some(ts) => ts,
        None => now
            .format(&Rfc3339)
            .map_err(|err| internal_error(anyhow::Error::new(err).context("format timestamp")))?,
    };
    let id = match payload.id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        Some(_) => return Err(bad_request(anyhow::anyhow!("clip id must not be empty"))),
        None => generated_id(&state, now).await?,
    };
    let record = ClipRecord {
        image_filename: payload
            .image_filename
            .unwrap_or_else(|| format!("{}.jpg", id)),
        video_filename: payload
            .video_filename
            .unwrap_or_else(|| format!("{}.mp4", id)),
        id,
        timestamp,
    };

    {
        let mut clips = state.clips.write().await;
        if clips.contains_key(&record.id) {
            return Err(conflict("clip already exists"));
        }
        clips.insert(record.id.clone(), record.clone());
    }
    tracing::info!(id = %record.id, "clip recorded");
    // No subscribers is fine.
    let _ = state.events.send(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn generated_id(state: &AppState, now: OffsetDateTime) -> Result<String, Response> {
    let stamp = now
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .map_err(|err| internal_error(anyhow::Error::new(err).context("format clip id")))?;
    let mut next = state.next_clip.write().await;
    *next += 1;
    Ok(format!("motion_{}_{}", stamp, *next))
}

pub(super) async fn delete_clip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AckBody>, Response> {
    let removed = state.clips.write().await.remove(&id);
    let Some(record) = removed else {
        return Err(not_found());
    };
    remove_media(&state, &record.image_filename).await;
    remove_media(&state, &record.video_filename).await;
    tracing::info!(%id, "clip deleted");
    Ok(Json(AckBody {
        message: format!("Deleted {}", id),
    }))
}

pub(super) async fn download_clip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let video = {
        let clips = state.clips.read().await;
        clips
            .get(&id)
            .map(|c| c.video_filename.clone())
            .ok_or_else(not_found)?
    };
    let bytes = read_media(&state, &video).await?;
    Ok(media_response(&video, bytes, true))
}

pub(super) async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, Response> {
    let bytes = read_media(&state, &name).await?;
    Ok(media_response(&name, bytes, false))
}

pub(super) async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, Response> {
    let bytes = read_media(&state, &name).await?;
    Ok(media_response(&name, bytes, false))
}

/// Newline-delimited JSON, one clip per line. Idle periods are filled with
/// blank heartbeat lines so clients notice a dead connection.
pub(super) async fn clip_events(State(state): State<Arc<AppState>>) -> Response {
    let rx = state.events.subscribe();
    let heartbeat = state.heartbeat;
    tracing::debug!("live subscriber connected");

    let stream = futures::stream::unfold(rx, move |mut rx| async move {
        let line = match tokio::time::timeout(heartbeat, rx.recv()).await {
            Err(_) => Bytes::from_static(b"\n"),
            Ok(Ok(record)) => match serde_json::to_vec(&record) {
                Ok(mut bytes) => {
                    bytes.push(b'\n');
                    Bytes::from(bytes)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to encode clip event");
                    Bytes::from_static(b"\n")
                }
            },
            Ok(Err(broadcast::error::RecvError::Lagged(n))) => {
                tracing::warn!(skipped = n, "live subscriber lagged");
                Bytes::from_static(b"\n")
            }
            Ok(Err(broadcast::error::RecvError::Closed)) => return None,
        };
        Some((Ok::<_, std::convert::Infallible>(line), rx))
    });

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(stream),
    )
        .into_response()
}
