use super::*;

/// Media names are single path components inside the media dir.
pub(super) fn validate_media_name(name: &str) -> Result<(), Response> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(bad_request(anyhow::anyhow!("invalid media name")));
    }
    Ok(())
}

fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

pub(super) async fn read_media(state: &AppState, name: &str) -> Result<Vec<u8>, Response> {
    validate_media_name(name)?;
    let Some(dir) = state.media_dir.as_ref() else {
        return Err(not_found());
    };
    match tokio::fs::read(dir.join(name)).await {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
        Err(err) => Err(internal_error(
            anyhow::Error::new(err).context(format!("read media {}", name)),
        )),
    }
}

pub(super) async fn remove_media(state: &AppState, name: &str) {
    if validate_media_name(name).is_err() {
        return;
    }
    let Some(dir) = state.media_dir.as_ref() else {
        return;
    };
    if let Err(err) = tokio::fs::remove_file(dir.join(name)).await
        && err.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(name, error = %err, "failed to remove media file");
    }
}

pub(super) fn media_response(name: &str, bytes: Vec<u8>, attachment: bool) -> Response {
    let disposition = if attachment {
        format!("attachment; filename=\"{}\"", name)
    } else {
        "inline".to_string()
    };
    (
        [
            (header::CONTENT_TYPE, content_type_for(name).to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        axum::body::Bytes::from(bytes),
    )
        .into_response()
}
