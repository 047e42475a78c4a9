use super::*;

const SENSITIVITY_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

pub(super) async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsBody> {
    Json(*state.settings.read().await)
}

pub(super) async fn toggle_mode(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ToggleModeRequest>,
) -> Result<Json<AckBody>, Response> {
    reject_if_configured(&state)?;
    state.settings.write().await.is_armed = payload.is_armed;
    tracing::info!(armed = payload.is_armed, "mode updated");
    Ok(ack(if payload.is_armed {
        "System armed"
    } else {
        "System disarmed"
    }))
}

pub(super) async fn set_sensitivity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SensitivityRequest>,
) -> Result<Json<AckBody>, Response> {
    reject_if_configured(&state)?;
    if !SENSITIVITY_RANGE.contains(&payload.sensitivity) {
        return Err(bad_request(anyhow::anyhow!(
            "sensitivity must be between {} and {}",
            SENSITIVITY_RANGE.start(),
            SENSITIVITY_RANGE.end()
        )));
    }
    state.settings.write().await.motion_sensitivity = payload.sensitivity as u8;
    tracing::info!(sensitivity = payload.sensitivity, "sensitivity updated");
    Ok(ack("Sensitivity updated"))
}

pub(super) async fn set_notification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NotificationRequest>,
) -> Result<Json<AckBody>, Response> {
    reject_if_configured(&state)?;
    state.settings.write().await.send_notification = payload.send_notification;
    tracing::info!(enabled = payload.send_notification, "notification updated");
    Ok(ack("Notification setting updated"))
}

fn reject_if_configured(state: &AppState) -> Result<(), Response> {
    if state.reject_settings {
        tracing::warn!("rejecting settings update (--reject-settings)");
        return Err(unavailable("settings updates are disabled"));
    }
    Ok(())
}

fn ack(message: &str) -> Json<AckBody> {
    Json(AckBody {
        message: message.to_string(),
    })
}
