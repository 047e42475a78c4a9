use super::*;

impl RemoteClient {
    pub fn get_settings(&self) -> Result<DeviceSettings, TransportError> {
        let resp = self.send(self.client.get(self.url("/api/get_settings")), "get settings")?;
        let out: SettingsResponse = self.read_json(resp, "get settings")?;
        Ok(out.into())
    }

    /// Sends one setting change; `Ok` means the remote store committed it.
    pub fn put_setting(&self, value: SettingValue) -> Result<AckResponse, TransportError> {
        let req = match value {
            SettingValue::Armed(is_armed) => self
                .client
                .post(self.url("/api/toggle_mode"))
                .json(&ToggleModeRequest { is_armed }),
            SettingValue::Sensitivity(sensitivity) => self
                .client
                .post(self.url("/api/set_sensitivity"))
                .json(&SensitivityRequest { sensitivity }),
            SettingValue::Notification(send_notification) => self
                .client
                .post(self.url("/api/set_notification"))
                .json(&NotificationRequest { send_notification }),
        };
        let op = format!("set {}", value.setting());
        let resp = self.send(req, &op)?;
        // Older stores acknowledge with an empty body.
        let bytes = resp.bytes().map_err(|err| TransportError::request(&op, err))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(AckResponse::default());
        }
        serde_json::from_slice(&bytes).map_err(|err| TransportError::decode(&op, err))
    }
}
