use super::*;

impl RemoteClient {
    /// Opens the clip-creation push stream (newline-delimited JSON).
    pub fn open_event_stream(&self) -> Result<Box<dyn BufRead + Send>, TransportError> {
        let req = self
            .stream_client
            .get(self.url("/api/clips/events"))
            .header(reqwest::header::ACCEPT, "application/x-ndjson");
        let resp = self.send(req, "open clip events")?;
        Ok(Box::new(BufReader::new(resp)))
    }
}
