use super::*;

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        op: &str,
    ) -> Result<reqwest::blocking::Response, TransportError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let op = op.to_string();
        Err(match status {
            reqwest::StatusCode::UNAUTHORIZED => TransportError::Unauthorized { op },
            reqwest::StatusCode::FORBIDDEN => TransportError::Forbidden { op },
            reqwest::StatusCode::NOT_FOUND => TransportError::NotFound { op },
            other => TransportError::Status {
                op,
                status: other.as_u16(),
            },
        })
    }

    /// Attaches credentials, sends, and maps non-success statuses.
    pub(super) fn send(
        &self,
        req: reqwest::blocking::RequestBuilder,
        op: &str,
    ) -> Result<reqwest::blocking::Response, TransportError> {
        let resp = req
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .map_err(|err| TransportError::request(op, err))?;
        self.ensure_ok(resp, op)
    }

    pub(super) fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::blocking::Response,
        op: &str,
    ) -> Result<T, TransportError> {
        resp.json().map_err(|err| TransportError::decode(op, err))
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.remote.base_url, path)
    }

    /// `path` with one trailing, percent-encoded segment (ids and media refs are opaque).
    pub(super) fn segment_url(&self, path: &str, segment: &str) -> Result<reqwest::Url, TransportError> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|err| TransportError::request(path, err))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::request(path, "base url cannot carry a path"))?
            .push(segment);
        Ok(url)
    }
}
