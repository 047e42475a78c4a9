//! Clip listing, deletion, download, and media locators.

use std::fs;
use std::io::Write;

use super::*;

impl RemoteClient {
    /// Fetches every clip the remote store currently knows, in no particular order.
    pub fn list_clips(&self) -> Result<Vec<RawClip>, TransportError> {
        let resp = self.send(self.client.get(self.url("/api/clips")), "list clips")?;
        let values: Vec<serde_json::Value> = self.read_json(resp, "list clips")?;
        Ok(values.into_iter().map(RawClip::from_value).collect())
    }

    pub fn delete_clip(&self, id: &ClipId) -> Result<DeleteAck, TransportError> {
        let url = self.segment_url("/api/delete_clip", id.as_str())?;
        match self.send(self.client.delete(url), "delete clip") {
            Ok(_) => Ok(DeleteAck::Deleted),
            Err(err) if err.is_not_found() => Ok(DeleteAck::AlreadyAbsent),
            Err(err) => Err(err),
        }
    }

    /// Streams the clip's video into `dest`, returning the number of bytes written.
    pub fn download_clip(&self, id: &ClipId, dest: &Path) -> Result<u64, TransportError> {
        const OP: &str = "download clip";
        let url = self.segment_url("/api/download_clip", id.as_str())?;
        // Downloads can outlast the per-request timeout.
        let mut resp = self.send(self.stream_client.get(url), OP)?;

        let tmp = dest.with_extension(format!("part.{}", std::process::id()));
        let result = write_download(&mut resp, &tmp, dest);
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result.map_err(|err| TransportError::request(OP, err))
    }

    pub fn image_url(&self, image_ref: &str) -> Option<reqwest::Url> {
        if image_ref.is_empty() {
            return None;
        }
        self.segment_url("/api/image", image_ref).ok()
    }

    pub fn video_url(&self, video_ref: &str) -> Option<reqwest::Url> {
        if video_ref.is_empty() {
            return None;
        }
        self.segment_url("/api/video", video_ref).ok()
    }
}

// Writes into `tmp`, then renames over `dest`.
fn write_download(
    resp: &mut reqwest::blocking::Response,
    tmp: &Path,
    dest: &Path,
) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
    let mut file = fs::File::create(tmp)?;
    let written = resp.copy_to(&mut file)?;
    file.flush()?;
    drop(file);
    fs::rename(tmp, dest)?;
    Ok(written)
}
