use crate::error::TransportError;
use crate::model::{ClipId, RawClip};
use crate::remote::{DeleteAck, RemoteClient};

/// One-shot fetch of every clip currently known to the remote store.
///
/// Implementations perform exactly one request and do not retry.
pub trait SnapshotLoader: Send + Sync {
    fn load(&self) -> Result<Vec<RawClip>, TransportError>;
}

/// Remote side of a user-initiated deletion.
pub trait ClipDeleter: Send + Sync {
    fn delete(&self, id: &ClipId) -> Result<DeleteAck, TransportError>;
}

impl SnapshotLoader for RemoteClient {
    fn load(&self) -> Result<Vec<RawClip>, TransportError> {
        self.list_clips()
    }
}

impl ClipDeleter for RemoteClient {
    fn delete(&self, id: &ClipId) -> Result<DeleteAck, TransportError> {
        self.delete_clip(id)
    }
}
