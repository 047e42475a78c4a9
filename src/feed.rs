//! Clip feed reconciliation: snapshot + live records merged into one grouped view.

mod snapshot;
mod store;
mod view;

pub use self::snapshot::{ClipDeleter, SnapshotLoader};
pub use self::store::{FeedStore, SnapshotIngest};
pub use self::view::{DayGroup, FeedView};
