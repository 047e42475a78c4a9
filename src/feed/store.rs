use std::collections::HashMap;

use crate::error::MalformedRecordError;
use crate::model::{Clip, ClipId, RawClip};

use super::FeedView;

#[derive(Clone, Debug)]
struct Entry {
    clip: Clip,
    // Arrival order; only used to carry records across a resynchronization.
    seq: u64,
}

/// Outcome of merging one snapshot batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotIngest {
    pub inserted: usize,
    /// Records whose id was already present (typically delivered live first).
    pub duplicates: usize,
    pub rejected: Vec<MalformedRecordError>,
}

/// The id → clip mapping behind the dashboard feed.
///
/// Merging is commutative and idempotent: whichever source delivers an id
/// first wins, later deliveries of the same id are no-ops, and the grouped
/// view depends only on which ids are present.
#[derive(Clone, Debug, Default)]
pub struct FeedStore {
    clips: HashMap<ClipId, Entry>,
    // Only recorded between `sequence_mark` and `stop_tracking`.
    removals: Vec<(u64, ClipId)>,
    tracking: bool,
    next_seq: u64,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest_snapshot<I>(&mut self, records: I) -> SnapshotIngest
    where
        I: IntoIterator<Item = RawClip>,
    {
        let mut report = SnapshotIngest::default();
        for raw in records {
            match Clip::try_from(raw) {
                Ok(clip) => {
                    if self.insert(clip) {
                        report.inserted += 1;
                    } else {
                        report.duplicates += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "rejected snapshot record");
                    report.rejected.push(err);
                }
            }
        }
        report
    }

    /// Returns whether the clip was new.
    pub fn ingest_live(&mut self, raw: RawClip) -> Result<bool, MalformedRecordError> {
        let clip = Clip::try_from(raw)?;
        Ok(self.insert(clip))
    }

    /// Removes an acknowledged deletion. Absent ids are not an error.
    pub fn remove(&mut self, id: &ClipId) -> bool {
        let seq = self.bump();
        if self.tracking {
            self.removals.push((seq, id.clone()));
        }
        self.clips.remove(id).is_some()
    }

    pub fn get(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.get(id).map(|e| &e.clip)
    }

    pub fn contains(&self, id: &ClipId) -> bool {
        self.clips.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn view(&self) -> FeedView {
        FeedView::project(self.clips.values().map(|e| &e.clip))
    }

    /// Marks the current point in arrival order and starts recording
    /// removals from it; see [`FeedStore::carry_over_since`].
    pub fn sequence_mark(&mut self) -> u64 {
        self.removals.clear();
        self.tracking = true;
        self.next_seq
    }

    /// Drops recorded removals, e.g. after a resynchronization was abandoned.
    pub fn stop_tracking(&mut self) {
        self.removals.clear();
        self.tracking = false;
    }

    /// Replays onto `self` every insertion and removal `older` saw at or after
    /// `mark`. Used when a freshly loaded store replaces `older`, so records
    /// that arrived (or were deleted) while the fresh snapshot was in flight
    /// are not lost. Returns the number of records carried over.
    pub fn carry_over_since(&mut self, older: &FeedStore, mark: u64) -> usize {
        let mut events: Vec<(u64, Option<&Clip>, &ClipId)> = older
            .clips
            .values()
            .filter(|e| e.seq >= mark)
            .map(|e| (e.seq, Some(&e.clip), &e.clip.id))
            .chain(
                older
                    .removals
                    .iter()
                    .filter(|(seq, _)| *seq >= mark)
                    .map(|(seq, id)| (*seq, None, id)),
            )
            .collect();
        events.sort_by_key(|(seq, _, _)| *seq);

        let mut carried = 0;
        for (_, clip, id) in events {
            match clip {
                Some(clip) => {
                    if self.insert(clip.clone()) {
                        carried += 1;
                    }
                }
                None => {
                    self.remove(id);
                }
            }
        }
        carried
    }

    fn insert(&mut self, clip: Clip) -> bool {
        if self.clips.contains_key(&clip.id) {
            return false;
        }
        let seq = self.bump();
        self.clips.insert(clip.id.clone(), Entry { clip, seq });
        true
    }

    fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
#[path = "../tests/feed/store_tests.rs"]
mod tests;
