use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::model::{Clip, ClipId};

/// Clips captured on one calendar day, most recent first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    pub clips: Vec<Clip>,
}

/// Read-only grouped projection of the feed: days newest first, clips within
/// a day newest first, equal timestamps ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeedView {
    pub groups: Vec<DayGroup>,
}

impl FeedView {
    pub fn project<'a, I>(clips: I) -> Self
    where
        I: IntoIterator<Item = &'a Clip>,
    {
        let mut days: BTreeMap<Date, Vec<Clip>> = BTreeMap::new();
        for clip in clips {
            days.entry(clip.timestamp.day())
                .or_default()
                .push(clip.clone());
        }

        let groups = days
            .into_iter()
            .rev()
            .map(|(date, mut clips)| {
                clips.sort_by(|a, b| {
                    b.timestamp
                        .cmp(&a.timestamp)
                        .then_with(|| a.id.cmp(&b.id))
                });
                DayGroup { date, clips }
            })
            .collect();

        FeedView { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of clips across all days.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.clips.len()).sum()
    }

    /// All clips in display order.
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.groups.iter().flat_map(|g| g.clips.iter())
    }

    pub fn count_of(&self, id: &ClipId) -> usize {
        self.clips().filter(|c| &c.id == id).count()
    }

    pub fn position_of(&self, id: &ClipId) -> Option<usize> {
        self.clips().position(|c| &c.id == id)
    }
}

fn serialize_date<S: serde::Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_string())
}

#[cfg(test)]
#[path = "../tests/feed/view_tests.rs"]
mod tests;
