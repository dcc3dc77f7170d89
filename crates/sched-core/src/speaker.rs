//! Speaker lookup by id.

use std::collections::HashMap;

use crate::grid::Speaker;
use crate::types::SpeakerId;

/// Constant-time speaker lookup over the speaker feed.
#[derive(Debug, Clone, Default)]
pub struct SpeakerResolver {
    speakers: HashMap<SpeakerId, Speaker>,
}

impl SpeakerResolver {
    /// Indexes `speakers` by id. The first entry for an id wins.
    pub fn new(speakers: impl IntoIterator<Item = Speaker>) -> Self {
        let mut index = HashMap::new();
        for speaker in speakers {
            index.entry(speaker.id.clone()).or_insert(speaker);
        }
        Self { speakers: index }
    }

    /// Profile picture URL for `id`, if the speaker is known and has one.
    pub fn resolve(&self, id: &SpeakerId) -> Option<&str> {
        self.speakers
            .get(id)
            .and_then(|speaker| speaker.profile_picture.as_deref())
    }

    /// Display name from the speaker feed.
    pub fn name(&self, id: &SpeakerId) -> Option<&str> {
        self.speakers.get(id).map(|speaker| speaker.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}
