use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Stable identity of an entry in a [`TrackList`].
///
/// Ids are handed out by a per-list monotonic counter and are never reused,
/// so they also encode insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track-{}", self.0)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveError {
    #[error("A release must keep at least one track")]
    LastTrack,
    #[error("No track with id {0}")]
    NotFound(TrackId),
}

/// Ordered collection that always holds at least one entry.
///
/// Entries are addressed by id, never by position. Display position is
/// derived from append order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackList<T> {
    entries: BTreeMap<TrackId, T>,
    next_id: u64,
}

#[allow(clippy::len_without_is_empty)]
impl<T> TrackList<T> {
    /// Create a list holding a single entry.
    pub fn new(first: T) -> Self {
        let mut list = Self {
            entries: BTreeMap::new(),
            next_id: 1,
        };
        list.push(first);
        list
    }

    /// Append an entry and return its freshly assigned id.
    pub fn push(&mut self, item: T) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, item);
        id
    }

    /// Remove an entry. Refuses to remove the last remaining entry.
    pub fn remove(&mut self, id: TrackId) -> Result<T, RemoveError> {
        if !self.entries.contains_key(&id) {
            return Err(RemoveError::NotFound(id));
        }
        if self.entries.len() == 1 {
            return Err(RemoveError::LastTrack);
        }
        self.entries.remove(&id).ok_or(RemoveError::NotFound(id))
    }

    pub fn get(&self, id: TrackId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.entries.contains_key(&id)
    }

    /// 1-based display number of an entry.
    pub fn number_of(&self, id: TrackId) -> Option<usize> {
        if !self.entries.contains_key(&id) {
            return None;
        }
        Some(self.entries.range(..id).count() + 1)
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &T)> {
        self.entries.iter().map(|(id, item)| (*id, item))
    }

    pub fn ids(&self) -> Vec<TrackId> {
        self.entries.keys().copied().collect()
    }

    pub fn first_id(&self) -> TrackId {
        // The list is never empty.
        self.entries
            .keys()
            .next()
            .copied()
            .unwrap_or(TrackId(self.next_id - 1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
