//! Review record storage seam.

use crate::types::{CardId, ReviewRecord};
use std::collections::HashMap;
use std::convert::Infallible;

/// Durable key-value store of review records, keyed by card id.
///
/// A `put` must be atomic per key.
pub trait ReviewStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, card_id: CardId) -> Result<Option<ReviewRecord>, Self::Error>;
    fn put(&mut self, card_id: CardId, record: &ReviewRecord) -> Result<(), Self::Error>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<CardId, ReviewRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &HashMap<CardId, ReviewRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(CardId, ReviewRecord)> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = (CardId, ReviewRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl ReviewStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, card_id: CardId) -> Result<Option<ReviewRecord>, Self::Error> {
        Ok(self.records.get(&card_id).cloned())
    }

    fn put(&mut self, card_id: CardId, record: &ReviewRecord) -> Result<(), Self::Error> {
        self.records.insert(card_id, record.clone());
        Ok(())
    }
}

impl<S: ReviewStore + ?Sized> ReviewStore for &mut S {
    type Error = S::Error;

    fn get(&self, card_id: CardId) -> Result<Option<ReviewRecord>, Self::Error> {
        (**self).get(card_id)
    }

    fn put(&mut self, card_id: CardId, record: &ReviewRecord) -> Result<(), Self::Error> {
        (**self).put(card_id, record)
    }
}
