//! In-memory entity sequence.

use tracing::trace;

use crate::error::Result;
use crate::record::{EntityId, Record};

/// An ordered sequence of records with unique ids.
#[derive(Debug, Clone)]
pub struct EntityCollection<E> {
    items: Vec<E>,
}

impl<E> Default for EntityCollection<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Record> EntityCollection<E> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records read from storage, applying the record ordering.
    #[must_use]
    pub fn from_items(mut items: Vec<E>) -> Self {
        items.sort_by(E::order);
        Self { items }
    }

    /// The records in sequence order.
    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: &EntityId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Append a new record built from `draft` under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft lacks a required field.
    pub fn create(&mut self, draft: E::Draft) -> Result<EntityId> {
        let mut id = EntityId::generate();
        while self.find(&id).is_some() {
            id = EntityId::generate();
        }

        let record = E::from_draft(id.clone(), draft)?;
        self.items.push(record);
        self.items.sort_by(E::order);
        trace!("Created {} {}", E::KIND, id);
        Ok(id)
    }

    /// Merge `draft` into the record with `id`.
    ///
    /// Returns `false` without touching anything if no such record exists.
    pub fn update(&mut self, id: &EntityId, draft: E::Draft) -> bool {
        let Some(record) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        record.merge(draft);
        self.items.sort_by(E::order);
        trace!("Updated {} {}", E::KIND, id);
        true
    }

    /// Remove the record with `id`.
    ///
    /// Returns `false` if no such record exists.
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }
}
