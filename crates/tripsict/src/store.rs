//! Persistent entity store: an entity sequence, its form state, and the
//! blob it is mirrored to.
//!
//! Every mutation rewrites the whole sequence under [`Record::STORAGE_KEY`].
//! The blob is read once by [`EntityStore::load`]; a missing or malformed
//! blob yields an empty sequence.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::collection::EntityCollection;
use crate::error::Result;
use crate::form::FormState;
use crate::record::{EntityId, Record};
use crate::storage::BlobStore;

/// A sequence of `E` records backed by a [`BlobStore`].
#[derive(Debug)]
pub struct EntityStore<E> {
    backend: Rc<dyn BlobStore>,
    collection: EntityCollection<E>,
    form: FormState,
    revision: u64,
}

impl<E: Record> EntityStore<E> {
    /// Load the sequence stored in `backend`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read. Unparseable contents
    /// are not an error; they are logged and treated as empty.
    pub fn load(backend: Rc<dyn BlobStore>) -> Result<Self> {
        let collection = match backend.get(E::STORAGE_KEY)? {
            None => EntityCollection::new(),
            Some(blob) => match serde_json::from_str::<Vec<E>>(&blob) {
                Ok(items) => EntityCollection::from_items(items),
                Err(e) => {
                    warn!(
                        "Ignoring unreadable {} data in {} store: {}",
                        E::KIND,
                        backend.name(),
                        e
                    );
                    EntityCollection::new()
                }
            },
        };

        debug!(
            "Loaded {} {} record(s) from {} store",
            collection.len(),
            E::KIND,
            backend.name()
        );

        Ok(Self {
            backend,
            collection,
            form: FormState::Closed,
            revision: 0,
        })
    }

    /// The records in sequence order.
    #[must_use]
    pub fn items(&self) -> &[E] {
        self.collection.items()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: &EntityId) -> Option<&E> {
        self.collection.find(id)
    }

    /// Current form state.
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Counter bumped by every change to the sequence.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add a record built from `draft`, persist, and close the form.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is incomplete or the write fails.
    pub fn create(&mut self, draft: E::Draft) -> Result<EntityId> {
        let mut next = self.collection.clone();
        let id = next.create(draft)?;
        self.commit(next)?;
        self.form.close();
        info!("Added {} {}", E::KIND, id);
        Ok(id)
    }

    /// Merge `draft` into the record with `id`, persist, and close the form.
    ///
    /// Unknown ids are a no-op and return `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn update(&mut self, id: &EntityId, draft: E::Draft) -> Result<bool> {
        let mut next = self.collection.clone();
        if !next.update(id, draft) {
            debug!("No {} {} to update", E::KIND, id);
            return Ok(false);
        }
        self.commit(next)?;
        self.form.close();
        info!("Updated {} {}", E::KIND, id);
        Ok(true)
    }

    /// Delete the record with `id` and persist.
    ///
    /// Unknown ids are a no-op and return `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn remove(&mut self, id: &EntityId) -> Result<bool> {
        let mut next = self.collection.clone();
        if !next.remove(id) {
            debug!("No {} {} to delete", E::KIND, id);
            return Ok(false);
        }
        self.commit(next)?;
        info!("Deleted {} {}", E::KIND, id);
        Ok(true)
    }

    /// Open the form for the record with `id`. No-op if it doesn't exist.
    ///
    /// Returns whether the form is now editing that record.
    pub fn begin_edit(&mut self, id: &EntityId) -> bool {
        if self.collection.find(id).is_none() {
            return false;
        }
        self.form.begin_edit(id.clone());
        true
    }

    /// Open or close the form; closing while editing drops the edit target.
    pub fn toggle_form(&mut self) {
        self.form.toggle();
    }

    /// Close the form without submitting.
    pub fn cancel(&mut self) {
        self.form.close();
    }

    /// Submit the form: update the edit target if there is one, create otherwise.
    ///
    /// Returns the id of the created or updated record, or `None` if the
    /// edit target no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is incomplete or the write fails.
    pub fn submit(&mut self, draft: E::Draft) -> Result<Option<EntityId>> {
        match self.form.edit_target().cloned() {
            Some(id) => {
                let updated = self.update(&id, draft)?;
                // A vanished target still ends the edit
                self.form.close();
                Ok(updated.then_some(id))
            }
            None => self.create(draft).map(Some),
        }
    }

    /// Persist `next` and make it the current sequence. On a failed write
    /// the current sequence and revision are left as they were.
    fn commit(&mut self, next: EntityCollection<E>) -> Result<()> {
        let blob = serde_json::to_string(next.items())?;
        self.backend.set(E::STORAGE_KEY, &blob)?;
        self.collection = next;
        self.revision += 1;
        Ok(())
    }
}
