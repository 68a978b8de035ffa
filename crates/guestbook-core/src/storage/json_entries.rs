//! JSON-file-backed guestbook entry store.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::instrument;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{GuestbookError, Result};
use crate::storage::codec::{JsonFile, Records};
use crate::storage::traits::EntryStore;
use crate::storage::types::GuestbookEntry;

/// Entry store holding every entry in memory behind one lock and mirroring
/// it to a JSON file.
pub struct JsonEntryStore {
    file: JsonFile<GuestbookEntry>,
    entries: Mutex<Records<GuestbookEntry>>,
    clock: Arc<dyn Clock>,
}

impl JsonEntryStore {
    /// Open the entry store at `path`. The file must already exist.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::NotFound` if the file is missing.
    pub fn open(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let (file, entries) = JsonFile::open_existing(path)?;
        Ok(Self {
            file,
            entries: Mutex::new(entries),
            clock,
        })
    }

    /// Create an empty entry store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Conflict` if the file already exists.
    pub fn create(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let file = JsonFile::create_new(path)?;
        Ok(Self {
            file,
            entries: Mutex::new(Records::new()),
            clock,
        })
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, Records<GuestbookEntry>>> {
        self.entries
            .lock()
            .map_err(|_| GuestbookError::Storage("Entry store lock poisoned".to_string()))
    }

    /// Persist `next`, then make it the live collection.
    fn commit(
        &self,
        live: &mut MutexGuard<'_, Records<GuestbookEntry>>,
        next: Records<GuestbookEntry>,
    ) -> Result<()> {
        self.file.persist(&next)?;
        **live = next;
        Ok(())
    }
}

fn newest_first<'a>(entries: impl Iterator<Item = &'a GuestbookEntry>) -> Vec<GuestbookEntry> {
    let mut list: Vec<GuestbookEntry> = entries.cloned().collect();
    list.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    list
}

impl EntryStore for JsonEntryStore {
    #[instrument(level = "debug", skip_all, fields(entry_id = %entry.id))]
    fn create_entry(&self, mut entry: GuestbookEntry) -> Result<Uuid> {
        let mut live = self.lock_entries()?;

        if entry.id.is_nil() {
            entry.id = Uuid::new_v4();
        } else if live.contains_key(&entry.id) {
            return Err(GuestbookError::Conflict(format!(
                "Entry {} already exists",
                entry.id
            )));
        }
        entry.created_at = self.clock.now();

        let id = entry.id;
        let mut next = live.clone();
        next.insert(id, entry);
        self.commit(&mut live, next)?;
        Ok(id)
    }

    #[instrument(level = "debug", skip_all)]
    fn list_entries(&self) -> Result<Vec<GuestbookEntry>> {
        let live = self.lock_entries()?;
        Ok(newest_first(live.values()))
    }

    #[instrument(level = "debug", skip_all, fields(entry_id = %id))]
    fn get_entry(&self, id: &Uuid) -> Result<Option<GuestbookEntry>> {
        let live = self.lock_entries()?;
        Ok(live.get(id).cloned())
    }

    #[instrument(level = "debug", skip_all, fields(entry_id = %id))]
    fn delete_entry(&self, id: &Uuid) -> Result<()> {
        let mut live = self.lock_entries()?;

        if id.is_nil() {
            return Err(GuestbookError::InvalidInput(
                "Entry id is required".to_string(),
            ));
        }
        if !live.contains_key(id) {
            return Err(GuestbookError::NotFound(format!("Entry {} not found", id)));
        }

        let mut next = live.clone();
        next.remove(id);
        self.commit(&mut live, next)
    }

    #[instrument(level = "debug", skip_all, fields(name = %name))]
    fn get_entry_by_name(&self, name: &str) -> Result<Vec<GuestbookEntry>> {
        let live = self.lock_entries()?;

        if name.is_empty() {
            return Err(GuestbookError::InvalidInput("Name is required".to_string()));
        }

        let found = newest_first(live.values().filter(|entry| entry.name == name));
        if found.is_empty() {
            return Err(GuestbookError::NotFound(format!(
                "No entries found for {}",
                name
            )));
        }
        Ok(found)
    }

    #[instrument(level = "debug", skip_all, fields(snippet = %snippet))]
    fn get_entry_by_snippet(&self, snippet: &str) -> Result<Vec<GuestbookEntry>> {
        let live = self.lock_entries()?;

        let found = newest_first(live.values().filter(|entry| entry.name.contains(snippet)));
        if found.is_empty() {
            return Err(GuestbookError::NotFound(format!(
                "No entries found for {}",
                snippet
            )));
        }
        Ok(found)
    }

    #[instrument(level = "debug", skip_all, fields(owner_id = %owner_id))]
    fn get_entry_by_id(&self, owner_id: &Uuid) -> Result<Vec<GuestbookEntry>> {
        let live = self.lock_entries()?;

        if owner_id.is_nil() {
            return Err(GuestbookError::InvalidInput(
                "Owner id is required".to_string(),
            ));
        }

        Ok(newest_first(
            live.values()
                .filter(|entry| entry.user_id.as_ref() == Some(owner_id)),
        ))
    }
}
