//! In-memory owner of the session's ledger entries.

use std::{collections::HashSet, fmt, sync::Arc};

use tracing::{debug, warn};

use crate::core::time::{Clock, SystemClock};
use crate::domain::{EntryDraft, EntryId, LedgerEntry};
use crate::errors::{LedgerError, Result};

/// Insertion-ordered collection of entries with unique ids.
///
/// The store is the only component that mutates the collection. Derived
/// views read [`LedgerStore::list`] snapshots.
pub struct LedgerStore {
    entries: Vec<LedgerEntry>,
    clock: Arc<dyn Clock>,
    last_issued: u64,
    retired: HashSet<EntryId>,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerStore")
            .field("entries", &self.entries)
            .field("last_issued", &self.last_issued)
            .field("retired", &self.retired.len())
            .finish()
    }
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Vec::new(),
            clock,
            last_issued: 0,
            retired: HashSet::new(),
        }
    }

    /// Appends the draft, minting an id when the draft has none or carries
    /// one that is in use, retired, or at the `u64` ceiling.
    pub fn add(&mut self, draft: EntryDraft) -> EntryId {
        let id = match draft.id {
            Some(candidate) if candidate.0 < u64::MAX && !self.is_taken(candidate) => {
                self.last_issued = self.last_issued.max(candidate.0);
                candidate
            }
            Some(taken) => {
                let fresh = self.mint_id();
                warn!(%taken, %fresh, "entry id unavailable; assigned a fresh id");
                fresh
            }
            None => self.mint_id(),
        };
        self.entries.push(LedgerEntry::from_draft(id, draft));
        debug!(%id, count = self.entries.len(), "entry added");
        id
    }

    /// Replaces the entry identified by `id`, keeping its id and position.
    pub fn update(&mut self, id: EntryId, draft: EntryDraft) -> Result<()> {
        let slot = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        *slot = LedgerEntry::from_draft(id, draft);
        debug!(%id, "entry replaced");
        Ok(())
    }

    /// Removes the entry identified by `id`. Unknown ids are a no-op.
    pub fn remove(&mut self, id: EntryId) -> Option<LedgerEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id);
        match index {
            Some(index) => {
                let removed = self.entries.remove(index);
                self.retired.insert(id);
                debug!(%id, count = self.entries.len(), "entry removed");
                Some(removed)
            }
            None => {
                debug!(%id, "remove ignored; entry not found");
                None
            }
        }
    }

    pub fn list(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry. Ids issued so far stay retired.
    pub fn clear(&mut self) {
        self.retired.extend(self.entries.drain(..).map(|entry| entry.id));
    }

    fn is_taken(&self, id: EntryId) -> bool {
        self.retired.contains(&id) || self.get(id).is_some()
    }

    fn mint_id(&mut self) -> EntryId {
        let now = self.clock.now().timestamp_millis().max(0) as u64;
        match self.last_issued.checked_add(1) {
            Some(floor) => {
                let next = now.max(floor);
                self.last_issued = next;
                EntryId(next)
            }
            None => {
                // Counter exhausted; hand out the lowest id never used.
                let fallback = (1..u64::MAX)
                    .map(EntryId)
                    .find(|id| !self.is_taken(*id))
                    .unwrap_or(EntryId(0));
                warn!(%fallback, "entry id counter exhausted");
                fallback
            }
        }
    }
}
