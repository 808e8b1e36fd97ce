//! View-state store.
//!
//! [`NoteStore`] is the single source of truth for the displayed note
//! list and the in-progress draft, and the only component that calls
//! the [`Gateway`]. Its snapshot carries a monotonic version; an
//! asynchronous completion that started from an older version is
//! discarded instead of clobbering newer state, so interleaved
//! refreshes and mutations settle in a defined order.

use std::sync::{Arc, Mutex};

use futures_util::future::try_join_all;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::Error;
use crate::note::{Draft, Note, NoteCard};
use crate::traits::Gateway;
use crate::types::{NoteId, ObjectKey};

mod page;

pub use page::{Page, page_count, page_slice};

/// A versioned copy of the displayed note list.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Monotonic version; bumped on every installed change.
    pub version: u64,
    /// The display cards, in backend order plus local appends.
    pub cards: Vec<NoteCard>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            cards: Vec::new(),
        }
    }
}

/// Outcome of a [`NoteStore::refresh`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The fetched list replaced the snapshot.
    Installed,
    /// The store changed while the fetch was in flight; the stale
    /// result was dropped.
    Discarded,
}

/// The view-state store.
///
/// Cheap to clone; clones share the same state. Mutating operations
/// take `&self` and serialize their state changes internally, which
/// lets a refresh run while other intents arrive, with staleness
/// resolved by version comparison.
pub struct NoteStore<G> {
    inner: Arc<Inner<G>>,
}

struct Inner<G> {
    gateway: G,
    state: Mutex<State>,
    publish: watch::Sender<Snapshot>,
}

#[derive(Debug, Default)]
struct State {
    version: u64,
    cards: Vec<NoteCard>,
    draft: Draft,
}

impl<G> Clone for NoteStore<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: Gateway> NoteStore<G> {
    /// Create a store over the given gateway, starting from an empty
    /// snapshot and an empty draft.
    pub fn new(gateway: G) -> Self {
        let (publish, _) = watch::channel(Snapshot::empty());
        Self {
            inner: Arc::new(Inner {
                gateway,
                state: Mutex::new(State::default()),
                publish,
            }),
        }
    }

    /// Access the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.inner.state.lock().unwrap();
        Snapshot {
            version: state.version,
            cards: state.cards.clone(),
        }
    }

    /// A copy of the current draft.
    pub fn draft(&self) -> Draft {
        self.inner.state.lock().unwrap().draft.clone()
    }

    /// Edit the draft in place (field-by-field form updates).
    pub fn update_draft(&self, f: impl FnOnce(&mut Draft)) {
        let mut state = self.inner.state.lock().unwrap();
        f(&mut state.draft);
    }

    /// Subscribe to snapshot changes.
    ///
    /// Every installed snapshot is published; the receiver always
    /// starts with the latest one.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.publish.subscribe()
    }

    /// Fetch the full note list and resolve every attached image key
    /// to a displayable URL, then install the result as the new
    /// snapshot.
    ///
    /// Resolutions run concurrently and are awaited jointly; the list
    /// is installed only once every resolution has settled. Any
    /// gateway failure propagates without installing a partial list.
    /// If the store changed while the fetch was in flight the result
    /// is stale and dropped, reported as [`Refresh::Discarded`].
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Refresh> {
        let started = self.inner.state.lock().unwrap().version;

        let listing = self.inner.gateway.list_notes().await?;
        let cards = self.resolve(listing.notes).await?;

        let mut state = self.inner.state.lock().unwrap();
        if state.version != started {
            debug!(
                started,
                current = state.version,
                "discarding stale refresh"
            );
            return Ok(Refresh::Discarded);
        }

        debug!(count = cards.len(), "installing refreshed snapshot");
        state.cards = cards;
        state.version += 1;
        self.publish_locked(&state);
        Ok(Refresh::Installed)
    }

    /// Submit the current draft.
    ///
    /// Fails with a typed validation error, touching neither the
    /// gateway nor the list, if `name` or `description` is empty.
    /// Otherwise the gateway persists the draft and returns the stored
    /// note with its assigned id; the matching card (image resolved if
    /// one is attached) is appended to the snapshot and the draft is
    /// reset exactly once.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<NoteCard> {
        let draft = {
            let state = self.inner.state.lock().unwrap();
            state.draft.validate()?;
            state.draft.clone()
        };

        let note = self.inner.gateway.create_note(&draft).await?;

        let image_url = match &note.image_key {
            Some(key) => Some(self.inner.gateway.get_object_url(key).await?),
            None => None,
        };
        let card = NoteCard { note, image_url };

        let mut state = self.inner.state.lock().unwrap();
        debug!(id = %card.note.id, "appending created note");
        state.cards.push(card.clone());
        state.version += 1;
        state.draft.clear();
        self.publish_locked(&state);
        Ok(card)
    }

    /// Remove a note.
    ///
    /// The card disappears from the snapshot immediately; the gateway
    /// delete follows. A not-found response from the gateway is a
    /// success, making removal idempotent. Any other gateway failure
    /// is returned as-is; the local removal stands and the caller may
    /// [`refresh`](Self::refresh) to re-sync.
    #[instrument(skip(self), fields(%id))]
    pub async fn remove(&self, id: &NoteId) -> Result<()> {
        {
            let mut state = self.inner.state.lock().unwrap();
            let before = state.cards.len();
            state.cards.retain(|card| &card.note.id != id);
            if state.cards.len() != before {
                state.version += 1;
                self.publish_locked(&state);
            }
        }

        match self.inner.gateway.delete_note(id).await {
            Ok(()) => Ok(()),
            Err(Error::Protocol(p)) if p.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Attach a file to the draft.
    ///
    /// The file name becomes the draft's object key, the bytes are
    /// uploaded, and one refresh follows so anything newly linked to
    /// the upload becomes visible. Uploading under an existing key
    /// overwrites that object.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn attach_file(&self, name: &str, bytes: Vec<u8>) -> Result<Refresh> {
        let key = ObjectKey::new(name)?;

        {
            let mut state = self.inner.state.lock().unwrap();
            state.draft.image_key = Some(key.clone());
        }

        self.inner.gateway.put_object(&key, bytes).await?;
        self.refresh().await
    }

    async fn resolve(&self, notes: Vec<Note>) -> Result<Vec<NoteCard>> {
        let gateway = &self.inner.gateway;
        try_join_all(notes.into_iter().map(|note| async move {
            let image_url = match &note.image_key {
                Some(key) => Some(gateway.get_object_url(key).await?),
                None => None,
            };
            Ok::<_, Error>(NoteCard { note, image_url })
        }))
        .await
    }

    fn publish_locked(&self, state: &State) {
        self.inner.publish.send_replace(Snapshot {
            version: state.version,
            cards: state.cards.clone(),
        });
    }
}
