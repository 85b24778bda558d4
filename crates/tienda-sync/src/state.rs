//! # View State
//!
//! The single state container a dashboard session renders from.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ViewStore (one per session)                     │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │  ViewState                                                     │     │
//! │  │  • catalog      Arc<CatalogSnapshot>  ┐ always from the same   │     │
//! │  │  • stats        StatisticsSnapshot    ┘ sync attempt           │     │
//! │  │  • generation   ticket of the installed snapshot               │     │
//! │  │  • loading      any synchronize() in flight                    │     │
//! │  │  • message      at most one, replace-on-set                    │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! │  Writers (crate-private):   DataSyncController, SalesTransactionHandler │
//! │  Readers (public):          snapshot() → cloned ViewState              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sync Generations
//! ```text
//! sync A takes ticket 1 ───────────────────────────────► resolves: 1 <= 2, discarded
//! sync B takes ticket 2 ──────────► resolves: installed, generation = 2
//! ```
//!
//! Every mutation is a short critical section under the lock; the lock is
//! never held across an `.await`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use ts_rs::TS;

use tienda_core::{CatalogRow, CatalogSnapshot, StatisticsSnapshot};

use crate::error::{DashboardError, ErrorKind};

// =============================================================================
// Message
// =============================================================================

/// Severity of the active message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Error,
    Success,
    Info,
}

/// The one message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Sequence number, unique within a session.
    #[ts(type = "number")]
    pub id: u64,

    pub kind: MessageKind,

    pub text: String,

    /// Set for error messages.
    pub error_kind: Option<ErrorKind>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

// =============================================================================
// ViewState
// =============================================================================

/// Immutable copy of the session's view.
#[derive(Debug, Clone)]
pub struct ViewState {
    catalog: Arc<CatalogSnapshot>,
    stats: StatisticsSnapshot,
    generation: u64,
    loading: bool,
    message: Option<Message>,
    last_synced_at: Option<DateTime<Utc>>,
}

impl ViewState {
    fn empty() -> Self {
        ViewState {
            catalog: Arc::new(Vec::new()),
            stats: StatisticsSnapshot::default(),
            generation: 0,
            loading: false,
            message: None,
            last_synced_at: None,
        }
    }

    /// Catalog in backend order.
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn stats(&self) -> &StatisticsSnapshot {
        &self.stats
    }

    /// Ticket of the installed snapshot; 0 before the first successful sync.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    /// Display rows for the catalog table.
    pub fn rows(&self, default_category: &str) -> Vec<CatalogRow> {
        self.catalog
            .iter()
            .map(|p| CatalogRow::from_product(p, default_category))
            .collect()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// ViewStore
// =============================================================================

struct StoreInner {
    view: ViewState,
    in_flight: usize,
}

/// Thread-safe owner of the session's [`ViewState`].
pub struct ViewStore {
    inner: RwLock<StoreInner>,
    next_ticket: AtomicU64,
    next_message_id: AtomicU64,
}

impl ViewStore {
    pub fn new() -> Self {
        ViewStore {
            inner: RwLock::new(StoreInner {
                view: ViewState::empty(),
                in_flight: 0,
            }),
            next_ticket: AtomicU64::new(1),
            next_message_id: AtomicU64::new(1),
        }
    }

    /// Current view.
    pub fn snapshot(&self) -> ViewState {
        self.read().view.clone()
    }

    // A panicked writer leaves whole values behind (every write replaces
    // complete fields), so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // =========================================================================
    // Crate-private mutation
    // =========================================================================

    /// Marks a synchronization as started and hands out its ticket.
    pub(crate) fn begin_sync(&self) -> SyncTicket<'_> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.write();
        inner.in_flight += 1;
        inner.view.loading = true;
        SyncTicket {
            store: self,
            generation: ticket,
        }
    }

    fn end_sync(&self) {
        let mut inner = self.write();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        inner.view.loading = inner.in_flight > 0;
    }

    /// Installs catalog and statistics together.
    ///
    /// Returns `false` (and changes nothing) when a newer snapshot is
    /// already installed. The active message is cleared unless its id is
    /// `keep_message`.
    pub(crate) fn install(
        &self,
        ticket: &SyncTicket<'_>,
        catalog: Arc<CatalogSnapshot>,
        stats: StatisticsSnapshot,
        keep_message: Option<u64>,
    ) -> bool {
        let mut inner = self.write();
        if ticket.generation <= inner.view.generation {
            debug!(
                generation = ticket.generation,
                installed = inner.view.generation,
                "Discarding stale sync result"
            );
            return false;
        }

        let view = &mut inner.view;
        view.catalog = catalog;
        view.stats = stats;
        view.generation = ticket.generation;
        view.last_synced_at = Some(Utc::now());

        let keep = matches!((&view.message, keep_message), (Some(m), Some(id)) if m.id == id);
        if !keep {
            view.message = None;
        }
        true
    }

    /// Shows a sync failure unless a newer snapshot already superseded it.
    pub(crate) fn fail_sync(&self, ticket: &SyncTicket<'_>, err: &DashboardError) -> bool {
        let mut inner = self.write();
        if ticket.generation <= inner.view.generation {
            debug!(
                generation = ticket.generation,
                installed = inner.view.generation,
                "Suppressing error from superseded sync"
            );
            return false;
        }
        inner.view.message = Some(self.message(MessageKind::Error, err.user_message(), Some(err.kind())));
        true
    }

    /// Replaces the active message and returns its id.
    pub(crate) fn post(&self, kind: MessageKind, text: impl Into<String>) -> u64 {
        let message = self.message(kind, text.into(), None);
        let id = message.id;
        self.write().view.message = Some(message);
        id
    }

    /// Replaces the active message with `err`.
    pub(crate) fn post_error(&self, err: &DashboardError) -> u64 {
        let message = self.message(MessageKind::Error, err.user_message(), Some(err.kind()));
        let id = message.id;
        self.write().view.message = Some(message);
        id
    }

    fn message(&self, kind: MessageKind, text: String, error_kind: Option<ErrorKind>) -> Message {
        Message {
            id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
            kind,
            text,
            error_kind,
            created_at: Utc::now(),
        }
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Sync Ticket
// =============================================================================

/// One in-flight synchronization.
///
/// Dropping the ticket (completion, error, or a cancelled future) ends the
/// sync, so `loading` cannot stay stuck.
pub(crate) struct SyncTicket<'a> {
    store: &'a ViewStore,
    generation: u64,
}

impl SyncTicket<'_> {
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for SyncTicket<'_> {
    fn drop(&mut self) {
        self.store.end_sync();
    }
}
