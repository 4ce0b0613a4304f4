//! Roster orchestration: remote refresh, local mutations, modal transitions
//! and the view handed to the presentation layer.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{UserDraft, UserId, UserRecord},
    error::{Notice, NoticeKind, RosterError},
    protocol::UsersPage,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    config::{PagingMode, RefreshPolicy, RosterConfig},
    modal::{FormModalController, ModalState},
    overlay::{LocalIdAllocator, LocalOverlay},
    pagination,
    remote::{fetch_all_pages, RemoteFetchError, RemoteUserSource},
    store::UserCollectionStore,
};

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub window: Vec<UserRecord>,
    pub current_page: u32,
    pub page_count: u32,
    pub modal: ModalState,
    pub notice: Option<Notice>,
    pub loading: bool,
}

/// Identifies one remote request. Only the most recently issued ticket is
/// allowed to change the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    page: u32,
    all_pages: bool,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// A remote request that has been issued but not yet awaited.
pub struct PendingFetch {
    ticket: FetchTicket,
    per_page: u32,
    source: Arc<dyn RemoteUserSource>,
}

impl PendingFetch {
    pub async fn run(self) -> FetchOutcome {
        let result = if self.ticket.all_pages {
            fetch_all_pages(self.source.as_ref(), self.per_page).await
        } else {
            self.source.fetch(self.ticket.page, self.per_page).await
        };
        FetchOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct FetchOutcome {
    ticket: FetchTicket,
    result: Result<UsersPage, RemoteFetchError>,
}

impl FetchOutcome {
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }
}

pub struct RosterController {
    config: RosterConfig,
    source: Arc<dyn RemoteUserSource>,
    store: UserCollectionStore,
    modal: FormModalController,
    overlay: LocalOverlay,
    ids: LocalIdAllocator,
    current_page: u32,
    remote_total_pages: u32,
    listing_loaded: bool,
    fetch_seq: u64,
    in_flight: Option<FetchTicket>,
    notice: Option<Notice>,
    view_tx: watch::Sender<RosterView>,
}

impl RosterController {
    pub fn new(config: RosterConfig, source: Arc<dyn RemoteUserSource>) -> Self {
        let (view_tx, _) = watch::channel(RosterView {
            current_page: 1,
            ..RosterView::default()
        });
        Self {
            config,
            source,
            store: UserCollectionStore::new(),
            modal: FormModalController::new(),
            overlay: LocalOverlay::default(),
            ids: LocalIdAllocator::default(),
            current_page: 1,
            remote_total_pages: 0,
            listing_loaded: false,
            fetch_seq: 0,
            in_flight: None,
            notice: None,
            view_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RosterView> {
        self.view_tx.subscribe()
    }

    pub fn records(&self) -> &[UserRecord] {
        self.store.records()
    }

    pub fn modal(&self) -> &ModalState {
        self.modal.state()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> RosterView {
        let (window, page_count) = match self.config.paging {
            PagingMode::Local => {
                let window =
                    pagination::compute(self.store.records(), self.config.page_size, self.current_page);
                (window.visible, window.page_count)
            }
            PagingMode::Remote => {
                let page_count = if self.remote_total_pages > 0 {
                    self.remote_total_pages
                } else {
                    pagination::page_count(self.store.len(), self.config.page_size)
                };
                (self.store.records().to_vec(), page_count)
            }
        };

        RosterView {
            window,
            current_page: self.current_page,
            page_count,
            modal: self.modal.state().clone(),
            notice: self.notice.clone(),
            loading: self.is_loading(),
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }

    /// Moves to page `page` and loads it, absorbing fetch failures.
    pub async fn change_page(&mut self, page: u32) -> Result<(), RosterError> {
        if let Some(pending) = self.begin_page_change(page)? {
            let outcome = pending.run().await;
            self.finish_fetch(outcome);
        }
        Ok(())
    }

    /// Re-fetches the current page (or the whole listing in local paging mode).
    pub async fn refresh(&mut self) {
        let outcome = self.begin_refresh().run().await;
        self.finish_fetch(outcome);
    }

    /// Sets the current page and returns the fetch it requires, if any. In
    /// local paging mode only the first load goes to the remote source.
    pub fn begin_page_change(&mut self, page: u32) -> Result<Option<PendingFetch>, RosterError> {
        if page == 0 {
            return Err(RosterError::InvalidPage(page));
        }
        self.current_page = page;

        if self.config.paging == PagingMode::Local && self.listing_loaded {
            self.publish();
            return Ok(None);
        }
        Ok(Some(self.start_fetch()))
    }

    pub fn begin_refresh(&mut self) -> PendingFetch {
        self.start_fetch()
    }

    fn start_fetch(&mut self) -> PendingFetch {
        self.fetch_seq += 1;
        let ticket = FetchTicket {
            seq: self.fetch_seq,
            page: self.current_page,
            all_pages: self.config.paging == PagingMode::Local,
        };
        self.in_flight = Some(ticket);
        self.publish();

        PendingFetch {
            ticket,
            per_page: self.config.page_size.get(),
            source: Arc::clone(&self.source),
        }
    }

    /// Applies a completed fetch. Returns `false` when the outcome belongs to
    /// a request that has since been superseded and was therefore dropped.
    pub fn finish_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if self.in_flight != Some(outcome.ticket) {
            debug!(
                page = outcome.ticket.page,
                seq = outcome.ticket.seq,
                "discarding superseded fetch result"
            );
            return false;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(page) => {
                self.remote_total_pages = page.total_pages;
                // Listing ids run 1..=total, so local ids start above it.
                if page.total > 0 {
                    self.ids.reserve_through(UserId(i64::from(page.total)));
                }
                let fetched = page.into_records();
                let fetched_len = fetched.len();
                let records = match self.config.refresh {
                    RefreshPolicy::KeepLocal => {
                        let merged = self.overlay.apply(fetched, &mut self.ids);
                        for &(from, to) in &merged.rekeyed {
                            self.modal.rekey_seed(from, to);
                        }
                        merged.records
                    }
                    RefreshPolicy::Replace => {
                        self.overlay.clear();
                        self.ids.observe(&fetched);
                        fetched
                    }
                };
                self.store.replace(records);
                if outcome.ticket.all_pages {
                    self.listing_loaded = true;
                }
                self.notice = None;
                info!(
                    page = outcome.ticket.page,
                    fetched = fetched_len,
                    roster = self.store.len(),
                    "refreshed roster from remote listing"
                );
            }
            Err(err) => {
                warn!(page = outcome.ticket.page, error = %err, "error fetching user listing");
                self.notice = Some(Notice::new(NoticeKind::RemoteFetch, err.to_string()));
            }
        }

        self.publish();
        true
    }

    pub fn open_create_form(&mut self) {
        self.modal.open_create();
        self.publish();
    }

    pub fn close_form(&mut self) {
        self.modal.close();
        self.publish();
    }

    /// Adds a local-only user at the front of the roster and closes the form.
    pub fn create_user(&mut self, draft: UserDraft) -> UserRecord {
        let record = draft.into_record(self.ids.allocate(), self.config.placeholder_image.clone());
        self.store.insert(record.clone());
        self.overlay.record_create(record.clone());
        self.modal.close();
        self.notice = None;
        debug!(id = record.id.0, "created local user");
        self.publish();
        record
    }

    /// Opens the edit form seeded with a copy of the user's current fields.
    pub fn begin_edit(&mut self, id: UserId) -> Result<(), RosterError> {
        let Some(record) = self.store.get(id).cloned() else {
            return Err(self.not_found(id));
        };
        self.modal.open_edit(&record);
        self.publish();
        Ok(())
    }

    /// Replaces the user's fields, keeping its id and image, and closes the form.
    /// While the edit form is open, `id` must name the record it was seeded with.
    pub fn save_edit(&mut self, id: UserId, draft: UserDraft) -> Result<UserRecord, RosterError> {
        if let Some(seeded) = self.modal.state().seed().map(|seed| seed.id) {
            if seeded != id {
                warn!(requested = id.0, seeded = seeded.0, "edit submitted for a different user");
                return Err(self.reject(RosterError::EditTargetMismatch {
                    requested: id,
                    seeded,
                }));
            }
        }
        let Some(image) = self.store.get(id).map(|record| record.image.clone()) else {
            return Err(self.not_found(id));
        };
        let replacement = draft.into_record(id, image);
        self.store.update(id, replacement.clone());
        self.overlay.record_edit(replacement.clone());
        self.modal.close();
        self.notice = None;
        debug!(id = id.0, "edited user locally");
        self.publish();
        Ok(replacement)
    }

    /// Removes the user. The current page is left as is even if its window
    /// becomes empty.
    pub fn delete_user(&mut self, id: UserId) -> Result<(), RosterError> {
        if !self.store.contains(id) {
            return Err(self.not_found(id));
        }
        self.store.delete(id);
        self.overlay.record_delete(id);
        self.notice = None;
        debug!(id = id.0, "deleted user locally");
        self.publish();
        Ok(())
    }

    fn not_found(&mut self, id: UserId) -> RosterError {
        warn!(id = id.0, "roster mutation targeted a missing user");
        self.reject(RosterError::UserNotFound(id))
    }

    fn reject(&mut self, err: RosterError) -> RosterError {
        self.notice = err.notice();
        self.publish();
        err
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
