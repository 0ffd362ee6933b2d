//! crates/travel_portal_core/src/listing.rs
//!
//! The page controller shared by every list-oriented dashboard page.
//!
//! A controller moves `Idle -> Loading -> {Success, Error}` and re-enters
//! `Loading` whenever the page number or search term changes. On failure the
//! last successfully loaded items stay in place and a single notification is
//! queued for the next render.

use crate::domain::{Paginated, PaginationMeta};
use crate::ports::{PortError, PortResult};
use serde::Serialize;
use uuid::Uuid;

/// Fixed page size used by every list page.
pub const PAGE_SIZE: u32 = 10;

//=========================================================================================
// Queries and Pagination
//=========================================================================================

/// The parameters sent to a backend list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, search: Option<String>) -> Self {
        Self {
            page: page.max(1),
            limit: PAGE_SIZE,
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Query string pairs in the order the backend documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, None)
    }
}

/// Client-side pagination state, clamped to the reported page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
}

impl Pagination {
    pub fn new(current_page: u32, total_pages: u32, total_items: u64) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
            total_items,
            page_size: PAGE_SIZE,
        }
    }

    pub fn from_meta(meta: &PaginationMeta) -> Self {
        Self::new(meta.page, meta.total_pages, meta.total)
    }

    /// Whether the "next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether the "previous" control is enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

//=========================================================================================
// Notifications
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A transient, dismissible message shown once to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::build(NotificationLevel::Success, message.into(), None)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::build(NotificationLevel::Info, message.into(), None)
    }

    /// An error notification: a localized headline plus the server's message.
    pub fn failure(message: impl Into<String>, err: &PortError) -> Self {
        Self::build(NotificationLevel::Error, message.into(), Some(err.message.clone()))
    }

    fn build(level: NotificationLevel, message: String, detail: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message,
            detail,
        }
    }
}

//=========================================================================================
// ListController
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ListController<T> {
    items: Vec<T>,
    pagination: Pagination,
    search: Option<String>,
    /// The query in flight. Pagination and search only take its values once
    /// the load succeeds.
    requested: Option<ListQuery>,
    state: LoadState,
    notification: Option<Notification>,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            search: None,
            requested: None,
            state: LoadState::Idle,
            notification: None,
        }
    }
}

impl<T> ListController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Loading` for the given page and search term and returns the
    /// query to send. Items, pagination and search from the previous load stay
    /// visible until this one succeeds.
    pub fn begin(&mut self, page: u32, search: Option<String>) -> ListQuery {
        let query = ListQuery::new(page, search);
        self.requested = Some(query.clone());
        self.state = LoadState::Loading;
        query
    }

    /// A search submit always restarts from the first page.
    pub fn submit_search(&mut self, term: impl Into<String>) -> ListQuery {
        self.begin(1, Some(term.into()))
    }

    /// Starts loading the next page, or `None` when already on the last page.
    pub fn next_page(&mut self) -> Option<ListQuery> {
        if !self.pagination.has_next() {
            return None;
        }
        let page = self.pagination.current_page + 1;
        let search = self.search.clone();
        Some(self.begin(page, search))
    }

    /// Starts loading the previous page, or `None` when already on the first page.
    pub fn previous_page(&mut self) -> Option<ListQuery> {
        if !self.pagination.has_previous() {
            return None;
        }
        let page = self.pagination.current_page - 1;
        let search = self.search.clone();
        Some(self.begin(page, search))
    }

    /// Applies the outcome of a load.
    ///
    /// Success replaces items, pagination and search. Failure keeps the last
    /// known list state, queues one notification built from `failure_message`,
    /// and returns the error so the caller can decide whether the session is
    /// still usable.
    pub fn finish(
        &mut self,
        result: PortResult<Paginated<T>>,
        failure_message: &str,
    ) -> Result<(), PortError> {
        let requested = self.requested.take();
        match result {
            Ok(page) => {
                if let Some(query) = requested {
                    self.search = query.search;
                }
                self.items = page.items;
                self.pagination = Pagination::from_meta(&page.pagination);
                self.state = LoadState::Success;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Error;
                self.notification = Some(Notification::failure(failure_message, &err));
                Err(err)
            }
        }
    }

    /// Queues a notification, replacing any that was not yet shown.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    /// Removes and returns the pending notification.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: Vec<&'static str>, page: u32, total_pages: u32) -> Paginated<&'static str> {
        let total = items.len() as u64;
        Paginated {
            items,
            pagination: PaginationMeta {
                page,
                limit: PAGE_SIZE,
                total,
                total_pages,
            },
        }
    }

    #[test]
    fn next_disabled_on_last_page_and_previous_on_first() {
        let last = Pagination::new(3, 3, 25);
        assert!(!last.has_next());
        assert!(last.has_previous());

        let first = Pagination::new(1, 3, 25);
        assert!(first.has_next());
        assert!(!first.has_previous());
    }

    #[test]
    fn pagination_clamps_out_of_range_pages() {
        assert_eq!(Pagination::new(0, 3, 25).current_page, 1);
        assert_eq!(Pagination::new(9, 3, 25).current_page, 3);
        let empty = Pagination::new(1, 0, 0);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
    }

    #[test]
    fn begin_enters_loading_and_keeps_items() {
        let mut ctl = ListController::new();
        ctl.begin(1, None);
        ctl.finish(Ok(page_of(vec!["a", "b"], 1, 2)), "gagal").unwrap();

        let query = ctl.begin(2, Some("  budi ".into()));
        assert_eq!(query, ListQuery { page: 2, limit: 10, search: Some("budi".into()) });
        assert!(ctl.is_loading());
        assert_eq!(ctl.items(), &["a", "b"]);
    }

    #[test]
    fn failed_load_keeps_previous_items_and_notifies_once() {
        let mut ctl = ListController::new();
        ctl.begin(1, None);
        ctl.finish(Ok(page_of(vec!["a", "b"], 1, 1)), "gagal").unwrap();

        ctl.begin(1, Some("x".into()));
        let err = ctl
            .finish(Err(PortError::server("timeout")), "Gagal memuat data")
            .unwrap_err();
        assert_eq!(err.message, "timeout");
        assert_eq!(ctl.state(), LoadState::Error);
        assert!(!ctl.is_loading());
        assert_eq!(ctl.items(), &["a", "b"]);

        let note = ctl.take_notification().expect("one notification");
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "Gagal memuat data");
        assert_eq!(note.detail.as_deref(), Some("timeout"));
        assert!(ctl.take_notification().is_none());
    }

    #[test]
    fn failed_page_change_keeps_the_current_page() {
        let mut ctl = ListController::new();
        ctl.begin(1, None);
        ctl.finish(Ok(page_of(vec!["p1"], 1, 3)), "gagal").unwrap();

        for _ in 0..2 {
            let query = ctl.next_page().expect("next enabled");
            assert_eq!(query.page, 2);
            assert_eq!(ctl.pagination().current_page, 1);
            ctl.finish(Err(PortError::server("timeout")), "gagal").unwrap_err();
        }

        assert_eq!(ctl.items(), &["p1"]);
        assert_eq!(ctl.pagination().current_page, 1);
        assert!(ctl.pagination().has_next());
        assert!(!ctl.pagination().has_previous());
    }

    #[test]
    fn failed_search_keeps_the_previous_term() {
        let mut ctl = ListController::new();
        ctl.submit_search("ahmad");
        ctl.finish(Ok(page_of(vec!["a"], 1, 1)), "gagal").unwrap();

        ctl.submit_search("budi");
        assert_eq!(ctl.search(), Some("ahmad"));
        ctl.finish(Err(PortError::server("timeout")), "gagal").unwrap_err();
        assert_eq!(ctl.search(), Some("ahmad"));
    }

    #[test]
    fn paging_controls_respect_bounds() {
        let mut ctl = ListController::new();
        ctl.begin(3, None);
        ctl.finish(Ok(page_of(vec!["z"], 3, 3)), "gagal").unwrap();
        assert!(ctl.next_page().is_none());

        let prev = ctl.previous_page().expect("previous enabled");
        assert_eq!(prev.page, 2);

        let mut first = ListController::<&str>::new();
        first.begin(1, None);
        first.finish(Ok(page_of(vec!["a"], 1, 3)), "gagal").unwrap();
        assert!(first.previous_page().is_none());
        assert_eq!(first.next_page().map(|q| q.page), Some(2));
    }

    #[test]
    fn search_resets_to_first_page() {
        let mut ctl = ListController::<&str>::new();
        ctl.begin(3, None);
        ctl.finish(Ok(page_of(vec!["z"], 3, 3)), "gagal").unwrap();
        let query = ctl.submit_search("ahmad");
        assert_eq!(query.page, 1);
        assert_eq!(query.search.as_deref(), Some("ahmad"));
        ctl.finish(Ok(page_of(vec!["a"], 1, 1)), "gagal").unwrap();
        assert_eq!(ctl.search(), Some("ahmad"));
    }

    #[test]
    fn query_pairs_skip_empty_search() {
        let query = ListQuery::new(0, Some("   ".into()));
        assert_eq!(
            query.to_pairs(),
            vec![("page", "1".to_string()), ("limit", "10".to_string())]
        );
    }
}
