//! Generic paginated, searchable list.
//!
//! One controller serves every table screen; a `PageSource` supplies the
//! fetch, the row mapping, and the column layout. Each load takes a ticket
//! from a generation counter and only the newest ticket may write the state,
//! so a slow, superseded response can never overwrite fresher rows.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{Page, PageQuery};
use crate::error::Result;
use crate::listing::pager::{PageLink, ResultRange, page_window, result_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
}

impl Column {
    pub const fn new(key: &'static str, title: &'static str) -> Self {
        Self { key, title }
    }
}

/// A display row: one cell per column, in column order.
pub trait TableRow {
    fn cells(&self) -> Vec<String>;
}

#[async_trait]
pub trait PageSource: Send + Sync {
    type Record: Send;
    type Row: TableRow + Clone + Send;

    /// Fixed page size of this screen
    fn limit(&self) -> u32;

    fn columns(&self) -> &'static [Column];

    /// Inline error shown when a load fails without a server message
    fn failure_message(&self) -> &'static str;

    async fn fetch(&self, query: PageQuery) -> Result<Page<Self::Record>>;

    fn map_row(&self, record: &Self::Record) -> Self::Row;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<R> {
    pub rows: Vec<R>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub search: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<R> ListState<R> {
    fn new(limit: u32) -> Self {
        Self {
            rows: Vec::new(),
            page: 1,
            limit,
            total: 0,
            total_pages: 1,
            search: None,
            loading: false,
            error: None,
        }
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        page_window(self.page, self.total_pages)
    }

    pub fn result_range(&self) -> Option<ResultRange> {
        result_range(self.page, self.limit, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load started meanwhile; this result was dropped
    Superseded,
    Failed(String),
}

pub struct PaginatedList<S: PageSource> {
    source: S,
    state: Mutex<ListState<S::Row>>,
    generation: AtomicU64,
}

impl<S: PageSource> PaginatedList<S> {
    pub fn new(source: S) -> Self {
        let limit = source.limit();
        Self {
            source,
            state: Mutex::new(ListState::new(limit)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn columns(&self) -> &'static [Column] {
        self.source.columns()
    }

    pub fn snapshot(&self) -> ListState<S::Row> {
        self.state.lock().clone()
    }

    /// Change the search term. Always starts again from page 1.
    pub async fn set_search(&self, term: &str) -> LoadOutcome {
        self.set_search_at(term, 1).await
    }

    /// Change the search term and load `page` of the new results in one
    /// request.
    pub async fn set_search_at(&self, term: &str, page: u32) -> LoadOutcome {
        {
            let mut state = self.state.lock();
            let term = term.trim();
            state.search = (!term.is_empty()).then(|| term.to_string());
        }
        self.load_page(page).await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        let page = self.state.lock().page;
        self.load_page(page).await
    }

    pub async fn load_page(&self, page: u32) -> LoadOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = {
            let mut state = self.state.lock();
            state.page = page.max(1);
            state.loading = true;
            PageQuery::new(state.page, self.source.limit()).with_search(state.search.as_deref())
        };

        let requested = query.page;
        let result = self.source.fetch(query).await;

        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(generation = ticket, page = requested, "Discarding superseded page load");
            return LoadOutcome::Superseded;
        }
        state.loading = false;

        match result {
            Ok(page) => {
                state.rows = page.records.iter().map(|r| self.source.map_row(r)).collect();
                let p = page.pagination;
                state.page = if p.page > 0 { p.page } else { requested };
                if p.limit > 0 {
                    state.limit = p.limit;
                }
                state.total = p.total;
                state.total_pages = p.total_pages;
                state.error = None;
                tracing::debug!(page = state.page, rows = state.rows.len(), total = state.total, "Page loaded");
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(page = requested, error = %e, "Page load failed");
                let message = e.user_message(self.source.failure_message());
                state.rows.clear();
                state.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Pagination;
    use crate::error::AdminError;
    use crate::listing::debounce::SearchDebouncer;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct NameRow(String);

    impl TableRow for NameRow {
        fn cells(&self) -> Vec<String> {
            vec![self.0.clone()]
        }
    }

    /// Serves "<search>-p<page>" rows, with per-search artificial latency.
    #[derive(Default)]
    struct FakeSource {
        delays: HashMap<String, Duration>,
        fail: bool,
        queries: Mutex<Vec<PageQuery>>,
    }

    const COLUMNS: &[Column] = &[Column::new("name", "Name")];

    #[async_trait]
    impl PageSource for FakeSource {
        type Record = String;
        type Row = NameRow;

        fn limit(&self) -> u32 {
            10
        }

        fn columns(&self) -> &'static [Column] {
            COLUMNS
        }

        fn failure_message(&self) -> &'static str {
            "Failed to load things"
        }

        async fn fetch(&self, query: PageQuery) -> Result<Page<String>> {
            self.queries.lock().push(query.clone());
            let key = query.search.clone().unwrap_or_default();
            if let Some(delay) = self.delays.get(&key) {
                tokio::time::sleep(*delay).await;
            }
            if self.fail {
                return Err(AdminError::Api {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    message: None,
                });
            }
            Ok(Page {
                records: vec![format!("{key}-p{}", query.page)],
                pagination: Pagination {
                    total: 95,
                    page: query.page,
                    limit: query.limit,
                    total_pages: 10,
                },
            })
        }

        fn map_row(&self, record: &String) -> NameRow {
            NameRow(record.clone())
        }
    }

    #[tokio::test]
    async fn search_change_resets_to_first_page() {
        let list = PaginatedList::new(FakeSource::default());

        assert_eq!(list.load_page(5).await, LoadOutcome::Applied);
        assert_eq!(list.snapshot().page, 5);

        assert_eq!(list.set_search("ali").await, LoadOutcome::Applied);
        let state = list.snapshot();
        assert_eq!(state.page, 1);
        assert_eq!(state.rows, vec![NameRow("ali-p1".into())]);

        let last = list.source().queries.lock().last().cloned().unwrap();
        assert_eq!(last, PageQuery::new(1, 10).with_search(Some("ali")));
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_typing_fetches_once_from_first_page() {
        let list = PaginatedList::new(FakeSource::default());
        list.load_page(5).await;
        list.source().queries.lock().clear();

        let (debouncer, mut settled) = SearchDebouncer::spawn(Duration::from_millis(400));
        for term in ["a", "al", "ali"] {
            debouncer.input(term);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let term = settled.recv().await.unwrap();
        list.set_search(&term).await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        while let Ok(term) = settled.try_recv() {
            list.set_search(&term).await;
        }

        assert_eq!(
            *list.source().queries.lock(),
            vec![PageQuery::new(1, 10).with_search(Some("ali"))]
        );
        assert_eq!(list.snapshot().page, 1);
    }

    #[tokio::test]
    async fn search_at_page_sends_one_request() {
        let list = PaginatedList::new(FakeSource::default());

        assert_eq!(list.set_search_at("ali", 3).await, LoadOutcome::Applied);

        assert_eq!(
            *list.source().queries.lock(),
            vec![PageQuery::new(3, 10).with_search(Some("ali"))]
        );
        assert_eq!(list.snapshot().rows, vec![NameRow("ali-p3".into())]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_superseded_response_is_discarded() {
        let mut source = FakeSource::default();
        source.delays.insert("slow".into(), Duration::from_millis(500));
        source.delays.insert("fast".into(), Duration::from_millis(50));
        let list = Arc::new(PaginatedList::new(source));

        let first = {
            let list = Arc::clone(&list);
            tokio::spawn(async move { list.set_search("slow").await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = list.set_search("fast").await;

        assert_eq!(second, LoadOutcome::Applied);
        assert_eq!(first.await.unwrap(), LoadOutcome::Superseded);

        let state = list.snapshot();
        assert_eq!(state.rows, vec![NameRow("fast-p1".into())]);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn failure_clears_rows_and_sets_inline_error() {
        let list = PaginatedList::new(FakeSource::default());
        list.load_page(1).await;
        assert_eq!(list.snapshot().rows.len(), 1);

        let failing = PaginatedList::new(FakeSource {
            fail: true,
            ..FakeSource::default()
        });
        let outcome = failing.load_page(2).await;
        assert_eq!(outcome, LoadOutcome::Failed("Failed to load things".into()));
        let state = failing.snapshot();
        assert!(state.rows.is_empty());
        assert_eq!(state.error.as_deref(), Some("Failed to load things"));
    }

    #[tokio::test]
    async fn envelope_is_echoed_into_state() {
        let list = PaginatedList::new(FakeSource::default());
        list.load_page(3).await;
        let state = list.snapshot();
        assert_eq!(state.total, 95);
        assert_eq!(state.total_pages, 10);
        assert_eq!(
            state.result_range(),
            Some(ResultRange { start: 21, end: 30, total: 95 })
        );
    }
}
