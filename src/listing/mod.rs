//! # Listing Module
//!
//! Paginated, searchable tables and their screens.

pub mod debounce;
pub mod pager;
pub mod paginated;
pub mod screens;

pub use debounce::SearchDebouncer;
pub use pager::{PageLink, ResultRange, page_window, result_range};
pub use paginated::{Column, ListState, LoadOutcome, PageSource, PaginatedList, TableRow};
pub use screens::{
    InfluencerRow, InfluencersSource, TokenRow, TokensSource, UserRow, UsersSource,
};
