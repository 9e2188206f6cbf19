//! Page links and result bounds for the pagination bar.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    Ellipsis,
}

/// Links to show for `current` out of `total_pages`: everything up to five
/// pages, otherwise first, last, and the neighbours of `current` with
/// ellipses over the gaps.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= 5 {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let mut links = vec![PageLink::Page(1)];
    if current > 3 {
        links.push(PageLink::Ellipsis);
    }

    let from = current.saturating_sub(1).max(2);
    let to = current.saturating_add(1).min(total_pages - 1);
    links.extend((from..=to).map(PageLink::Page));

    if current.saturating_add(2) < total_pages {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total_pages));
    links
}

/// "Showing `start` to `end` of `total`"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

pub fn result_range(page: u32, limit: u32, total: u64) -> Option<ResultRange> {
    if total == 0 || limit == 0 {
        return None;
    }
    let page = u64::from(page.max(1));
    let limit = u64::from(limit);
    let start = (page - 1) * limit + 1;
    if start > total {
        return None;
    }
    Some(ResultRange {
        start,
        end: (page * limit).min(total),
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Ellipsis, Page};

    #[test]
    fn short_runs_list_every_page() {
        assert_eq!(page_window(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn out_of_range_current_sticks_to_last_page() {
        assert_eq!(page_window(u32::MAX, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
        assert_eq!(
            page_window(u32::MAX, u32::MAX),
            vec![Page(1), Ellipsis, Page(u32::MAX - 1), Page(u32::MAX)]
        );
    }

    #[test]
    fn long_runs_collapse_around_current() {
        assert_eq!(page_window(1, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(page_window(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
        assert_eq!(page_window(3, 6), vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]);
    }

    #[test]
    fn result_range_clamps_last_page() {
        assert_eq!(
            result_range(3, 10, 25),
            Some(ResultRange { start: 21, end: 25, total: 25 })
        );
        assert_eq!(result_range(1, 10, 0), None);
    }
}
