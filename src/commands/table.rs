//! Plain-text rendering of list screens

use std::fmt::Write;

use crate::listing::{Column, ListState, PageLink, TableRow};

pub fn render_rows<R: TableRow>(columns: &[Column], rows: &[R]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.title.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<&str> = columns.iter().map(|c| c.title).collect();
    push_line(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn render_pager(links: &[PageLink], current: u32) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(p) if *p == current => format!("[{p}]"),
            PageLink::Page(p) => p.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full screen: table, result range, pager, or the inline error.
pub fn render_list<R: TableRow>(columns: &[Column], state: &ListState<R>) -> String {
    if let Some(error) = &state.error {
        return format!("{error}\n");
    }
    if state.rows.is_empty() {
        return "No records found\n".to_string();
    }

    let mut out = render_rows(columns, &state.rows);
    if let Some(range) = state.result_range() {
        let _ = writeln!(
            out,
            "\nShowing {} to {} of {} results",
            range.start, range.end, range.total
        );
    }
    if state.total_pages > 1 {
        let _ = writeln!(out, "Pages: {}", render_pager(&state.page_links(), state.page));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Pair(&'static str, &'static str);

    impl TableRow for Pair {
        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    const COLUMNS: &[Column] = &[Column::new("name", "Name"), Column::new("status", "Status")];

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let out = render_rows(COLUMNS, &[Pair("Alexandra", "Active"), Pair("Bo", "Revoked")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name       Status");
        assert_eq!(lines[1], "---------  -------");
        assert_eq!(lines[3], "Bo         Revoked");
    }

    #[test]
    fn pager_marks_current_page() {
        let links = [
            PageLink::Page(1),
            PageLink::Ellipsis,
            PageLink::Page(4),
            PageLink::Page(5),
            PageLink::Page(6),
            PageLink::Ellipsis,
            PageLink::Page(10),
        ];
        assert_eq!(render_pager(&links, 5), "1 ... 4 [5] 6 ... 10");
    }
}
