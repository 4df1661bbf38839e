//! Paginated table engine.
//!
//! A table holds column descriptors, the current rows, and page state. It
//! never performs I/O: navigation produces a [`PageEvent`] describing the
//! page the user wants, and the caller refetches and re-supplies rows.
//!
//! Two variants share the core:
//! - [`ServerPagedTable`]: rows are one page; the server slices and counts.
//! - [`ClientPagedTable`]: rows are the full collection; slicing, sorting
//!   and the total are computed locally and navigation needs no refetch.

use crate::format::{format_cell, CellFormat};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

/// One table row, keyed by column key
pub type Row = serde_json::Map<String, Value>;

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 32;

/// Minimum column width when shrinking to fit the output width
const MIN_COLUMN_WIDTH: usize = 6;

/// Fallback output width when none is configured
pub const DEFAULT_RENDER_WIDTH: usize = 100;

/// Visible page-strip slots
const STRIP_WINDOW: u32 = 4;

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual tone of a row action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    View,
    Edit,
    Remove,
}

/// A per-row action affordance.
///
/// `visible_when` gates the action on row content; `None` means always
/// visible.
#[derive(Clone)]
pub struct RowAction {
    pub label: String,
    pub tone: Tone,
    pub visible_when: Option<Arc<dyn Fn(&Row) -> bool + Send + Sync>>,
}

impl RowAction {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
            visible_when: None,
        }
    }

    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        self.visible_when = Some(Arc::new(predicate));
        self
    }

    pub fn is_visible(&self, row: &Row) -> bool {
        match &self.visible_when {
            Some(p) => p(row),
            None => true,
        }
    }
}

impl std::fmt::Debug for RowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowAction")
            .field("label", &self.label)
            .field("tone", &self.tone)
            .field("visible_when", &self.visible_when.is_some())
            .finish()
    }
}

/// Column descriptor
#[derive(Debug, Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub align: Align,
    pub format: CellFormat,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            align: Align::Left,
            format: CellFormat::Text,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }
}

/// Normalized navigation event; the caller refetches from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEvent {
    /// Zero-based page to fetch
    pub page_index: u32,
    pub page_size: u32,
    /// Total row count known at the time of the event
    pub total_length: u64,
}

/// One entry in the rendered page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// 1-based page number
    Page(u32),
    Ellipsis,
}

/// Compute the compact page strip for `current` (1-based) of `total` pages.
///
/// Up to four slots: a window of pages around the current one, shifted to
/// stay in bounds, with the first and last page always present and an
/// ellipsis wherever the window skips two or more pages.
pub fn page_strip(current: u32, total: u32) -> Vec<PageItem> {
    if total <= STRIP_WINDOW {
        return (1..=total).map(PageItem::Page).collect();
    }

    let span = (STRIP_WINDOW - 1) / 2;
    let mut start = current as i64 - span as i64;
    let mut end = current as i64 + span as i64;
    if start < 1 {
        end += 1 - start;
        start = 1;
    }
    if end > total as i64 {
        start -= end - total as i64;
        end = total as i64;
    }
    let start = start.max(1) as u32;
    let end = end as u32;

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    for p in start..=end {
        items.push(PageItem::Page(p));
    }
    if end < total {
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }
    items
}

/// Current sort applied to the rows
#[derive(Debug, Clone, PartialEq, Eq)]
struct SortState {
    key: String,
    ascending: bool,
}

/// Page state and rendering shared by both table variants
#[derive(Debug)]
struct TableCore {
    columns: Vec<Column>,
    actions: Vec<RowAction>,
    page_index: u32,
    page_size: u32,
    total: u64,
    truncate: usize,
    sort: Option<SortState>,
}

impl TableCore {
    fn new(columns: Vec<Column>, page_size: u32) -> Self {
        Self {
            columns,
            actions: Vec::new(),
            page_index: 0,
            page_size: page_size.max(1),
            total: 0,
            truncate: 49,
            sort: None,
        }
    }

    fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(self.page_size as u64);
        (pages.max(1)).min(u32::MAX as u64) as u32
    }

    /// Pull the page index back into range after the total shrank
    fn clamp_page_index(&mut self) {
        let last = self.total_pages() - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }

    fn event(&self) -> PageEvent {
        PageEvent {
            page_index: self.page_index,
            page_size: self.page_size,
            total_length: self.total,
        }
    }

    fn toggle_sort(&mut self, key: &str) -> Option<bool> {
        let column = self.columns.iter().find(|c| c.key == key)?;
        if !column.sortable {
            return None;
        }
        let ascending = match &self.sort {
            Some(s) if s.key == key => !s.ascending,
            _ => true,
        };
        self.sort = Some(SortState {
            key: key.to_string(),
            ascending,
        });
        Some(ascending)
    }
}

/// Stable comparison over raw JSON cell values: numbers numerically,
/// everything else as display text. Ties keep their original order via
/// `sort_by`'s stability.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => {
            let x = a.map(cell_text).unwrap_or_default();
            let y = b.map(cell_text).unwrap_or_default();
            x.cmp(&y)
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sort_rows(rows: &mut [Row], sort: &SortState) {
    rows.sort_by(|a, b| {
        let ord = compare_cells(a.get(&sort.key), b.get(&sort.key));
        if sort.ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

/// Table over server-sliced pages: `rows` is always exactly one page.
#[derive(Debug)]
pub struct ServerPagedTable {
    core: TableCore,
    rows: Vec<Row>,
}

impl ServerPagedTable {
    pub fn new(columns: Vec<Column>, page_size: u32) -> Self {
        Self {
            core: TableCore::new(columns, page_size),
            rows: Vec::new(),
        }
    }

    pub fn with_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.core.actions = actions;
        self
    }

    pub fn set_truncate(&mut self, limit: usize) {
        self.core.truncate = limit;
    }

    /// Supply a freshly fetched page. Clamps the page index if the total
    /// shrank below the current page.
    pub fn set_page(&mut self, rows: Vec<Row>, total: u64) {
        self.rows = rows;
        self.core.total = total;
        self.core.clamp_page_index();
        if let Some(sort) = self.core.sort.clone() {
            sort_rows(&mut self.rows, &sort);
        }
    }

    pub fn page_index(&self) -> u32 {
        self.core.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.core.page_size
    }

    pub fn total(&self) -> u64 {
        self.core.total
    }

    pub fn total_pages(&self) -> u32 {
        self.core.total_pages()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Request the next page, if any
    pub fn next(&mut self) -> Option<PageEvent> {
        if self.core.page_index + 1 < self.core.total_pages() {
            self.core.page_index += 1;
            Some(self.core.event())
        } else {
            None
        }
    }

    /// Request the previous page, if any
    pub fn prev(&mut self) -> Option<PageEvent> {
        if self.core.page_index > 0 {
            self.core.page_index -= 1;
            Some(self.core.event())
        } else {
            None
        }
    }

    /// Request a page by 1-based strip number
    pub fn select_page(&mut self, page: u32) -> Option<PageEvent> {
        if page < 1 || page > self.core.total_pages() {
            return None;
        }
        self.core.page_index = page - 1;
        Some(self.core.event())
    }

    /// Toggle sort on a column; re-sorts the rows already in hand.
    ///
    /// Returns the new direction, or `None` when the column is unknown or
    /// not sortable.
    pub fn sort_by(&mut self, key: &str) -> Option<bool> {
        let ascending = self.core.toggle_sort(key)?;
        if let Some(sort) = self.core.sort.clone() {
            sort_rows(&mut self.rows, &sort);
        }
        Some(ascending)
    }

    pub fn strip(&self) -> Vec<PageItem> {
        page_strip(self.core.page_index + 1, self.core.total_pages())
    }

    pub fn render(&self, width: Option<usize>, color: bool) -> String {
        render_table(&self.core, &self.rows, width, color)
    }
}

/// Table over a complete in-memory collection; pages are sliced locally.
#[derive(Debug)]
pub struct ClientPagedTable {
    core: TableCore,
    all_rows: Vec<Row>,
}

impl ClientPagedTable {
    pub fn new(columns: Vec<Column>, page_size: u32) -> Self {
        Self {
            core: TableCore::new(columns, page_size),
            all_rows: Vec::new(),
        }
    }

    pub fn with_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.core.actions = actions;
        self
    }

    pub fn set_truncate(&mut self, limit: usize) {
        self.core.truncate = limit;
    }

    /// Replace the full collection
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.all_rows = rows;
        self.core.total = self.all_rows.len() as u64;
        self.core.clamp_page_index();
        if let Some(sort) = self.core.sort.clone() {
            sort_rows(&mut self.all_rows, &sort);
        }
    }

    pub fn page_index(&self) -> u32 {
        self.core.page_index
    }

    pub fn total(&self) -> u64 {
        self.core.total
    }

    pub fn total_pages(&self) -> u32 {
        self.core.total_pages()
    }

    /// The slice of rows belonging to the current page
    pub fn current_page(&self) -> &[Row] {
        let start = (self.core.page_index as usize) * (self.core.page_size as usize);
        let end = (start + self.core.page_size as usize).min(self.all_rows.len());
        if start >= self.all_rows.len() {
            &[]
        } else {
            &self.all_rows[start..end]
        }
    }

    /// Move to the next page. The event is informational here; the data is
    /// already local and no refetch is needed.
    pub fn next(&mut self) -> Option<PageEvent> {
        if self.core.page_index + 1 < self.core.total_pages() {
            self.core.page_index += 1;
            Some(self.core.event())
        } else {
            None
        }
    }

    pub fn prev(&mut self) -> Option<PageEvent> {
        if self.core.page_index > 0 {
            self.core.page_index -= 1;
            Some(self.core.event())
        } else {
            None
        }
    }

    pub fn select_page(&mut self, page: u32) -> Option<PageEvent> {
        if page < 1 || page > self.core.total_pages() {
            return None;
        }
        self.core.page_index = page - 1;
        Some(self.core.event())
    }

    /// Toggle sort on a column over the whole collection
    pub fn sort_by(&mut self, key: &str) -> Option<bool> {
        let ascending = self.core.toggle_sort(key)?;
        if let Some(sort) = self.core.sort.clone() {
            sort_rows(&mut self.all_rows, &sort);
        }
        Some(ascending)
    }

    pub fn strip(&self) -> Vec<PageItem> {
        page_strip(self.core.page_index + 1, self.core.total_pages())
    }

    pub fn render(&self, width: Option<usize>, color: bool) -> String {
        render_table(&self.core, self.current_page(), width, color)
    }
}

/// Whether a rendered cell exceeds the character limit
pub fn is_truncated(rendered: &str, limit: usize) -> bool {
    rendered.chars().count() > limit
}

fn truncate_value(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_string()
    } else if max_width <= 3 {
        value.chars().take(max_width).collect()
    } else {
        let take = max_width - 3;
        format!("{}...", value.chars().take(take).collect::<String>())
    }
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let gap = width - len;
    match align {
        Align::Left => format!("{value}{}", " ".repeat(gap)),
        Align::Right => format!("{}{value}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{value}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

fn render_strip(core: &TableCore) -> String {
    let current = core.page_index + 1;
    let parts: Vec<String> = page_strip(current, core.total_pages())
        .into_iter()
        .map(|item| match item {
            PageItem::Page(p) if p == current => format!("[{p}]"),
            PageItem::Page(p) => p.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect();
    parts.join(" ")
}

fn render_table(core: &TableCore, rows: &[Row], width: Option<usize>, color: bool) -> String {
    use colored::Colorize;

    let render_width = width.unwrap_or(DEFAULT_RENDER_WIDTH);

    // Precompute display strings once; widths derive from them
    let mut string_rows: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    let mut col_widths: Vec<usize> = core.columns.iter().map(|c| c.label.chars().count()).collect();
    for row in rows {
        let mut srow: Vec<String> = Vec::with_capacity(core.columns.len());
        for (i, col) in core.columns.iter().enumerate() {
            let mut value = format_cell(row.get(&col.key), col.format);
            if is_truncated(&value, core.truncate) {
                value = truncate_value(&value, core.truncate);
            }
            col_widths[i] = col_widths[i].max(value.chars().count());
            srow.push(value);
        }
        string_rows.push(srow);
    }

    let column_count = col_widths.len();
    if column_count > 0 {
        let border_padding = column_count * 3 + 1;
        let mut available = render_width.saturating_sub(border_padding);
        if available < column_count {
            available = column_count;
        }

        let mut total_width = col_widths.iter().sum::<usize>();
        if total_width > available {
            for width in col_widths.iter_mut() {
                if *width > MAX_COLUMN_WIDTH {
                    *width = MAX_COLUMN_WIDTH;
                }
            }
            total_width = col_widths.iter().sum();

            // Shrink the widest column until everything fits
            while total_width > available {
                if let Some((idx, _)) = col_widths
                    .iter()
                    .enumerate()
                    .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
                    .max_by_key(|(_, width)| *width)
                {
                    col_widths[idx] -= 1;
                } else if let Some((idx, _)) = col_widths
                    .iter()
                    .enumerate()
                    .filter(|(_, width)| **width > 1)
                    .max_by_key(|(_, width)| *width)
                {
                    col_widths[idx] -= 1;
                } else {
                    break;
                }
                total_width = col_widths.iter().sum();
            }
        }
    }

    let mut output = String::new();

    output.push('┌');
    for (idx, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(width + 2));
        output.push(if idx == col_widths.len() - 1 { '┐' } else { '┬' });
    }
    output.push('\n');

    output.push('│');
    for (i, col) in core.columns.iter().enumerate() {
        output.push(' ');
        let truncated = truncate_value(&col.label, col_widths[i]);
        let padded = pad(&truncated, col_widths[i], Align::Left);
        if color {
            output.push_str(&padded.bold().to_string());
        } else {
            output.push_str(&padded);
        }
        output.push(' ');
        output.push('│');
    }
    output.push('\n');

    output.push('├');
    for (idx, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(width + 2));
        output.push(if idx == col_widths.len() - 1 { '┤' } else { '┼' });
    }
    output.push('\n');

    for srow in &string_rows {
        output.push('│');
        for (i, value) in srow.iter().enumerate() {
            output.push(' ');
            let truncated = truncate_value(value, col_widths[i]);
            output.push_str(&pad(&truncated, col_widths[i], core.columns[i].align));
            output.push(' ');
            output.push('│');
        }
        output.push('\n');
    }

    output.push('└');
    for (idx, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(width + 2));
        output.push(if idx == col_widths.len() - 1 { '┘' } else { '┴' });
    }
    output.push('\n');

    output.push_str(&format!(
        "Página {} de {} ({} registros)   {}\n",
        core.page_index + 1,
        core.total_pages(),
        core.total,
        render_strip(core)
    ));

    if !core.actions.is_empty() {
        let labels: Vec<&str> = core.actions.iter().map(|a| a.label.as_str()).collect();
        output.push_str(&format!("Ações: {}\n", labels.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn pages(items: &[PageItem]) -> Vec<u32> {
        items
            .iter()
            .filter_map(|i| match i {
                PageItem::Page(p) => Some(*p),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_strip_small_totals_show_all_pages() {
        assert_eq!(page_strip(1, 1), vec![PageItem::Page(1)]);
        assert_eq!(
            page_strip(2, 4),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Page(3),
                PageItem::Page(4)
            ]
        );
    }

    #[test]
    fn test_strip_exact_cases() {
        assert_eq!(
            page_strip(1, 10),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Page(3),
                PageItem::Ellipsis,
                PageItem::Page(10)
            ]
        );
        assert_eq!(
            page_strip(5, 10),
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(4),
                PageItem::Page(5),
                PageItem::Page(6),
                PageItem::Ellipsis,
                PageItem::Page(10)
            ]
        );
        assert_eq!(
            page_strip(10, 10),
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(8),
                PageItem::Page(9),
                PageItem::Page(10)
            ]
        );
        // window touching a boundary: no ellipsis on that side
        assert_eq!(
            page_strip(2, 10),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Page(3),
                PageItem::Ellipsis,
                PageItem::Page(10)
            ]
        );
    }

    #[test]
    fn test_strip_properties_total_ten() {
        for current in 1..=10u32 {
            let strip = page_strip(current, 10);
            let nums = pages(&strip);

            assert!(nums.contains(&1), "current={current} missing first page");
            assert!(nums.contains(&10), "current={current} missing last page");
            assert!(nums.contains(&current), "current={current} missing itself");

            let mut dedup = nums.clone();
            dedup.dedup();
            assert_eq!(nums, dedup, "current={current} duplicate pages");

            // ellipsis only where at least two pages are skipped
            for window in strip.windows(3) {
                if let [PageItem::Page(a), PageItem::Ellipsis, PageItem::Page(b)] = window {
                    assert!(b - a >= 2, "current={current} ellipsis over a gap < 2");
                }
            }
        }
    }

    #[test]
    fn test_server_table_four_nexts() {
        let columns = vec![Column::new("name", "Nome")];
        let mut table = ServerPagedTable::new(columns, 10);
        table.set_page(vec![row(&[("name", json!("a"))])], 47);

        for expected_index in 1..=4u32 {
            let event = table.next().unwrap();
            assert_eq!(event.page_index, expected_index);
            assert_eq!(event.page_size, 10);
            assert_eq!(event.total_length, 47);
        }
        // page 5 of 5 is the last one
        assert!(table.next().is_none());
        assert_eq!(table.page_index(), 4);
    }

    #[test]
    fn test_server_table_prev_and_select() {
        let mut table = ServerPagedTable::new(vec![Column::new("x", "X")], 10);
        table.set_page(Vec::new(), 47);

        assert!(table.prev().is_none());
        let event = table.select_page(3).unwrap();
        assert_eq!(event.page_index, 2);
        assert!(table.select_page(0).is_none());
        assert!(table.select_page(6).is_none());
        let event = table.prev().unwrap();
        assert_eq!(event.page_index, 1);
    }

    #[test]
    fn test_page_index_clamped_after_shrink() {
        let mut table = ServerPagedTable::new(vec![Column::new("x", "X")], 10);
        table.set_page(Vec::new(), 47);
        table.select_page(5).unwrap();
        assert_eq!(table.page_index(), 4);

        // a delete dropped the total below the current page
        table.set_page(Vec::new(), 31);
        assert_eq!(table.page_index(), 3);
        assert_eq!(table.total_pages(), 4);
    }

    #[test]
    fn test_total_pages_floor_one() {
        let mut table = ServerPagedTable::new(vec![Column::new("x", "X")], 10);
        table.set_page(Vec::new(), 0);
        assert_eq!(table.total_pages(), 1);
        assert_eq!(table.strip(), vec![PageItem::Page(1)]);
    }

    #[test]
    fn test_stable_sort_preserves_tie_order() {
        let columns = vec![
            Column::new("price", "Preço").sortable(),
            Column::new("name", "Nome"),
        ];
        let mut table = ServerPagedTable::new(columns, 10);
        table.set_page(
            vec![
                row(&[("price", json!(10)), ("name", json!("b"))]),
                row(&[("price", json!(5)), ("name", json!("c"))]),
                row(&[("price", json!(10)), ("name", json!("a"))]),
            ],
            3,
        );

        assert_eq!(table.sort_by("price"), Some(true));
        let names: Vec<&str> = table
            .rows()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        // the two price=10 rows keep their original relative order
        assert_eq!(names, vec!["c", "b", "a"]);

        // second click flips direction
        assert_eq!(table.sort_by("price"), Some(false));
        let names: Vec<&str> = table
            .rows()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);

        // non-sortable column is refused
        assert_eq!(table.sort_by("name"), None);
        assert_eq!(table.sort_by("missing"), None);
    }

    #[test]
    fn test_client_table_slices_locally() {
        let columns = vec![Column::new("n", "N")];
        let mut table = ClientPagedTable::new(columns, 2);
        table.set_rows(
            (0..5)
                .map(|i| row(&[("n", json!(i))]))
                .collect(),
        );

        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.current_page().len(), 2);

        assert!(table.next().is_some());
        let event = table.next().unwrap();
        assert_eq!(event.page_index, 2);
        assert_eq!(event.total_length, 5);
        assert_eq!(table.current_page().len(), 1);
        assert!(table.next().is_none());

        // shrinking the collection clamps the page
        table.set_rows((0..2).map(|i| row(&[("n", json!(i))])).collect());
        assert_eq!(table.page_index(), 0);
    }

    #[test]
    fn test_truncation_detection() {
        assert!(!is_truncated("curto", 49));
        assert!(is_truncated(&"x".repeat(50), 49));
        assert!(!is_truncated(&"x".repeat(49), 49));
    }

    #[test]
    fn test_render_includes_footer_and_strip() {
        let columns = vec![
            Column::new("name", "Nome"),
            Column::new("price", "Preço")
                .format(CellFormat::Currency)
                .align(Align::Right),
        ];
        let mut table = ServerPagedTable::new(columns, 10);
        table.set_page(
            vec![row(&[("name", json!("Batom")), ("price", json!(25.9))])],
            47,
        );

        let out = table.render(Some(100), false);
        assert!(out.contains("Nome"));
        assert!(out.contains("R$ 25,90"));
        assert!(out.contains("Página 1 de 5 (47 registros)"));
        assert!(out.contains("[1]"));
        assert!(out.contains("…"));
    }

    #[test]
    fn test_render_missing_cells_use_placeholders() {
        let columns = vec![
            Column::new("name", "Nome"),
            Column::new("price", "Preço").format(CellFormat::Currency),
        ];
        let mut table = ServerPagedTable::new(columns, 10);
        table.set_page(vec![row(&[("name", json!("Sem preço"))])], 1);

        let out = table.render(Some(100), false);
        assert!(out.contains("R$ 0,00"));
    }

    #[test]
    fn test_row_action_visibility() {
        let action = RowAction::new("Excluir", Tone::Remove)
            .visible_when(|r| r.get("active").and_then(Value::as_bool) == Some(true));

        assert!(action.is_visible(&row(&[("active", json!(true))])));
        assert!(!action.is_visible(&row(&[("active", json!(false))])));
        assert!(!action.is_visible(&row(&[])));

        let always = RowAction::new("Ver", Tone::View);
        assert!(always.is_visible(&row(&[])));
    }
}
