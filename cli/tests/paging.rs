//! Integration tests for the paginated table engine and session pieces,
//! driven through the crate's public API the way the shell uses them.

use sales_cli::{
    page_strip, Align, CellFormat, Column, LoadingGate, PageItem, ServerPagedTable,
};
use serde_json::{json, Value};

fn row(pairs: &[(&str, Value)]) -> sales_cli::Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn sample_columns() -> Vec<Column> {
    vec![
        Column::new("code", "Código"),
        Column::new("name", "Nome").sortable(),
        Column::new("total", "Total")
            .format(CellFormat::Currency)
            .align(Align::Right),
    ]
}

/// 47 rows at page size 10: clicking "next" four times walks to the last
/// page, each step carrying the full total.
#[test]
fn next_walks_to_last_page_with_total() {
    let mut table = ServerPagedTable::new(sample_columns(), 10);
    table.set_page(Vec::new(), 47);

    for expected in 1..=4u32 {
        let event = table.next().expect("page available");
        assert_eq!(event.page_index, expected);
        assert_eq!(event.page_size, 10);
        assert_eq!(event.total_length, 47);
    }
    assert!(table.next().is_none());
}

/// The strip always contains the first and last page, never duplicates, and
/// an ellipsis only stands in for two or more skipped pages.
#[test]
fn strip_invariants_across_all_positions() {
    for current in 1..=10u32 {
        let strip = page_strip(current, 10);
        let nums: Vec<u32> = strip
            .iter()
            .filter_map(|i| match i {
                PageItem::Page(p) => Some(*p),
                PageItem::Ellipsis => None,
            })
            .collect();

        assert_eq!(nums.first(), Some(&1));
        assert_eq!(nums.last(), Some(&10));
        assert!(nums.contains(&current));
        assert!(nums.windows(2).all(|w| w[0] < w[1]));

        for window in strip.windows(3) {
            if let [PageItem::Page(a), PageItem::Ellipsis, PageItem::Page(b)] = window {
                assert!(b - a >= 2);
            }
        }
    }
}

/// Deleting rows on the last page pulls the page index back into range on
/// the next refetch instead of rendering an empty page.
#[test]
fn shrinking_total_clamps_current_page() {
    let mut table = ServerPagedTable::new(sample_columns(), 10);
    table.set_page(Vec::new(), 41);
    table.select_page(5).expect("page 5 exists");
    assert_eq!(table.page_index(), 4);

    table.set_page(Vec::new(), 40);
    assert_eq!(table.page_index(), 3);
}

/// Rendering survives absent cells and shows the strip footer.
#[test]
fn render_handles_missing_values() {
    let mut table = ServerPagedTable::new(sample_columns(), 10);
    table.set_page(
        vec![
            row(&[("code", json!("V-001")), ("name", json!("Maria")), ("total", json!(150.0))]),
            row(&[("code", json!("V-002"))]),
        ],
        47,
    );

    let out = table.render(Some(100), false);
    assert!(out.contains("R$ 150,00"));
    assert!(out.contains("R$ 0,00"));
    assert!(out.contains("-"));
    assert!(out.contains("Página 1 de 5 (47 registros)"));
}

/// A request faster than the show-delay never flashes the indicator.
#[tokio::test(start_paused = true)]
async fn fast_request_keeps_indicator_hidden() {
    let gate = LoadingGate::new();
    gate.start();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    gate.stop();

    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    assert!(!gate.is_visible());
}
