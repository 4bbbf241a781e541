use crate::error::{Result, ScanError};
use crate::record::DefacementRecord;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

/// Rows shorter than this are not mirror entries.
pub const MIN_COLUMNS: usize = 10;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"table[class*="mirror"]"#).expect("static selector"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("static selector"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));
static PAGINATION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"ul[class*="pagination"]"#).expect("static selector"));

/// What a listing page's pagination control says about further pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// No pagination control on the page
    #[default]
    Missing,
    /// A control is present but none of its labels is a page number
    Unnumbered,
    /// Highest page number in the control
    LastPage(u32),
}

impl Pagination {
    pub fn last_page(&self) -> Option<u32> {
        match self {
            Pagination::LastPage(last) => Some(*last),
            _ => None,
        }
    }
}

/// Everything read from one listing page.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub records: Vec<DefacementRecord>,
    pub skipped_rows: usize,
    pub pagination: Pagination,
}

/// Parse a listing page: the mirror table rows plus the pagination control.
///
/// A page without a mirror table is an error. A page without a pagination
/// control is not.
pub fn parse_page(html: &str, page_url: &str, origin: &Url) -> Result<ParsedPage> {
    let document = Html::parse_document(html);

    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| ScanError::MissingTable {
            url: page_url.to_string(),
        })?;
    info!("Located the mirror table on {}", page_url);

    let mut page = ParsedPage::default();
    for row in table.select(&ROW_SELECTOR) {
        match extract_row(row, origin) {
            Some(record) => page.records.push(record),
            None => {
                warn!("Skipping a row due to insufficient columns");
                page.skipped_rows += 1;
            }
        }
    }

    page.pagination = parse_pagination(&document);
    debug!(
        "Parsed {} rows ({} skipped), pagination {:?}",
        page.records.len(),
        page.skipped_rows,
        page.pagination
    );

    Ok(page)
}

/// Map one `<tr>` to a record.
///
/// Returns `None` only when the row has fewer than [`MIN_COLUMNS`] cells.
/// Any other missing value becomes an empty string.
pub fn extract_row(row: ElementRef<'_>, origin: &Url) -> Option<DefacementRecord> {
    let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
    if cells.len() < MIN_COLUMNS {
        return None;
    }

    // "2024-01-02 10:33:00" -> "2024-01-02"
    let datetime = element_text(cells[0]);
    let date = match datetime.split_once(' ') {
        Some((date, _)) => date.to_string(),
        None => datetime,
    };

    let attacker = anchor_or_cell_text(cells[1]);
    let team = anchor_or_cell_text(cells[2]);
    let url = element_text(cells[8]);

    let mirror = cells[9]
        .select(&ANCHOR_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| absolutize_mirror(href, origin))
        .unwrap_or_default();

    Some(DefacementRecord::new(date, attacker, team, url, mirror))
}

/// Read the pagination list. Its last page is the highest all-digit anchor
/// label.
pub fn parse_pagination(document: &Html) -> Pagination {
    match document.select(&PAGINATION_SELECTOR).next() {
        None => Pagination::Missing,
        Some(list) => match max_page_label(list) {
            Some(last) => Pagination::LastPage(last),
            None => Pagination::Unnumbered,
        },
    }
}

fn max_page_label(list: ElementRef<'_>) -> Option<u32> {
    list.select(&ANCHOR_SELECTOR)
        .filter_map(|a| {
            let label = a.text().collect::<String>();
            let label = label.trim();
            if !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()) {
                label.parse::<u32>().ok()
            } else {
                None
            }
        })
        .max()
}

/// Rewrite a site-relative mirror href against the site origin.
pub fn absolutize_mirror(href: &str, origin: &Url) -> String {
    if href.starts_with('/') {
        format!("{}{}", origin.as_str().trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

/// Text content with each text node trimmed and empty nodes dropped.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn anchor_or_cell_text(cell: ElementRef<'_>) -> String {
    match cell.select(&ANCHOR_SELECTOR).next() {
        Some(anchor) => element_text(anchor),
        None => element_text(cell),
    }
}
