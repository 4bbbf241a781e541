pub mod error;
pub mod extract;
pub mod fetcher;
pub mod record;

pub use error::ScanError;
pub use extract::{Pagination, ParsedPage, extract_row, parse_page, parse_pagination};
pub use fetcher::PageFetcher;
pub use record::DefacementRecord;
