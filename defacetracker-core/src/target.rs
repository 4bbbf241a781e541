use crate::error::{Result, TrackerError};
use url::Url;

/// TLD value that selects the global archive instead of a country listing.
pub const ARCHIVE_TLD: &str = "archive";

/// Which listing to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The global archive of recent defacements
    Archive,
    /// Per-country listing, keyed by upper-cased TLD
    Country(String),
    /// Search results for a single domain
    Domain(String),
}

impl Target {
    /// Build a target from the mutually exclusive `--domain` / `--tld` values.
    /// With neither given, the archive is used.
    pub fn from_args(domain: Option<&str>, tld: Option<&str>) -> Result<Self> {
        match (domain, tld) {
            (Some(_), Some(_)) => Err(TrackerError::ConflictingTarget),
            (Some(domain), None) => {
                let domain = domain.trim();
                if is_valid_fqdn(domain) {
                    Ok(Target::Domain(domain.to_string()))
                } else {
                    Err(TrackerError::InvalidDomain(domain.to_string()))
                }
            }
            (None, tld) => Ok(Self::from_tld(tld.unwrap_or(ARCHIVE_TLD))),
        }
    }

    pub fn from_tld(tld: &str) -> Self {
        let tld = tld.trim().trim_start_matches('.').to_uppercase();
        if tld.eq_ignore_ascii_case(ARCHIVE_TLD) {
            Target::Archive
        } else {
            Target::Country(tld)
        }
    }

    /// URL of the first listing page.
    pub fn base_url(&self, origin: &Url) -> String {
        let origin = origin.as_str().trim_end_matches('/');
        match self {
            Target::Archive => format!("{}/archive", origin),
            Target::Country(tld) => format!("{}/country/{}", origin, tld),
            Target::Domain(domain) => format!("{}/search/q={}", origin, domain),
        }
    }

    /// Short name used in log lines and default output filenames.
    pub fn identifier(&self) -> String {
        match self {
            Target::Archive => ARCHIVE_TLD.to_string(),
            Target::Country(tld) => tld.to_lowercase(),
            Target::Domain(domain) => domain.clone(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Target::Archive => "archive".to_string(),
            Target::Country(tld) => format!("TLD {}", tld),
            Target::Domain(domain) => format!("domain {}", domain),
        }
    }
}

/// URL of page `page` (1-based) under `base`.
pub fn page_url(base: &str, page: u8) -> String {
    if page > 1 {
        format!("{}/page={}", base, page)
    } else {
        base.to_string()
    }
}

/// Check that `domain` is a fully qualified domain name: dot-separated
/// labels of letters, digits and inner hyphens, ending in an alphabetic TLD.
pub fn is_valid_fqdn(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let (tld, hosts) = match labels.split_last() {
        Some(parts) => parts,
        None => return false,
    };

    let tld_ok = (2..=63).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic());

    tld_ok && hosts.iter().all(|label| is_valid_label(label))
}

fn is_valid_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
