// Tests for target selection and URL building

use defacetracker_core::TrackerError;
use defacetracker_core::target::{Target, is_valid_fqdn, page_url};
use url::Url;

fn origin() -> Url {
    Url::parse("https://zone-xsec.com").unwrap()
}

// ============================================================================
// FQDN Validation Tests
// ============================================================================

#[test]
fn test_valid_fqdns() {
    assert!(is_valid_fqdn("example.com"));
    assert!(is_valid_fqdn("sub.example.co.mz"));
    assert!(is_valid_fqdn("my-site.gov.br"));
    assert!(is_valid_fqdn("a1.b2.example.org"));
}

#[test]
fn test_invalid_fqdns() {
    assert!(!is_valid_fqdn(""));
    assert!(!is_valid_fqdn("localhost"));
    assert!(!is_valid_fqdn("example.c"));
    assert!(!is_valid_fqdn("example.c0m"));
    assert!(!is_valid_fqdn("-bad.example.com"));
    assert!(!is_valid_fqdn("bad-.example.com"));
    assert!(!is_valid_fqdn("double..dot.com"));
    assert!(!is_valid_fqdn("trailing.dot.com."));
    assert!(!is_valid_fqdn("spa ce.com"));
    assert!(!is_valid_fqdn("https://example.com"));
}

#[test]
fn test_fqdn_length_limits() {
    let long_label = format!("{}.com", "a".repeat(64));
    assert!(!is_valid_fqdn(&long_label));

    let max_label = format!("{}.com", "a".repeat(63));
    assert!(is_valid_fqdn(&max_label));

    let labels = vec!["abcdefghi"; 26].join(".");
    let too_long = format!("{}.com", labels);
    assert!(too_long.len() > 253);
    assert!(!is_valid_fqdn(&too_long));
}

// ============================================================================
// Target Selection Tests
// ============================================================================

#[test]
fn test_default_target_is_archive() {
    assert_eq!(Target::from_args(None, None).unwrap(), Target::Archive);
}

#[test]
fn test_archive_tld_any_case() {
    assert_eq!(Target::from_args(None, Some("ARCHIVE")).unwrap(), Target::Archive);
    assert_eq!(Target::from_args(None, Some("Archive")).unwrap(), Target::Archive);
}

#[test]
fn test_tld_is_uppercased() {
    assert_eq!(
        Target::from_args(None, Some("mz")).unwrap(),
        Target::Country("MZ".to_string())
    );
    assert_eq!(Target::from_tld(".br"), Target::Country("BR".to_string()));
}

#[test]
fn test_domain_target() {
    assert_eq!(
        Target::from_args(Some("example.com"), None).unwrap(),
        Target::Domain("example.com".to_string())
    );
}

#[test]
fn test_invalid_domain_rejected() {
    let err = Target::from_args(Some("not_a_domain"), None).unwrap_err();
    assert!(matches!(err, TrackerError::InvalidDomain(ref d) if d == "not_a_domain"));
}

#[test]
fn test_domain_and_tld_conflict() {
    let err = Target::from_args(Some("example.com"), Some("mz")).unwrap_err();
    assert!(matches!(err, TrackerError::ConflictingTarget));
}

// ============================================================================
// URL Building Tests
// ============================================================================

#[test]
fn test_base_urls() {
    assert_eq!(
        Target::Archive.base_url(&origin()),
        "https://zone-xsec.com/archive"
    );
    assert_eq!(
        Target::Country("MZ".to_string()).base_url(&origin()),
        "https://zone-xsec.com/country/MZ"
    );
    assert_eq!(
        Target::Domain("example.com".to_string()).base_url(&origin()),
        "https://zone-xsec.com/search/q=example.com"
    );
}

#[test]
fn test_page_urls() {
    let base = "https://zone-xsec.com/country/MZ";
    assert_eq!(page_url(base, 1), base);
    assert_eq!(page_url(base, 2), "https://zone-xsec.com/country/MZ/page=2");
    assert_eq!(page_url(base, 5), "https://zone-xsec.com/country/MZ/page=5");
}

#[test]
fn test_identifiers() {
    assert_eq!(Target::Archive.identifier(), "archive");
    assert_eq!(Target::Country("MZ".to_string()).identifier(), "mz");
    assert_eq!(
        Target::Domain("Example.com".to_string()).identifier(),
        "Example.com"
    );
}
