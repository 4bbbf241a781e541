use chrono::NaiveDate;
use defacetracker::commands::command_argument_builder;
use defacetracker::handlers::*;
use defacetracker_core::TrackerError;
use defacetracker_core::report::OutputFormat;
use defacetracker_core::target::Target;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["defacetracker"];
    argv.extend_from_slice(args);
    command_argument_builder().try_get_matches_from(argv).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

#[test]
fn test_defaults() {
    let m = matches(&[]);
    assert_eq!(m.get_one::<String>("format").unwrap(), "csv");
    assert_eq!(*m.get_one::<u8>("pages").unwrap(), 1);
    assert_eq!(*m.get_one::<u64>("timeout").unwrap(), 10);
    assert_eq!(m.get_one::<String>("log-file").unwrap(), "debug.log");
    assert_eq!(
        m.get_one::<url::Url>("origin").unwrap().as_str(),
        "https://zone-xsec.com/"
    );
    assert!(!m.get_flag("quiet"));
    assert_eq!(resolve_target(&m).unwrap(), Target::Archive);
}

#[test]
fn test_resolve_target_tld() {
    let m = matches(&["--tld", "mz"]);
    assert_eq!(resolve_target(&m).unwrap(), Target::Country("MZ".to_string()));

    let m = matches(&["-t", "archive"]);
    assert_eq!(resolve_target(&m).unwrap(), Target::Archive);
}

#[test]
fn test_resolve_target_domain() {
    let m = matches(&["-d", "example.com"]);
    assert_eq!(
        resolve_target(&m).unwrap(),
        Target::Domain("example.com".to_string())
    );
}

#[test]
fn test_resolve_target_invalid_domain() {
    let m = matches(&["--domain", "bad_domain"]);
    assert!(matches!(
        resolve_target(&m),
        Err(TrackerError::InvalidDomain(_))
    ));
}

#[test]
fn test_domain_and_tld_are_mutually_exclusive() {
    let result = command_argument_builder().try_get_matches_from([
        "defacetracker",
        "--domain",
        "example.com",
        "--tld",
        "mz",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_pages_range_is_enforced() {
    for bad in ["0", "6", "abc"] {
        let result =
            command_argument_builder().try_get_matches_from(["defacetracker", "-p", bad]);
        assert!(result.is_err(), "pages={} should be rejected", bad);
    }

    let m = matches(&["--pages", "5"]);
    assert_eq!(*m.get_one::<u8>("pages").unwrap(), 5);
}

#[test]
fn test_timeout_must_be_positive() {
    let result =
        command_argument_builder().try_get_matches_from(["defacetracker", "--timeout", "0"]);
    assert!(result.is_err());

    let m = matches(&["--timeout", "1"]);
    assert_eq!(*m.get_one::<u64>("timeout").unwrap(), 1);
}

#[test]
fn test_format_is_restricted() {
    let result =
        command_argument_builder().try_get_matches_from(["defacetracker", "-f", "xml"]);
    assert!(result.is_err());

    let m = matches(&["-f", "json"]);
    assert_eq!(m.get_one::<String>("format").unwrap(), "json");
}

#[test]
fn test_resolve_output_path_default() {
    let path = resolve_output_path(
        None,
        &Target::Country("MZ".to_string()),
        OutputFormat::Csv,
        date(),
    );
    assert_eq!(path, PathBuf::from("09032024_mz.csv"));

    let path = resolve_output_path(
        None,
        &Target::Domain("example.com".to_string()),
        OutputFormat::Json,
        date(),
    );
    assert_eq!(path, PathBuf::from("09032024_example.com.json"));
}

#[test]
fn test_resolve_output_path_explicit() {
    let path = resolve_output_path(
        Some("results/out.json"),
        &Target::Archive,
        OutputFormat::Json,
        date(),
    );
    assert_eq!(path, PathBuf::from("results/out.json"));
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/defacements.csv");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.to_string_lossy().ends_with("defacements.csv"));
}

// ============================================================================
// Scrape Handler Tests
// ============================================================================

const LISTING: &str = r#"<html><body><table class="table mirror-table"><tbody>
<tr><td>2024-03-08 09:00:00</td><td><a href="/a/1">h4x</a></td><td><a>crew</a></td>
<td></td><td></td><td></td><td></td><td></td><td>victim.example.mz</td>
<td><a href="/mirror/id/7">m</a></td></tr>
<tr><td>2024-03-07 08:00:00</td><td>lonewolf</td><td></td>
<td></td><td></td><td></td><td></td><td></td><td>other.example.mz</td><td></td></tr>
</tbody></table></body></html>"#;

fn scrape_args(server: &MockServer, output: &std::path::Path) -> clap::ArgMatches {
    matches(&[
        "-q",
        "--origin",
        &server.uri(),
        "--tld",
        "mz",
        "-o",
        output.to_str().unwrap(),
    ])
}

#[tokio::test]
async fn test_handle_scrape_writes_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/country/MZ"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    let summary = handle_scrape(&scrape_args(&server, &output)).await.unwrap();
    assert_eq!(summary.records.len(), 2);

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Date,Attacker,Team,URL,Mirror");
    assert_eq!(
        lines[1],
        format!(
            "2024-03-08,h4x,crew,victim.example.mz,{}/mirror/id/7",
            server.uri()
        )
    );
    assert_eq!(lines[2], "2024-03-07,lonewolf,,other.example.mz,");
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn test_handle_scrape_http_error_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/country/MZ"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    let err = handle_scrape(&scrape_args(&server, &output))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("500"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_handle_scrape_missing_table_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/country/MZ"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    let err = handle_scrape(&scrape_args(&server, &output))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("mirror table"));
    assert!(!output.exists());
}
