use crate::CLAP_STYLING;
use clap::arg;
use defacetracker_core::scrape::{DEFAULT_ORIGIN, MAX_PAGES};
use url::Url;

pub const DEFAULT_LOG_FILE: &str = "debug.log";

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("defacetracker")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("defacetracker")
        .about("Defacement scraper for Zone-Xsec")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-t --"tld" <TLD>)
                .required(false)
                .help("Specify the TLD to scrape (e.g., MZ). Defaults to the global archive")
                .conflicts_with("domain"),
        )
        .arg(
            arg!(-d --"domain" <FQDN>)
                .required(false)
                .help("Specify the FQDN to search for (e.g., example.com)")
                .conflicts_with("tld"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Output format: csv or json")
                .value_parser(["csv", "json"])
                .default_value("csv"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Output file name (default: <DDMMYYYY>_<target>.<format>)"),
        )
        .arg(
            arg!(-p --"pages" <NUM_PAGES>)
                .required(false)
                .help(format!("Number of pages to scrape (max {})", MAX_PAGES))
                .value_parser(clap::value_parser!(u8).range(1..=i64::from(MAX_PAGES)))
                .default_value("1"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(--"log-file" <PATH>)
                .required(false)
                .help("Append log output to this file")
                .default_value(DEFAULT_LOG_FILE),
        )
        .arg(
            arg!(--"origin" <URL>)
                .required(false)
                .help("Base URL of the mirror site")
                .value_parser(clap::value_parser!(Url))
                .default_value(DEFAULT_ORIGIN)
                .hide(true),
        )
}
