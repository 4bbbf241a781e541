use colored::Colorize;

pub mod error;
pub mod report;
pub mod scrape;
pub mod target;

pub use error::TrackerError;

pub fn print_banner() {
    let rule = "=".repeat(47);
    println!("{}", rule.bright_green().bold());
    println!(
        "{}",
        format!("  Defacetracker v{}", env!("CARGO_PKG_VERSION"))
            .bright_green()
            .bold()
    );
    println!("{}", "  Defacement mirror scraper for Zone-Xsec".green());
    println!("{}", rule.bright_green().bold());
    println!();
}
