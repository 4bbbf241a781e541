use defacetracker::commands::command_argument_builder;
use defacetracker::handlers::{expand_path, handle_scrape, init_logging};
use defacetracker_core::print_banner;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();
    let quiet = matches.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let log_file = matches
        .get_one::<String>("log-file")
        .map(|path| expand_path(path));

    if let Err(e) = init_logging(log_file.as_deref()) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = handle_scrape(&matches).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
