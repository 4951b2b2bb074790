//! Web server command.

use console::style;

use crate::config::{parse_bind_address, Settings};
use crate::server::AppState;

/// Load the dataset and start the web server.
pub async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, &settings.host, settings.port),
        None => (settings.host.clone(), settings.port),
    };

    println!(
        "{} Loading crime data from {}...",
        style("→").cyan(),
        settings.data_path.display()
    );
    let outcome = super::load_dataset(settings);
    match outcome.failure() {
        None => println!("  {} Data loaded", style("✓").green()),
        Some(reason) => {
            eprintln!(
                "  {} {} (serving an empty table)",
                style("✗").red(),
                reason
            );
        }
    }
    let state = AppState::new(outcome);

    println!(
        "{} Starting crime API at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(state, &host, port).await
}
