use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};

use speller::config::AppConfig;
use speller::relay::{self, RelayMessage};
use speller::render::render_result;
use speller::speller_client::SpellerClient;
use speller::watcher::{Effect, Event, RawSelection, SelectionWatcher, SourceKind};

/// Runs one check end to end: the text from argv (or stdin) plays the role
/// of a stabilized page selection and is driven through the same state
/// machine, service call and relay a page host would use.
#[tokio::main]
async fn main() -> Result<()> {
    TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    let config_path = env::var("SPELLER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("speller.json"));
    let config = AppConfig::load(&config_path)?;

    let text = match env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            buf
        }
    };

    let mut watcher = SelectionWatcher::new(Duration::from_millis(config.debounce_ms));
    watcher.handle(Event::SelectionChanged(RawSelection {
        range_start: 0,
        range_end: text.chars().count(),
        text,
        source: SourceKind::RichContent,
        inside_result_panel: false,
    }));
    if watcher.handle(Event::DebounceElapsed).is_empty() {
        log::info!("Nothing to check");
        return Ok(());
    }

    let checked = watcher
        .handle(Event::AffordanceActivated)
        .into_iter()
        .find_map(|effect| match effect {
            Effect::BeginCheck(text) => Some(text),
            _ => None,
        })
        .context("No check was started")?;

    let client = SpellerClient::new(&config.service)?;
    log::info!("Checking {} characters against {}", checked.chars().count(), client.base_url());

    let suggestions = match client.check(&checked).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            watcher.handle(Event::CheckFailed(err.to_string()));
            return Err(err);
        }
    };
    watcher.handle(Event::CheckCompleted(suggestions.clone()));

    // Route the result the way an embedded frame hands it to the top-level
    // frame for rendering.
    let (sender, mut receiver) = relay::channel();
    sender
        .publish(RelayMessage::CheckResult {
            text: checked,
            suggestions,
        })
        .context("Failed to relay check result")?;
    drop(sender);

    while let Some(RelayMessage::CheckResult { text, suggestions }) = receiver.recv().await {
        match render_result(&text, &suggestions) {
            Ok(html) => println!("{html}"),
            Err(err) => {
                log::warn!("Rejected suggestion list: {err}");
                println!("{text}");
            }
        }
    }

    Ok(())
}
