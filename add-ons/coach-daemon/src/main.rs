//! Coach daemon: hosts one live coaching session over stdio.
//!
//! Reads newline-delimited JSON from stdin. Each line is one of:
//! - a command: `{"command": "dismiss_buy_signal", "index": 0}`
//! - a raw prospect utterance: `{"utterance": "non ho tempo"}` (analyzed locally)
//! - an upstream event: `{"type": "buy_signal", "data": {...}}`
//!
//! After each line the current `CoachingState` is written to stdout as one JSON line.
//! Logs go to stderr.

use coach_core::{
    CoachConfig, CoachResult, CoachingSession, InboundEvent, PatternCatalog, PlaybookTable,
    SessionCommand, UtteranceAnalyzer,
};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputLine {
    Command(SessionCommand),
    Utterance { utterance: String },
    Event(InboundEvent),
}

#[tokio::main]
async fn main() -> CoachResult<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[coach-daemon] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CoachConfig::load()?;
    let custom_catalog = config.load_catalog()?;
    let catalog = active_catalog(custom_catalog.as_ref());
    let analyzer = UtteranceAnalyzer::from_config(&config, catalog, PlaybookTable::builtin());
    let mut session = CoachingSession::with_limits(config.limits);

    tracing::info!(
        catalog_version = catalog.version(),
        min_profile_confidence = config.min_profile_confidence,
        "Coach daemon started"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut turn: usize = 0;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed; shutting down daemon");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<InputLine>(&line) {
                    Ok(input) => handle(input, &analyzer, &mut session, &mut turn),
                    Err(e) => {
                        tracing::warn!(error = %e, "malformed input line skipped");
                        continue;
                    }
                }
                let mut snapshot = serde_json::to_string(session.state())?;
                snapshot.push('\n');
                stdout.write_all(snapshot.as_bytes()).await?;
                stdout.flush().await?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("CTRL-C received; shutting down daemon");
                break;
            }
        }
    }
    Ok(())
}

/// The configured catalog when one was loaded, else the built-in one.
fn active_catalog(custom: Option<&PatternCatalog>) -> &PatternCatalog {
    custom.unwrap_or_else(|| PatternCatalog::builtin())
}

fn handle(
    input: InputLine,
    analyzer: &UtteranceAnalyzer<'_>,
    session: &mut CoachingSession,
    turn: &mut usize,
) {
    match input {
        InputLine::Command(command) => {
            let changed = session.execute(command);
            tracing::debug!(?command, changed, "command executed");
        }
        InputLine::Utterance { utterance } => {
            let analysis = analyzer.analyze(&utterance, *turn);
            *turn += 1;
            tracing::debug!(
                archetype = analysis.classification.archetype.as_str(),
                confidence = analysis.classification.confidence,
                anti_pattern = analysis.anti_pattern.as_ref().map(|h| h.id.as_str()),
                "utterance analyzed"
            );
            for event in analysis.events {
                session.ingest(event);
            }
        }
        InputLine::Event(event) => {
            let disposition = session.ingest(event);
            tracing::debug!(?disposition, "event ingested");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_catalog_takes_precedence_over_builtin() {
        let custom = PatternCatalog::from_specs("local-1", &[], &[]).unwrap();
        assert_eq!(active_catalog(Some(&custom)).version(), "local-1");
        assert_eq!(
            active_catalog(None).version(),
            PatternCatalog::builtin().version()
        );
    }

    #[test]
    fn input_lines_dispatch_by_shape() {
        let line: InputLine = serde_json::from_str(r#"{"command":"dismiss_objection","index":1}"#).unwrap();
        assert!(matches!(line, InputLine::Command(SessionCommand::DismissObjection { index: 1 })));
        let line: InputLine = serde_json::from_str(r#"{"utterance":"non ho tempo"}"#).unwrap();
        assert!(matches!(line, InputLine::Utterance { .. }));
        let line: InputLine = serde_json::from_str(r#"{"type":"tone_warning","data":{"message":"piano"}}"#).unwrap();
        assert!(matches!(line, InputLine::Event(_)));
    }
}
