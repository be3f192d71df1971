use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use anyhow::Result;
use chrono::Local;

use crate::config::Source;
use crate::model::{Match, Snapshot};
use crate::payload;
use crate::state::{Delta, ProviderCommand};

/// Fetch worker. Idle until asked; every `Refresh` produces exactly one
/// `Loaded` or `LoadFailed`. Refresh requests that pile up while a fetch is
/// running collapse into one.
pub fn spawn_provider(
    source: Source,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let mut silent = match cmd {
                ProviderCommand::Refresh { silent } => silent,
                ProviderCommand::Shutdown => break,
            };
            let mut shutdown = false;
            while let Ok(next) = cmd_rx.try_recv() {
                match next {
                    ProviderCommand::Refresh { silent: s } => silent &= s,
                    ProviderCommand::Shutdown => shutdown = true,
                }
            }
            if shutdown {
                break;
            }

            let started = Instant::now();
            let delta = match load_snapshot(&source, &tx) {
                Ok(snapshot) => {
                    tracing::info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        team = %snapshot.dataset.featured_team,
                        matches = snapshot.dataset.all_matches.len(),
                        clubs = snapshot.clubs.len(),
                        "dashboard loaded"
                    );
                    Delta::Loaded(Box::new(snapshot))
                }
                Err(err) => {
                    let error = format!("{err:#}");
                    tracing::warn!(%error, silent, "dashboard load failed");
                    Delta::LoadFailed { error, silent }
                }
            };
            if tx.send(delta).is_err() {
                break;
            }
        }
        tracing::debug!("provider stopped");
    })
}

/// One refresh: the league payload is required, the club feed is optional.
pub fn load_snapshot(source: &Source, tx: &Sender<Delta>) -> Result<Snapshot> {
    let dataset = match source {
        Source::Http { base_url } => payload::fetch_dashboard(base_url)?,
        Source::File { dashboard, .. } => payload::read_dashboard_file(dashboard)?,
    };
    let clubs = load_clubs(source).unwrap_or_else(|err| {
        let _ = tx.send(Delta::Log(format!("[WARN] Club results unavailable: {err:#}")));
        Vec::new()
    });
    Ok(Snapshot {
        dataset,
        clubs,
        fetched_on: Local::now().date_naive(),
    })
}

fn load_clubs(source: &Source) -> Result<Vec<Match>> {
    match source {
        Source::Http { base_url } => payload::fetch_clubs(base_url),
        Source::File {
            clubs: Some(path), ..
        } => payload::read_clubs_file(path),
        Source::File { clubs: None, .. } => Ok(Vec::new()),
    }
}
