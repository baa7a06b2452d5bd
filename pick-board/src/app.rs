// Startup loading task.
//
// Fetches and parses the roster once, then hands the result (or the failure)
// to the TUI over the UI channel. There is no retry.

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::protocol::UiUpdate;
use crate::roster::loader::{load_roster, RosterSource};

/// Load the roster from `source` and push exactly one `UiUpdate`.
///
/// Load errors are logged and reported as `UiUpdate::LoadFailed`; only a
/// closed UI channel is returned as an error.
pub async fn run(
    client: reqwest::Client,
    source: RosterSource,
    ui_tx: mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    info!("Loading roster from {}", source);

    let update = match load_roster(&client, &source).await {
        Ok(roster) => {
            info!("Roster loaded: {} players", roster.len());
            UiUpdate::RosterLoaded(Box::new(roster))
        }
        Err(e) => {
            error!("Failed to load CSV: {}", e);
            UiUpdate::LoadFailed {
                file_name: source.display_name(),
            }
        }
    };

    ui_tx
        .send(update)
        .await
        .map_err(|_| anyhow::anyhow!("UI channel closed before roster load finished"))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
