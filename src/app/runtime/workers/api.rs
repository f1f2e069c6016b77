use tokio::sync::mpsc;
use tracing::debug;

use crate::logic::{AdminHandler, Outcome, Request, download_to};
use crate::sources::ApiClient;
use crate::state::types::{GeneratedFile, Release};

/// What: Perform one request and describe its result.
///
/// Inputs:
/// - `api`: Client to use.
/// - `request`: Work item from the event loop.
///
/// Output:
/// - The matching [`Outcome`]; failures are carried inside it, never raised.
pub async fn perform(api: &ApiClient, request: Request) -> Outcome {
    match request {
        Request::LoadSettings { ticket } => Outcome::Settings {
            ticket,
            result: api.settings().await,
        },
        Request::SubmitSettings(update) => Outcome::SettingsSaved(api.save_settings(&update).await),
        Request::LoadStatus { ticket } => Outcome::Status {
            ticket,
            result: api.scan_status().await,
        },
        Request::LoadReleases { ticket } => Outcome::Releases {
            ticket,
            result: api.collection::<Release>(crate::sources::api::RELEASES_PATH).await,
        },
        Request::LoadNzbs { ticket } => Outcome::Nzbs {
            ticket,
            result: api.collection::<GeneratedFile>(crate::sources::api::NZBS_PATH).await,
        },
        Request::Admin(action) => Outcome::Admin {
            action,
            result: AdminHandler::execute(api, action).await,
        },
        Request::Download { key, dir } => Outcome::Downloaded(download_to(api, &dir, &key).await),
    }
}

/// What: Spawn the worker that turns requests into outcomes.
///
/// Inputs:
/// - `api`: Client shared by every request.
/// - `req_rx`: Requests from the event loop.
/// - `outcome_tx`: Results back to the event loop.
///
/// Details:
/// - Each request runs on its own task so a slow call never delays the others; ordering of
///   results is not guaranteed, which is why loads carry tickets.
pub fn spawn_api_worker(
    api: ApiClient,
    mut req_rx: mpsc::UnboundedReceiver<Request>,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
) {
    tokio::spawn(async move {
        while let Some(request) = req_rx.recv().await {
            debug!(?request, "dispatching api request");
            let api = api.clone();
            let tx = outcome_tx.clone();
            tokio::spawn(async move {
                let outcome = perform(&api, request).await;
                let _ = tx.send(outcome);
            });
        }
    });
}
