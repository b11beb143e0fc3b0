//! Event loop (impure shell).
//!
//! Owns the `CatalogState` on a single tokio task. Actions arrive from the
//! caller's channel, effects are executed as tasks in a `JoinSet` whose
//! results are dispatched back in, and the debounce deadline is honoured by
//! sleeping until `CatalogState::next_deadline` and dispatching `Tick`.
//!
//! State is never touched from the spawned tasks; they only return actions.

use crate::api::CatalogBackend;
use crate::model::catalog_action::{CatalogAction, Effect};
use crate::state::catalog_state::{CatalogSettings, CatalogSnapshot, CatalogState};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Drive a catalog session until `actions` closes.
///
/// Closing the channel tears the session down at once: a pending debounced
/// search is cancelled and in-flight requests are aborted rather than awaited.
/// `on_change` is called with a fresh snapshot whenever it differs from the
/// previous one. Returns the final (torn down) state.
pub async fn run<B>(
    backend: Arc<B>,
    settings: CatalogSettings,
    mut actions: UnboundedReceiver<CatalogAction>,
    mut on_change: impl FnMut(&CatalogSnapshot),
) -> CatalogState
where
    B: CatalogBackend + ?Sized + 'static,
{
    let mut driver = Driver::new(backend, settings);
    let mut last_snapshot = driver.state.snapshot();

    driver.dispatch(CatalogAction::Start);

    loop {
        let snapshot = driver.state.snapshot();
        if snapshot != last_snapshot {
            on_change(&snapshot);
            last_snapshot = snapshot;
        }

        let deadline = driver.state.next_deadline().map(Instant::from_std);

        tokio::select! {
            action = actions.recv() => match action {
                Some(action) => driver.dispatch(action),
                None => break,
            },
            Some(joined) = driver.tasks.join_next() => match joined {
                Ok(done) => driver.dispatch(done),
                Err(err) => warn!(error = %err, "catalog request task failed"),
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                driver.dispatch(CatalogAction::Tick);
            }
        }
    }

    debug!(in_flight = driver.tasks.len(), "input closed, tearing down");
    driver.tasks.abort_all();
    driver.dispatch(CatalogAction::Teardown);
    info!("catalog session finished");
    driver.state
}

struct Driver<B: ?Sized> {
    state: CatalogState,
    backend: Arc<B>,
    tasks: JoinSet<CatalogAction>,
}

impl<B> Driver<B>
where
    B: CatalogBackend + ?Sized + 'static,
{
    fn new(backend: Arc<B>, settings: CatalogSettings) -> Self {
        Self {
            state: CatalogState::new(settings),
            backend,
            tasks: JoinSet::new(),
        }
    }

    fn dispatch(&mut self, action: CatalogAction) {
        let now = Instant::now().into_std();
        for effect in self.state.update(action, now) {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let backend = Arc::clone(&self.backend);

        self.tasks.spawn(async move {
            match effect {
                Effect::FetchPlants(request) => {
                    let outcome = backend.list_plants(&request.params()).await;
                    CatalogAction::FetchCompleted {
                        id: request.id,
                        outcome,
                    }
                }
                Effect::FetchCategories => CatalogAction::CategoriesLoaded(backend.categories().await),
                Effect::CreatePlant(plant) => {
                    CatalogAction::PlantCreated(backend.create_plant(&plant).await)
                }
            }
        });
    }
}
