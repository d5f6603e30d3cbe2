use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use plantdex_api::PlantApi;
use plantdex_core::SearchSession;
use plantdex_core::view::PlantCard;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::debounce::Debouncer;
use crate::widget::{SearchApplied, SearchWidget, WidgetView};

/// Drives a [`SearchWidget`] against a [`PlantApi`].
///
/// Requests run as spawned tasks so callers never wait on the network. Each
/// state change publishes a fresh [`WidgetView`] to subscribers. Cloning is
/// cheap and shares the same widget.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn PlantApi>,
    widget: Mutex<SearchWidget>,
    updates: watch::Sender<WidgetView>,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController").field("view", &self.snapshot()).finish_non_exhaustive()
    }
}

impl SearchController {
    #[must_use]
    pub fn new(api: Arc<dyn PlantApi>) -> Self {
        let (updates, _) = watch::channel(WidgetView::default());
        Self { inner: Arc::new(Inner { api, widget: Mutex::new(SearchWidget::new()), updates }) }
    }

    /// Receiver that observes every published view.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WidgetView> {
        self.inner.updates.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> WidgetView {
        self.widget().view().clone()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<PlantCard> {
        self.widget().view().card().cloned()
    }

    /// The accepted search behind the current view, if any.
    #[must_use]
    pub fn session(&self) -> Option<SearchSession> {
        self.widget().session().cloned()
    }

    /// Starts a search immediately. Must be called inside a tokio runtime.
    pub fn search(&self, query: impl Into<String>) -> JoinHandle<SearchApplied> {
        let query = query.into();
        let ticket = {
            let mut widget = self.widget();
            let ticket = widget.begin_search(&query);
            self.publish(&widget);
            ticket
        };

        let this = self.clone();
        tokio::spawn(async move {
            let outcome = this.inner.api.search(&ticket.query).await;
            let mut widget = this.widget();
            let applied = widget.complete_search(&ticket, outcome);
            if applied != SearchApplied::Discarded {
                this.publish(&widget);
            }
            applied
        })
    }

    /// Input trigger that searches once typing has been quiet for `delay`.
    #[must_use]
    pub fn debounced_input(&self, delay: Duration) -> Debouncer<String> {
        let this = self.clone();
        Debouncer::new(delay, move |query: String| {
            drop(this.search(query));
        })
    }

    pub fn next(&self) -> bool {
        self.navigate(SearchWidget::next)
    }

    pub fn previous(&self) -> bool {
        self.navigate(SearchWidget::previous)
    }

    /// Activates Details on the rendered card.
    ///
    /// Returns the fetch task on first activation, `None` when the region
    /// only toggled or no card is shown.
    pub fn toggle_details(&self) -> Option<JoinHandle<bool>> {
        let ticket = {
            let mut widget = self.widget();
            let ticket = widget.toggle_details();
            self.publish(&widget);
            ticket?
        };

        let this = self.clone();
        Some(tokio::spawn(async move {
            let outcome = this.inner.api.details(ticket.plant_id).await;
            let mut widget = this.widget();
            let filled = widget.complete_details(ticket, outcome);
            if filled {
                this.publish(&widget);
            }
            filled
        }))
    }

    /// Reports that the rendered card's image failed to load.
    pub fn image_failed(&self) -> bool {
        let mut widget = self.widget();
        let fired = widget.image_failed();
        if fired {
            self.publish(&widget);
        }
        fired
    }

    fn navigate(&self, step: fn(&mut SearchWidget) -> bool) -> bool {
        let mut widget = self.widget();
        let moved = step(&mut *widget);
        if moved {
            self.publish(&widget);
        }
        moved
    }

    fn widget(&self) -> MutexGuard<'_, SearchWidget> {
        // the widget holds plain data, a panic mid-update cannot leave it unusable
        self.inner.widget.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, widget: &SearchWidget) {
        self.inner.updates.send_replace(widget.view().clone());
    }
}
