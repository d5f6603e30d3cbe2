//! State machine of the search widget.
//!
//! Owns the loading flag, the error region, the rendered result and the
//! current [`SearchSession`]. Every operation is synchronous; network work
//! happens elsewhere and is fed back through `complete_*` with the ticket
//! that started it.

use plantdex_api::ApiError;
use plantdex_core::constants::NO_RESULTS_MESSAGE;
use plantdex_core::view::{
    DetailActivation, DetailView, PlantCard, ResultView, format_details, render_session,
};
use plantdex_core::{PlantDetail, PlantId, RequestSeq, SearchResponse, SearchSession};
use serde::Serialize;

/// Everything an adapter needs to draw the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WidgetView {
    pub loading: bool,
    pub error: Option<String>,
    /// `None` while the results region is cleared.
    pub result: Option<ResultView>,
}

impl WidgetView {
    #[must_use]
    pub fn card(&self) -> Option<&PlantCard> {
        self.result.as_ref().and_then(ResultView::card)
    }
}

/// Issued by [`SearchWidget::begin_search`], handed back on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: RequestSeq,
    pub query: String,
}

/// Issued by [`SearchWidget::toggle_details`] when a fetch is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub plant_id: PlantId,
    render: u64,
}

/// What happened to a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchApplied {
    Rendered,
    NoResults,
    Failed,
    /// A newer search was already on screen.
    Discarded,
}

#[derive(Debug, Default)]
pub struct SearchWidget {
    view: WidgetView,
    session: Option<SearchSession>,
    last_issued: RequestSeq,
    displayed: RequestSeq,
    /// Bumped on every render; detail tickets from older renders are stale.
    render: u64,
}

impl SearchWidget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn view(&self) -> &WidgetView {
        &self.view
    }

    #[must_use]
    pub const fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    /// Shows the loading indicator and clears results and errors.
    pub fn begin_search(&mut self, query: &str) -> SearchTicket {
        self.last_issued = self.last_issued.next();
        self.view.loading = true;
        self.view.error = None;
        self.view.result = None;
        tracing::debug!(seq = %self.last_issued, query, "search issued");
        SearchTicket { seq: self.last_issued, query: query.to_owned() }
    }

    /// Applies the outcome of a search.
    ///
    /// Outcomes that are not newer than what is on screen are dropped. The
    /// loading indicator hides once the newest issued search completes.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<SearchResponse, ApiError>,
    ) -> SearchApplied {
        if ticket.seq <= self.displayed {
            tracing::debug!(
                seq = %ticket.seq,
                displayed = %self.displayed,
                query = %ticket.query,
                "discarding stale search response"
            );
            return SearchApplied::Discarded;
        }
        self.displayed = ticket.seq;
        if ticket.seq == self.last_issued {
            self.view.loading = false;
        }

        match outcome {
            Ok(response) => {
                // an older failure or empty result may still be on screen
                self.view.error = None;
                let session = SearchSession::new(ticket.seq, ticket.query.clone(), response);
                self.show(session)
            },
            Err(err) => {
                tracing::error!(seq = %ticket.seq, query = %ticket.query, error = ?err, "search failed");
                self.view.result = None;
                self.view.error = Some(err.to_string());
                SearchApplied::Failed
            },
        }
    }

    /// Moves to the next item. Returns `false` (and renders nothing) at the end.
    pub fn next(&mut self) -> bool {
        let Some(moved) = self.session.as_ref().and_then(SearchSession::next) else {
            return false;
        };
        self.show(moved);
        true
    }

    /// Moves to the previous item. Returns `false` (and renders nothing) at the start.
    pub fn previous(&mut self) -> bool {
        let Some(moved) = self.session.as_ref().and_then(SearchSession::previous) else {
            return false;
        };
        self.show(moved);
        true
    }

    /// Activates the Details action of the rendered card.
    ///
    /// Returns a ticket only on the first activation; later activations flip
    /// the region's visibility.
    pub fn toggle_details(&mut self) -> Option<DetailTicket> {
        let render = self.render;
        let card = self.view.result.as_mut()?.card_mut()?;
        match card.details.activate(card.plant_id) {
            DetailActivation::Fetch(plant_id) => Some(DetailTicket { plant_id, render }),
            DetailActivation::Toggled { visible } => {
                tracing::debug!(plant_id = %card.plant_id, visible, "details toggled");
                None
            },
        }
    }

    /// Fills the detail region of the card that requested it.
    ///
    /// Returns `false` when that card has since been replaced.
    pub fn complete_details(
        &mut self,
        ticket: DetailTicket,
        outcome: Result<Option<PlantDetail>, ApiError>,
    ) -> bool {
        let view = match outcome {
            Ok(detail) => format_details(detail.as_ref()),
            Err(err) => {
                tracing::error!(plant_id = %ticket.plant_id, error = ?err, "error fetching plant details");
                DetailView::failed()
            },
        };

        if ticket.render != self.render {
            tracing::debug!(plant_id = %ticket.plant_id, "card replaced, dropping details");
            return false;
        }
        let Some(card) = self.view.result.as_mut().and_then(ResultView::card_mut) else {
            return false;
        };
        card.details.fill(view);
        true
    }

    /// Reports that the card's image failed to load.
    pub fn image_failed(&mut self) -> bool {
        self.view
            .result
            .as_mut()
            .and_then(ResultView::card_mut)
            .is_some_and(|card| card.image.on_load_error())
    }

    fn show(&mut self, session: SearchSession) -> SearchApplied {
        let result = render_session(&session);
        let applied = match result {
            ResultView::Card(_) => SearchApplied::Rendered,
            ResultView::NoResults => {
                self.view.error = Some(NO_RESULTS_MESSAGE.to_owned());
                SearchApplied::NoResults
            },
        };
        self.render = self.render.wrapping_add(1);
        self.view.result = Some(result);
        self.session = Some(session);
        applied
    }
}
