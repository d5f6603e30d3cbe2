//! Pure projection from plant data to view-models.
//!
//! Adapters (the terminal front-end, tests) bind these structs to whatever
//! surface they draw on. Nothing here knows how it is displayed.

use serde::Serialize;

use crate::constants::{
    DETAILS_ACTION_LABEL, DETAILS_FAILED_MESSAGE, DETAILS_HEADING, FALLBACK_COMMON_NAME,
    FALLBACK_SCIENTIFIC_NAME, FALLBACK_SUNLIGHT, FALLBACK_WATERING, IMAGE_ACTION_LABEL,
    NAME_SEPARATOR, NO_DETAILS_MESSAGE, NOT_AVAILABLE, PLACEHOLDER_IMAGE, WIKI_ACTION_LABEL,
};
use crate::plant::{PlantDetail, PlantId, PlantSummary, SearchResponse};
use crate::session::SearchSession;

/// What the result region shows after a render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultView {
    Card(PlantCard),
    /// Item list empty or absent; the error region carries the notice.
    NoResults,
}

impl ResultView {
    #[must_use]
    pub const fn card(&self) -> Option<&PlantCard> {
        match self {
            Self::Card(card) => Some(card),
            Self::NoResults => None,
        }
    }

    pub fn card_mut(&mut self) -> Option<&mut PlantCard> {
        match self {
            Self::Card(card) => Some(card),
            Self::NoResults => None,
        }
    }
}

/// One rendered plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantCard {
    pub plant_id: PlantId,
    pub name: String,
    pub scientific_name: String,
    pub sunlight: String,
    pub watering: String,
    pub image: ImageSlot,
    pub details: DetailRegion,
    /// Zero-based index of this item in the result list.
    pub position: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PlantCard {
    /// Secondary actions in display order.
    #[must_use]
    pub const fn actions(&self) -> [CardAction; 3] {
        [CardAction::Details, CardAction::Image, CardAction::Wiki]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Details,
    Image,
    Wiki,
}

impl CardAction {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Details => DETAILS_ACTION_LABEL,
            Self::Image => IMAGE_ACTION_LABEL,
            Self::Wiki => WIKI_ACTION_LABEL,
        }
    }
}

/// Renders the item at `index` of `response`.
///
/// `index` is clamped into the valid range. An empty or absent item list
/// yields [`ResultView::NoResults`].
#[must_use]
pub fn render(response: &SearchResponse, index: usize) -> ResultView {
    let items = response.items();
    let Some(last) = items.len().checked_sub(1) else {
        return ResultView::NoResults;
    };
    let index = index.min(last);
    match items.get(index) {
        Some(plant) => ResultView::Card(project_card(plant, index, items.len())),
        None => ResultView::NoResults,
    }
}

/// Renders the item under the session cursor.
#[must_use]
pub fn render_session(session: &SearchSession) -> ResultView {
    render(session.response(), session.cursor())
}

fn project_card(plant: &PlantSummary, position: usize, total: usize) -> PlantCard {
    let name = non_empty(plant.common_name.as_deref()).unwrap_or(FALLBACK_COMMON_NAME).to_owned();
    let scientific_name = join_names(&plant.scientific_name)
        .unwrap_or_else(|| FALLBACK_SCIENTIFIC_NAME.to_owned());
    let sunlight = non_empty(plant.sunlight.first().map(String::as_str))
        .unwrap_or(FALLBACK_SUNLIGHT)
        .to_owned();
    let watering = non_empty(plant.watering.as_deref()).unwrap_or(FALLBACK_WATERING).to_owned();
    let image = ImageSlot::new(plant.thumbnail(), &name);

    PlantCard {
        plant_id: plant.id,
        name,
        scientific_name,
        sunlight,
        watering,
        image,
        details: DetailRegion::default(),
        position,
        total,
        has_next: position + 1 < total,
        has_previous: position > 0,
    }
}

/// The card's picture plus the one-shot broken-image fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSlot {
    pub src: String,
    pub alt: String,
    pub caption: String,
    pub caption_visible: bool,
    #[serde(skip)]
    fallback_armed: bool,
}

impl ImageSlot {
    fn new(thumbnail: Option<&str>, name: &str) -> Self {
        Self {
            src: thumbnail.unwrap_or(PLACEHOLDER_IMAGE).to_owned(),
            alt: format!("{name} Image"),
            caption: format!(
                "Sorry, we couldn't find a picture of {name}, but here's a cute lil' plant! 🌱"
            ),
            caption_visible: false,
            fallback_armed: true,
        }
    }

    /// Handles a failed image load: swaps in the placeholder and reveals the
    /// caption. Fires at most once per slot; returns whether it fired.
    pub fn on_load_error(&mut self) -> bool {
        if !self.fallback_armed {
            return false;
        }
        self.fallback_armed = false;
        PLACEHOLDER_IMAGE.clone_into(&mut self.src);
        self.caption_visible = true;
        true
    }

    #[must_use]
    pub fn uses_placeholder(&self) -> bool {
        self.src == PLACEHOLDER_IMAGE
    }
}

/// Collapsible detail region of a rendered card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailRegion {
    pub content: DetailContent,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "view", rename_all = "snake_case")]
pub enum DetailContent {
    #[default]
    Empty,
    /// Fetch issued, nothing to show yet.
    Pending,
    Ready(DetailView),
}

/// Result of activating the Details action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailActivation {
    /// First activation: the caller must fetch details for this plant.
    Fetch(PlantId),
    /// Content was already requested; only visibility flipped.
    Toggled { visible: bool },
}

impl DetailRegion {
    /// Applies a Details activation for the plant shown on this card.
    ///
    /// Only the first activation asks for a fetch. Later ones flip
    /// visibility, whether the earlier fetch succeeded, failed or is still
    /// outstanding.
    pub fn activate(&mut self, plant_id: PlantId) -> DetailActivation {
        if matches!(self.content, DetailContent::Empty) {
            self.content = DetailContent::Pending;
            return DetailActivation::Fetch(plant_id);
        }
        self.visible = !self.visible;
        DetailActivation::Toggled { visible: self.visible }
    }

    /// Stores fetched content and reveals the region.
    pub fn fill(&mut self, view: DetailView) {
        self.content = DetailContent::Ready(view);
        self.visible = true;
    }

    #[must_use]
    pub const fn view(&self) -> Option<&DetailView> {
        match &self.content {
            DetailContent::Ready(view) => Some(view),
            DetailContent::Empty | DetailContent::Pending => None,
        }
    }
}

/// Populated detail region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Fields { heading: String, fields: Vec<DetailField> },
    /// The API answered with an empty payload.
    Unavailable { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

impl DetailView {
    #[must_use]
    pub fn failed() -> Self {
        Self::Failed { message: DETAILS_FAILED_MESSAGE.to_owned() }
    }

    /// Looks up a field value by label.
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&str> {
        match self {
            Self::Fields { fields, .. } => {
                fields.iter().find(|f| f.label == label).map(|f| f.value.as_str())
            },
            Self::Unavailable { .. } | Self::Failed { .. } => None,
        }
    }
}

/// Formats a detail payload into the fixed labelled template.
///
/// `None` (an empty payload) gets the one-line "no details" message instead.
#[must_use]
pub fn format_details(detail: Option<&PlantDetail>) -> DetailView {
    let Some(detail) = detail else {
        return DetailView::Unavailable { message: NO_DETAILS_MESSAGE.to_owned() };
    };

    let or_na = |value: Option<&str>| non_empty(value).unwrap_or(NOT_AVAILABLE).to_owned();
    let fields = vec![
        DetailField { label: "Common Name", value: or_na(detail.common_name.as_deref()) },
        DetailField {
            label: "Scientific Name",
            value: join_names(&detail.scientific_name).unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        },
        DetailField { label: "Family", value: or_na(detail.family.as_deref()) },
        DetailField { label: "Care Level", value: or_na(detail.care_level.as_deref()) },
        DetailField { label: "Cycle", value: or_na(detail.cycle.as_deref()) },
        DetailField { label: "Description", value: or_na(detail.description.as_deref()) },
    ];
    DetailView::Fields { heading: DETAILS_HEADING.to_owned(), fields }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn join_names(names: &[String]) -> Option<String> {
    let joined = names.join(NAME_SEPARATOR);
    (!joined.is_empty()).then_some(joined)
}
