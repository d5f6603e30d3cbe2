//! Outbound search links opened from a rendered card.

use plantdex_core::constants::{IMAGE_SEARCH_URL, WIKI_SEARCH_URL};
use plantdex_core::view::CardAction;
use reqwest::Url;

use crate::error::ApiError;

/// Third-party search a card can open in a new browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalSearch {
    /// Google image search.
    Image,
    /// Wikipedia full-text search.
    Wiki,
}

impl ExternalSearch {
    /// The external search behind a card action, if it has one.
    #[must_use]
    pub const fn for_action(action: CardAction) -> Option<Self> {
        match action {
            CardAction::Image => Some(Self::Image),
            CardAction::Wiki => Some(Self::Wiki),
            CardAction::Details => None,
        }
    }

    /// Builds the search URL for a display name, URL-encoding the name.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] if the base URL cannot be parsed.
    pub fn url_for(self, display_name: &str) -> Result<Url, ApiError> {
        let (base, param) = match self {
            Self::Image => (IMAGE_SEARCH_URL, "q"),
            Self::Wiki => (WIKI_SEARCH_URL, "search"),
        };
        Url::parse_with_params(base, &[(param, display_name)])
            .map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))
    }
}
