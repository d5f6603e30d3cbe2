//! Shared constants for plantdex.
//!
//! Centralizes endpoint defaults and every user-facing fallback string so the
//! projection layer and the adapters agree on wording.

/// Default base URL of the Perenual API.
pub const DEFAULT_API_URL: &str = "https://perenual.com/api";

/// Quiet period before typed input triggers a search.
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Transport timeout for a single API request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Image shown when a plant has no thumbnail or its thumbnail fails to load.
pub const PLACEHOLDER_IMAGE: &str = "./img/plant_emoji.jpg";

/// Error-region text for a search that returned no items.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

pub const FALLBACK_COMMON_NAME: &str = "Common Name not available";
pub const FALLBACK_SCIENTIFIC_NAME: &str = "Scientific Name not available";
pub const FALLBACK_SUNLIGHT: &str = "Sunlight information not available";
pub const FALLBACK_WATERING: &str = "Watering information not available";

/// Separator used when joining scientific names.
pub const NAME_SEPARATOR: &str = ", ";

/// Heading of a populated detail region.
pub const DETAILS_HEADING: &str = "Plant Details";

/// Substituted for any detail field missing from the payload.
pub const NOT_AVAILABLE: &str = "Not available";

/// Detail region text when the API returned an empty payload.
pub const NO_DETAILS_MESSAGE: &str = "No details available for this plant.";

/// Detail region text after a failed detail request.
pub const DETAILS_FAILED_MESSAGE: &str = "Failed to load details. Please try again.";

pub const DETAILS_ACTION_LABEL: &str = "🔍Details";
pub const IMAGE_ACTION_LABEL: &str = "📷Image";
pub const WIKI_ACTION_LABEL: &str = "📖Wiki";

/// Google image search, the display name is appended as `q`.
pub const IMAGE_SEARCH_URL: &str = "https://www.google.com/search?tbm=isch";

/// Wikipedia full-text search, the display name is appended as `search`.
pub const WIKI_SEARCH_URL: &str = "https://en.wikipedia.org/wiki/Special:Search";
