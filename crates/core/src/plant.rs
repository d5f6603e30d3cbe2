use serde::{Deserialize, Deserializer, Serialize};

/// Perenual species identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub u64);

impl std::fmt::Display for PlantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PlantId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Body of the species-list endpoint.
///
/// Only `data` is interpreted. Paging fields (`current_page`, `last_page`,
/// `total`, ...) are kept verbatim in `meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<PlantSummary>>,
    #[serde(flatten)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl SearchResponse {
    /// Items of the response; an absent list reads as empty.
    #[must_use]
    pub fn items(&self) -> &[PlantSummary] {
        self.data.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Whether the API sent any paging metadata alongside the items.
    #[must_use]
    pub fn has_pagination(&self) -> bool {
        self.meta.contains_key("current_page") || self.meta.contains_key("last_page")
    }
}

/// One entry of a species-list page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantSummary {
    #[serde(default)]
    pub id: PlantId,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub scientific_name: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub sunlight: Vec<String>,
    #[serde(default)]
    pub watering: Option<String>,
    #[serde(default)]
    pub default_image: Option<PlantImage>,
}

impl PlantSummary {
    /// Medium-resolution thumbnail, if the API provided one.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.default_image
            .as_ref()
            .and_then(|img| img.medium_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Image references attached to a species.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantImage {
    #[serde(default)]
    pub medium_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
}

/// Body of the species-details endpoint. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantDetail {
    #[serde(default)]
    pub id: Option<PlantId>,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub scientific_name: Vec<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub care_level: Option<String>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepts a list of strings, a single string, or `null`.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<Option<String>>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
    })
}
