use async_trait::async_trait;
use plantdex_core::{PlantDetail, PlantId, SearchResponse};

use crate::client::PerenualClient;
use crate::error::ApiError;

/// The two remote operations the widget depends on.
#[async_trait]
pub trait PlantApi: Send + Sync {
    /// Search species by free text.
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError>;

    /// Fetch details for one species. `None` means an empty payload.
    async fn details(&self, id: PlantId) -> Result<Option<PlantDetail>, ApiError>;
}

#[async_trait]
impl PlantApi for PerenualClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        self.search_species(query).await
    }

    async fn details(&self, id: PlantId) -> Result<Option<PlantDetail>, ApiError> {
        self.species_details(id).await
    }
}
