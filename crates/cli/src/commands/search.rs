use std::sync::Arc;

use anyhow::{Result, bail};
use plantdex_api::PerenualClient;
use plantdex_core::constants::DETAILS_FAILED_MESSAGE;
use plantdex_core::view::format_details;
use plantdex_core::{PlantId, Settings};
use plantdex_service::{SearchApplied, SearchController};

use crate::render;

pub(crate) async fn run_search(
    settings: &Settings,
    query: String,
    index: usize,
    json: bool,
) -> Result<()> {
    let client = PerenualClient::from_settings(settings)?;
    let controller = SearchController::new(Arc::new(client));

    let applied = controller.search(query).await?;
    for _ in 0..index {
        if !controller.next() {
            break;
        }
    }

    if json {
        // raw species-list body, paging metadata included
        if let Some(session) = controller.session() {
            println!("{}", serde_json::to_string_pretty(session.response())?);
        }
    } else {
        print!("{}", render::widget(&controller.snapshot()));
    }

    if applied == SearchApplied::Failed {
        bail!("search failed");
    }
    Ok(())
}

pub(crate) async fn run_details(settings: &Settings, id: PlantId, json: bool) -> Result<()> {
    let client = PerenualClient::from_settings(settings)?;
    let detail = match client.species_details(id).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::error!(plant_id = %id, error = ?e, "error fetching plant details");
            bail!("{DETAILS_FAILED_MESSAGE} ({e})");
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", render::details(&format_details(detail.as_ref())));
    }
    Ok(())
}
