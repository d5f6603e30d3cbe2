//! Plain-text drawing of widget views.

use plantdex_core::view::{DetailContent, DetailView, PlantCard, ResultView};
use plantdex_service::WidgetView;

const LOADING_TEXT: &str = "Loading...";
const DETAILS_PENDING_TEXT: &str = "Loading details...";

pub(crate) fn widget(view: &WidgetView) -> String {
    let mut out = String::new();
    if view.loading {
        out.push_str(LOADING_TEXT);
        out.push('\n');
    }
    if let Some(error) = &view.error {
        out.push_str(&format!("! {error}\n"));
    }
    if let Some(ResultView::Card(card)) = &view.result {
        out.push_str(&self::card(card));
    }
    out
}

pub(crate) fn card(card: &PlantCard) -> String {
    let mut lines = vec![
        format!("== {} ==  ({}/{})", card.name, card.position + 1, card.total),
        format!("[image] {}", card.image.src),
    ];
    if card.image.caption_visible {
        lines.push(card.image.caption.clone());
    }
    lines.push(format!("Scientific: {}", card.scientific_name));
    lines.push(format!("☀️ {}", card.sunlight));
    lines.push(format!("💧 {}", card.watering));

    let actions: Vec<String> =
        card.actions().iter().map(|action| format!("[{}]", action.label())).collect();
    let mut nav = Vec::new();
    if card.has_previous {
        nav.push(":prev");
    }
    if card.has_next {
        nav.push(":next");
    }
    if nav.is_empty() {
        lines.push(actions.join(" "));
    } else {
        lines.push(format!("{}   {}", actions.join(" "), nav.join(" ")));
    }

    if card.details.visible {
        match &card.details.content {
            DetailContent::Ready(view) => lines.push(details(view).trim_end().to_owned()),
            DetailContent::Pending => lines.push(DETAILS_PENDING_TEXT.to_owned()),
            DetailContent::Empty => {},
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn details(view: &DetailView) -> String {
    match view {
        DetailView::Fields { heading, fields } => {
            let mut out = format!("-- {heading} --\n");
            for field in fields {
                out.push_str(&format!("{}: {}\n", field.label, field.value));
            }
            out
        },
        DetailView::Unavailable { message } | DetailView::Failed { message } => {
            format!("{message}\n")
        },
    }
}
