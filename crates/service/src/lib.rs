//! Search widget orchestration for plantdex
//!
//! [`SearchWidget`] is the synchronous state machine (loading flag, error
//! region, rendered card, session). [`SearchController`] runs the network
//! calls for it and publishes view snapshots; [`Debouncer`] turns keystrokes
//! into searches.

pub mod controller;
pub mod debounce;
pub mod widget;

pub use controller::SearchController;
pub use debounce::Debouncer;
pub use widget::{DetailTicket, SearchApplied, SearchTicket, SearchWidget, WidgetView};
