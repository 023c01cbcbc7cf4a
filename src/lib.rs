//! Core of a selection-triggered spell checking assistant.
//!
//! The host page wires real events (selection changes, scroll, clicks)
//! into [`watcher::SelectionWatcher`] and performs the effects it returns;
//! anchors come from [`caret::CaretLocator`] for form fields, results are
//! checked through [`speller_client::SpellerClient`], relayed to the top
//! frame over [`relay`], and rendered with [`render::render_result`].

pub mod caret;
pub mod config;
pub mod relay;
pub mod render;
pub mod speller_client;
pub mod suggestion;
pub mod watcher;

pub use caret::{CaretLocator, FieldGeometry, FieldKind, MonospaceMeasurer, Rect, TextMeasurer};
pub use config::AppConfig;
pub use render::render_result;
pub use speller_client::SpellerClient;
pub use suggestion::{Suggestion, SuggestionError};
pub use watcher::{Effect, Event, SelectionSnapshot, SelectionWatcher, SourceKind, WatcherState};
