//! Session collaborators that produce output.
//!
//! - `Console`: menu, record details and notices on the terminal
//! - `RecordStore`: append-only JSON persistence
//! - `MapRenderer`: standalone HTML map with one marker
//! - `MapViewer`: opens a rendered map for the user
//!
//! Each is a trait so the session can be driven with test doubles.

mod console;
mod map;
mod store;

// Re-export public API
pub use console::{detail_lines, Console, TerminalConsole, MENU_LINES};
pub use map::{
    popup_html, render_html, BrowserViewer, LeafletRenderer, MapRenderer, MapRequest, MapViewer,
    MarkerColor, ZoomLevel,
};
pub use store::{to_pretty_json, JsonFileStore, RecordStore};
