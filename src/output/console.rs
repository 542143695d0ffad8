//! Terminal output for the interactive session.

use std::io::{self, Stdout, Write};

use colored::*;

use crate::config::NOT_AVAILABLE;
use crate::geo::GeoRecord;

/// Where the session writes user-facing output.
pub trait Console {
    /// Prints the numbered menu.
    fn show_menu(&mut self);

    /// Prints every field of a record, `N/A` for absent ones.
    fn show_details(&mut self, record: &GeoRecord);

    /// Prints an informational line.
    fn message(&mut self, text: &str);

    /// Prints a one-line notice about something that did not go as asked
    /// (failed lookup, defaulted option, missing data).
    fn notice(&mut self, text: &str);
}

/// Text lines for the menu, in display order.
pub const MENU_LINES: [&str; 6] = [
    "1. Geolocate my IP",
    "2. Geolocate a specific IP",
    "3. View last geolocation details",
    "4. Save last geolocation to file",
    "5. Create map with custom options",
    "6. Exit",
];

/// Renders a record as the lines shown by [`Console::show_details`].
pub fn detail_lines(record: &GeoRecord) -> Vec<String> {
    let or_na = |value: Option<&str>| value.unwrap_or(NOT_AVAILABLE).to_string();
    vec![
        format!("IP: {}", record.ip()),
        format!("City: {}", or_na(record.city())),
        format!("Region: {}", or_na(record.region())),
        format!("Country: {}", or_na(record.country())),
        format!("Organization: {}", or_na(record.organization())),
        format!("Timezone: {}", or_na(record.timezone())),
        format!(
            "Coordinates: {}",
            record
                .coordinates()
                .map(|c| c.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
    ]
}

/// Console backed by any writer; stdout for the binary.
pub struct TerminalConsole<W: Write = Stdout> {
    out: W,
}

impl TerminalConsole<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            log::debug!("Failed to write to console: {}", e);
        }
    }
}

impl<W: Write> Console for TerminalConsole<W> {
    fn show_menu(&mut self) {
        self.line("");
        self.line(&"=== IP Geolocation Tracker ===".bold().to_string());
        for entry in MENU_LINES {
            self.line(entry);
        }
    }

    fn show_details(&mut self, record: &GeoRecord) {
        self.line("");
        self.line(&"=== Geolocation Details ===".bold().to_string());
        for line in detail_lines(record) {
            self.line(&line);
        }
    }

    fn message(&mut self, text: &str) {
        self.line(text);
    }

    fn notice(&mut self, text: &str) {
        self.line(&text.yellow().to_string());
    }
}
