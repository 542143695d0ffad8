//! Interactive session.
//!
//! The session is a single-state machine: it waits for a menu choice, runs
//! the matching transition and returns to waiting, until the user picks
//! `Exit` or input ends. It owns the "last result" slot and forwards records
//! to the console, the record store and the map renderer.
//!
//! Lookup failures and bad input never end the session; they become notices.

mod input;
mod menu;
mod options;

use log::{debug, warn};

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::geo::{GeoClient, GeoRecord};
use crate::output::{
    BrowserViewer, Console, JsonFileStore, LeafletRenderer, MapRenderer, MapRequest, MapViewer,
    MarkerColor, RecordStore, TerminalConsole, ZoomLevel,
};

// Re-export public API
pub use input::{InputSource, ScriptedInput, StdinInput};
pub use menu::{parse_menu_choice, Flow, MenuChoice};
pub use options::{
    parse_zoom, resolve_color, resolve_zoom, INVALID_COLOR_NOTICE, ZOOM_OUT_OF_RANGE_NOTICE,
};

pub const MENU_PROMPT: &str = "Choose an option (1-6): ";
pub const ADDRESS_PROMPT: &str = "Enter IP address to geolocate: ";
pub const ZOOM_PROMPT: &str = "Enter zoom level (1-18, default 10): ";
pub const COLOR_PROMPT: &str = "Enter marker color (default blue): ";
pub const NO_DATA_NOTICE: &str = "No geolocation data available. Fetch data first.";
pub const NO_DATA_TO_SAVE_NOTICE: &str = "No geolocation data to save. Fetch data first.";
pub const NO_LOCATION_NOTICE: &str = "Error: Could not extract location data.";
pub const CACHE_HIT_MESSAGE: &str = "Using cached data...";

/// The interactive controller.
pub struct Session {
    client: GeoClient,
    last: Option<GeoRecord>,
    input: Box<dyn InputSource>,
    console: Box<dyn Console>,
    store: Box<dyn RecordStore>,
    renderer: Box<dyn MapRenderer>,
    viewer: Option<Box<dyn MapViewer>>,
}

impl Session {
    pub fn new(
        client: GeoClient,
        input: Box<dyn InputSource>,
        console: Box<dyn Console>,
        store: Box<dyn RecordStore>,
        renderer: Box<dyn MapRenderer>,
    ) -> Self {
        Self {
            client,
            last: None,
            input,
            console,
            store,
            renderer,
            viewer: None,
        }
    }

    /// Opens each rendered map with `viewer`.
    pub fn with_viewer(mut self, viewer: Box<dyn MapViewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Wires a terminal session: stdin, stdout, and the configured output files.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the provider client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let session = Self::new(
            GeoClient::new(config)?,
            Box::new(StdinInput::new()),
            Box::new(TerminalConsole::stdout()),
            Box::new(JsonFileStore::new(&config.save_file)),
            Box::new(LeafletRenderer::new(&config.map_file)),
        );
        if config.open_map {
            return Ok(session.with_viewer(Box::new(BrowserViewer)));
        }
        Ok(session)
    }

    /// The most recent successful lookup, if any.
    pub fn last(&self) -> Option<&GeoRecord> {
        self.last.as_ref()
    }

    pub fn client(&self) -> &GeoClient {
        &self.client
    }

    /// Runs the menu loop until the user exits or input ends.
    pub async fn run(&mut self) {
        loop {
            let Some(choice) = self.read_choice() else {
                debug!("Input ended, leaving session");
                break;
            };
            if self.step(choice).await == Flow::Exit {
                break;
            }
        }
    }

    /// Shows the menu and reads a choice, re-prompting until it is valid.
    fn read_choice(&mut self) -> Option<MenuChoice> {
        self.console.show_menu();
        loop {
            let line = self.input.read_line(MENU_PROMPT)?;
            match parse_menu_choice(&line) {
                Ok(choice) => return Some(choice),
                Err(e) => self.console.notice(&e.to_string()),
            }
        }
    }

    /// Runs one transition. Returns `Flow::Exit` for the exit choice, or when
    /// input ends while the transition is still prompting.
    pub async fn step(&mut self, choice: MenuChoice) -> Flow {
        debug!("Menu choice {:?}", choice);
        match choice {
            MenuChoice::LocateSelf => {
                self.console.message("Fetching geolocation for your IP...");
                self.locate(None).await;
            }
            MenuChoice::LocateTarget => {
                let Some(address) = self.input.read_line(ADDRESS_PROMPT) else {
                    return Flow::Exit;
                };
                let address = address.trim();
                self.console
                    .message(&format!("Fetching geolocation for IP: {}...", address));
                self.locate(Some(address)).await;
            }
            MenuChoice::ShowLast => match &self.last {
                Some(record) => self.console.show_details(record),
                None => self.console.notice(NO_DATA_NOTICE),
            },
            MenuChoice::SaveLast => self.save_last(),
            MenuChoice::RenderMap => return self.render_map(),
            MenuChoice::Exit => {
                self.console
                    .message("Exiting IP Geolocation Tracker. Goodbye!");
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    async fn locate(&mut self, target: Option<&str>) {
        if self.client.is_cached(target) {
            self.console.message(CACHE_HIT_MESSAGE);
        }
        match self.client.fetch(target).await {
            Ok(record) => {
                self.console.show_details(&record);
                self.last = Some(record);
            }
            Err(e) => {
                warn!("Lookup failed ({}): {}", e.kind(), e);
                self.console.notice(&format!("Error: {}", e));
            }
        }
    }

    fn save_last(&mut self) {
        let Some(record) = &self.last else {
            self.console.notice(NO_DATA_TO_SAVE_NOTICE);
            return;
        };
        match self.store.save(record) {
            Ok(path) => self
                .console
                .message(&format!("Geolocation data saved to {}", path.display())),
            Err(e) => {
                warn!("Saving record failed: {:#}", e);
                self.console
                    .notice(&format!("Error saving data to file: {:#}", e));
            }
        }
    }

    fn render_map(&mut self) -> Flow {
        let Some(record) = self.last.clone() else {
            self.console.notice(NO_DATA_NOTICE);
            return Flow::Continue;
        };
        let Some(coordinates) = record.coordinates() else {
            self.console.notice(NO_LOCATION_NOTICE);
            return Flow::Continue;
        };

        let Some(zoom) = self.read_zoom() else {
            return Flow::Exit;
        };
        let Some(color) = self.read_color() else {
            return Flow::Exit;
        };

        let request = MapRequest {
            coordinates,
            zoom,
            color,
            details: Some(record),
        };
        match self.renderer.render(&request) {
            Ok(path) => {
                let Some(viewer) = self.viewer.as_mut() else {
                    self.console
                        .message(&format!("Map has been saved: {}", path.display()));
                    return Flow::Continue;
                };
                match viewer.open(&path) {
                    Ok(()) => self
                        .console
                        .message(&format!("Map has been saved and opened: {}", path.display())),
                    Err(e) => {
                        warn!("Opening map failed: {:#}", e);
                        self.console
                            .message(&format!("Map has been saved: {}", path.display()));
                        self.console
                            .notice(&format!("Could not open the map: {:#}", e));
                    }
                }
            }
            Err(e) => {
                warn!("Map rendering failed: {:#}", e);
                self.console
                    .notice(&format!("Error creating the map: {:#}", e));
            }
        }
        Flow::Continue
    }

    fn read_zoom(&mut self) -> Option<ZoomLevel> {
        loop {
            let line = self.input.read_line(ZOOM_PROMPT)?;
            match parse_zoom(&line) {
                Ok(requested) => {
                    let (zoom, notice) = resolve_zoom(requested);
                    if let Some(notice) = notice {
                        self.console.notice(notice);
                    }
                    return Some(zoom);
                }
                Err(e) => self.console.notice(&e.to_string()),
            }
        }
    }

    fn read_color(&mut self) -> Option<MarkerColor> {
        self.console
            .message("Available marker colors: red, blue, green, purple, orange");
        let line = self.input.read_line(COLOR_PROMPT)?;
        let (color, notice) = resolve_color(&line);
        if let Some(notice) = notice {
            self.console.notice(notice);
        }
        Some(color)
    }
}
