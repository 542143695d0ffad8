// Shared test helpers for provider mocks and output capture.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use httptest::Server;

use geolocation_tracker::initialization::build_client;
use geolocation_tracker::{Backoff, GeoClient, RetryPolicy};

/// Token every test client sends.
#[allow(dead_code)] // Used by other test files
pub const TEST_TOKEN: &str = "test-token";

/// Retry policy with millisecond delays so retry tests stay fast.
#[allow(dead_code)] // Used by other test files
pub fn fast_policy(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryPolicy::default()
    }
}

/// Creates a client pointed at a mock provider.
#[allow(dead_code)] // Used by other test files
pub fn test_client(server: &Server, max_attempts: usize) -> GeoClient {
    GeoClient::with_client(
        build_client(Duration::from_secs(5)).expect("Failed to create HTTP client"),
        &format!("http://{}", server.addr()),
        TEST_TOKEN,
        fast_policy(max_attempts),
    )
    .expect("Failed to create geo client")
}

/// A writer whose contents stay readable after it has been handed to a console.
#[derive(Clone, Default)]
#[allow(dead_code)] // Used by other test files
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

#[allow(dead_code)] // Used by other test files
impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
