//! Logging setup shared by binaries, benches and tests.
//!
//! The library crates only emit `tracing` events; nothing is printed until a
//! subscriber is installed here.

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    logging::init();
}

/// Initialize logging for a test binary.
///
/// Output goes through the test harness so it is captured per test.
pub fn init_for_tests() {
    logging::init_for_tests();
}

/// Subscriber configuration (filters, formatting).
pub mod logging;
