//! Test utilities shared by the tessera crates.
//!
//! - [`init_tracing`] installs a test-friendly subscriber once.
//! - [`nested`] builds pathologically deep inputs.
//! - [`Marked`] splits an error marker out of a test source so tests can
//!   assert positions without counting bytes by hand.

use tracing_subscriber::EnvFilter;

/// Marker character used in annotated test sources.
///
/// It stands immediately before the byte an error is expected at.
pub const MARKER: char = '\u{00BB}';

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Controlled by `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `depth` copies of `open` followed by `depth` copies of `close`.
pub fn nested(depth: usize, open: &str, close: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(depth * (open.len() + close.len()));
    for _ in 0..depth {
        out.extend_from_slice(open.as_bytes());
    }
    for _ in 0..depth {
        out.extend_from_slice(close.as_bytes());
    }
    out
}

/// A test source with the expected error offset marked.
#[derive(Debug, Clone)]
pub struct Marked {
    /// The source with the marker removed.
    pub source: String,
    /// Byte offset the marker pointed at.
    pub offset: usize,
}

impl Marked {
    /// Split the [`MARKER`] out of `annotated`.
    ///
    /// # Panics
    /// Panics if the marker is missing.
    pub fn new(annotated: &str) -> Self {
        let offset = annotated
            .find(MARKER)
            .unwrap_or_else(|| panic!("no marker in test source {annotated:?}"));
        let source = annotated.replacen(MARKER, "", 1);
        Self { source, offset }
    }

    /// The source as bytes.
    pub fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }
}
