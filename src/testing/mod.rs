//! Headless testing helpers: Harness, HTML serialization.
//!
//! Use the [`Harness`] to mount components into a [`Ui`](crate::ui::Ui) and
//! simulate pointer input. Use [`to_html`] to capture element trees as text
//! for snapshot-style assertions.

pub mod harness;
pub mod html;

pub use harness::Harness;
pub use html::to_html;

/// Route `tracing` output to the test writer. Safe to call from every test.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mantle=debug")),
        )
        .with_test_writer()
        .try_init();
}
