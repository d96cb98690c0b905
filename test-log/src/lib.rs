//! Test support for the seqlist crates.
//!
//! `use seqlist_test_log::test;` replaces the built-in `#[test]` attribute
//! with one that installs a tracing subscriber before the test runs. Output
//! goes through the test writer, so it is only shown for failing tests or
//! with `--nocapture`. `RUST_LOG` directives override the default levels.

use log::level_filters::LevelFilter;
use parking_lot::Once;
use seqlist_log::{Formatting, MaybeSystemTime, TargetsExt};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use seqlist_test_log_proc_macro::test;

static INITIALIZE: Once = Once::new();

#[doc(hidden)]
pub fn initialize() {
    INITIALIZE.call_once(|| {
        // Another subscriber may already be installed by the test binary.
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .event_format(Formatting(MaybeSystemTime(false))),
            )
            .with(
                Targets::new()
                    .with_default(LevelFilter::INFO)
                    .with_seqlist_targets(LevelFilter::DEBUG)
                    .with_env(),
            )
            .try_init();
    });
}
