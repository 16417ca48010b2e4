//! Opt-in tracing setup for hosts embedding `perfchart`.
//!
//! The chart only emits `tracing` events: configuration changes and rescale
//! decisions at `debug`, per-tick work at `trace`. Hosts either install their
//! own subscriber or call one of the helpers below with the `telemetry`
//! feature enabled.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "perfchart=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with an explicit fallback filter, e.g.
/// `"perfchart=trace"` to follow every tick.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
