//! Internal logging macros
//!
//! Forward to `tracing` when the `tracing` feature is enabled and expand to
//! nothing otherwise, so call sites stay free of `cfg` noise.

macro_rules! debug_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)*);
        }
    }};
}

macro_rules! trace_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)*);
        }
    }};
}
