//! Tracing utilities for query and iterator observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the SQL text and parameter count.
///
/// ```ignore
/// prowl_trace_query!(statement.sql(), statement.params().len());
/// ```
#[macro_export]
macro_rules! prowl_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(sql = %$sql, params = $param_count, "prowl.query");
    };
}

/// Emit a trace-level event for result iterator lifecycle (release, close, fail).
///
/// ```ignore
/// prowl_trace_iter!("release", self.yielded);
/// ```
#[macro_export]
macro_rules! prowl_trace_iter {
    ($event:literal, $yielded:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(event = $event, yielded = $yielded, "prowl.iter");
    };
}
