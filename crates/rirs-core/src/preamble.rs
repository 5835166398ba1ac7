//! Context preamble builder.
//!
//! The preamble grounds providers that accept instructions with the current
//! date, time, and the configured user location. It is a pure function of
//! its inputs and is recomputed for every request, never cached.

use chrono::{DateTime, Utc};

/// Build the context preamble for one request.
///
/// The text-generation adapters inject this as a prepended instruction or a
/// system message; the web-search adapter never sees it.
#[must_use]
pub fn context_preamble(now: DateTime<Utc>, location: &str) -> String {
    format!(
        "Current date and time: {}, {} UTC. The user is located in {}.",
        now.format("%A, %-d %B %Y"),
        now.format("%H:%M"),
        location
    )
}
