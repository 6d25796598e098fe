//! Rewrite metrics.
//!
//! # Metrics
//! - `url_rewriter_lookups_total` (counter): lookups by direction, outcome
//! - `url_rewriter_reloads_total` (counter): mapping reloads by outcome

use metrics::{counter, describe_counter};

use crate::routing::rewriter::Direction;

pub const LOOKUPS_TOTAL: &str = "url_rewriter_lookups_total";
pub const RELOADS_TOTAL: &str = "url_rewriter_reloads_total";

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(LOOKUPS_TOTAL, "URL lookups by direction and outcome (hit, miss)");
    describe_counter!(RELOADS_TOTAL, "Route mapping reloads by outcome (ok, error)");
}

pub fn record_lookup(direction: Direction, hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!(LOOKUPS_TOTAL, "direction" => direction.as_str(), "outcome" => outcome).increment(1);
}

pub fn record_reload(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!(RELOADS_TOTAL, "outcome" => outcome).increment(1);
}
