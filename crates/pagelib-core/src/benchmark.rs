//! Benchmark timer for instrumentation spans
//!
//! Spans are identified by free-form string ids. The parser and the
//! transform engine bracket their hot paths with [`BenchmarkTimer::start`] /
//! [`BenchmarkTimer::stop`] pairs; applications can query single spans or
//! render a full report after the request finished.

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
struct Span {
	started: Option<Instant>,
	elapsed: Duration,
	runs: u32,
}

/// Collects named timing spans for one request
///
/// The timer is internally synchronized, so one instance can be shared
/// behind an `Arc` by everything participating in a request. Spans are kept
/// in start order for reporting.
///
/// # Examples
///
/// ```
/// use pagelib_core::BenchmarkTimer;
///
/// let timer = BenchmarkTimer::new();
/// timer.start("document::transform()");
/// // ... work ...
/// timer.stop("document::transform()");
///
/// assert!(timer.elapsed("document::transform()").is_some());
/// ```
#[derive(Debug, Default)]
pub struct BenchmarkTimer {
	spans: Mutex<IndexMap<String, Span>>,
	enabled: Mutex<bool>,
}

impl BenchmarkTimer {
	/// Creates an enabled timer with no recorded spans
	pub fn new() -> Self {
		Self {
			spans: Mutex::new(IndexMap::new()),
			enabled: Mutex::new(true),
		}
	}

	/// Disables span recording; `start`/`stop` become no-ops
	pub fn disable(&self) {
		*self.enabled.lock() = false;
	}

	/// Re-enables span recording
	pub fn enable(&self) {
		*self.enabled.lock() = true;
	}

	/// Opens the span with the given id, creating it on first use
	///
	/// Starting an already running span restarts its current measurement.
	pub fn start(&self, id: &str) {
		if !*self.enabled.lock() {
			return;
		}
		let mut spans = self.spans.lock();
		let span = spans.entry(id.to_string()).or_default();
		span.started = Some(Instant::now());
	}

	/// Closes the span with the given id and accumulates its elapsed time
	///
	/// Stopping a span that was never started is recorded as a warning and
	/// otherwise ignored.
	pub fn stop(&self, id: &str) {
		if !*self.enabled.lock() {
			return;
		}
		let mut spans = self.spans.lock();
		let open = spans.get_mut(id).and_then(|span| {
			let started = span.started.take()?;
			span.elapsed += started.elapsed();
			span.runs += 1;
			Some(())
		});
		if open.is_none() {
			tracing::warn!(span = id, "benchmark stop without a matching start");
		}
	}

	/// Total accumulated time of a finished span
	pub fn elapsed(&self, id: &str) -> Option<Duration> {
		let spans = self.spans.lock();
		spans.get(id).map(|span| span.elapsed)
	}

	/// Number of completed start/stop cycles of a span
	pub fn runs(&self, id: &str) -> u32 {
		let spans = self.spans.lock();
		spans.get(id).map(|span| span.runs).unwrap_or(0)
	}

	/// Renders a plain-text report of all spans in start order
	///
	/// # Examples
	///
	/// ```
	/// use pagelib_core::BenchmarkTimer;
	///
	/// let timer = BenchmarkTimer::new();
	/// timer.start("parse");
	/// timer.stop("parse");
	///
	/// let report = timer.report();
	/// assert!(report.contains("parse"));
	/// ```
	pub fn report(&self) -> String {
		let spans = self.spans.lock();
		let mut out = String::from("=== Benchmark Report ===\n");
		for (id, span) in spans.iter() {
			out.push_str(&format!(
				"{}: {:.3}ms ({} run{})\n",
				id,
				span.elapsed.as_secs_f64() * 1000.0,
				span.runs,
				if span.runs == 1 { "" } else { "s" }
			));
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_start_stop_accumulates() {
		let timer = BenchmarkTimer::new();
		timer.start("a");
		timer.stop("a");
		timer.start("a");
		timer.stop("a");

		assert_eq!(timer.runs("a"), 2);
		assert!(timer.elapsed("a").is_some());
	}

	#[test]
	fn test_stop_without_start_is_ignored() {
		let timer = BenchmarkTimer::new();
		timer.stop("never-started");
		assert_eq!(timer.runs("never-started"), 0);
	}

	#[test]
	fn test_disabled_timer_records_nothing() {
		let timer = BenchmarkTimer::new();
		timer.disable();
		timer.start("a");
		timer.stop("a");
		assert!(timer.elapsed("a").is_none());
	}

	#[test]
	fn test_report_lists_spans_in_start_order() {
		let timer = BenchmarkTimer::new();
		timer.start("first");
		timer.stop("first");
		timer.start("second");
		timer.stop("second");

		let report = timer.report();
		let first = report.find("first").unwrap();
		let second = report.find("second").unwrap();
		assert!(first < second);
	}
}
