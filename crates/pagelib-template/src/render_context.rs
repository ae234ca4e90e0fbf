//! Render context
//!
//! The explicit bundle of services a parse or transform pass needs: the tag
//! factory registry, the controller registry, the template source, the
//! configuration handle and the benchmark timer. There is no ambient global
//! state anywhere in the engine; everything flows through this struct.

use crate::controller::ControllerRegistry;
use crate::loader::TemplateSource;
use crate::taglib::TagRegistry;
use pagelib_core::{BenchmarkTimer, Configuration, InMemoryConfiguration};
use std::sync::Arc;

/// Services shared by every node of a page's document tree
///
/// Registries are internally synchronized, so one context can be built at
/// bootstrap and shared across request threads; the tree itself is always
/// confined to a single request.
///
/// # Examples
///
/// ```
/// use pagelib_template::{MemoryTemplateSource, RenderContext};
///
/// let mut source = MemoryTemplateSource::new();
/// source.insert("sites::main", "index", "<html></html>");
///
/// let ctx = RenderContext::new(source);
/// assert!(ctx.tags().contains("core", "importdesign"));
/// ```
#[derive(Clone)]
pub struct RenderContext {
	tags: TagRegistry,
	controllers: ControllerRegistry,
	source: Arc<dyn TemplateSource>,
	config: Arc<dyn Configuration>,
	benchmark: Arc<BenchmarkTimer>,
}

impl RenderContext {
	/// Creates a context around a template source, with the built-in
	/// taglibs registered, no controllers, an empty configuration and a
	/// fresh benchmark timer
	pub fn new(source: impl TemplateSource + 'static) -> Self {
		Self {
			tags: TagRegistry::with_builtins(),
			controllers: ControllerRegistry::new(),
			source: Arc::new(source),
			config: Arc::new(InMemoryConfiguration::new()),
			benchmark: Arc::new(BenchmarkTimer::new()),
		}
	}

	/// Replaces the configuration handle
	pub fn with_config(mut self, config: impl Configuration + 'static) -> Self {
		self.config = Arc::new(config);
		self
	}

	/// Replaces the tag registry
	pub fn with_tags(mut self, tags: TagRegistry) -> Self {
		self.tags = tags;
		self
	}

	/// Shares an external benchmark timer
	pub fn with_benchmark(mut self, benchmark: Arc<BenchmarkTimer>) -> Self {
		self.benchmark = benchmark;
		self
	}

	/// The tag factory registry
	pub fn tags(&self) -> &TagRegistry {
		&self.tags
	}

	/// The document controller registry
	pub fn controllers(&self) -> &ControllerRegistry {
		&self.controllers
	}

	/// The template source
	pub fn source(&self) -> &dyn TemplateSource {
		self.source.as_ref()
	}

	/// The configuration handle
	pub fn config(&self) -> &dyn Configuration {
		self.config.as_ref()
	}

	/// The benchmark timer
	pub fn benchmark(&self) -> &BenchmarkTimer {
		self.benchmark.as_ref()
	}
}

impl std::fmt::Debug for RenderContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RenderContext")
			.field("tags", &self.tags)
			.field("controllers", &self.controllers)
			.finish_non_exhaustive()
	}
}
