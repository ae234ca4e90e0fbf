//! Taglib registrations and the tag factory registry
//!
//! A [`TagLib`] names one recognized tag type: a `(namespace, prefix, name)`
//! triple. Registrations are scoped per document node; a nested node only
//! sees tags its own constructor or an explicit `core:addtaglib` added.
//!
//! The [`TagRegistry`] maps `(prefix, name)` pairs to [`TagHandler`]
//! factories. Factories are registered at a defined bootstrap phase; the
//! parser resolves them when it materializes nodes, and an unresolvable
//! pair is a fatal [`Error::MissingTagLib`].

use crate::TemplateResult;
use crate::document::TagHandler;
use pagelib_exception::Error;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Namespace the bundled taglibs are registered under
pub const CORE_NAMESPACE: &str = "pagelib::template";

/// One recognized tag type within a node's parsing scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagLib {
	namespace: String,
	prefix: String,
	name: String,
}

impl TagLib {
	/// Creates a taglib registration
	pub fn new(
		namespace: impl Into<String>,
		prefix: impl Into<String>,
		name: impl Into<String>,
	) -> Self {
		Self {
			namespace: namespace.into(),
			prefix: prefix.into(),
			name: name.into(),
		}
	}

	/// The namespace the tag type belongs to
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// The tag prefix as written in templates
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// The tag name as written in templates
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The literal `prefix:name` token the scanner searches for
	pub fn token(&self) -> String {
		format!("{}:{}", self.prefix, self.name)
	}
}

/// The default tag set seeded into container documents
pub(crate) fn core_taglibs() -> Vec<TagLib> {
	vec![
		TagLib::new(CORE_NAMESPACE, "core", "addtaglib"),
		TagLib::new(CORE_NAMESPACE, "core", "importdesign"),
		TagLib::new(CORE_NAMESPACE, "html", "template"),
		TagLib::new(CORE_NAMESPACE, "html", "placeholder"),
	]
}

/// The tag set scoped inside `html:template` fragments
pub(crate) fn fragment_taglibs() -> Vec<TagLib> {
	vec![
		TagLib::new(CORE_NAMESPACE, "template", "placeholder"),
		TagLib::new(CORE_NAMESPACE, "template", "addtaglib"),
	]
}

/// Factory producing a fresh handler for one parsed tag occurrence
pub type TagFactory = Arc<dyn Fn() -> Box<dyn TagHandler> + Send + Sync>;

/// Registry mapping `(prefix, name)` to tag handler factories
///
/// The registry is internally synchronized, so one instance can back every
/// request once bootstrap filled it.
///
/// # Examples
///
/// ```
/// use pagelib_template::document::TagHandler;
/// use pagelib_template::TagRegistry;
///
/// struct NoopTag;
/// impl TagHandler for NoopTag {}
///
/// let registry = TagRegistry::with_builtins();
/// registry.register("app", "noop", || Box::new(NoopTag));
///
/// assert!(registry.contains("app", "noop"));
/// assert!(registry.contains("core", "importdesign"));
/// ```
#[derive(Clone, Default)]
pub struct TagRegistry {
	tags: Arc<RwLock<HashMap<(String, String), TagFactory>>>,
}

impl TagRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry with the bundled taglibs registered
	pub fn with_builtins() -> Self {
		let registry = Self::new();
		crate::builtins::register_builtins(&registry);
		registry
	}

	/// Registers a factory for the given `(prefix, name)` pair, replacing
	/// any previous registration
	pub fn register<F>(&self, prefix: &str, name: &str, factory: F)
	where
		F: Fn() -> Box<dyn TagHandler> + Send + Sync + 'static,
	{
		let mut tags = self.tags.write();
		tags.insert(
			(prefix.to_string(), name.to_string()),
			Arc::new(factory),
		);
	}

	/// True if the pair has a registered factory
	pub fn contains(&self, prefix: &str, name: &str) -> bool {
		let tags = self.tags.read();
		tags.contains_key(&(prefix.to_string(), name.to_string()))
	}

	/// Produces a fresh handler for the taglib, or fails with
	/// [`Error::MissingTagLib`]
	pub fn resolve(&self, lib: &TagLib) -> TemplateResult<Box<dyn TagHandler>> {
		let factory = {
			let tags = self.tags.read();
			tags.get(&(lib.prefix.clone(), lib.name.clone())).cloned()
		};
		match factory {
			Some(factory) => Ok(factory()),
			None => Err(Error::MissingTagLib {
				prefix: lib.prefix.clone(),
				name: lib.name.clone(),
			}),
		}
	}
}

impl std::fmt::Debug for TagRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let tags = self.tags.read();
		f.debug_struct("TagRegistry")
			.field("registered", &tags.keys().collect::<Vec<_>>())
			.finish()
	}
}
