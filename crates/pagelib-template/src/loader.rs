//! Template sources
//!
//! Templates are addressed by a `namespace` (double-colon separated path
//! segments, e.g. `sites::main`) and a `design` name (the file name without
//! extension). [`FileSystemTemplateSource`] maps that address onto
//! `<base>/<namespace path>/<design>.html` with directory-traversal checks;
//! [`MemoryTemplateSource`] backs tests and embedded templates.

use crate::TemplateResult;
use pagelib_exception::Error;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads raw template text by namespace and design name
pub trait TemplateSource: Send + Sync {
	/// Returns the template's text, or a fatal
	/// [`Error::TemplateNotFound`]
	fn load(&self, namespace: &str, design: &str) -> TemplateResult<String>;
}

/// File system template source
///
/// Loads templates from disk with checks preventing lookups from escaping
/// the base directory, and an optional content cache (templates rarely
/// change within a process lifetime).
#[derive(Debug)]
pub struct FileSystemTemplateSource {
	base_dir: PathBuf,
	cache: RwLock<HashMap<String, String>>,
	use_cache: bool,
}

impl FileSystemTemplateSource {
	/// Creates a caching source rooted at `base_dir`
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use pagelib_template::FileSystemTemplateSource;
	/// use std::path::Path;
	///
	/// let source = FileSystemTemplateSource::new(Path::new("/app/templates"));
	/// ```
	pub fn new(base_dir: &Path) -> Self {
		Self {
			base_dir: base_dir.to_path_buf(),
			cache: RwLock::new(HashMap::new()),
			use_cache: true,
		}
	}

	/// Creates a source that re-reads files on every load
	pub fn new_without_cache(base_dir: &Path) -> Self {
		Self {
			base_dir: base_dir.to_path_buf(),
			cache: RwLock::new(HashMap::new()),
			use_cache: false,
		}
	}

	/// Resolves `namespace` + `design` to a path under the base directory
	///
	/// Rejects empty, absolute or parent-directory segments so a template
	/// address can never escape the base directory.
	fn resolve_path(&self, namespace: &str, design: &str) -> TemplateResult<PathBuf> {
		let mut path = self.base_dir.clone();
		let segments = namespace
			.split("::")
			.filter(|segment| !segment.is_empty())
			.chain(std::iter::once(design));
		for segment in segments {
			if segment == ".." || segment.contains('/') || segment.contains('\\') {
				return Err(Error::TemplateNotFound {
					namespace: namespace.to_string(),
					name: design.to_string(),
					detail: format!("illegal path segment \"{segment}\""),
				});
			}
			path.push(segment);
		}
		path.as_mut_os_string().push(".html");
		Ok(path)
	}
}

impl TemplateSource for FileSystemTemplateSource {
	fn load(&self, namespace: &str, design: &str) -> TemplateResult<String> {
		let cache_key = format!("{namespace}::{design}");
		if self.use_cache {
			let cache = self.cache.read();
			if let Some(content) = cache.get(&cache_key) {
				return Ok(content.clone());
			}
		}

		let path = self.resolve_path(namespace, design)?;
		let content = fs::read_to_string(&path).map_err(|err| Error::TemplateNotFound {
			namespace: namespace.to_string(),
			name: design.to_string(),
			detail: format!("cannot read {}: {err}", path.display()),
		})?;

		if self.use_cache {
			let mut cache = self.cache.write();
			cache.insert(cache_key, content.clone());
		}
		Ok(content)
	}
}

/// In-memory template source
///
/// # Examples
///
/// ```
/// use pagelib_template::{MemoryTemplateSource, TemplateSource};
///
/// let mut source = MemoryTemplateSource::new();
/// source.insert("sites::main", "index", "<html></html>");
///
/// assert!(source.load("sites::main", "index").is_ok());
/// assert!(source.load("sites::main", "missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MemoryTemplateSource {
	templates: HashMap<String, String>,
}

impl MemoryTemplateSource {
	/// Creates an empty source
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a template under the given namespace and design name
	pub fn insert(&mut self, namespace: &str, design: &str, content: impl Into<String>) {
		self.templates
			.insert(format!("{namespace}::{design}"), content.into());
	}
}

impl TemplateSource for MemoryTemplateSource {
	fn load(&self, namespace: &str, design: &str) -> TemplateResult<String> {
		self.templates
			.get(&format!("{namespace}::{design}"))
			.cloned()
			.ok_or_else(|| Error::TemplateNotFound {
				namespace: namespace.to_string(),
				name: design.to_string(),
				detail: "no such in-memory template".to_string(),
			})
	}
}
