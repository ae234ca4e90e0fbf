//! Template DOM engine module.
//!
//! This module provides access to the taglib parser, the document tree,
//! the transform engine, document controllers and template sources.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pagelib::template::{FileSystemTemplateSource, Page, RenderContext};
//! use std::path::Path;
//!
//! let source = FileSystemTemplateSource::new(Path::new("/app/templates"));
//! let ctx = RenderContext::new(source);
//!
//! let mut page = Page::new("index");
//! page.load_design(&ctx, "sites::main", "index").unwrap();
//! let html = page.transform(&ctx).unwrap();
//! ```

#[cfg(feature = "template")]
pub use pagelib_template::*;
