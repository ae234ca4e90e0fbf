//! # Pagelib Exception
//!
//! Error taxonomy shared by all pagelib crates.
//!
//! Every error in this family is fatal for the current request: template
//! errors are programmer or content errors in the template source, not
//! transient runtime conditions, so there is no retry path and no
//! partial-result recovery anywhere in the framework.

use thiserror::Error;

/// Framework-wide error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// Malformed or unterminated tag, malformed attribute string, or a
	/// parser loop ceiling was exceeded. The message carries a snippet of
	/// the offending template source.
	#[error("Template parse error: {0}")]
	Parse(String),

	/// A tag occurred in a template without a matching factory registration
	#[error("Tag library \"{prefix}:{name}\" is not registered")]
	MissingTagLib {
		/// Tag prefix as written in the template
		prefix: String,
		/// Tag name as written in the template
		name: String,
	},

	/// The document controller named in a `<@controller ... @>` sentinel
	/// has no registration
	#[error("Document controller \"{0}\" cannot be resolved; maybe the name is misspelt")]
	ControllerBinding(String),

	/// A template file could not be loaded
	#[error("Template \"{name}\" not found in namespace \"{namespace}\": {detail}")]
	TemplateNotFound {
		/// Namespace the lookup ran against
		namespace: String,
		/// Design (file) name without extension
		name: String,
		/// Loader-specific failure detail
		detail: String,
	},
}

impl Error {
	/// Shorthand for a [`Error::Parse`] with a preformatted message
	pub fn parse(message: impl Into<String>) -> Self {
		Error::Parse(message.into())
	}
}

/// Framework-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_carries_tag_token() {
		let err = Error::MissingTagLib {
			prefix: "html".to_string(),
			name: "placeholder".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Tag library \"html:placeholder\" is not registered"
		);
	}

	#[test]
	fn test_parse_shorthand() {
		let err = Error::parse("unexpected end of input");
		assert!(matches!(err, Error::Parse(_)));
		assert!(err.to_string().contains("unexpected end of input"));
	}
}
