//! Parser configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options controlling a parse.
///
/// Deserializes from camelCase JSON with every field optional:
///
/// ```
/// use ecma_parser::ParserOptions;
///
/// let options = ParserOptions::from_json(r#"{ "strict": true }"#).unwrap();
/// assert!(options.strict);
/// assert!(options.allow_hashbang);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Treat the whole program as strict-mode code
    pub strict: bool,
    /// Accept `return` outside of any function body
    pub allow_return_outside_function: bool,
    /// Skip a `#!` line at the start of the source
    pub allow_hashbang: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strict: false,
            allow_return_outside_function: false,
            allow_hashbang: true,
        }
    }
}

impl ParserOptions {
    /// Load options from a JSON document
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns these options with strict mode set
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns these options with top-level `return` allowed or not
    pub fn with_return_outside_function(mut self, allow: bool) -> Self {
        self.allow_return_outside_function = allow;
        self
    }
}

/// Errors from loading [`ParserOptions`]
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The document is not valid options JSON
    #[error("invalid parser options: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParserOptions::default();
        assert!(!options.strict);
        assert!(!options.allow_return_outside_function);
        assert!(options.allow_hashbang);
    }

    #[test]
    fn test_options_from_camel_case_json() {
        let options =
            ParserOptions::from_json(r#"{"allowReturnOutsideFunction": true, "allowHashbang": false}"#)
                .unwrap();
        assert!(options.allow_return_outside_function);
        assert!(!options.allow_hashbang);
        assert!(!options.strict);
    }

    #[test]
    fn test_invalid_options_json() {
        let err = ParserOptions::from_json(r#"{"strict": "yes"}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
        assert!(err.to_string().starts_with("invalid parser options"));
    }

    #[test]
    fn test_builder_methods() {
        let options = ParserOptions::default()
            .with_strict(true)
            .with_return_outside_function(true);
        assert!(options.strict);
        assert!(options.allow_return_outside_function);
    }
}
