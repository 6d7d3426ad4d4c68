//! Typed YAML codec
//!
//! [`YamlCodec`] reads YAML text into a caller-defined type, checks the
//! result against the rules the type declares through `validator` and
//! writes values back out as block-style YAML.
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use validator::Validate;
//! use yamlbind_core::{Error, YamlCodec};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize, Validate)]
//! struct Config {
//!     #[validate(required)]
//!     name: Option<String>,
//!     #[validate(range(min = 0))]
//!     age: i64,
//! }
//!
//! let codec = YamlCodec::<Config>::new();
//! let config = codec.parse("name: Alice\nage: 30").unwrap();
//! assert_eq!(config.age, 30);
//!
//! let err = codec.parse("name: Alice\nage: -1").unwrap_err();
//! assert!(matches!(err, Error::Validation(_)));
//! ```

use std::fmt;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::validate::{self, Validate};

/// Codec behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Check values against their constraints before writing them
    pub validate_on_write: bool,
}

/// Reads, validates and writes documents of type `T`
///
/// The codec holds no per-call state, so one instance can serve any number
/// of reads and writes, from any thread.
pub struct YamlCodec<T> {
    options: CodecOptions,
    _document: PhantomData<fn() -> T>,
}

impl<T> YamlCodec<T> {
    /// Create a codec with default options
    pub fn new() -> Self {
        Self::with_options(CodecOptions::default())
    }

    /// Create a codec with the given options
    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            options,
            _document: PhantomData,
        }
    }

    /// Enable or disable validation before every write
    pub fn validate_on_write(mut self, enabled: bool) -> Self {
        self.options.validate_on_write = enabled;
        self
    }

    /// Options this codec was built with
    pub fn options(&self) -> CodecOptions {
        self.options
    }
}

impl<T> Default for YamlCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for YamlCodec<T> {
    fn clone(&self) -> Self {
        Self::with_options(self.options)
    }
}

impl<T> fmt::Debug for YamlCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlCodec")
            .field("document", &std::any::type_name::<T>())
            .field("options", &self.options)
            .finish()
    }
}

impl<T: Validate> YamlCodec<T> {
    /// Check `value` against its declared constraints
    pub fn validate(&self, value: &T) -> Result<()> {
        let violations = validate::check(value);
        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                document = std::any::type_name::<T>(),
                violations = violations.len(),
                "document failed validation"
            );
            Err(Error::Validation(violations))
        }
    }
}

impl<T: DeserializeOwned + Validate> YamlCodec<T> {
    /// Parse YAML text into a validated `T`
    pub fn parse(&self, text: &str) -> Result<T> {
        tracing::debug!(
            document = std::any::type_name::<T>(),
            bytes = text.len(),
            "parsing document"
        );

        let value: T = serde_yaml::from_str(text).map_err(|e| {
            tracing::debug!(error = %e, "document is not valid YAML for the target type");
            Error::Parse(e)
        })?;

        self.validate(&value)?;
        Ok(value)
    }

    /// Parse a document given as individual lines
    ///
    /// Lines are joined with `\n` before parsing.
    pub fn parse_lines<I>(&self, lines: I) -> Result<T>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut text = String::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        self.parse(&text)
    }

    /// Parse a YAML file
    ///
    /// The file is read as UTF-8 and split at `\n`, `\r\n` or a lone `\r`.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<T> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading document");

        let contents = std::fs::read_to_string(path)?;
        self.parse_lines(split_lines(&contents))
    }
}

impl<T: Serialize + Validate> YamlCodec<T> {
    /// Serialize `value` to a YAML string
    pub fn write_to_string(&self, value: &T) -> Result<String> {
        if self.options.validate_on_write {
            self.validate(value)?;
        }
        serde_yaml::to_string(value).map_err(Error::Serialize)
    }

    /// Serialize `value` and write it to `writer`
    ///
    /// The document is rendered in full before the first byte is written.
    pub fn write<W: Write>(&self, value: &T, mut writer: W) -> Result<()> {
        let text = self.write_to_string(value)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize `value` into the file at `path`, creating or truncating it
    ///
    /// The file is synced before returning, so errors the OS would only
    /// report when the handle is closed surface here as [`Error::Io`].
    pub fn write_file(&self, value: &T, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.write_to_string(value)?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "writing document");
        let mut file = std::fs::File::create(path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

/// Split text into lines at `\n`, `\r\n` or a lone `\r`
///
/// A trailing terminator does not start an empty final line.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
    struct Config {
        #[validate(required)]
        name: Option<String>,
        #[validate(range(min = 0))]
        age: i64,
    }

    fn codec() -> YamlCodec<Config> {
        YamlCodec::new()
    }

    #[test]
    fn test_parse_valid_document() {
        let config = codec().parse("name: Alice\nage: 30").unwrap();
        assert_eq!(
            config,
            Config {
                name: Some("Alice".to_string()),
                age: 30
            }
        );
    }

    #[test]
    fn test_parse_negative_age_fails_validation() {
        let err = codec().parse("name: Alice\nage: -1").unwrap_err();
        let violations = err.violations().expect("expected validation error");
        assert!(violations.mentions("age"));
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_parse_bad_indentation_fails_parsing() {
        let err = codec().parse("name: Alice\n  age: 30").unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_parse_wrong_shape_fails_parsing() {
        let err = codec().parse("name: Alice\nage: thirty").unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_parse_reports_all_violations_in_order() {
        let err = codec().parse("age: -5").unwrap_err();
        let paths: Vec<_> = err
            .violations()
            .expect("expected validation error")
            .iter()
            .map(|v| v.path.as_str())
            .collect();
        assert_eq!(paths, ["age", "name"]);

        let message = err.to_string();
        assert_eq!(message.lines().count(), 2);
        assert!(message.contains("name: must not be null"));
    }

    #[test]
    fn test_parse_lines_joins_with_newline() {
        let lines = ["name: Bob", "age: 41"];
        let from_lines = codec().parse_lines(lines).unwrap();
        let from_text = codec().parse(&lines.join("\n")).unwrap();
        assert_eq!(from_lines, from_text);
    }

    #[test]
    fn test_parse_lines_empty_sequence() {
        let lines: Vec<String> = Vec::new();
        assert!(codec().parse_lines(lines).is_err());
    }

    #[test]
    fn test_write_to_string_round_trip() {
        let config = Config {
            name: Some("Carol".to_string()),
            age: 52,
        };
        let text = codec().write_to_string(&config).unwrap();
        assert_eq!(text, "name: Carol\nage: 52\n");
        assert_eq!(codec().parse(&text).unwrap(), config);
    }

    #[test]
    fn test_write_skips_validation_by_default() {
        let invalid = Config {
            name: None,
            age: -1,
        };
        let mut out = Vec::new();
        codec().write(&invalid, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name: null\nage: -1\n");
    }

    #[test]
    fn test_validate_on_write_rejects_before_writing() {
        let invalid = Config {
            name: None,
            age: 3,
        };
        let mut out = Vec::new();
        let err = codec()
            .validate_on_write(true)
            .write(&invalid, &mut out)
            .unwrap_err();
        assert!(err.violations().is_some_and(|v| v.mentions("name")));
        assert!(out.is_empty());
    }

    #[test]
    fn test_options_survive_clone() {
        let codec = YamlCodec::<Config>::with_options(CodecOptions {
            validate_on_write: true,
        });
        assert!(codec.clone().options().validate_on_write);
        assert!(!YamlCodec::<Config>::default().options().validate_on_write);
    }

    #[rstest]
    #[case::empty("", &[])]
    #[case::lf("a\nb", &["a", "b"])]
    #[case::crlf("a\r\nb\r\n", &["a", "b"])]
    #[case::lone_cr("a\rb\r", &["a", "b"])]
    #[case::mixed("a\r\rb\nc", &["a", "", "b", "c"])]
    #[case::blank_lines("\n\na", &["", "", "a"])]
    fn test_split_lines(#[case] text: &str, #[case] expected: &[&str]) {
        assert_eq!(split_lines(text), expected);
    }

    #[test]
    fn test_codec_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<YamlCodec<Config>>();
        assert_send_sync::<YamlCodec<std::rc::Rc<Config>>>();
    }
}
