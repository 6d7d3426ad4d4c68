//! Constraint violations reported by the validation engine
//!
//! Document types declare their rules with `#[derive(validator::Validate)]`
//! and `#[validate(...)]` field attributes. The codec only runs the engine
//! and turns its nested [`ValidationErrors`] into a flat, ordered list of
//! [`Violation`]s with dotted field paths.
//!
//! # Example
//!
//! ```rust
//! use validator::Validate;
//! use yamlbind_core::validate::check;
//!
//! #[derive(Validate)]
//! struct Person {
//!     #[validate(required)]
//!     name: Option<String>,
//!     #[validate(range(min = 0))]
//!     age: i64,
//! }
//!
//! let violations = check(&Person { name: None, age: -1 });
//! assert!(violations.mentions("age"));
//! assert!(violations.mentions("name"));
//! ```

use std::borrow::Cow;
use std::fmt;

pub use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Key the engine uses for struct-level (schema) errors
const STRUCT_LEVEL: &str = "__all__";

/// A single constraint failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted field path, with `[i]` for sequence items. Empty for the whole document.
    pub path: String,
    /// Human-readable description of the failure
    pub message: String,
}

impl Violation {
    /// Create a violation for the given path
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Violations in reported order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterate over the violations in reported order
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Returns true if any violation is reported against `path`
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

/// Flatten engine errors into violations
///
/// The engine keys fields by name in a hash map, so fields are reported
/// sorted by name at each level; sequence items follow index order and
/// the errors of a single field keep the engine's order.
impl From<&ValidationErrors> for Violations {
    fn from(errors: &ValidationErrors) -> Self {
        let mut violations = Vec::new();
        flatten(errors, "", &mut violations);
        Self { violations }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

fn join(prefix: &str, field: &str) -> String {
    if field == STRUCT_LEVEL {
        prefix.to_string()
    } else if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn flatten(errors: &ValidationErrors, prefix: &str, out: &mut Vec<Violation>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());

    for (field, kind) in fields {
        let path = join(prefix, &field.to_string());
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(Violation::new(path.clone(), describe(error)));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Render an engine error as a sentence
///
/// An explicit `message = "..."` on the attribute always wins.
fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());
    match &*error.code {
        "required" => "must not be null".to_string(),
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) => format!("must be greater than or equal to {min}"),
            (None, Some(max)) => format!("must be less than or equal to {max}"),
            (None, None) => "is out of range".to_string(),
        },
        "length" => match (param("equal"), param("min"), param("max")) {
            (Some(equal), _, _) => format!("length must be {equal}"),
            (None, Some(min), Some(max)) => format!("length must be between {min} and {max}"),
            (None, Some(min), None) => format!("length must be at least {min}"),
            (None, None, Some(max)) => format!("length must be at most {max}"),
            (None, None, None) => "has an invalid length".to_string(),
        },
        "regex" => "does not match the required pattern".to_string(),
        "email" => "must be a well-formed email address".to_string(),
        "url" => "must be a valid URL".to_string(),
        code => format!("failed `{code}` check"),
    }
}

/// Run the engine over `value` and collect what it reports
pub fn check<T: Validate>(value: &T) -> Violations {
    match value.validate() {
        Ok(()) => Violations::default(),
        Err(errors) => Violations::from(&errors),
    }
}

/// Floating point types that can hold NaN or infinities
pub trait FiniteCheck {
    /// Returns true for any value other than NaN or ±∞
    fn is_finite_value(&self) -> bool;
}

impl FiniteCheck for f64 {
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FiniteCheck for f32 {
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl<T: FiniteCheck + ?Sized> FiniteCheck for &T {
    fn is_finite_value(&self) -> bool {
        (**self).is_finite_value()
    }
}

/// Custom rule rejecting NaN and infinities
///
/// The engine's `range` rule compares with `<`/`>`, which NaN never
/// fails, so float fields pair it with this one:
///
/// ```rust
/// use validator::Validate;
/// use yamlbind_core::validate::{check, finite};
///
/// #[derive(Validate)]
/// struct Ratio {
///     #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
///     ratio: f64,
/// }
///
/// assert!(check(&Ratio { ratio: f64::NAN }).mentions("ratio"));
/// assert!(check(&Ratio { ratio: 0.5 }).is_empty());
/// ```
pub fn finite<T: FiniteCheck>(value: T) -> Result<(), ValidationError> {
    if value.is_finite_value() {
        return Ok(());
    }
    let mut error = ValidationError::new("finite");
    error.message = Some(Cow::Borrowed("must be a finite number"));
    Err(error)
}
