//! yamlbind Core Library
//!
//! This crate binds YAML documents to Rust types:
//! - Typed parsing through serde
//! - Constraint checking through `validator` derive attributes
//! - Block-style YAML output to strings, writers and files
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    YAML     │────▶│  serde_yaml │────▶│  Validate   │────▶ T
//! │    text     │     │   (decode)  │     │ (Violations)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use yamlbind_core::YamlCodec;
//!
//! let codec = YamlCodec::<ProjectFile>::new();
//! let project = codec.parse_file("./project.yaml")?;
//! codec.write_file(&project, "./project.yaml")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod validate;

pub use codec::{CodecOptions, YamlCodec};
pub use error::{Error, Result};
pub use validate::{Validate, Violation, Violations};
