//! CLI command implementations

pub mod check;
pub mod fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};
use yamlbind_core::YamlCodec;

/// A document without a fixed schema
///
/// Any well-formed YAML value is accepted; there are no field constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub serde_yaml::Value);

impl Validate for Document {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Codec for schema-less documents
pub type DocumentCodec = YamlCodec<Document>;
