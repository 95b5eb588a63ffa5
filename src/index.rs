//! The metadata index: the structured, queryable result of the documentation
//! run, keyed by fully-qualified native name.
//!
//! Lookups return `Option`; a miss is a normal outcome (the documentation run
//! and the compiled module are built independently, so the join between them
//! is best-effort) and callers degrade to the docstring fallback path.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// A documented parameter of a native declaration.
#[derive(Clone, Debug, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
}

/// The detailed description attached to one parameter.
#[derive(Clone, Debug, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// Everything the documentation run knows about one class member.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemberDescriptor {
    /// Declared native type: the field type for attributes, the return type
    /// for callables. Absent for constructors and untyped declarations.
    #[serde(default, rename = "type")]
    pub declared_type: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default, rename = "detailed")]
    pub param_docs: Vec<ParamDoc>,
    /// Free-form remarks carried verbatim into the stub docstring.
    #[serde(default, rename = "verbatim")]
    pub remarks: Option<String>,
    #[serde(default, rename = "returns")]
    pub return_doc: Option<String>,
}

/// Class-level documentation plus the member map.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClassDoc {
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default)]
    pub members: HashMap<String, MemberDescriptor>,
}

/// Immutable store of per-class documentation, built once at startup and
/// read-only for the rest of the run.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MetadataIndex {
    #[serde(default)]
    classes: HashMap<String, ClassDoc>,
}

impl MetadataIndex {
    /// Loads the index emitted by the documentation run. This is the only
    /// input whose absence is fatal to the whole pipeline.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read metadata index at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse metadata index at {}", path.display()))
    }

    pub fn class_doc(&self, native_name: &str) -> Option<&ClassDoc> {
        self.classes.get(native_name)
    }

    pub fn member(&self, native_name: &str, member_name: &str) -> Option<&MemberDescriptor> {
        self.classes
            .get(native_name)?
            .members
            .get(member_name)
    }
}
