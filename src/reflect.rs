//! Reflection snapshot of the live extension module.
//!
//! The compiled module is opaque binary code; what we consume is a capture of
//! its reflected surface: every exposed name in reflection order, classified
//! by capability, plus the module's own native-to-exposed class registry.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One name reflected off the module or off one of its classes.
#[derive(Clone, Debug, Deserialize)]
pub struct ExposedMember {
    pub name: String,
    #[serde(flatten)]
    pub shape: MemberShape,
}

/// Capability-query result for an exposed name. Replaces the usual chain of
/// "is this a type / is this callable" reflection probes with one variant.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberShape {
    Class {
        #[serde(default)]
        members: Vec<ExposedMember>,
    },
    Callable {
        #[serde(default)]
        doc: Option<String>,
    },
    Attribute,
    Opaque,
}

/// The full snapshot: module name, class registry, members in reflection
/// order. Read-only once loaded.
#[derive(Clone, Debug, Deserialize)]
pub struct ModuleSnapshot {
    pub module: String,
    /// Native fully-qualified class name mapped to the name the module
    /// actually exposes it under.
    #[serde(default)]
    pub registry: HashMap<String, String>,
    #[serde(default)]
    pub members: Vec<ExposedMember>,
}

impl ModuleSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read module snapshot at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse module snapshot at {}", path.display()))
    }
}

/// Privacy filter: implementation-private names are skipped everywhere, with
/// the constructor as the single exception.
pub fn is_public(name: &str) -> bool {
    !name.starts_with('_') || name == "__init__"
}
