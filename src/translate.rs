//! Native type expressions rewritten as Python annotations.
//!
//! Translation is a total function: anything the table does not know degrades
//! to `any` rather than failing, so a stale or partial documentation run can
//! never abort stub emission.

use std::collections::HashMap;

/// Annotation used when a type expression matches nothing we know.
pub const UNKNOWN: &str = "any";

const VECTOR_PREFIX: &str = "std::vector<";

/// Fixed primitive and container mappings. Extended at build time with every
/// class the registry knows about.
const SEED_TABLE: &[(&str, &str)] = &[
    ("std::string", "str"),
    ("double", "float"),
    ("int", "int"),
    ("bool", "bool"),
    ("void", "None"),
    ("Eigen::MatrixXd", "numpy.ndarray"),
    ("Eigen::VectorXd", "numpy.ndarray"),
    ("Eigen::Matrix3d", "numpy.ndarray"),
    ("Eigen::Vector3d", "numpy.ndarray"),
    ("Eigen::Matrix2d", "numpy.ndarray"),
    ("Eigen::Vector2d", "numpy.ndarray"),
    ("Eigen::Affine3d", "numpy.ndarray"),
];

#[derive(Clone, Debug)]
pub struct TypeTranslator {
    table: HashMap<String, String>,
}

impl TypeTranslator {
    /// Seeds the table and extends it with the exposed classes, so a native
    /// declaration referencing another bound class translates to that class's
    /// exposed name.
    pub fn build<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table: HashMap<String, String> = SEED_TABLE
            .iter()
            .map(|(native, py)| ((*native).to_string(), (*py).to_string()))
            .collect();
        for (native, exposed) in classes {
            table.insert(native.to_string(), exposed.to_string());
        }
        Self { table }
    }

    /// Translates an optional declared type. `None` in, `None` out: a missing
    /// declaration is distinct from an unrecognized one.
    pub fn translate(&self, declared: Option<&str>) -> Option<String> {
        declared.map(|raw| self.translate_raw(raw))
    }

    /// Total translation of a raw type string. Strips reference and pointer
    /// markers and a leading `const`, exact-matches the table, and expands a
    /// single-argument `std::vector` recursively.
    pub fn translate_raw(&self, raw: &str) -> String {
        let cleaned = raw.replace('&', "").replace('*', "");
        let mut cleaned = cleaned.trim();
        if let Some(rest) = cleaned.strip_prefix("const ") {
            cleaned = rest;
        }

        if let Some(translated) = self.table.get(cleaned) {
            return translated.clone();
        }

        if let Some(rest) = cleaned.strip_prefix(VECTOR_PREFIX) {
            let inner = rest.strip_suffix('>').unwrap_or(rest);
            return format!("list[{}]", self.translate_raw(inner));
        }

        UNKNOWN.to_string()
    }
}
