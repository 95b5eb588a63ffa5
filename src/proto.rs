//! Recovery of callable signatures from binding-generated docstrings.
//!
//! When the metadata index has no entry for a callable, the only signature
//! information left is the prototype line the binding generator embeds as the
//! first line of the docstring, shaped like
//! `plan( (Planner)arg1, (double)arg2) -> Supports :`. Parsing is best-effort
//! and total: a line that does not match the grammar yields the defaults, not
//! an error, because many callables carry free-form documentation instead.

use once_cell::sync::Lazy;
use regex::Regex;

static PROTOTYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\((.+)\) -> (.+) :$").unwrap());

/// One recovered argument: the raw type token and the argument name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtoArg {
    pub ty: String,
    pub name: String,
}

/// A callable signature recovered from a prototype line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prototype {
    pub name: String,
    pub args: Vec<ProtoArg>,
    pub returns: String,
}

impl Prototype {
    fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Vec::new(),
            returns: crate::translate::UNKNOWN.to_string(),
        }
    }
}

/// Parses the first line of `doc` against the prototype grammar. `name` is
/// the caller's name for the callable and seeds the default result.
pub fn parse_prototype(name: &str, doc: Option<&str>) -> Prototype {
    let Some(doc) = doc else {
        return Prototype::fallback(name);
    };

    // Brackets mark optional/overload argument groups and carry no signature
    // information of their own.
    let line = doc
        .trim()
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .replace(['[', ']'], "");

    let Some(captures) = PROTOTYPE_RE.captures(&line) else {
        return Prototype::fallback(name);
    };

    let args = captures[2]
        .split(',')
        .map(|token| parse_arg(token.trim()))
        .collect();

    Prototype {
        name: captures[1].to_string(),
        args,
        returns: captures[3].to_string(),
    }
}

/// Splits one `(type)name` token. The type runs to the *last* `)` so that
/// nested parentheses inside the type (function-pointer-like expressions)
/// stay attached to it.
fn parse_arg(token: &str) -> ProtoArg {
    let token = token.strip_prefix('(').unwrap_or(token);
    match token.rfind(')') {
        Some(split) => ProtoArg {
            ty: token[..split].to_string(),
            name: token[split + 1..].to_string(),
        },
        None => ProtoArg {
            ty: String::new(),
            name: token.to_string(),
        },
    }
}
