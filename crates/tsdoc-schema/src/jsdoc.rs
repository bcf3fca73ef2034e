//! Documentation metadata.
//!
//! Turns a declaration's doc comment into [`Attributes`]: the comment body
//! becomes `description`, and every tag contributes one key.
//!
//! | Tag | Attribute |
//! |-----|-----------|
//! | native tag with a value (`@default "x"`) | `default: "\"x\""` |
//! | native tag without a value (`@readonly`, `@see ...`) | `readonly: true` |
//! | `@draft` | `draft: true` |
//! | `@max 10` | `max: 10` |
//! | `@hidden false` | `hidden: false` |
//! | `@label "Full Name"` | `label: "Full Name"` |
//! | `@pattern [a-z]+` | `pattern: "[a-z]+"` |

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

use crate::catalog::JsDoc;
use crate::node::Attributes;

/// Kind the extractor reports for tags it does not understand.
const UNSUPPORTED: &str = "unsupported";

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_]+)(?:\s+(.+))?").expect("tag pattern is valid"));

/// Resolve a doc comment into property attributes. Tags are applied in
/// order, so a repeated key keeps its last value.
pub fn resolve_doc_meta(js_doc: Option<&JsDoc>) -> Attributes {
    let mut attrs = Attributes::new();
    let Some(js_doc) = js_doc else {
        return attrs;
    };

    if let Some(doc) = js_doc.doc.as_deref().filter(|d| !d.is_empty()) {
        attrs.set("description", Value::String(doc.to_string()));
    }

    for tag in &js_doc.tags {
        if tag.kind == UNSUPPORTED {
            let raw = match &tag.value {
                Some(Value::String(raw)) => raw.as_str(),
                _ => continue,
            };
            if let Some((key, value)) = parse_tag(raw) {
                attrs.set(key, value.map_or(Value::Bool(true), cast));
            }
            continue;
        }

        let value = match &tag.value {
            None | Some(Value::Null) => Value::Bool(true),
            Some(value) => value.clone(),
        };
        attrs.set(&tag.kind, value);
    }

    attrs
}

/// Split raw tag text like `@max 10` into its key and optional value.
pub fn parse_tag(raw: &str) -> Option<(&str, Option<&str>)> {
    let captures = TAG_RE.captures(raw)?;
    let key = captures.get(1)?.as_str();
    let value = captures.get(2).map(|m| m.as_str());
    Some((key, value))
}

/// Interpret a tag value: booleans, plain digit strings as numbers, quoted
/// strings unquoted, anything else verbatim.
pub fn cast(value: &str) -> Value {
    if value.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = value.parse::<u64>() {
            return Value::Number(n.into());
        }
        if let Some(n) = value.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }

    let quoted = (value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\''));
    if quoted {
        // A lone quote is both the opening and the closing one.
        let inner = value.get(1..value.len() - 1).unwrap_or_default();
        return Value::String(inner.to_string());
    }

    Value::String(value.to_string())
}
