//! CORS policies
//!
//! The host holds `allow_origins` as one record with `exact`, `prefix` and
//! `regex` fields; the wire holds a list of single-field matchers. Encoding
//! emits one matcher per non-empty field, in that field order. Decoding folds
//! the matchers back into one record, so when the vendor returns several
//! matchers of the same kind only the last one survives.

use super::value::{self, Block, block_list};
use crate::wire::{CorsPolicy, StringMatch};
use serde_json::{Value, json};

const MATCH_KINDS: [&str; 3] = ["exact", "prefix", "regex"];

pub(crate) fn expand(block: &Block) -> CorsPolicy {
    CorsPolicy {
        allow_origins: value::blocks(block, "allow_origins")
            .flat_map(expand_origins)
            .collect(),
        allow_methods: value::strings(block, "allow_methods"),
        allow_headers: value::strings(block, "allow_headers"),
        expose_headers: value::strings(block, "expose_headers"),
        max_age: value::string(block, "max_age"),
        allow_credentials: value::boolean(block, "allow_credentials"),
    }
}

fn expand_origins(origins: &Block) -> Vec<StringMatch> {
    MATCH_KINDS
        .iter()
        .filter_map(|kind| {
            let pattern = value::string(origins, kind);
            if pattern.is_empty() {
                return None;
            }
            let mut matcher = StringMatch::default();
            match *kind {
                "exact" => matcher.exact = pattern,
                "prefix" => matcher.prefix = pattern,
                _ => matcher.regex = pattern,
            }
            Some(matcher)
        })
        .collect()
}

pub(crate) fn flatten(cors: Option<&CorsPolicy>) -> Value {
    block_list(cors.map(|cors| {
        json!({
            "allow_origins": flatten_origins(&cors.allow_origins),
            "allow_methods": cors.allow_methods,
            "allow_headers": cors.allow_headers,
            "expose_headers": cors.expose_headers,
            "max_age": cors.max_age,
            "allow_credentials": cors.allow_credentials,
        })
    }))
}

fn flatten_origins(matchers: &[StringMatch]) -> Value {
    if matchers.is_empty() {
        return json!([]);
    }
    let mut origins = json!({"exact": "", "prefix": "", "regex": ""});
    for matcher in matchers {
        if !matcher.exact.is_empty() {
            origins["exact"] = Value::from(matcher.exact.as_str());
        }
        if !matcher.prefix.is_empty() {
            origins["prefix"] = Value::from(matcher.prefix.as_str());
        }
        if !matcher.regex.is_empty() {
            origins["regex"] = Value::from(matcher.regex.as_str());
        }
    }
    json!([origins])
}
