// src/model.rs
//! Loosely-typed view over a generative model answer.
//!
//! The Gemini REST API (camelCase) and the older Python/JS SDK dumps
//! (snake_case, `web.page.*`, flat `citations`) disagree on almost every
//! nested key. Nothing here fails: every accessor returns `None` / an empty
//! iterator when a field is missing or has the wrong type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw model answer. Wraps the JSON body as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelResponse {
    raw: Value,
}

impl ModelResponse {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Convenience for stubs and tests: a response carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            raw: serde_json::json!({ "text": text.into() }),
        }
    }

    /// Candidate objects, if the response has any.
    pub fn candidates(&self) -> impl Iterator<Item = &Value> {
        array_items(self.raw.get("candidates"))
    }

    /// Top-level flat citation records (older SDK shape).
    pub fn citations(&self) -> impl Iterator<Item = &Value> {
        array_items(self.raw.get("citations"))
    }

    /// Answer text. Prefers an explicit top-level `text`; otherwise joins the
    /// text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        if let Some(t) = self.raw.get("text").and_then(Value::as_str) {
            return non_empty(t).map(str::to_string);
        }

        let parts = self
            .candidates()
            .next()
            .and_then(|c| c.pointer("/content/parts"))
            .and_then(Value::as_array)?;

        let joined = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("");
        non_empty(&joined).map(str::to_string)
    }
}

/// Iterate an optional JSON array; anything else yields nothing.
pub(crate) fn array_items(v: Option<&Value>) -> impl Iterator<Item = &Value> {
    v.and_then(Value::as_array).into_iter().flatten()
}

/// First non-null value on `v` among `keys` (used for camelCase/snake_case pairs).
pub(crate) fn field<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| v.get(*k).filter(|x| !x.is_null()))
}

/// Non-empty string at `v`, if it is a string at all.
pub(crate) fn non_empty_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_prefers_top_level_field() {
        let r = ModelResponse::from_value(json!({
            "text": "direct",
            "candidates": [{ "content": { "parts": [{ "text": "from parts" }] } }]
        }));
        assert_eq!(r.text().as_deref(), Some("direct"));
    }

    #[test]
    fn text_joins_first_candidate_parts() {
        let r = ModelResponse::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Headline: A\n" }, { "text": "---" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(r.text().as_deref(), Some("Headline: A\n---"));
    }

    #[test]
    fn null_key_does_not_hide_alternate_spelling() {
        let v = json!({ "groundingMetadata": null, "grounding_metadata": { "ok": true } });
        let found = field(&v, &["groundingMetadata", "grounding_metadata"]);
        assert_eq!(found, Some(&json!({ "ok": true })));
        assert_eq!(field(&json!({ "a": null }), &["a", "b"]), None);
    }

    #[test]
    fn missing_or_mistyped_fields_are_absent() {
        let r = ModelResponse::from_value(json!({ "candidates": "nope", "text": 42 }));
        assert_eq!(r.candidates().count(), 0);
        assert_eq!(r.text(), None);
        assert_eq!(ModelResponse::default().citations().count(), 0);
    }
}
