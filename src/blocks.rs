// src/blocks.rs
//! Parser for the `Label: value` blocks the prompts ask the model to emit.
//!
//! ```text
//! Headline: ...
//! Summary: ...
//! Link: ...
//! Why it matters: ...
//! ---
//! ```

use serde::{Deserialize, Serialize};

/// Literal block separator.
pub const BLOCK_DELIMITER: &str = "---";

/// One parsed block. Absent fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Headline,
    Summary,
    Link,
    Why,
    Source,
}

/// Recognized labels, lowercase, checked in order. First match wins.
const FIELD_PREFIXES: [(&str, Field); 5] = [
    ("headline:", Field::Headline),
    ("summary:", Field::Summary),
    ("link:", Field::Link),
    ("why it matters:", Field::Why),
    ("source:", Field::Source),
];

impl Record {
    pub fn is_empty(&self) -> bool {
        self.headline.is_none()
            && self.summary.is_none()
            && self.link.is_none()
            && self.why.is_none()
            && self.source.is_none()
    }

    fn slot(&mut self, f: Field) -> &mut Option<String> {
        match f {
            Field::Headline => &mut self.headline,
            Field::Summary => &mut self.summary,
            Field::Link => &mut self.link,
            Field::Why => &mut self.why,
            Field::Source => &mut self.source,
        }
    }
}

/// Split `text` on `---` and map each segment to a [`Record`].
/// Segments without any recognized, non-empty field are dropped.
pub fn parse_structured_blocks(text: &str) -> Vec<Record> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split(BLOCK_DELIMITER)
        .filter_map(parse_segment)
        .collect()
}

fn parse_segment(segment: &str) -> Option<Record> {
    let mut rec = Record::default();

    for line in segment
        .split(is_line_break)
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        let Some(field) = match_prefix(line) else {
            continue;
        };
        // Only the first colon separates label from value ("http://a.com:8080").
        let value = line.split_once(':').map(|(_, v)| v.trim()).unwrap_or("");
        if value.is_empty() {
            continue;
        }
        *rec.slot(field) = Some(value.to_string());
    }

    if rec.is_empty() {
        None
    } else {
        Some(rec)
    }
}

/// Line boundaries: `\n`, bare `\r`, vertical tab, form feed, the ASCII
/// file/group/record separators, NEL and the Unicode line/paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn match_prefix(line: &str) -> Option<Field> {
    FIELD_PREFIXES.iter().find_map(|(prefix, field)| {
        line.get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| *field)
    })
}
