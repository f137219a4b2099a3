//! @ai:module:intent Decompose and recompose raw Go struct tag literals
//! @ai:module:layer domain
//! @ai:module:public_api TagEntry, TagSet, Delimiter
//! @ai:module:stateless true
//!
//! A tag literal is either a raw string (`` `json:"id" xml:"id"` ``) or an interpreted
//! string (`"json:\"id\""`). Entries are kept in the encoding of their literal, so an
//! interpreted tag stores `key:\"value\"` pairs and serializes back the same way.

use regex::Regex;
use std::sync::OnceLock;

/// @ai:intent The quote pair surrounding a tag literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Backtick,
    Quote,
}

impl Delimiter {
    fn char(self) -> char {
        match self {
            Delimiter::Backtick => '`',
            Delimiter::Quote => '"',
        }
    }
}

/// @ai:intent One whitespace-separated token of a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEntry {
    /// A `key:"value"` pair; `value` is stored exactly as written between the quotes
    Pair { key: String, value: String },
    /// Anything else, passed through untouched
    Opaque(String),
}

/// @ai:intent Ordered entries of one field's tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet {
    delimiter: Delimiter,
    entries: Vec<TagEntry>,
}

fn backtick_pair() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([^\s:"`\\]+):"((?:[^"\\]|\\.)*)"(?:\s|$)"#).expect("Invalid regex")
    })
}

fn quote_pair() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([^\s:"`\\]+):\\"((?:[^"\\]|\\[^"])*)\\"(?:\s|$)"#).expect("Invalid regex")
    })
}

impl TagSet {
    /// @ai:intent Create an empty tag set that serializes with the given delimiter
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            entries: Vec::new(),
        }
    }

    /// @ai:intent Parse a raw tag literal into ordered entries
    /// @ai:post malformed tokens become Opaque entries, nothing is dropped
    /// @ai:example ("`json:\"id\" custom`") -> [Pair(json, id), Opaque(custom)]
    /// @ai:example ("") -> []
    /// @ai:effects pure
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (delimiter, inner) = strip_delimiters(raw);
        let pair = match delimiter {
            Delimiter::Backtick => backtick_pair(),
            Delimiter::Quote => quote_pair(),
        };

        let mut set = Self::new(delimiter);
        let mut rest = inner.trim_start();

        while !rest.is_empty() {
            let consumed = match pair.captures(rest) {
                Some(captures) => {
                    let whole = captures.get(0).map_or("", |m| m.as_str());
                    let key = captures.get(1).map_or("", |m| m.as_str());
                    let value = captures.get(2).map_or("", |m| m.as_str());
                    set.entries.push(TagEntry::Pair {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                    whole.len()
                }
                None => {
                    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                    set.entries.push(TagEntry::Opaque(rest[..end].to_string()));
                    end
                }
            };
            rest = rest[consumed..].trim_start();
        }

        set
    }

    /// @ai:intent Render the set back into a tag literal
    /// @ai:post None when the set has no entries
    /// @ai:effects pure
    pub fn serialize(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let quote = match self.delimiter {
            Delimiter::Backtick => "\"",
            Delimiter::Quote => "\\\"",
        };
        let body = self
            .entries
            .iter()
            .map(|entry| match entry {
                TagEntry::Pair { key, value } => format!("{key}:{quote}{value}{quote}"),
                TagEntry::Opaque(text) => text.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ");

        let d = self.delimiter.char();
        Some(format!("{d}{body}{d}"))
    }

    /// @ai:intent Value of the first pair whose key equals `key` exactly
    /// @ai:effects pure
    pub fn find_value(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            TagEntry::Pair { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// @ai:intent Append a pair after all existing entries
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(TagEntry::Pair {
            key: key.into(),
            value: value.into(),
        });
    }

    /// @ai:intent Drop every entry regardless of content
    pub fn remove_all(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strip_delimiters(raw: &str) -> (Delimiter, &str) {
    for delimiter in [Delimiter::Backtick, Delimiter::Quote] {
        let d = delimiter.char();
        if raw.len() >= 2 && raw.starts_with(d) && raw.ends_with(d) {
            return (delimiter, &raw[1..raw.len() - 1]);
        }
    }
    (Delimiter::Backtick, raw)
}
