//! @ai:module:intent Map tag names to the rule that synthesizes their value
//! @ai:module:layer domain
//! @ai:module:public_api ValueRule, lookup, type_hint, TYPE_HINT_TAG
//! @ai:module:stateless true

/// @ai:intent How a missing tag value is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    /// Case-convert the field identifier
    Identifier,
    /// Classify the field's declared type
    TypeHint,
}

/// Tag whose value describes the field type rather than its name.
pub const TYPE_HINT_TAG: &str = "swaggertype";

const RULES: &[(&str, ValueRule)] = &[
    ("json", ValueRule::Identifier),
    ("xml", ValueRule::Identifier),
    ("yaml", ValueRule::Identifier),
    ("toml", ValueRule::Identifier),
    ("bson", ValueRule::Identifier),
    ("msgpack", ValueRule::Identifier),
    ("mapstructure", ValueRule::Identifier),
    ("form", ValueRule::Identifier),
    ("query", ValueRule::Identifier),
    ("db", ValueRule::Identifier),
    (TYPE_HINT_TAG, ValueRule::TypeHint),
];

// Checked in order, first family with a matching word wins.
const TYPE_FAMILIES: &[(&[&str], &str)] = &[
    (
        &[
            "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
            "uint64", "uintptr", "byte", "rune",
        ],
        "integer",
    ),
    (&["string"], "string"),
    (&["time", "duration"], "number"),
    (&["float32", "float64", "complex64", "complex128"], "number"),
    (&["bool"], "boolean"),
];

/// @ai:intent Find the rule registered for a tag name
/// @ai:post None for names outside the table; callers fall back to Identifier
/// @ai:effects pure
pub fn lookup(name: &str) -> Option<ValueRule> {
    RULES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, rule)| *rule)
}

/// @ai:intent Classify a Go type expression into a schema type name
/// @ai:example ("*int64") -> "integer"
/// @ai:example ("[]string") -> "string"
/// @ai:example ("time.Time") -> "number"
/// @ai:example ("MyStruct") -> ""
/// @ai:effects pure
pub fn type_hint(type_description: &str) -> &'static str {
    let lowered = type_description.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();

    TYPE_FAMILIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| words.contains(k)))
        .map_or("", |(_, hint)| hint)
}
