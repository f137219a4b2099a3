//! @ai:module:intent Convert Go field identifiers into tag-value casings
//! @ai:module:layer domain
//! @ai:module:public_api CasePolicy, convert, to_snake, to_camel
//! @ai:module:stateless true

use std::fmt;
use std::str::FromStr;

/// @ai:intent Casing applied to a field identifier to produce a tag value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CasePolicy {
    #[default]
    Snake,
    Camel,
    Pascal,
    /// A policy name nobody recognizes; kept so the engine can warn about it per tag
    Unknown(String),
}

impl CasePolicy {
    /// @ai:intent Name of the policy as written on the command line
    /// @ai:effects pure
    pub fn name(&self) -> &str {
        match self {
            CasePolicy::Snake => "snake",
            CasePolicy::Camel => "camel",
            CasePolicy::Pascal => "pascal",
            CasePolicy::Unknown(name) => name,
        }
    }
}

impl FromStr for CasePolicy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "" | "snake" => CasePolicy::Snake,
            "camel" => CasePolicy::Camel,
            "pascal" => CasePolicy::Pascal,
            _ => CasePolicy::Unknown(s.trim().to_string()),
        })
    }
}

impl fmt::Display for CasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// @ai:intent Apply a case policy to an identifier
/// @ai:post None only for CasePolicy::Unknown
/// @ai:example ("UserID", Snake) -> Some("user_id")
/// @ai:example ("UserID", Kebab) -> None
/// @ai:effects pure
pub fn convert(identifier: &str, policy: &CasePolicy) -> Option<String> {
    match policy {
        CasePolicy::Snake => Some(to_snake(identifier)),
        CasePolicy::Camel => Some(to_camel(identifier)),
        CasePolicy::Pascal => Some(identifier.to_string()),
        CasePolicy::Unknown(_) => None,
    }
}

/// @ai:intent Convert an identifier to snake_case keeping acronyms together
/// @ai:pre identifier is a Go identifier
/// @ai:example ("UserID") -> "user_id"
/// @ai:example ("CSRFToken") -> "csrf_token"
/// @ai:example ("TestField2") -> "test_field2"
/// @ai:effects pure
pub fn to_snake(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_is_lower = chars[i - 1].is_lowercase();
            if next_is_lower || prev_is_lower {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// @ai:intent Convert an identifier to lowerCamelCase by lowering its leading capital run
/// @ai:pre identifier is a Go identifier
/// @ai:example ("ID") -> "id"
/// @ai:example ("UserID") -> "userID"
/// @ai:example ("CSRFToken") -> "csrfToken"
/// @ai:example ("HTTP2Server") -> "httP2Server"
/// @ai:effects pure
pub fn to_camel(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();

    // A longer run that stops before the end keeps its last capital.
    let lowered = if run > 1 && run < chars.len() {
        run - 1
    } else {
        run
    };

    let mut out = String::with_capacity(identifier.len());
    for (i, c) in chars.iter().enumerate() {
        if i < lowered {
            out.extend(c.to_lowercase());
        } else {
            out.push(*c);
        }
    }
    out
}
