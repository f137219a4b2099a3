//! @ai:module:intent Parse user-requested tag names and their case policies
//! @ai:module:layer domain
//! @ai:module:public_api TagRequest, parse_list
//! @ai:module:depends_on case
//! @ai:module:stateless true

use crate::case::CasePolicy;

/// @ai:intent One tag to add or keep on every exported field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub name: String,
    pub case: CasePolicy,
}

impl TagRequest {
    pub fn new(name: impl Into<String>, case: CasePolicy) -> Self {
        Self {
            name: name.into(),
            case,
        }
    }

    /// @ai:intent Parse a single `name[:case]` item
    /// @ai:post None when the name part is empty
    /// @ai:example ("json:camel", Snake) -> Some(json, Camel)
    /// @ai:example ("xml", Snake) -> Some(xml, Snake)
    /// @ai:effects pure
    pub fn parse(item: &str, default_case: &CasePolicy) -> Option<Self> {
        let (name, case) = match item.split_once(':') {
            Some((name, case)) if !case.trim().is_empty() => {
                (name.trim(), case.parse::<CasePolicy>().unwrap_or_default())
            }
            Some((name, _)) => (name.trim(), default_case.clone()),
            None => (item.trim(), default_case.clone()),
        };

        if name.is_empty() {
            return None;
        }

        Some(Self::new(name, case))
    }
}

/// @ai:intent Parse a comma-separated list such as `json:camel,xml`
/// @ai:post empty items are ignored; order is preserved
/// @ai:effects pure
pub fn parse_list(list: &str, default_case: &CasePolicy) -> Vec<TagRequest> {
    list.split(',')
        .filter_map(|item| TagRequest::parse(item, default_case))
        .collect()
}
