//! @ai:module:intent Decide the final tag of a single struct field
//! @ai:module:layer domain
//! @ai:module:public_api FieldContext, Rewrite, Synthesis, Warning, synthesize, is_exported
//! @ai:module:depends_on case, tag, request, rules
//! @ai:module:stateless true

use crate::case::{convert, CasePolicy};
use crate::request::TagRequest;
use crate::rules::{lookup, type_hint, ValueRule};
use crate::tag::TagSet;
use std::fmt;

/// @ai:intent What the engine sees of one field
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// None for embedded fields
    pub identifier: Option<&'a str>,
    /// Tag literal including its delimiters, if the field has one
    pub current_tag: Option<&'a str>,
    pub type_description: &'a str,
}

/// @ai:intent Action the caller applies to the field's tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Leave the field exactly as written
    Skip,
    /// The field ends up with no tag
    Remove,
    /// The field's tag becomes this literal
    Replace(String),
}

/// @ai:intent Non-fatal problem noticed while synthesizing a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnknownCase {
        tag: String,
        case: String,
        field: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownCase { tag, case, field } => write!(
                f,
                "unknown case `{case}` for tag `{tag}` on field `{field}`, value left empty"
            ),
        }
    }
}

/// @ai:intent Engine output for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub rewrite: Rewrite,
    pub warnings: Vec<Warning>,
}

impl Synthesis {
    fn quiet(rewrite: Rewrite) -> Self {
        Self {
            rewrite,
            warnings: Vec::new(),
        }
    }
}

/// @ai:intent Check whether a Go identifier is exported
/// @ai:example ("Name") -> true
/// @ai:example ("name") -> false
/// @ai:example ("_x") -> false
/// @ai:effects pure
pub fn is_exported(identifier: &str) -> bool {
    identifier.chars().next().is_some_and(char::is_uppercase)
}

/// @ai:intent Compute the new tag of a field from the requested tags
/// @ai:pre requests are in the order the caller wants new entries appended
/// @ai:post existing entries for requested keys are never changed
/// @ai:post unexported and embedded fields are always Skip
/// @ai:idempotent true
/// @ai:effects pure
pub fn synthesize(field: &FieldContext<'_>, requests: &[TagRequest], remove: bool) -> Synthesis {
    let identifier = match field.identifier {
        Some(id) if is_exported(id) => id,
        _ => return Synthesis::quiet(Rewrite::Skip),
    };

    if remove {
        return Synthesis::quiet(Rewrite::Remove);
    }

    let mut set = TagSet::parse(field.current_tag.unwrap_or(""));
    let mut warnings = Vec::new();

    for request in requests {
        if set.find_value(&request.name).is_some() {
            continue;
        }

        let value = match lookup(&request.name).unwrap_or(ValueRule::Identifier) {
            ValueRule::TypeHint => type_hint(field.type_description).to_string(),
            ValueRule::Identifier => {
                convert(identifier, &request.case).unwrap_or_else(|| {
                    if let CasePolicy::Unknown(case) = &request.case {
                        warnings.push(Warning::UnknownCase {
                            tag: request.name.clone(),
                            case: case.clone(),
                            field: identifier.to_string(),
                        });
                    }
                    String::new()
                })
            }
        };

        set.push(request.name.as_str(), value);
    }

    let rewrite = match set.serialize() {
        Some(raw) => Rewrite::Replace(raw),
        None => Rewrite::Remove,
    };

    Synthesis { rewrite, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TYPE_HINT_TAG;

    fn field<'a>(identifier: &'a str, current_tag: Option<&'a str>) -> FieldContext<'a> {
        FieldContext {
            identifier: Some(identifier),
            current_tag,
            type_description: "string",
        }
    }

    fn replace(raw: &str) -> Rewrite {
        Rewrite::Replace(raw.to_string())
    }

    #[test]
    fn test_new_snake_tag() {
        let requests = [TagRequest::new("json", CasePolicy::Snake)];
        let out = synthesize(&field("TestField2", None), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`json:"test_field2"`"#));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_new_camel_tag() {
        let requests = [TagRequest::new("json", CasePolicy::Camel)];
        let out = synthesize(&field("TestField2", None), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`json:"testField2"`"#));
    }

    #[test]
    fn test_existing_value_wins() {
        let requests = [TagRequest::new("json", CasePolicy::Snake)];
        let current = r#"`custom:"" json:"etag"`"#;
        let out = synthesize(&field("ExistingTag", Some(current)), &requests, false);
        assert_eq!(out.rewrite, replace(current));
    }

    #[test]
    fn test_new_entries_are_appended_in_request_order() {
        let requests = [
            TagRequest::new("json", CasePolicy::Snake),
            TagRequest::new("xml", CasePolicy::Snake),
        ];
        let current = r#"`custom:"" json:"etag"`"#;
        let out = synthesize(&field("ExistingTag", Some(current)), &requests, false);
        assert_eq!(
            out.rewrite,
            replace(r#"`custom:"" json:"etag" xml:"existing_tag"`"#)
        );
    }

    #[test]
    fn test_excluded_sentinel_is_kept() {
        let requests = [TagRequest::new("json", CasePolicy::Snake)];
        let out = synthesize(&field("Field1", Some(r#"`json:"-"`"#)), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`json:"-"`"#));
    }

    #[test]
    fn test_remove_strips_exported_field() {
        let requests = [TagRequest::new("json", CasePolicy::Snake)];
        let out = synthesize(&field("Name", Some(r#"`json:"name"`"#)), &requests, true);
        assert_eq!(out.rewrite, Rewrite::Remove);
    }

    #[test]
    fn test_unexported_and_embedded_are_skipped() {
        let requests = [TagRequest::new("json", CasePolicy::Snake)];
        let unexported = field("name", Some(r#"`json:"n"`"#));
        assert_eq!(synthesize(&unexported, &requests, false).rewrite, Rewrite::Skip);
        assert_eq!(synthesize(&unexported, &requests, true).rewrite, Rewrite::Skip);

        let embedded = FieldContext {
            identifier: None,
            current_tag: None,
            type_description: "Base",
        };
        assert_eq!(synthesize(&embedded, &requests, false).rewrite, Rewrite::Skip);
        assert_eq!(synthesize(&embedded, &requests, true).rewrite, Rewrite::Skip);
    }

    #[test]
    fn test_no_requests_normalizes_existing_tag() {
        let out = synthesize(&field("Name", Some("`json:\"n\"   odd`")), &[], false);
        assert_eq!(out.rewrite, replace(r#"`json:"n" odd`"#));

        let out = synthesize(&field("Name", None), &[], false);
        assert_eq!(out.rewrite, Rewrite::Remove);
    }

    #[test]
    fn test_synthesize_is_idempotent() {
        let requests = [
            TagRequest::new("json", CasePolicy::Camel),
            TagRequest::new("db", CasePolicy::Snake),
        ];
        let first = synthesize(&field("UserID", Some("`validate:\"required\"`")), &requests, false);
        let Rewrite::Replace(raw) = &first.rewrite else {
            panic!("expected a tag, got {:?}", first.rewrite);
        };
        let second = synthesize(&field("UserID", Some(raw.as_str())), &requests, false);
        assert_eq!(second.rewrite, first.rewrite);
        assert_eq!(
            first.rewrite,
            replace(r#"`validate:"required" json:"userID" db:"user_id"`"#)
        );
    }

    #[test]
    fn test_type_hint_tag() {
        let requests = [TagRequest::new(TYPE_HINT_TAG, CasePolicy::Snake)];
        let ctx = FieldContext {
            identifier: Some("CreatedAt"),
            current_tag: None,
            type_description: "time.Time",
        };
        let out = synthesize(&ctx, &requests, false);
        assert_eq!(out.rewrite, replace(r#"`swaggertype:"number"`"#));
    }

    #[test]
    fn test_unrecognized_name_uses_identifier() {
        let requests = [TagRequest::new("graphql", CasePolicy::Camel)];
        let out = synthesize(&field("UserID", None), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`graphql:"userID"`"#));
    }

    #[test]
    fn test_unknown_case_warns_and_leaves_value_empty() {
        let requests = [
            TagRequest::new("json", CasePolicy::Unknown("kebab".to_string())),
            TagRequest::new("xml", CasePolicy::Snake),
        ];
        let out = synthesize(&field("UserID", None), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`json:"" xml:"user_id"`"#));
        assert_eq!(
            out.warnings,
            vec![Warning::UnknownCase {
                tag: "json".to_string(),
                case: "kebab".to_string(),
                field: "UserID".to_string(),
            }]
        );
    }

    #[test]
    fn test_quoted_tag_keeps_delimiter() {
        let requests = [TagRequest::new("xml", CasePolicy::Snake)];
        let out = synthesize(&field("UserID", Some(r#""json:\"id\"""#)), &requests, false);
        assert_eq!(out.rewrite, replace(r#""json:\"id\" xml:\"user_id\"""#));
    }

    #[test]
    fn test_appending_after_opaque_tokens() {
        let requests = [TagRequest::new("xml", CasePolicy::Snake)];
        let out = synthesize(&field("UserID", Some(r#"`weird json:"a" odd`"#)), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`weird json:"a" odd xml:"user_id"`"#));
    }

    #[test]
    fn test_repeated_request_adds_key_once() {
        let requests = [
            TagRequest::new("xml", CasePolicy::Snake),
            TagRequest::new("xml", CasePolicy::Camel),
        ];
        let out = synthesize(&field("UserID", Some(r#"`weird json:"a" odd`"#)), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`weird json:"a" odd xml:"user_id"`"#));

        let requests = [
            TagRequest::new("json", CasePolicy::Snake),
            TagRequest::new("json", CasePolicy::Snake),
        ];
        let out = synthesize(&field("UserID", None), &requests, false);
        assert_eq!(out.rewrite, replace(r#"`json:"user_id"`"#));
    }
}
