//! @ai:module:intent Locate struct types and their field declarations in Go source
//! @ai:module:layer application
//! @ai:module:public_api parse_source, Node, StructType, Field, TagLiteral
//! @ai:module:depends_on lexer, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::lexer::{tokenize, Token, TokenKind};
use std::collections::HashMap;
use std::ops::Range;

const DECL_KEYWORDS: &[&str] = &["package", "import", "func", "var", "const", "type"];
const NOT_A_NAME: &[&str] = &["chan", "map", "func", "interface", "type", "var", "return"];

/// @ai:intent A declaration or type found while walking a source file
#[derive(Debug, Clone)]
pub enum Node {
    Struct(StructType),
    Other { keyword: String, line: usize },
}

/// @ai:intent A `struct { ... }` type literal with its fields
#[derive(Debug, Clone)]
pub struct StructType {
    /// Declared name, or the field/variable the literal is attached to
    pub name: Option<String>,
    pub line: usize,
    /// Number of struct bodies enclosing this one
    pub depth: usize,
    pub fields: Vec<Field>,
}

/// @ai:intent One field declaration line inside a struct body
#[derive(Debug, Clone)]
pub struct Field {
    /// Empty for embedded fields
    pub names: Vec<String>,
    pub type_text: String,
    /// Byte offset right after the declared type
    pub type_end: usize,
    pub tag: Option<TagLiteral>,
    pub line: usize,
}

/// @ai:intent A tag string literal and its position in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLiteral {
    pub text: String,
    pub span: Range<usize>,
}

impl Field {
    /// @ai:intent The identifier the tag is derived from; Go reuses one tag for all names
    pub fn identifier(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// @ai:intent Parse Go source into top-level declarations and struct types, in source order
/// @ai:pre src is Go source text
/// @ai:post every struct type literal in the file appears as Node::Struct, nested ones included
/// @ai:edge_cases unbalanced braces are reported as Error::Syntax
/// @ai:effects pure
pub fn parse_source(src: &str) -> Result<Vec<Node>> {
    let tokens: Vec<Token> = tokenize(src)?
        .into_iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .collect();
    let closing = match_braces(&tokens)?;

    let mut nodes = Vec::new();
    let mut open_bodies: Vec<usize> = Vec::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        while open_bodies.last().is_some_and(|&close| close < i) {
            open_bodies.pop();
        }

        match token.kind {
            TokenKind::Punct('{') => brace_depth += 1,
            TokenKind::Punct('}') => brace_depth = brace_depth.saturating_sub(1),
            TokenKind::Punct('(') => paren_depth += 1,
            TokenKind::Punct(')') => paren_depth = paren_depth.saturating_sub(1),
            TokenKind::Ident => {
                let word = token.text(src);

                if word == "struct" {
                    let Some(open) = next_significant(&tokens, i + 1) else {
                        continue;
                    };
                    if !tokens[open].is_punct('{') {
                        continue;
                    }
                    let close = closing[&open];

                    nodes.push(Node::Struct(StructType {
                        name: struct_name(&tokens, i, src),
                        line: token.line,
                        depth: open_bodies.len(),
                        fields: parse_fields(&tokens[open + 1..close], src),
                    }));
                    open_bodies.push(close);
                } else if brace_depth == 0
                    && paren_depth == 0
                    && DECL_KEYWORDS.contains(&word)
                    && !declares_struct(&tokens, i, src)
                {
                    nodes.push(Node::Other {
                        keyword: word.to_string(),
                        line: token.line,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(nodes)
}

fn match_braces(tokens: &[Token]) -> Result<HashMap<usize, usize>> {
    let mut closing = HashMap::new();
    let mut stack: Vec<usize> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if token.is_punct('{') {
            stack.push(i);
        } else if token.is_punct('}') {
            let open = stack.pop().ok_or_else(|| Error::Syntax {
                line: token.line,
                message: "unexpected `}`".to_string(),
            })?;
            closing.insert(open, i);
        }
    }

    match stack.pop() {
        Some(open) => Err(Error::Syntax {
            line: tokens[open].line,
            message: "unclosed `{`".to_string(),
        }),
        None => Ok(closing),
    }
}

fn next_significant(tokens: &[Token], from: usize) -> Option<usize> {
    (from..tokens.len()).find(|&j| tokens[j].kind != TokenKind::Newline)
}

/// `type Name struct {` is a record declaration, not an "other" one.
fn declares_struct(tokens: &[Token], i: usize, src: &str) -> bool {
    tokens[i].text(src) == "type"
        && tokens
            .get(i + 2)
            .is_some_and(|t| t.is_ident(src, "struct"))
}

fn struct_name(tokens: &[Token], struct_idx: usize, src: &str) -> Option<String> {
    let prev = tokens[..struct_idx]
        .iter()
        .rev()
        .find(|t| t.kind != TokenKind::Newline)?;
    let text = prev.text(src);
    (prev.kind == TokenKind::Ident && !NOT_A_NAME.contains(&text)).then(|| text.to_string())
}

/// Splits a struct body into field declarations on newlines and `;` at nesting depth 0.
fn parse_fields(body: &[Token], src: &str) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut group: Vec<&Token> = Vec::new();
    let mut depth = 0usize;

    for token in body {
        match token.kind {
            TokenKind::Punct('{' | '(' | '[') => depth += 1,
            TokenKind::Punct('}' | ')' | ']') => depth = depth.saturating_sub(1),
            TokenKind::Newline | TokenKind::Punct(';') if depth == 0 => {
                if let Some(field) = parse_field(&group, src) {
                    fields.push(field);
                }
                group.clear();
                continue;
            }
            _ => {}
        }
        if token.kind != TokenKind::Newline {
            group.push(token);
        }
    }

    if let Some(field) = parse_field(&group, src) {
        fields.push(field);
    }

    fields
}

fn parse_field(group: &[&Token], src: &str) -> Option<Field> {
    let first = *group.first()?;

    let (decl, tag) = match group.split_last() {
        Some((last, rest)) if last.is_string() && !rest.is_empty() => (
            rest,
            Some(TagLiteral {
                text: last.text(src).to_string(),
                span: last.span.clone(),
            }),
        ),
        _ => (group, None),
    };

    let type_start = field_names_end(decl);
    let names = decl[..type_start]
        .iter()
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.text(src).to_string())
        .collect();

    let type_tokens = &decl[type_start..];
    let start = type_tokens.first()?.span.start;
    let type_end = type_tokens.last()?.span.end;

    Some(Field {
        names,
        type_text: src[start..type_end].to_string(),
        type_end,
        tag,
        line: first.line,
    })
}

/// Index of the first type token; 0 means the field is embedded.
fn field_names_end(decl: &[&Token]) -> usize {
    if decl.len() < 2 || decl[0].kind != TokenKind::Ident {
        return 0;
    }

    match decl[1].kind {
        TokenKind::Punct(',') => {
            let mut i = 0;
            while i + 1 < decl.len()
                && decl[i].kind == TokenKind::Ident
                && decl[i + 1].is_punct(',')
            {
                i += 2;
            }
            i + 1
        }
        TokenKind::Punct('.') => 0,
        // `List[T]` embeds a generic type; `Items [4]int` declares a field.
        TokenKind::Punct('[') => match closing_bracket(decl, 1) {
            Some(close) if close == decl.len() - 1 => 0,
            _ => 1,
        },
        _ => 1,
    }
}

fn closing_bracket(decl: &[&Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in decl.iter().enumerate().skip(open) {
        if token.is_punct('[') {
            depth += 1;
        } else if token.is_punct(']') {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structs(src: &str) -> Vec<StructType> {
        parse_source(src)
            .unwrap()
            .into_iter()
            .filter_map(|node| match node {
                Node::Struct(s) => Some(s),
                Node::Other { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_named_struct_fields() {
        let src = r#"package models

type User struct {
	ID    int    `json:"id"`
	Name  string // display name
	email string
}
"#;
        let found = structs(src);
        assert_eq!(found.len(), 1);
        let user = &found[0];
        assert_eq!(user.name.as_deref(), Some("User"));
        assert_eq!(user.line, 3);
        assert_eq!(user.fields.len(), 3);

        let id = &user.fields[0];
        assert_eq!(id.names, vec!["ID"]);
        assert_eq!(id.type_text, "int");
        assert_eq!(id.tag.as_ref().map(|t| t.text.as_str()), Some(r#"`json:"id"`"#));

        let name = &user.fields[1];
        assert_eq!(name.type_text, "string");
        assert!(name.tag.is_none());
        assert_eq!(&src[..name.type_end].lines().last(), &Some("\tName  string"));
    }

    #[test]
    fn test_embedded_fields() {
        let src = "type T struct {\n\tBase\n\t*pkg.Other `x:\"y\"`\n\tList[int]\n\tItems [4]int\n}\n";
        let fields = &structs(src)[0].fields;
        assert_eq!(fields.len(), 4);
        assert!(fields[0].is_embedded());
        assert!(fields[1].is_embedded());
        assert_eq!(fields[1].type_text, "*pkg.Other");
        assert!(fields[1].tag.is_some());
        assert!(fields[2].is_embedded());
        assert_eq!(fields[3].names, vec!["Items"]);
        assert_eq!(fields[3].type_text, "[4]int");
    }

    #[test]
    fn test_multi_name_field() {
        let src = "type P struct { X, Y float64; Z int }";
        let fields = &structs(src)[0].fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].names, vec!["X", "Y"]);
        assert_eq!(fields[0].identifier(), Some("X"));
        assert_eq!(fields[0].type_text, "float64");
        assert_eq!(fields[1].names, vec!["Z"]);
    }

    #[test]
    fn test_nested_struct_types() {
        let src = r#"type Outer struct {
	Inner struct {
		Value string
	} `json:"inner"`
	Count int
}
"#;
        let found = structs(src);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].depth, 0);
        assert_eq!(found[0].fields.len(), 2);
        assert_eq!(found[0].fields[0].names, vec!["Inner"]);
        assert!(found[0].fields[0].tag.is_some());
        assert_eq!(found[1].name.as_deref(), Some("Inner"));
        assert_eq!(found[1].depth, 1);
        assert_eq!(found[1].fields[0].names, vec!["Value"]);
    }

    #[test]
    fn test_struct_literals_inside_functions() {
        let src = "package main\n\nfunc f() {\n\tx := []struct{ A int }{{1}}\n\t_ = x\n}\n";
        let nodes = parse_source(src).unwrap();
        let keywords: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Other { keyword, .. } => Some(keyword.as_str()),
                Node::Struct(_) => None,
            })
            .collect();
        assert_eq!(keywords, vec!["package", "func"]);

        let found = structs(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, None);
        assert_eq!(found[0].fields[0].names, vec!["A"]);
    }

    #[test]
    fn test_comment_with_brace_is_ignored() {
        let src = "type T struct {\n\t// not a { brace\n\tA int\n}\n";
        assert_eq!(structs(src)[0].fields.len(), 1);
    }

    #[test]
    fn test_unbalanced_braces() {
        let err = parse_source("type T struct {\n\tA int\n").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 1, .. }));
    }
}
