//! @ai:module:intent Generate and update struct field tags in Go source files
//! @ai:module:layer infrastructure
//! @ai:module:public_api case, tag, request, rules, engine, parser, rewriter, walk, config, output, report, error
//! @ai:module:stateless true
//!
//! # easytags
//!
//! Adds serialization tags such as `json:"user_id"` to every exported field of every
//! struct in a Go file. Existing entries are never overwritten, unrelated entries are
//! kept in place and new ones are appended in the order they were requested.
//!
//! ## Example
//!
//! ```rust
//! use easytags::{rewrite_source, CasePolicy, RewriteOptions, TagRequest};
//!
//! let src = "type User struct {\n\tUserID int\n}\n";
//! let options = RewriteOptions {
//!     requests: vec![TagRequest::new("json", CasePolicy::Camel)],
//!     ..Default::default()
//! };
//! let out = rewrite_source(src, &options).unwrap();
//! assert_eq!(out.source, "type User struct {\n\tUserID int `json:\"userID\"`\n}\n");
//! ```

pub mod case;
pub mod config;
pub mod engine;
pub mod error;
pub mod gofmt;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod report;
pub mod request;
pub mod rewriter;
pub mod rules;
pub mod tag;
pub mod walk;

pub use case::{convert, to_camel, to_snake, CasePolicy};
pub use config::Config;
pub use engine::{synthesize, FieldContext, Rewrite, Synthesis, Warning};
pub use error::{Error, Result};
pub use output::{format_run_report, OutputFormat};
pub use report::{ChangeKind, FieldChange, FileReport, RunReport};
pub use request::{parse_list, TagRequest};
pub use rewriter::{rewrite_file, rewrite_files, rewrite_source, RewriteOptions, Rewritten};
pub use tag::{Delimiter, TagEntry, TagSet};
pub use walk::resolve_paths;
