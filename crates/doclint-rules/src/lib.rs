//! # doclint-rules
//!
//! Built-in comment and Javadoc rules for doclint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `internal-comments` | Restricts comment placement and format by lexical context |
//! | DL002 | `javadoc-method` | Checks method and constructor comments against their signatures |
//! | DL003 | `javadoc-type` | Checks type comments, authorship and type parameters |
//!
//! ## Usage
//!
//! ```ignore
//! use doclint_core::Analyzer;
//! use doclint_java::JavaFrontend;
//! use doclint_rules::{JavadocMethod, JavadocType};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .frontend(JavaFrontend::new())
//!     .rule(JavadocMethod::new().allow_narrative_param_tags(true))
//!     .rule(JavadocType::new().require_author(true))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod class_resolver;
pub mod comment_format;
mod internal_comments;
mod javadoc_method;
pub mod javadoc_tags;
mod javadoc_type;
pub mod messages;
mod presets;
pub mod regions;

pub use internal_comments::InternalComments;
pub use javadoc_method::{JavadocMethod, JavadocMethodConfig};
pub use javadoc_type::{JavadocType, TagRequirement};
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_from_config, rules_from_config,
    strict_rules, Preset,
};

/// Re-export core types for convenience.
pub use doclint_core::{Rule, Severity, Violation};
