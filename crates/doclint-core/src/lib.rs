//! # doclint-core
//!
//! Core framework for comment and Javadoc linting over a typed syntax tree.
//!
//! This crate provides the foundational traits and types for building
//! documentation linters. It includes:
//!
//! - [`Rule`] trait for per-file rules over a [`CompilationUnit`]
//! - [`Frontend`] trait for language adapters that build the tree
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//! - [`CommentIndex`] and [`Scope`] helpers shared by the Javadoc rules
//!
//! ## Example
//!
//! ```ignore
//! use doclint_core::Analyzer;
//! use doclint_java::JavaFrontend;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .frontend(JavaFrontend::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{} violation(s)", result.violations.len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod comments;
mod config;
mod context;
mod frontend;
mod rule;
mod scope;
mod types;

/// Typed syntax tree produced by front-ends.
pub mod tree;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use comments::CommentIndex;
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use frontend::{Frontend, FrontendBox, FrontendError};
pub use rule::{Rule, RuleBox, RuleError};
pub use scope::{Scope, ScopeFilter};
pub use tree::CompilationUnit;
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
