//! # doclint-java
//!
//! Tree-sitter based Java front-end for doclint.
//!
//! [`JavaFrontend`] parses Java source with `tree-sitter-java` and lowers the
//! concrete syntax tree into the typed [`CompilationUnit`] the doclint rules
//! consume: type declarations and their members, method signatures, body
//! line structure, and every comment of the file.
//!
//! [`CompilationUnit`]: doclint_core::CompilationUnit

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frontend;
mod lower;

pub use frontend::JavaFrontend;
