//! # lua-lint-core
//!
//! Core framework for Lua style linting.
//!
//! This crate owns the statement-tree contract and the rule-evaluation
//! engine. It includes:
//!
//! - [`ast`] — the statement/expression tree produced by a parser front-end
//! - [`Rule`] trait for pluggable naming/usage policies
//! - [`Linter`] for recursive traversal and finding aggregation
//! - [`Finding`] / [`FindingSet`] for representing lint results
//!
//! The core never reads source text, writes to a terminal, or decides exit
//! codes; parsing and reporting live in the `lua-lint-parser` and
//! `lua-lint-cli` crates.
//!
//! ## Example
//!
//! ```ignore
//! use lua_lint_core::Linter;
//! use lua_lint_rules::default_rules;
//!
//! let linter = Linter::builder().rules(default_rules()).build();
//! let findings = linter.lint(&block)?;
//! if findings.is_empty() {
//!     println!("clean");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod config;
mod linter;
mod rule;
mod types;

/// Whitelist matching shared by rules with exemption support.
pub mod whitelist;

pub use ast::{Block, Expr, Stmt, TableField};
pub use config::{Config, ConfigError, FilesConfig, RuleConfig};
pub use linter::{LintError, Linter, LinterBuilder};
pub use rule::{Rule, RuleBox};
pub use types::{Finding, FindingDiagnostic, FindingSet, LintResult, Severity};
