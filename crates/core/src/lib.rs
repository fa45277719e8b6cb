//! Core library for blogtools
//!
//! This crate implements the **Functional Core** of the blogtools
//! application, following the Functional Core - Imperative Shell pattern.
//!
//! # Architecture Overview
//!
//! The blogtools project uses a two-crate architecture to enforce
//! separation of concerns:
//!
//! - **`blogtools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`blogtools`**: HTTP, CLI, and output (the Imperative Shell)
//!
//! All functions here are pure: same input, same output, no side effects.
//! They can be tested with simple fixture data, no mocking required, and
//! they stay ignorant of where article data comes from or where the
//! rendered output goes.
//!
//! # Module Organization
//!
//! - [`article`]: Domain models for API payloads and the list/detail
//!   output transforms, including pagination
//! - [`query`]: The client-side search/sort pipeline
//! - [`tag`]: The fixed category enumeration used for server-side filtering
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use blogtools_core::article::{transform_articles, Article};
//! use blogtools_core::query::{apply_query, SortKey};
//!
//! // Fixture data (no HTTP required)
//! let articles: Vec<Article> = fetch_somehow();
//!
//! let sorted = apply_query(articles, Some("rust"), SortKey::Newest);
//! let total = sorted.len();
//! let output = transform_articles(sorted, "newest".to_string(), None, 1, 10, total);
//! assert_eq!(output.pagination.current_page, 1);
//! ```

pub mod article;
pub mod query;
pub mod tag;
