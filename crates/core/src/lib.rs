#![warn(clippy::all, missing_docs)]

//! Core domain logic for the gamenight picker.
//!
//! This crate hosts the game catalog, TSV import/export, library
//! persistence, configuration handling, and the weighted recommendation
//! engine used by the terminal UI and any future frontends.

pub mod catalog;
pub mod config;
pub mod library;
pub mod models;
pub mod recommend;
pub mod tsv;

pub use catalog::{Catalog, CatalogError, FieldValue};
pub use config::AppConfig;
pub use library::LibraryStore;
pub use models::{GameRecord, PreferenceSet, Suggestion};
pub use recommend::{recommend, recommend_today, RecommendError, RecommendRequest};
