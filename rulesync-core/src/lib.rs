// Rulesync Core Library
//
// Extracts a rules section from a YAML config document, converts it to
// Markdown, and renders it into destination files behind fixed headers.

pub mod types;
pub mod error;
pub mod extractor;
pub mod converter;
pub mod headings;
pub mod render;
pub mod config;
pub mod storage;
pub mod report;
pub mod processor;

// Re-export main types and functions for easy use
pub use types::*;
pub use config::{DestinationConfig, SyncConfig};
pub use converter::convert_rules;
pub use error::SyncError;
pub use extractor::extract_section;
pub use headings::{demote_headings, HEADING_DEMOTION_STEP};
pub use processor::{ResolvedDestination, ResolvedPaths, SyncProcessor};
pub use render::render_document;
pub use storage::{content_hash, DestinationWriter, DryRunWriter, FileWriter};
