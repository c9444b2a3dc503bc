//! Markdown renderer for unreleased-log.
//!
//! Turns a merged note tree into nested Markdown: named sections and lists
//! become headings, leaves become bullets.

pub mod document;
pub mod markdown;

pub use document::RenderedDocument;
pub use markdown::{render, render_at, CATEGORY_DEPTH, ROOT_DEPTH};
