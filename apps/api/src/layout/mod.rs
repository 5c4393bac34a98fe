// Document layout engine: markdown-style classification, inline bold spans,
// greedy word-wrap, and A4 pagination. One synchronous forward pass; callers
// run it inside tokio::task::spawn_blocking.

pub mod classifier;
pub mod engine;
pub mod font_metrics;
pub mod spans;
pub mod wrap;

// Re-export the public API consumed by other modules (export, handlers).
pub use engine::{default_doc_style, layout_document, DocStyle, LaidOutDocument};
