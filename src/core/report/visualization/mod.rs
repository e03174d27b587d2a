//! Visualization generation for curriculum boards
//!
//! Provides the Mermaid generator used by the Markdown report.

pub mod mermaid;

pub use mermaid::MermaidGenerator;
