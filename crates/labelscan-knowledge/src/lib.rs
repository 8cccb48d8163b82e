//! # labelscan-knowledge
//!
//! The static ingredient knowledge base and the normalizer that turns label
//! text into lookup keys.
//!
//! ## Overview
//!
//! [`KnowledgeBase`] is loaded once, from the bundled TOML document or from
//! an operator-supplied file, validated and then treated as immutable for
//! the rest of the process. It is passed explicitly to the scoring engine;
//! there is no global registry.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use labelscan_knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::bundled()?;
//! assert_eq!(kb.normalize("Sea Salt").as_deref(), Some("salt"));
//! ```

pub mod base;
pub mod document;
pub mod normalize;

pub use base::KnowledgeBase;
pub use document::KnowledgeDocument;

// ── Tests ─────────────────────────────────────────────────────────────────────
