//! Highlighter - automatic highlight reels for timed podcast transcripts
//!
//! Sentences are ranked by how much of the transcript's key-phrase mass
//! they cover, aligned back onto the word timing table, and taken greedily
//! until the requested reel duration is reached.

pub mod alignment;
pub mod cli;
pub mod config;
pub mod error;
pub mod highlighter;
pub mod oracle;
pub mod ranking;
pub mod selection;
pub mod store;
pub mod tokenize;
pub mod transcript;
pub mod types;

pub use config::HighlightConfig;
pub use error::{AlignmentError, HighlightError, OracleError, Result};
pub use highlighter::Highlighter;
pub use types::{Clip, FileHighlights, TranscriptHighlights};
