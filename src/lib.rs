//! Glyphveil - Chat Message Obfuscation
//!
//! Reversible text transforms for chat messages: ISO 9 transliteration,
//! homoglyph substitution and zero-width marker insertion. Applying a
//! transform a second time undoes it.

pub mod config;
pub mod error;
pub mod message;
pub mod obfuscation;
pub mod random;
pub mod tables;
pub mod transformers;

pub use config::Config;
pub use error::ObfuscationError;
pub use message::{Conversation, MessageNode, MessagePart, MessageRole, ObfuscationResult, UiMessage};
pub use obfuscation::{ObfuscationOutcome, ObfuscationType};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
