//! Chat message model
//!
//! A [`MessageNode`] holds every regenerated variant of one message and
//! which one is on screen. Obfuscation only ever rewrites the text parts of
//! the selected variant and hands back a fresh node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::error::{ObfuscationError, Result};
use crate::obfuscation::ObfuscationType;
use crate::random::RandomSource;
use crate::transformers;

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// One piece of message content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    Text {
        text: String,
    },
    Image {
        url: String,
    },
    Document {
        url: String,
        file_name: String,
        mime: String,
    },
    Reasoning {
        reasoning: String,
    },
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A single message as shown in the chat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
    pub created_at: DateTime<Utc>,
}

impl UiMessage {
    /// Create a new message
    pub fn new(role: MessageRole, parts: Vec<MessagePart>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            parts,
            created_at: Utc::now(),
        }
    }

    /// Create a message with a single text part
    pub fn text(role: MessageRole, text: impl Into<String>) -> Self {
        Self::new(role, vec![MessagePart::text(text)])
    }

    /// Text parts joined by newlines
    pub fn to_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any text part hides zero-width or other invisible characters
    pub fn has_invisible_chars(&self) -> bool {
        transformers::contains_invisible_chars(&self.to_text())
    }

    /// NFC-normalize every text part in place
    pub fn normalize_text(&mut self) {
        for part in &mut self.parts {
            if let MessagePart::Text { text } = part {
                *text = text.nfc().collect();
            }
        }
    }
}

/// Node after obfuscation, plus offsets to highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationResult {
    pub node: MessageNode,
    pub changed_indices: Vec<usize>,
}

/// All variants of one message and the one currently selected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageNode {
    pub id: Uuid,
    pub messages: Vec<UiMessage>,
    pub select_index: usize,
}

impl MessageNode {
    /// Create a node holding a single message
    pub fn new(message: UiMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![message],
            select_index: 0,
        }
    }

    /// The variant on screen
    pub fn current_message(&self) -> Option<&UiMessage> {
        self.messages.get(self.select_index)
    }

    /// NFC-normalize the text of every variant
    pub fn normalize_text(&mut self) {
        self.messages.iter_mut().for_each(UiMessage::normalize_text);
    }

    /// Obfuscate the text of the selected variant
    ///
    /// Non-text parts and the other variants are carried over untouched. When
    /// the variant has several text parts, only the offsets of the last one
    /// are returned.
    pub fn obfuscate(
        &self,
        mode: ObfuscationType,
        rng: &mut impl RandomSource,
    ) -> Result<ObfuscationResult> {
        let current = self
            .current_message()
            .ok_or(ObfuscationError::SelectionOutOfRange {
                index: self.select_index,
                len: self.messages.len(),
            })?;

        let mut changed_indices = Vec::new();
        let parts: Vec<MessagePart> = current
            .parts
            .iter()
            .map(|part| match part {
                MessagePart::Text { text } => {
                    let outcome = mode.apply(text, rng);
                    if mode == ObfuscationType::Homoglyphs {
                        changed_indices = outcome.changed_indices;
                    }
                    MessagePart::Text { text: outcome.text }
                }
                other => other.clone(),
            })
            .collect();

        let mut messages = self.messages.clone();
        messages[self.select_index] = UiMessage {
            parts,
            ..current.clone()
        };

        debug!(
            "Obfuscated node {} variant {} with {}",
            self.id, self.select_index, mode
        );

        Ok(ObfuscationResult {
            node: MessageNode {
                messages,
                ..self.clone()
            },
            changed_indices,
        })
    }
}

/// An ordered chat of message nodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    pub id: Uuid,
    pub title: String,
    pub message_nodes: Vec<MessageNode>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message_nodes: Vec::new(),
        }
    }

    /// NFC-normalize the text of every node
    pub fn normalize_text(&mut self) {
        self.message_nodes.iter_mut().for_each(MessageNode::normalize_text);
    }

    /// Obfuscate the selected variant of every node
    ///
    /// Offsets are dropped; bulk application is not highlighted.
    pub fn obfuscate_all(
        &self,
        mode: ObfuscationType,
        rng: &mut impl RandomSource,
    ) -> Result<Conversation> {
        let message_nodes = self
            .message_nodes
            .iter()
            .map(|node| node.obfuscate(mode, rng).map(|result| result.node))
            .collect::<Result<Vec<_>>>()?;

        Ok(Conversation {
            message_nodes,
            ..self.clone()
        })
    }
}
