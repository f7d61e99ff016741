//! Per-locale storage of messages and terms.

use std::collections::HashMap;

use crate::ast::{Message, Term};

/// The messages and terms belonging to one locale. Messages and terms
/// live in separate namespaces, so a term may share its base id with a
/// message.
#[derive(Debug, Clone, Default)]
pub struct FluentBundle {
    messages: HashMap<String, Message>,
    terms: HashMap<String, Term>,
}

impl FluentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a message; a later insert with the same id overwrites.
    pub fn add_message(&mut self, message: Message) {
        self.messages.insert(message.id.clone(), message);
    }

    /// Inserts a term; a later insert with the same id overwrites.
    pub fn add_term(&mut self, term: Term) {
        self.terms.insert(term.id.clone(), term);
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.terms.is_empty()
    }
}
