//! Natural-language query assistant.
//!
//! Turns a question about the graph into a suggested Cypher query plus a
//! short explanation. Only a canned implementation exists until a language
//! model backend is wired up.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

/// Query the assistant returns when nothing else matches.
pub const DEFAULT_SUGGESTION: &str = "MATCH p = (:AS {asn:2497})--(:Name) RETURN p";

const DEFAULT_EXPLANATION: &str = "Based on the given results, the name of AS2497 is 'IIJ'.";

/// A suggested query with an explanation of its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub cypher: String,
    pub explanation: String,
}

impl Suggestion {
    pub fn new(cypher: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            explanation: explanation.into(),
        }
    }
}

/// Trait for services that translate questions into Cypher.
#[async_trait]
pub trait QueryAssistant: Send + Sync {
    async fn suggest(&self, question: &str) -> Result<Suggestion>;
}

/// Assistant that returns canned suggestions based on question patterns.
#[derive(Debug, Clone, Default)]
pub struct StaticAssistant {
    /// Custom mappings (pattern -> suggestion).
    custom: Vec<(String, Suggestion)>,
}

impl StaticAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the question contains `pattern`, answer with `suggestion`.
    pub fn with_suggestion(mut self, pattern: impl Into<String>, suggestion: Suggestion) -> Self {
        self.custom.push((pattern.into(), suggestion));
        self
    }
}

#[async_trait]
impl QueryAssistant for StaticAssistant {
    async fn suggest(&self, question: &str) -> Result<Suggestion> {
        if question.trim().is_empty() {
            return Err(ExplorerError::query("Question is empty"));
        }

        let question_lower = question.to_lowercase();
        let suggestion = self
            .custom
            .iter()
            .find(|(pattern, _)| question_lower.contains(&pattern.to_lowercase()))
            .map(|(_, suggestion)| suggestion.clone())
            .unwrap_or_else(|| Suggestion::new(DEFAULT_SUGGESTION, DEFAULT_EXPLANATION));

        Ok(suggestion)
    }
}
