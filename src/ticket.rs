//! Ticket payloads that carry a solution string.
//!
//! The helpdesk backend returns solutions inside several record shapes: the
//! response to a new ticket, the stored record of a resolved ticket, the
//! admin dashboard listing entry and the escalation request. [`SolutionRecord`] reads any of them and keeps
//! only what the formatter and its callers need.

use serde::Deserialize;

use crate::block::Block;
use crate::config::FormatterConfig;
use crate::error::Result;
use crate::formatter;

/// Where the backend got the solution from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    #[default]
    Ai,
    AiRegenerated,
    Database,
    Fallback,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolutionRecord {
    #[serde(default, alias = "id")]
    pub ticket_id: Option<String>,
    #[serde(
        default,
        alias = "ai_generated_solution",
        alias = "solution_used",
        alias = "resolution",
        alias = "attempted_solution"
    )]
    pub solution: Option<String>,
    #[serde(default, alias = "response_source")]
    pub source: ResponseSource,
    /// Ticket the solution was copied from, for database matches.
    #[serde(default)]
    pub source_ticket_id: Option<String>,
}

impl SolutionRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Format the record's solution; a missing solution yields no blocks.
    pub fn blocks(&self) -> Vec<Block> {
        self.blocks_with_config(&FormatterConfig::default())
    }

    pub fn blocks_with_config(&self, config: &FormatterConfig) -> Vec<Block> {
        match self.solution.as_deref() {
            Some(solution) => formatter::format_with_config(solution, config),
            None => Vec::new(),
        }
    }

    /// One-line description of where the solution came from.
    pub fn caption(&self) -> String {
        match (self.source, self.source_ticket_id.as_deref()) {
            (ResponseSource::Database, Some(id)) => format!("Solution from resolved ticket {id}"),
            (ResponseSource::Database, None) => "Solution from a resolved ticket".to_string(),
            (ResponseSource::Ai, _) => "AI-generated solution".to_string(),
            (ResponseSource::AiRegenerated, _) => "Regenerated AI solution".to_string(),
            (ResponseSource::Fallback, _) => "General troubleshooting steps".to_string(),
            (ResponseSource::Unknown, _) => "Suggested solution".to_string(),
        }
    }
}
