use serde::{Deserialize, Serialize};

use super::WorkflowStage;

/// Parent record ("processo") owning an ordered list of workflow stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub number: Option<String>,
    pub subject: Option<String>,
    pub stages: Vec<WorkflowStage>,
}

impl Case {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: None,
            subject: None,
            stages: Vec::new(),
        }
    }

    /// Human-facing reference: the case number when present, else the id
    pub fn display_ref(&self) -> &str {
        self.number.as_deref().unwrap_or(&self.id)
    }
}
