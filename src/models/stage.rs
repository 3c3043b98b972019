use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Workflow stage status as decoded from the backend
///
/// - Active: not yet done, still on the original timeline
/// - Extended: not yet done, deadline was rescheduled
/// - Completed: done (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    Active,
    Extended,
    Completed,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Active => "ACTIVE",
            StageStatus::Extended => "EXTENDED",
            StageStatus::Completed => "COMPLETED",
        }
    }

    /// Parse a backend status string (case-insensitive, Portuguese aliases accepted)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" | "EM_ANDAMENTO" | "ANDAMENTO" => Some(StageStatus::Active),
            "EXTENDED" | "PRORROGADO" => Some(StageStatus::Extended),
            "COMPLETED" | "CONCLUIDO" | "CONCLUÍDO" => Some(StageStatus::Completed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// One hop of a case's routing through organizational units ("andamento")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStage {
    pub id: String,
    pub deadline: NaiveDateTime,
    pub extended_deadline: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub status: StageStatus,
    pub created_at: NaiveDateTime,
    pub unit: Option<String>,
    pub description: Option<String>,
}

impl WorkflowStage {
    /// Create an active stage due at midnight of `deadline`, created at the same instant
    pub fn new(id: impl Into<String>, deadline: NaiveDate) -> Self {
        let deadline = deadline.and_time(chrono::NaiveTime::MIN);
        Self {
            id: id.into(),
            deadline,
            extended_deadline: None,
            completed_at: None,
            status: StageStatus::Active,
            created_at: deadline,
            unit: None,
            description: None,
        }
    }

    /// Extended deadline when one was set, otherwise the original deadline
    pub fn effective_deadline(&self) -> NaiveDateTime {
        self.extended_deadline.unwrap_or(self.deadline)
    }

    /// Signed whole days from `today` until the effective deadline
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        crate::deadline::days_remaining(self.deadline, self.extended_deadline, today)
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stage_status_conversion() {
        assert_eq!(StageStatus::Active.as_str(), "ACTIVE");
        assert_eq!(StageStatus::from_str("ACTIVE"), Some(StageStatus::Active));
        assert_eq!(StageStatus::from_str("extended"), Some(StageStatus::Extended));
        assert_eq!(StageStatus::from_str(" Completed "), Some(StageStatus::Completed));
        assert_eq!(StageStatus::from_str("prorrogado"), Some(StageStatus::Extended));
        assert_eq!(StageStatus::from_str("CONCLUIDO"), Some(StageStatus::Completed));
        assert_eq!(StageStatus::from_str("EM_ANDAMENTO"), Some(StageStatus::Active));
        assert_eq!(StageStatus::from_str("archived"), None);
        assert_eq!(StageStatus::from_str(""), None);
    }

    #[test]
    fn test_stage_status_terminal() {
        assert!(!StageStatus::Active.is_terminal());
        assert!(!StageStatus::Extended.is_terminal());
        assert!(StageStatus::Completed.is_terminal());
    }

    #[test]
    fn test_effective_deadline_prefers_extension() {
        let mut stage = WorkflowStage::new("1", date(2026, 3, 1));
        assert_eq!(stage.effective_deadline(), date(2026, 3, 1).and_hms_opt(0, 0, 0).unwrap());

        stage.extended_deadline = date(2026, 3, 20).and_hms_opt(17, 0, 0);
        stage.status = StageStatus::Extended;
        assert_eq!(stage.effective_deadline(), date(2026, 3, 20).and_hms_opt(17, 0, 0).unwrap());
        assert_eq!(stage.days_remaining(date(2026, 3, 10)), 10);
    }

    #[test]
    fn test_serde_status_representation() {
        let json = serde_json::to_string(&StageStatus::Extended).unwrap();
        assert_eq!(json, "\"EXTENDED\"");
        let status: StageStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(status, StageStatus::Completed);
    }
}
