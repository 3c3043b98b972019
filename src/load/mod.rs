// Load boundary: backend JSON -> validated stages and cases

pub mod error;
pub mod record;

pub use error::LoadError;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::models::{Case, StageStatus, WorkflowStage};
use crate::utils::parse_backend_datetime;
use record::{CaseRecord, StageRecord};

/// Read a whole document from a file path, or from stdin when the path is `-`
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| LoadError::Io {
                source_name: "stdin".to_string(),
                message: e.to_string(),
            })?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Decode a JSON array of stage records
pub fn load_stages(json: &str) -> Result<Vec<WorkflowStage>, LoadError> {
    let records: Vec<StageRecord> = serde_json::from_str(json)?;
    let stages = convert_stages(records)?;
    log::debug!("Loaded {} stages", stages.len());
    Ok(stages)
}

/// Decode a JSON array of case records, each with its nested stages
pub fn load_cases(json: &str) -> Result<Vec<Case>, LoadError> {
    let records: Vec<CaseRecord> = serde_json::from_str(json)?;
    let mut cases = Vec::with_capacity(records.len());
    for record in records {
        cases.push(Case {
            id: record.id.into_string(),
            number: non_empty(record.number),
            subject: non_empty(record.subject),
            stages: convert_stages(record.stages)?,
        });
    }
    log::debug!(
        "Loaded {} cases ({} stages)",
        cases.len(),
        cases.iter().map(|c| c.stages.len()).sum::<usize>()
    );
    Ok(cases)
}

fn convert_stages(records: Vec<StageRecord>) -> Result<Vec<WorkflowStage>, LoadError> {
    let mut seen = HashSet::new();
    let mut stages = Vec::with_capacity(records.len());
    for record in records {
        let stage = convert_stage(record)?;
        if !seen.insert(stage.id.clone()) {
            return Err(LoadError::DuplicateStage { id: stage.id });
        }
        stages.push(stage);
    }
    Ok(stages)
}

/// Validate one record: dates parse, status is known, and the completion
/// date is present exactly when the status is COMPLETED
pub fn convert_stage(record: StageRecord) -> Result<WorkflowStage, LoadError> {
    let id = record.id.into_string();

    let status = StageStatus::from_str(&record.status).ok_or_else(|| LoadError::UnknownStatus {
        stage: id.clone(),
        value: record.status.clone(),
    })?;

    let deadline = required_date(&id, "deadline", &record.deadline)?;
    let extended_deadline = optional_date(&id, "extendedDeadline", record.extended_deadline)?;
    let completed_at = optional_date(&id, "completedAt", record.completed_at)?;
    let created_at = required_date(&id, "createdAt", &record.created_at)?;

    if completed_at.is_some() != (status == StageStatus::Completed) {
        return Err(LoadError::CompletionMismatch {
            stage: id,
            status: status.as_str().to_string(),
        });
    }

    Ok(WorkflowStage {
        id,
        deadline,
        extended_deadline,
        completed_at,
        status,
        created_at,
        unit: non_empty(record.unit),
        description: non_empty(record.description),
    })
}

fn required_date(stage: &str, field: &'static str, value: &str) -> Result<NaiveDateTime, LoadError> {
    parse_backend_datetime(value).map_err(|_| LoadError::InvalidDate {
        stage: stage.to_string(),
        field,
        value: value.to_string(),
    })
}

fn optional_date(
    stage: &str,
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDateTime>, LoadError> {
    match non_empty(value) {
        Some(v) => required_date(stage, field, &v).map(Some),
        None => Ok(None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
