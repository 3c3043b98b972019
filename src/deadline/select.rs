// Most-urgent stage selection

use std::cmp::Ordering;

use chrono::{Local, NaiveDate};

use super::urgency::DUE_SOON_DAYS;
use crate::models::WorkflowStage;

/// Composite sort key: (bucket, days) where bucket is 0 overdue, 1 due soon, 2 normal
///
/// Day 0 and day `DUE_SOON_DAYS` both land in the due-soon bucket. Within a
/// bucket the raw day count ascends, so the more overdue stage comes first.
pub fn urgency_key(days_remaining: i64) -> (u8, i64) {
    let bucket = if days_remaining < 0 {
        0
    } else if days_remaining <= DUE_SOON_DAYS {
        1
    } else {
        2
    };
    (bucket, days_remaining)
}

/// Total order over day counts, most urgent first
pub fn compare_urgency(a_days: i64, b_days: i64) -> Ordering {
    urgency_key(a_days).cmp(&urgency_key(b_days))
}

/// Pick the stage that drives a case's urgency badge
///
/// Active stages (anything not completed) win over completed ones and are
/// ordered by `compare_urgency`; equal keys keep input order. With no active
/// stage, the most recently created completed stage is returned, and equal
/// `created_at` values resolve to the earliest one in the list.
pub fn select_most_urgent(stages: &[WorkflowStage], today: NaiveDate) -> Option<&WorkflowStage> {
    let (active, completed): (Vec<&WorkflowStage>, Vec<&WorkflowStage>) =
        stages.iter().partition(|s| s.is_active());

    if !active.is_empty() {
        let mut keyed: Vec<(i64, &WorkflowStage)> = active
            .into_iter()
            .map(|s| (s.days_remaining(today), s))
            .collect();
        // sort_by is stable
        keyed.sort_by(|a, b| compare_urgency(a.0, b.0));
        let chosen = keyed.first().map(|(_, s)| *s);
        if let Some(stage) = chosen {
            log::debug!("Most urgent active stage: {} ({} days)", stage.id, keyed[0].0);
        }
        return chosen;
    }

    let mut latest: Option<&WorkflowStage> = None;
    for stage in completed {
        match latest {
            Some(current) if stage.created_at <= current.created_at => {}
            _ => latest = Some(stage),
        }
    }
    latest
}

/// `select_most_urgent` against the local current date, sampled once
pub fn select_most_urgent_now(stages: &[WorkflowStage]) -> Option<&WorkflowStage> {
    let today = Local::now().date_naive();
    select_most_urgent(stages, today)
}
