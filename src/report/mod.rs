// Dashboard reports built on the deadline prioritizer

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::deadline::{compare_urgency, select_most_urgent};
use crate::models::{Case, LabelLanguage, UrgencyClassification, UrgencyTier, WorkflowStage};

/// A stage paired with its urgency for one reference date
#[derive(Debug, Clone, Serialize)]
pub struct RankedStage<'a> {
    pub stage: &'a WorkflowStage,
    pub urgency: UrgencyClassification,
}

/// Summary row for one case: its most urgent stage, if it has any
#[derive(Debug, Clone, Serialize)]
pub struct CaseSummary<'a> {
    pub case: &'a Case,
    pub stage: Option<&'a WorkflowStage>,
    pub urgency: Option<UrgencyClassification>,
}

impl CaseSummary<'_> {
    pub fn tier(&self) -> Option<UrgencyTier> {
        self.urgency.as_ref().map(|u| u.tier)
    }
}

/// Every stage with its classification
///
/// Active stages come first in urgency order, then completed stages newest
/// created first. Ties keep input order.
pub fn rank_stages(
    stages: &[WorkflowStage],
    today: NaiveDate,
    language: LabelLanguage,
) -> Vec<RankedStage<'_>> {
    let mut ranked: Vec<RankedStage> = stages
        .iter()
        .map(|stage| RankedStage {
            stage,
            urgency: stage.classify(today, language),
        })
        .collect();

    ranked.sort_by(|a, b| match (a.stage.is_active(), b.stage.is_active()) {
        (true, true) => compare_urgency(a.urgency.days_remaining, b.urgency.days_remaining),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => b.stage.created_at.cmp(&a.stage.created_at),
    });
    ranked
}

/// Summary row for a single case
pub fn summarize_case(case: &Case, today: NaiveDate, language: LabelLanguage) -> CaseSummary<'_> {
    let stage = select_most_urgent(&case.stages, today);
    CaseSummary {
        case,
        stage,
        urgency: stage.map(|s| s.classify(today, language)),
    }
}

/// Summary rows for all cases, most urgent case first
///
/// Completed cases follow every case with pending work; cases with no stages
/// come last. The sort is stable.
pub fn summarize_cases(
    cases: &[Case],
    today: NaiveDate,
    language: LabelLanguage,
) -> Vec<CaseSummary<'_>> {
    let mut summaries: Vec<CaseSummary> = cases
        .iter()
        .map(|case| summarize_case(case, today, language))
        .collect();
    summaries.sort_by(|a, b| compare_summaries(a, b));
    summaries
}

fn compare_summaries(a: &CaseSummary, b: &CaseSummary) -> Ordering {
    fn rank(summary: &CaseSummary) -> u8 {
        match summary.tier() {
            None => 2,
            Some(UrgencyTier::Complete) => 1,
            Some(_) => 0,
        }
    }

    match rank(a).cmp(&rank(b)) {
        Ordering::Equal => match (&a.urgency, &b.urgency) {
            (Some(ua), Some(ub)) if rank(a) == 0 => compare_urgency(ua.days_remaining, ub.days_remaining),
            _ => Ordering::Equal,
        },
        other => other,
    }
}

/// Keep only rows whose most urgent stage falls in `tier`
pub fn filter_by_tier<'a>(summaries: Vec<CaseSummary<'a>>, tier: UrgencyTier) -> Vec<CaseSummary<'a>> {
    summaries
        .into_iter()
        .filter(|s| s.tier() == Some(tier))
        .collect()
}

/// Number of cases per urgency tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub overdue: usize,
    pub due_soon: usize,
    pub normal: usize,
    pub complete: usize,
    pub without_stages: usize,
}

impl TierCounts {
    pub fn tally(summaries: &[CaseSummary]) -> Self {
        let mut counts = TierCounts::default();
        for summary in summaries {
            match summary.tier() {
                Some(UrgencyTier::Overdue) => counts.overdue += 1,
                Some(UrgencyTier::DueSoon) => counts.due_soon += 1,
                Some(UrgencyTier::Normal) => counts.normal += 1,
                Some(UrgencyTier::Complete) => counts.complete += 1,
                None => counts.without_stages += 1,
            }
        }
        counts
    }

    pub fn get(&self, tier: UrgencyTier) -> usize {
        match tier {
            UrgencyTier::Overdue => self.overdue,
            UrgencyTier::DueSoon => self.due_soon,
            UrgencyTier::Normal => self.normal,
            UrgencyTier::Complete => self.complete,
        }
    }

    pub fn total(&self) -> usize {
        self.overdue + self.due_soon + self.normal + self.complete + self.without_stages
    }
}
