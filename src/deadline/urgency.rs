// Days-to-deadline and urgency classification

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{LabelLanguage, StageStatus, UrgencyClassification, UrgencyTier, WorkflowStage};

/// Days at or below which a pending stage counts as due soon (inclusive)
pub const DUE_SOON_DAYS: i64 = 3;

/// Signed whole days from `today` until the effective deadline
///
/// The effective deadline is `extended_deadline` when present, else `deadline`.
/// Both sides are normalized to midnight before subtracting, so the time of
/// day never biases the result. With both sides on a day boundary the ceiling
/// of the day difference is the exact calendar-day difference:
/// - negative: overdue by that many days
/// - zero: due today
/// - positive: days left
pub fn days_remaining(
    deadline: NaiveDateTime,
    extended_deadline: Option<NaiveDateTime>,
    today: NaiveDate,
) -> i64 {
    let effective = extended_deadline.unwrap_or(deadline).date();
    (effective - today).num_days()
}

/// Tier for a signed day count on a stage that is not completed
pub fn tier_for_days(days_remaining: i64) -> UrgencyTier {
    if days_remaining < 0 {
        UrgencyTier::Overdue
    } else if days_remaining <= DUE_SOON_DAYS {
        UrgencyTier::DueSoon
    } else {
        UrgencyTier::Normal
    }
}

/// Classify a day count and status with English labels
pub fn classify(days_remaining: i64, status: StageStatus) -> UrgencyClassification {
    classify_in(days_remaining, status, LabelLanguage::English)
}

/// Classify a day count and status, labelling in `language`
///
/// Completed stages are always `Complete`, whatever the day count.
pub fn classify_in(
    days_remaining: i64,
    status: StageStatus,
    language: LabelLanguage,
) -> UrgencyClassification {
    let tier = if status == StageStatus::Completed {
        UrgencyTier::Complete
    } else {
        tier_for_days(days_remaining)
    };

    UrgencyClassification {
        days_remaining,
        tier,
        label: language.label(tier, days_remaining),
    }
}

impl WorkflowStage {
    /// Days remaining and urgency of this stage relative to `today`
    pub fn classify(&self, today: NaiveDate, language: LabelLanguage) -> UrgencyClassification {
        classify_in(self.days_remaining(today), self.status, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        d.and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_days_remaining_basic() {
        let today = date(2026, 4, 10);
        assert_eq!(days_remaining(at(date(2026, 4, 10), 0, 0), None, today), 0);
        assert_eq!(days_remaining(at(date(2026, 4, 11), 0, 0), None, today), 1);
        assert_eq!(days_remaining(at(date(2026, 4, 5), 0, 0), None, today), -5);
        assert_eq!(days_remaining(at(date(2026, 5, 10), 0, 0), None, today), 30);
    }

    #[test]
    fn test_days_remaining_ignores_time_of_day() {
        let today = date(2026, 4, 10);
        let due = date(2026, 4, 12);
        assert_eq!(
            days_remaining(at(due, 23, 59), None, today),
            days_remaining(at(due, 0, 1), None, today)
        );
        // A deadline a few hours into tomorrow is a full day away
        assert_eq!(days_remaining(at(date(2026, 4, 11), 3, 0), None, today), 1);
        // A deadline that passed last night is a full day overdue
        assert_eq!(days_remaining(at(date(2026, 4, 9), 23, 59), None, today), -1);
    }

    #[test]
    fn test_days_remaining_uses_extension() {
        let today = date(2026, 4, 10);
        let original = at(date(2026, 4, 1), 0, 0);
        let extended = at(date(2026, 4, 19), 12, 0);
        assert_eq!(days_remaining(original, Some(extended), today), 9);

        // Original deadline is irrelevant once an extension exists
        let other_original = at(date(2030, 1, 1), 0, 0);
        assert_eq!(days_remaining(other_original, Some(extended), today), 9);
    }

    #[test]
    fn test_days_remaining_across_month_and_year() {
        assert_eq!(days_remaining(at(date(2027, 1, 2), 0, 0), None, date(2026, 12, 30)), 3);
        assert_eq!(days_remaining(at(date(2024, 2, 28), 0, 0), None, date(2024, 3, 1)), -2);
    }

    #[test]
    fn test_classify_completed_always_complete() {
        for days in [-1000, -1, 0, 3, 4, 1000] {
            let c = classify(days, StageStatus::Completed);
            assert_eq!(c.tier, UrgencyTier::Complete);
            assert_eq!(c.label, "Completed");
            assert_eq!(c.days_remaining, days);
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(-1, StageStatus::Active).tier, UrgencyTier::Overdue);
        assert_eq!(classify(0, StageStatus::Active).tier, UrgencyTier::DueSoon);
        assert_eq!(classify(0, StageStatus::Active).label, "Due today");
        assert_eq!(classify(3, StageStatus::Active).tier, UrgencyTier::DueSoon);
        assert_eq!(classify(4, StageStatus::Active).tier, UrgencyTier::Normal);
        assert_eq!(classify(4, StageStatus::Extended).tier, UrgencyTier::Normal);
    }

    #[test]
    fn test_classify_labels_pluralize() {
        assert_eq!(classify(-1, StageStatus::Active).label, "Overdue by 1 day");
        assert_eq!(classify(-7, StageStatus::Extended).label, "Overdue by 7 days");
        assert_eq!(classify(1, StageStatus::Active).label, "1 day left");
        assert_eq!(classify(2, StageStatus::Active).label, "2 days left");
        assert_eq!(classify(15, StageStatus::Active).label, "15 days left");
    }

    #[test]
    fn test_classify_in_portuguese() {
        let c = classify_in(-2, StageStatus::Active, LabelLanguage::Portuguese);
        assert_eq!(c.tier, UrgencyTier::Overdue);
        assert_eq!(c.label, "Atrasado há 2 dias");
    }

    #[test]
    fn test_extended_stage_classifies_against_extension() {
        let today = date(2026, 4, 10);
        let mut stage = WorkflowStage::new("x", date(2026, 4, 11));
        stage.extended_deadline = Some(at(date(2026, 4, 19), 0, 0));
        stage.status = StageStatus::Extended;

        let c = stage.classify(today, LabelLanguage::English);
        assert_eq!(c.days_remaining, 9);
        assert_eq!(c.tier, UrgencyTier::Normal);
        assert_eq!(c.label, "9 days left");
    }

    #[test]
    fn test_stage_due_today() {
        let today = date(2026, 4, 10);
        let stage = WorkflowStage::new("x", today);
        let c = stage.classify(today, LabelLanguage::English);
        assert_eq!(c.days_remaining, 0);
        assert_eq!(c.tier, UrgencyTier::DueSoon);
    }
}
