use serde::{Deserialize, Serialize};

/// Coarse urgency bucket used to drive badge styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyTier {
    Complete,
    Overdue,
    DueSoon,
    Normal,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Overdue,
        UrgencyTier::DueSoon,
        UrgencyTier::Normal,
        UrgencyTier::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Complete => "complete",
            UrgencyTier::Overdue => "overdue",
            UrgencyTier::DueSoon => "due-soon",
            UrgencyTier::Normal => "normal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "complete" | "completed" => Some(UrgencyTier::Complete),
            "overdue" => Some(UrgencyTier::Overdue),
            "due-soon" | "duesoon" | "soon" => Some(UrgencyTier::DueSoon),
            "normal" => Some(UrgencyTier::Normal),
            _ => None,
        }
    }
}

/// Language of the human-readable urgency label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelLanguage {
    #[default]
    English,
    Portuguese,
}

impl LabelLanguage {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(LabelLanguage::English),
            "pt" | "pt-br" | "portuguese" => Some(LabelLanguage::Portuguese),
            _ => None,
        }
    }

    /// Label for a tier and signed day count
    pub fn label(&self, tier: UrgencyTier, days_remaining: i64) -> String {
        let days = days_remaining.unsigned_abs();
        match (self, tier) {
            (LabelLanguage::English, UrgencyTier::Complete) => "Completed".to_string(),
            (LabelLanguage::English, UrgencyTier::Overdue) => {
                format!("Overdue by {} {}", days, if days == 1 { "day" } else { "days" })
            }
            (LabelLanguage::English, _) if days_remaining == 0 => "Due today".to_string(),
            (LabelLanguage::English, _) => {
                format!("{} {} left", days, if days == 1 { "day" } else { "days" })
            }
            (LabelLanguage::Portuguese, UrgencyTier::Complete) => "Concluído".to_string(),
            (LabelLanguage::Portuguese, UrgencyTier::Overdue) => {
                format!("Atrasado há {} {}", days, if days == 1 { "dia" } else { "dias" })
            }
            (LabelLanguage::Portuguese, _) if days_remaining == 0 => "Vence hoje".to_string(),
            (LabelLanguage::Portuguese, _) => {
                if days == 1 {
                    "1 dia restante".to_string()
                } else {
                    format!("{} dias restantes", days)
                }
            }
        }
    }
}

/// Derived, per-call urgency of a single stage. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyClassification {
    pub days_remaining: i64,
    pub tier: UrgencyTier,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_conversion() {
        for tier in UrgencyTier::ALL {
            assert_eq!(UrgencyTier::from_str(tier.as_str()), Some(tier));
        }
        assert_eq!(UrgencyTier::from_str("DUE_SOON"), Some(UrgencyTier::DueSoon));
        assert_eq!(UrgencyTier::from_str("late"), None);
    }

    #[test]
    fn test_english_labels() {
        let en = LabelLanguage::English;
        assert_eq!(en.label(UrgencyTier::Complete, -40), "Completed");
        assert_eq!(en.label(UrgencyTier::Overdue, -1), "Overdue by 1 day");
        assert_eq!(en.label(UrgencyTier::Overdue, -12), "Overdue by 12 days");
        assert_eq!(en.label(UrgencyTier::DueSoon, 0), "Due today");
        assert_eq!(en.label(UrgencyTier::DueSoon, 1), "1 day left");
        assert_eq!(en.label(UrgencyTier::DueSoon, 3), "3 days left");
        assert_eq!(en.label(UrgencyTier::Normal, 30), "30 days left");
    }

    #[test]
    fn test_portuguese_labels() {
        let pt = LabelLanguage::Portuguese;
        assert_eq!(pt.label(UrgencyTier::Complete, 2), "Concluído");
        assert_eq!(pt.label(UrgencyTier::Overdue, -1), "Atrasado há 1 dia");
        assert_eq!(pt.label(UrgencyTier::Overdue, -5), "Atrasado há 5 dias");
        assert_eq!(pt.label(UrgencyTier::DueSoon, 0), "Vence hoje");
        assert_eq!(pt.label(UrgencyTier::DueSoon, 1), "1 dia restante");
        assert_eq!(pt.label(UrgencyTier::Normal, 9), "9 dias restantes");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!(LabelLanguage::from_str("pt"), Some(LabelLanguage::Portuguese));
        assert_eq!(LabelLanguage::from_str("EN"), Some(LabelLanguage::English));
        assert_eq!(LabelLanguage::from_str("fr"), None);
        assert_eq!(LabelLanguage::default(), LabelLanguage::English);
    }
}
