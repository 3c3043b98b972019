//! Prazo - deadline prioritizer for case workflow stages ("andamentos")
//!
//! This library provides:
//! - Days-to-deadline computation honoring extended deadlines
//! - Urgency classification (complete, overdue, due soon, normal) with labels
//! - Selection of the most urgent stage of a case
//! - Strict loading of backend JSON exports into stages and cases
//! - Case summaries and tier counts for dashboards
//! - The `prazo` command-line interface
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use prazo::deadline::select_most_urgent;
//! use prazo::models::WorkflowStage;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
//! let stages = vec![
//!     WorkflowStage::new("a", NaiveDate::from_ymd_opt(2026, 3, 12).unwrap()),
//!     WorkflowStage::new("b", NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()),
//! ];
//! let chosen = select_most_urgent(&stages, today).unwrap();
//! assert_eq!(chosen.id, "b");
//! ```

pub mod models;
pub mod deadline;
pub mod load;
pub mod report;
pub mod config;
pub mod cli;
pub mod utils;
