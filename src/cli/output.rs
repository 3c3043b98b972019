// Output formatting utilities

use std::io::IsTerminal;

use chrono::NaiveDateTime;

use crate::models::{UrgencyClassification, UrgencyTier, WorkflowStage};
use crate::report::{CaseSummary, RankedStage, TierCounts};

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

/// Minimum width a truncated column may shrink to
const MIN_FLEX_WIDTH: usize = 8;

/// Presentation colour for a tier; the core only reports the tier
fn tier_fg_color(tier: UrgencyTier) -> &'static str {
    match tier {
        UrgencyTier::Overdue => ANSI_FG_RED,
        UrgencyTier::DueSoon => ANSI_FG_YELLOW,
        UrgencyTier::Normal => ANSI_FG_GREEN,
        UrgencyTier::Complete => ANSI_FG_BRIGHT_BLACK,
    }
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, with fallback to the COLUMNS environment
/// variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Rendering options shared by every table
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub color: bool,
    pub max_width: usize,
}

/// Format a deadline for display (date only)
pub fn format_date(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d").to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{}...", kept)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

struct Cell {
    text: String,
    tier: Option<UrgencyTier>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Cell { text: text.into(), tier: None }
    }

    fn tinted(text: impl Into<String>, tier: UrgencyTier) -> Self {
        Cell { text: text.into(), tier: Some(tier) }
    }
}

/// Render a table, shrinking the `flex` column when the row is too wide
fn render_table(headers: &[&str], rows: Vec<Vec<Cell>>, flex: usize, options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.text.chars().count());
        }
    }

    let separators = headers.len().saturating_sub(1);
    let total: usize = widths.iter().sum::<usize>() + separators;
    if total > options.max_width && flex < widths.len() {
        let excess = total - options.max_width;
        widths[flex] = widths[flex].saturating_sub(excess).max(MIN_FLEX_WIDTH);
    }

    let mut output = String::new();
    let header_line = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| pad(h, widths[idx]))
        .collect::<Vec<_>>()
        .join(" ");
    let header_line = header_line.trim_end();
    if options.color {
        output.push_str(&format!("{}{}{}\n", ANSI_BOLD, header_line, ANSI_RESET));
    } else {
        output.push_str(header_line);
        output.push('\n');
    }
    let rule_width = widths.iter().sum::<usize>() + separators;
    output.push_str(&"-".repeat(rule_width));
    output.push('\n');

    for row in rows {
        let last = row.len().saturating_sub(1);
        let mut line = String::new();
        for (idx, cell) in row.into_iter().enumerate() {
            let text = truncate(&cell.text, widths[idx]);
            let padded = if idx == last { text } else { pad(&text, widths[idx]) };
            match cell.tier {
                Some(tier) if options.color => {
                    line.push_str(tier_fg_color(tier));
                    line.push_str(&padded);
                    line.push_str(ANSI_RESET);
                }
                _ => line.push_str(&padded),
            }
            if idx != last {
                line.push(' ');
            }
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

fn opt_text(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Ranked stage table: ID, Unit, Deadline, Extended, Days, Tier, Label
pub fn format_stage_table(ranked: &[RankedStage], options: TableOptions) -> String {
    if ranked.is_empty() {
        return "No stages.\n".to_string();
    }

    let headers = ["ID", "Unit", "Deadline", "Extended", "Days", "Tier", "Label"];
    let rows = ranked
        .iter()
        .map(|r| {
            let tier = r.urgency.tier;
            vec![
                Cell::plain(r.stage.id.clone()),
                Cell::plain(opt_text(r.stage.unit.as_deref())),
                Cell::plain(format_date(r.stage.deadline)),
                Cell::plain(r.stage.extended_deadline.map(format_date).unwrap_or_else(|| "-".to_string())),
                Cell::plain(r.urgency.days_remaining.to_string()),
                Cell::tinted(tier.as_str(), tier),
                Cell::tinted(r.urgency.label.clone(), tier),
            ]
        })
        .collect();

    render_table(&headers, rows, 1, options)
}

/// Detail block for the single most urgent stage
pub fn format_stage_detail(stage: &WorkflowStage, urgency: &UrgencyClassification, options: TableOptions) -> String {
    let mut output = String::new();
    let header = format!("Stage {}", stage.id);
    output.push_str(&header);
    output.push('\n');
    output.push_str(&"=".repeat(header.len().max(40)));
    output.push_str("\n\n");

    output.push_str(&format!("  Status:      {}\n", stage.status.as_str()));
    output.push_str(&format!("  Unit:        {}\n", opt_text(stage.unit.as_deref())));
    if let Some(description) = &stage.description {
        output.push_str(&format!("  Description: {}\n", description));
    }
    output.push_str(&format!("  Deadline:    {}\n", format_date(stage.deadline)));
    match stage.extended_deadline {
        Some(extended) => output.push_str(&format!("  Extended:    {}\n", format_date(extended))),
        None => output.push_str("  Extended:    (none)\n"),
    }
    if let Some(completed) = stage.completed_at {
        output.push_str(&format!("  Completed:   {}\n", format_date(completed)));
    }
    output.push_str(&format!("  Days:        {}\n", urgency.days_remaining));

    let tier_line = format!("{} ({})", urgency.label, urgency.tier.as_str());
    if options.color {
        output.push_str(&format!(
            "  Urgency:     {}{}{}\n",
            tier_fg_color(urgency.tier),
            tier_line,
            ANSI_RESET
        ));
    } else {
        output.push_str(&format!("  Urgency:     {}\n", tier_line));
    }

    output
}

/// Case summary table: Case, Subject, Stage, Deadline, Days, Tier, Label
pub fn format_case_table(summaries: &[CaseSummary], options: TableOptions) -> String {
    if summaries.is_empty() {
        return "No cases.\n".to_string();
    }

    let headers = ["Case", "Subject", "Stage", "Deadline", "Days", "Tier", "Label"];
    let rows = summaries
        .iter()
        .map(|s| {
            let mut row = vec![
                Cell::plain(s.case.display_ref().to_string()),
                Cell::plain(opt_text(s.case.subject.as_deref())),
            ];
            match (s.stage, &s.urgency) {
                (Some(stage), Some(urgency)) => {
                    row.push(Cell::plain(stage.id.clone()));
                    row.push(Cell::plain(format_date(stage.effective_deadline())));
                    row.push(Cell::plain(urgency.days_remaining.to_string()));
                    row.push(Cell::tinted(urgency.tier.as_str(), urgency.tier));
                    row.push(Cell::tinted(urgency.label.clone(), urgency.tier));
                }
                _ => {
                    row.extend(["-", "-", "-", "-"].into_iter().map(Cell::plain));
                    row.push(Cell::plain("No stages"));
                }
            }
            row
        })
        .collect();

    render_table(&headers, rows, 1, options)
}

/// Dashboard: tier counts followed by the most urgent cases
pub fn format_dashboard(counts: &TierCounts, top: &[CaseSummary], options: TableOptions) -> String {
    let mut output = String::new();

    output.push_str("=== Cases by Urgency ===\n");
    for tier in UrgencyTier::ALL {
        let name = pad(tier.as_str(), 10);
        let count = counts.get(tier);
        if options.color && count > 0 {
            output.push_str(&format!("{}{}{} {}\n", tier_fg_color(tier), name, ANSI_RESET, count));
        } else {
            output.push_str(&format!("{} {}\n", name, count));
        }
    }
    output.push_str(&format!("{} {}\n", pad("no stages", 10), counts.without_stages));
    output.push_str(&format!("{} {}\n", pad("total", 10), counts.total()));
    output.push('\n');

    output.push_str(&format!("=== Most Urgent Cases (Top {}) ===\n", top.len()));
    let pending: Vec<&CaseSummary> = top
        .iter()
        .filter(|s| matches!(s.tier(), Some(t) if t != UrgencyTier::Complete))
        .collect();
    if pending.is_empty() {
        output.push_str("No pending stages.\n");
    } else {
        for summary in pending {
            if let (Some(stage), Some(urgency)) = (summary.stage, &summary.urgency) {
                let subject = summary
                    .case
                    .subject
                    .as_deref()
                    .map(|s| format!(": {}", s))
                    .unwrap_or_default();
                let label = if options.color {
                    format!("{}{}{}", tier_fg_color(urgency.tier), urgency.label, ANSI_RESET)
                } else {
                    urgency.label.clone()
                };
                output.push_str(&format!(
                    "{}{} stage={} due={} {}\n",
                    summary.case.display_ref(),
                    subject,
                    stage.id,
                    format_date(stage.effective_deadline()),
                    label
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Case, LabelLanguage, StageStatus};
    use crate::report::{rank_stages, summarize_cases};
    use chrono::NaiveDate;

    const PLAIN: TableOptions = TableOptions { color: false, max_width: 200 };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long subject line", 10), "a long ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_stage_table_plain() {
        let mut late = WorkflowStage::new("s1", date(2026, 1, 8));
        late.unit = Some("Legal".to_string());
        let stages = vec![WorkflowStage::new("s2", date(2026, 1, 20)), late];
        let ranked = rank_stages(&stages, date(2026, 1, 10), LabelLanguage::English);
        let table = format_stage_table(&ranked, PLAIN);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("Label"));
        assert!(lines[2].starts_with("s1"));
        assert!(lines[2].contains("Legal"));
        assert!(lines[2].contains("Overdue by 2 days"));
        assert!(lines[3].contains("10 days left"));
        assert!(!table.contains("\x1b["));
    }

    #[test]
    fn test_stage_table_colored() {
        let stages = vec![WorkflowStage::new("s1", date(2026, 1, 8))];
        let ranked = rank_stages(&stages, date(2026, 1, 10), LabelLanguage::English);
        let table = format_stage_table(&ranked, TableOptions { color: true, max_width: 200 });
        assert!(table.contains(ANSI_FG_RED));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(format_stage_table(&[], PLAIN), "No stages.\n");
        assert_eq!(format_case_table(&[], PLAIN), "No cases.\n");
    }

    #[test]
    fn test_case_table_without_stages() {
        let cases = vec![Case::new("c1")];
        let summaries = summarize_cases(&cases, date(2026, 1, 10), LabelLanguage::English);
        let table = format_case_table(&summaries, PLAIN);
        assert!(table.contains("c1"));
        assert!(table.contains("No stages"));
    }

    #[test]
    fn test_narrow_width_truncates_flex_column() {
        let mut c = Case::new("c1");
        c.subject = Some("A very long subject that would never fit a narrow terminal".to_string());
        c.stages.push(WorkflowStage::new("s", date(2026, 1, 12)));
        let cases = vec![c];
        let summaries = summarize_cases(&cases, date(2026, 1, 10), LabelLanguage::English);
        let table = format_case_table(&summaries, TableOptions { color: false, max_width: 70 });
        assert!(table.contains("..."));
        assert!(!table.contains("narrow terminal"));
    }

    #[test]
    fn test_stage_detail() {
        let mut stage = WorkflowStage::new("s9", date(2026, 1, 5));
        stage.status = StageStatus::Extended;
        stage.extended_deadline = date(2026, 1, 12).and_hms_opt(0, 0, 0);
        let urgency = stage.classify(date(2026, 1, 10), LabelLanguage::English);
        let detail = format_stage_detail(&stage, &urgency, PLAIN);
        assert!(detail.starts_with("Stage s9"));
        assert!(detail.contains("Extended:    2026-01-12"));
        assert!(detail.contains("2 days left (due-soon)"));
    }

    #[test]
    fn test_dashboard() {
        let mut late = Case::new("late");
        late.subject = Some("Permit".to_string());
        late.stages.push(WorkflowStage::new("a", date(2026, 1, 1)));
        let cases = vec![late, Case::new("empty")];
        let summaries = summarize_cases(&cases, date(2026, 1, 10), LabelLanguage::English);
        let counts = TierCounts::tally(&summaries);
        let dashboard = format_dashboard(&counts, &summaries[..1], PLAIN);
        assert!(dashboard.contains("=== Cases by Urgency ==="));
        assert!(dashboard.contains("overdue    1"));
        assert!(dashboard.contains("no stages  1"));
        assert!(dashboard.contains("total      2"));
        assert!(dashboard.contains("late: Permit stage=a due=2026-01-01 Overdue by 9 days"));
    }

    #[test]
    fn test_dashboard_heading_matches_top_count() {
        let cases = vec![Case::new("empty")];
        let summaries = summarize_cases(&cases, date(2026, 1, 10), LabelLanguage::English);
        let counts = TierCounts::tally(&summaries);
        let dashboard = format_dashboard(&counts, &summaries[..0], PLAIN);
        assert!(dashboard.contains("=== Most Urgent Cases (Top 0) ==="));
        assert!(dashboard.contains("No pending stages."));
    }
}
