// Error handling utilities for consistent error messages and exit codes

use std::process;

use crate::models::UrgencyTier;

/// Exit with a user error (exit code 1)
/// User errors are for invalid arguments, missing input files, malformed records
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Validate a --tier argument
pub fn validate_tier(value: &str) -> Result<UrgencyTier, String> {
    UrgencyTier::from_str(value).ok_or_else(|| {
        format!(
            "Invalid tier: '{}'. Expected one of: overdue, due-soon, normal, complete.",
            value
        )
    })
}

/// Validate that an input path argument is not empty
pub fn validate_input_path(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("Input file path cannot be empty".to_string())
    } else {
        Ok(())
    }
}
