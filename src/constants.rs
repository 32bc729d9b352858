//! Front-end constants

/// Prompt shown in front of the input line.
pub const PROMPT: &str = "Ruby-code > ";

/// Number of checked lines kept in the interactive history.
pub const HISTORY_LIMIT: usize = 500;

/// Verdict printed for an accepted line.
pub const ACCEPTED: &str = "Valid Ruby statement";

/// Verdict printed for a rejected line.
pub const REJECTED: &str = "Invalid Ruby statement";
