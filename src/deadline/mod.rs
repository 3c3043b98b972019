// Deadline prioritizer: days remaining, urgency tiers, most-urgent selection
//
// Every function takes "today" explicitly. Callers sample the clock once per
// pass so a run that straddles midnight stays internally consistent.

pub mod urgency;
pub mod select;

pub use urgency::*;
pub use select::*;
