// Core data models for prazo
// Stages and cases arrive from the backend; urgency values are derived per call

pub mod stage;
pub mod case;
pub mod urgency;

pub use stage::*;
pub use case::*;
pub use urgency::*;
