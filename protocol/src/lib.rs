//! Records exchanged with the persistence layer and the admin report.
//!
//! Game states are stored as one JSON object keyed by user id, users as a JSON
//! array. Both shapes match what the board server has always written, with the
//! milestone added to each game state.

pub use error::*;
pub use layout::*;
pub use record::*;
pub use report::*;

mod error;
mod layout;
mod record;
mod report;
