pub mod engine;
pub mod generator;
pub mod pipeline;

pub use crate::domain::model::{Assignment, Letter, Participant, Roster, RosterEntry};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
