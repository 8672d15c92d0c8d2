pub mod coordinator;
pub mod stepping;

pub use coordinator::Coordinator;
pub use stepping::{Movement, RunOutcome, TickReport};
