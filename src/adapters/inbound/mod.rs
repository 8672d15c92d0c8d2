pub mod file_event_store;

pub use file_event_store::*;
