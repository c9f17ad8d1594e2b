mod store;

pub use store::{SharedState, SourceRecord, TrackerState};
