mod refresher;

pub use refresher::{RefreshCoordinator, RefreshOutcome};
