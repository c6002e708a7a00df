pub mod executor;
pub mod progress_tracker;

pub use executor::MatchExecutor;
pub use progress_tracker::ProgressTracker;
