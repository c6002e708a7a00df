pub mod executor;
pub mod progress_tracker;

pub use executor::RecomputeExecutor;
pub use progress_tracker::ProgressTracker;
