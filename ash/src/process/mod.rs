pub mod foreground;
pub mod registry;

pub use foreground::run_foreground;
pub use registry::{JobError, JobRegistry, JobStatus};
