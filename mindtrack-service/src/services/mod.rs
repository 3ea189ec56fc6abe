pub mod dispatch;
pub mod fallback;
pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod tips;

pub use dispatch::{GenerationError, GenerationOutcome, Generator, Slot};
pub use metrics::{get_metrics, init_metrics};
pub use tips::normalize_tips;
