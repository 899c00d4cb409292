//! Cache-aside scrape orchestration.
//!
//! A request names a platform and a target. The platform picks a fetcher,
//! the cache is consulted, and on a miss the fetched profile is analyzed and
//! the result stored for thirty minutes.

pub mod error;
pub mod pipeline;
pub mod wiring;

pub use error::{PipelineError, SetupError};
pub use pipeline::{ScrapeOutput, ScrapePipeline};
pub use wiring::{default_fetchers, gemini_analyzer};
