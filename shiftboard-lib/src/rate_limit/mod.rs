//! Concurrency limiting and retry configuration.

mod concurrency;
mod retry;

pub use concurrency::ConcurrencyLimiter;
pub use retry::RetryCause;
pub use retry::RetryConfig;
