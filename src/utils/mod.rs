pub mod table;
pub mod errors;
pub mod report;
pub mod ratelimit;

pub use table::Table;
pub use errors::{ErrorKind, HistoryFailure, PipelineError};
pub use report::{ConsoleReporter, Reporter};
pub use ratelimit::RateLimiter;
