use tracing::{error, info};

use super::errors::{ErrorKind, PipelineError};

/// Where user-facing notifications go. Every error path ends here.
pub trait Reporter: Send + Sync {
    fn report_error(&self, kind: ErrorKind, message: &str);

    fn notify(&self, message: &str);

    fn report(&self, err: &PipelineError) {
        self.report_error(err.kind(), &err.message());
    }
}

/// Writes alerts straight to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report_error(&self, kind: ErrorKind, message: &str) {
        error!("{}: {}", kind, message);
        eprintln!("❌ {}: {}", kind, message);
    }

    fn notify(&self, message: &str) {
        info!("{}", message);
        println!("✅ {}", message);
    }
}
