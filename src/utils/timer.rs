// file: src/utils/timer.rs
// description: operation timing with tracing output
// reference: https://docs.rs/tracing

use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        debug!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        let secs = elapsed.as_secs_f64();
        info!(
            "Completed operation: {} - {} items in {:.2}s ({:.2} items/sec)",
            self.operation,
            count,
            secs,
            if secs > 0.0 { count as f64 / secs } else { 0.0 }
        );
        elapsed
    }
}
