//! identification::progress — progress reporting for the sampler.
//!
//! The sampler reports `Rotation: k / ndraws` every `mult` accepted draws
//! and `-- Done!` when the loop ends. [`SlogProgress`] writes these lines
//! at info level to a non-blocking terminal `slog` logger; [`SilentProgress`]
//! drops them. Reporting never influences control flow.
use slog::{Drain, Logger, info, o};

/// Receiver of sampler progress events.
pub trait ProgressObserver {
    /// Called after the `k`-th (1-based) accepted draw when `k % mult == 0`.
    fn rotation_accepted(&mut self, k: usize, ndraws: usize);

    /// Called once after the last draw, before aggregation.
    fn finished(&mut self);
}

/// Terminal logger (stderr, async drain).
pub struct SlogProgress {
    logger: Logger,
}

impl SlogProgress {
    pub fn term() -> Self {
        let decorator = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        SlogProgress { logger: Logger::root(drain, o!()) }
    }

    /// Report through an existing logger.
    pub fn with_logger(logger: Logger) -> Self {
        SlogProgress { logger }
    }
}

impl ProgressObserver for SlogProgress {
    fn rotation_accepted(&mut self, k: usize, ndraws: usize) {
        info!(self.logger, "Rotation: {} / {}", k, ndraws);
    }

    fn finished(&mut self) {
        info!(self.logger, "-- Done!");
    }
}

/// Observer that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn rotation_accepted(&mut self, _k: usize, _ndraws: usize) {}

    fn finished(&mut self) {}
}
