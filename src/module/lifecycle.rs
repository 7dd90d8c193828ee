//! Lifecycle hooks run around each test case.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::ExecutionMode;
use crate::error::{ModuleError, Result};
use crate::module::CacheModule;

// == Test Context ==
/// Handle for the test case currently running.
#[derive(Debug, Clone)]
pub struct TestContext {
    name: String,
    started_at: DateTime<Utc>,
}

impl TestContext {
    /// Creates a context for the named test case.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started_at: Utc::now(),
        }
    }

    /// Name of the test case.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the context was created, used for the cleanup log line.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl CacheModule {
    // == Before ==
    /// Checks that the engine is loaded and enabled for the current
    /// execution mode.
    ///
    /// Must succeed before any verb is used in the test.
    pub fn before(&self, context: &TestContext) -> Result<()> {
        let status = self.backend.status();

        if !status.loaded {
            return Err(setup_error("cache engine is not loaded"));
        }
        if !status.enabled {
            return Err(setup_error("cache engine is disabled"));
        }
        if self.mode == ExecutionMode::Cli && !status.enable_cli {
            return Err(setup_error(
                "cache engine is disabled for command-line runs, turn on enable_cli",
            ));
        }

        debug!(test = context.name(), "Cache module ready");
        Ok(())
    }

    // == After ==
    /// Clears the whole store. Runs whatever the test outcome was.
    pub fn after(&self, context: &TestContext) {
        let elapsed = Utc::now() - context.started_at();
        if self.backend.clear() {
            info!(
                test = context.name(),
                elapsed_ms = elapsed.num_milliseconds(),
                "Cache cleared after test"
            );
        } else {
            warn!(test = context.name(), "Cache clear after test failed");
        }
    }

    // == Run Test ==
    /// Runs `body` between the two hooks.
    ///
    /// If [`before`](Self::before) fails the body is never called. Once the
    /// body starts, [`after`](Self::after) runs on every exit path: `Ok`,
    /// `Err`, or a panic unwinding out of the body.
    pub fn run_test<T, F>(&self, context: &TestContext, body: F) -> Result<T>
    where
        F: FnOnce(&CacheModule) -> Result<T>,
    {
        self.before(context)?;
        let _cleanup = CleanupGuard {
            module: self,
            context,
        };
        body(self)
    }
}

fn setup_error(reason: &str) -> ModuleError {
    ModuleError::Module {
        module: CacheModule::NAME,
        reason: reason.to_string(),
    }
}

/// Calls `after` when dropped.
struct CleanupGuard<'a> {
    module: &'a CacheModule,
    context: &'a TestContext,
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        self.module.after(self.context);
    }
}
