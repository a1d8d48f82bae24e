//! Runner configuration.

/// When the finalize hook of a [`crate::ProcessorRunner`] runs.
///
/// The hook never runs if sorting failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalizePolicy {
    /// Only if every processor succeeded.
    #[default]
    AllSucceeded,
    /// If at least one processor succeeded.
    AnySucceeded,
    /// Whenever the processors were sorted, regardless of their outcome.
    Always,
}

impl FinalizePolicy {
    pub(crate) fn permits(self, succeeded: usize, failed: usize) -> bool {
        match self {
            FinalizePolicy::AllSucceeded => failed == 0,
            FinalizePolicy::AnySucceeded => succeeded > 0,
            FinalizePolicy::Always => true,
        }
    }
}

/// Options for [`crate::ProcessorRunner`].
///
/// ```
/// use topograph::{FinalizePolicy, RunnerConfig};
///
/// let config = RunnerConfig::default()
///     .stop_on_first_error(false)
///     .finalize(FinalizePolicy::AnySucceeded);
///
/// assert!(!config.stops_on_first_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    stop_on_first_error: bool,
    catch_panics: bool,
    finalize: FinalizePolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            stop_on_first_error: true,
            catch_panics: true,
            finalize: FinalizePolicy::default(),
        }
    }
}

impl RunnerConfig {
    /// Stop processing after the first failing processor (default `true`).
    pub fn stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    /// Convert processor panics into recorded failures (default `true`).
    ///
    /// When disabled a panicking processor unwinds through [`crate::ProcessorRunner::run`].
    pub fn catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    /// When the finalize hook runs (default [`FinalizePolicy::AllSucceeded`]).
    pub fn finalize(mut self, policy: FinalizePolicy) -> Self {
        self.finalize = policy;
        self
    }

    pub fn stops_on_first_error(&self) -> bool {
        self.stop_on_first_error
    }

    pub fn catches_panics(&self) -> bool {
        self.catch_panics
    }

    pub fn finalize_policy(&self) -> FinalizePolicy {
        self.finalize
    }
}
