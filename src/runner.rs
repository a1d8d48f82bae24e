//! Processor runner: execute dependency-ordered processors against one shared input.
//!
//! A [`ProcessorRunner`] owns a [`TopoGraph`] of processors. Each run sorts the graph and, if
//! that succeeds, calls [`Processor::process`] on every processor in order. Processors run
//! sequentially on the caller's thread.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "tracing")]
use tracing::{debug, error, info, trace};

use crate::comparer::Comparer;
use crate::config::RunnerConfig;
use crate::diagnostics::{self, SharedDiagnostics};
use crate::error::{BoxError, RunError, RunResult};
use crate::graph::TopoGraph;
use crate::types::NodeId;

/// A unit of work that runs once per [`ProcessorRunner::run`].
///
/// # Examples
///
/// ```
/// use topograph::{BoxError, Processor};
///
/// struct CountWords;
///
/// impl Processor for CountWords {
///     type Input = str;
///
///     fn process(&mut self, input: &str) -> Result<(), BoxError> {
///         if input.split_whitespace().count() == 0 {
///             return Err("empty document".into());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Processor {
    type Input: ?Sized;

    fn process(&mut self, input: &Self::Input) -> Result<(), BoxError>;

    /// Name used in reports and by [`SameProcessor`]. Defaults to the type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    type Input = P::Input;

    fn process(&mut self, input: &Self::Input) -> Result<(), BoxError> {
        (**self).process(input)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Treats processors with the same [`Processor::name`] as the same node, so each processor
/// type appears at most once in a runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameProcessor;

impl<P: Processor + ?Sized> Comparer<P> for SameProcessor {
    fn equals(&self, a: &P, b: &P) -> bool {
        a.name() == b.name()
    }
}

type Hook<I> = Box<dyn FnMut(&I) -> Result<(), BoxError>>;

/// Build and run an ordered set of processors.
///
/// # Workflow
///
/// 1. Create a runner with [`ProcessorRunner::new`]
/// 2. Add processors with [`ProcessorRunner::add`] and order them with
///    [`ProcessorRunner::add_dependency`]
/// 3. Execute with [`ProcessorRunner::run`] and inspect the [`RunReport`]
///
/// # Examples
///
/// ```
/// use topograph::{BoxError, Processor, ProcessorRunner};
///
/// struct Trim;
/// struct Validate;
///
/// impl Processor for Trim {
///     type Input = String;
///     fn process(&mut self, input: &String) -> Result<(), BoxError> {
///         println!("trimmed: {}", input.trim());
///         Ok(())
///     }
/// }
///
/// impl Processor for Validate {
///     type Input = String;
///     fn process(&mut self, input: &String) -> Result<(), BoxError> {
///         if input.trim().is_empty() {
///             return Err("blank input".into());
///         }
///         Ok(())
///     }
/// }
///
/// let mut runner: ProcessorRunner<Box<dyn Processor<Input = String>>> = ProcessorRunner::new();
/// runner.add_dependency(Box::new(Trim), Box::new(Validate));
///
/// let report = runner.run(&"  hello ".to_string()).unwrap();
/// assert!(report.succeeded());
/// assert_eq!(report.processed().len(), 2);
/// ```
pub struct ProcessorRunner<P: Processor, C = SameProcessor> {
    graph: TopoGraph<P, C>,
    config: RunnerConfig,
    diagnostics: SharedDiagnostics,
    initialize: Option<Hook<P::Input>>,
    finalize: Option<Hook<P::Input>>,
}

impl<P: Processor> Default for ProcessorRunner<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Processor> ProcessorRunner<P> {
    /// Create an empty runner; processors are identified by [`Processor::name`].
    pub fn new() -> Self {
        Self::with_comparer(SameProcessor)
    }
}

impl<P: Processor, C: Comparer<P>> ProcessorRunner<P, C> {
    /// Create an empty runner with a custom processor identity.
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            graph: TopoGraph::with_comparer(comparer),
            config: RunnerConfig::default(),
            diagnostics: diagnostics::null(),
            initialize: None,
            finalize: None,
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Report sort and processing failures to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: SharedDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Run `hook` before sorting. If it fails, the run is aborted.
    pub fn on_initialize<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&P::Input) -> Result<(), BoxError> + 'static,
    {
        self.initialize = Some(Box::new(hook));
        self
    }

    /// Run `hook` after processing, subject to [`crate::FinalizePolicy`].
    pub fn on_finalize<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&P::Input) -> Result<(), BoxError> + 'static,
    {
        self.finalize = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// The underlying processor graph.
    pub fn graph(&self) -> &TopoGraph<P, C> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut TopoGraph<P, C> {
        &mut self.graph
    }

    /// Add a processor with no ordering constraint.
    pub fn add(&mut self, processor: P) -> NodeId {
        self.graph.add_value(processor)
    }

    /// Require `ancestor` to run before `dependent`.
    pub fn add_dependency(&mut self, ancestor: P, dependent: P) -> NodeId {
        self.graph.add_dependency(ancestor, dependent)
    }

    pub fn remove(&mut self, processor: &P) -> bool {
        self.graph.remove(processor)
    }

    /// Sort the processors and run each one against `input`.
    ///
    /// # Errors
    ///
    /// - [`RunError::Initialize`] if the initialize hook fails; nothing else runs
    /// - [`RunError::Sort`] if the processors cannot be ordered; no processor runs
    ///
    /// Failing processors do not make `run` return an error; they are recorded in the
    /// returned [`RunReport`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn run(&mut self, input: &P::Input) -> RunResult<RunReport> {
        #[cfg(feature = "tracing")]
        info!(processors = self.graph.len(), "starting processor run");

        if let Some(initialize) = self.initialize.as_mut() {
            if let Err(err) = initialize(input) {
                let err = RunError::Initialize {
                    reason: err.to_string(),
                };
                self.diagnostics.error(&err.to_string());

                #[cfg(feature = "tracing")]
                error!(%err, "processor run aborted");

                return Err(err);
            }
        }

        let order = match self.graph.sort_ids() {
            Ok(order) => order,
            Err(err) => {
                let err = RunError::from(err);
                self.diagnostics.error(&err.to_string());

                #[cfg(feature = "tracing")]
                error!(%err, "processor run aborted");

                return Err(err);
            }
        };

        let mut report = RunReport::new(order);
        let catch_panics = self.config.catches_panics();

        for &id in &report.order {
            let Some(processor) = self.graph.value_mut(id) else {
                continue;
            };
            let name = processor.name();

            #[cfg(feature = "tracing")]
            trace!(node = id.index(), processor = name, "running processor");

            match invoke(processor, input, catch_panics) {
                Ok(()) => report.processed.push(name),
                Err(reason) => {
                    self.diagnostics
                        .error(&format!("processor '{name}' failed: {reason}"));

                    #[cfg(feature = "tracing")]
                    error!(node = id.index(), processor = name, %reason, "processor failed");

                    report.failures.push(ProcessFailure {
                        node: id,
                        name,
                        reason,
                    });

                    if self.config.stops_on_first_error() {
                        break;
                    }
                }
            }
        }

        let permitted = self
            .config
            .finalize_policy()
            .permits(report.processed.len(), report.failures.len());

        report.finalize = match (permitted, self.finalize.as_mut()) {
            (false, _) => FinalizeOutcome::Skipped,
            (true, None) => FinalizeOutcome::Completed,
            (true, Some(finalize)) => match finalize(input) {
                Ok(()) => FinalizeOutcome::Completed,
                Err(err) => {
                    let reason = err.to_string();
                    self.diagnostics
                        .error(&format!("finalization failed: {reason}"));
                    FinalizeOutcome::Failed(reason)
                }
            },
        };

        #[cfg(feature = "tracing")]
        debug!(
            processed = report.processed.len(),
            failed = report.failures.len(),
            finalize = ?report.finalize,
            "processor run finished"
        );

        if report.succeeded() {
            self.diagnostics.info(&format!(
                "processed {} processors",
                report.processed.len()
            ));
        }

        Ok(report)
    }
}

impl<P: Processor, C> fmt::Debug for ProcessorRunner<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRunner")
            .field(
                "processors",
                &self.graph.values().map(Processor::name).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .field("initialize", &self.initialize.is_some())
            .field("finalize", &self.finalize.is_some())
            .finish()
    }
}

fn invoke<P: Processor + ?Sized>(
    processor: &mut P,
    input: &P::Input,
    catch_panics: bool,
) -> Result<(), String> {
    if !catch_panics {
        return processor.process(input).map_err(|err| err.to_string());
    }

    match panic::catch_unwind(AssertUnwindSafe(|| processor.process(input))) {
        Ok(result) => result.map_err(|err| err.to_string()),
        Err(payload) => Err(format!("panicked: {}", panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// A processor that failed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFailure {
    pub node: NodeId,
    pub name: &'static str,
    pub reason: String,
}

/// What happened to the finalize hook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FinalizeOutcome {
    /// The policy did not allow finalization.
    #[default]
    Skipped,
    /// The hook ran and succeeded, or there was no hook.
    Completed,
    Failed(String),
}

/// Outcome of one [`ProcessorRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    order: Vec<NodeId>,
    processed: Vec<&'static str>,
    failures: Vec<ProcessFailure>,
    finalize: FinalizeOutcome,
}

impl RunReport {
    fn new(order: Vec<NodeId>) -> Self {
        Self {
            order,
            processed: Vec::new(),
            failures: Vec::new(),
            finalize: FinalizeOutcome::default(),
        }
    }

    /// The computed execution order, including processors that never ran.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Names of processors that succeeded, in execution order.
    pub fn processed(&self) -> &[&'static str] {
        &self.processed
    }

    pub fn failures(&self) -> &[ProcessFailure] {
        &self.failures
    }

    /// Processors that were never reached because the run stopped early.
    pub fn skipped(&self) -> usize {
        self.order.len() - self.processed.len() - self.failures.len()
    }

    pub fn finalize(&self) -> &FinalizeOutcome {
        &self.finalize
    }

    /// True if every processor succeeded and finalization did not fail.
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty() && !matches!(self.finalize, FinalizeOutcome::Failed(_))
    }
}
