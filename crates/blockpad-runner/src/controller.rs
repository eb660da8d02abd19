//! The run controller: one generate → execute → settle cycle at a time.

use std::time::Duration;

use blockpad_codegen::CodeGenerator;
use blockpad_graph::BlockGraph;

use crate::channel::OutputChannel;

/// User-facing marker for a graph that generated nothing to run.
pub const MSG_EMPTY_PROGRAM: &str = "Program kosong - tidak ada blok untuk dijalankan";
/// User-facing marker for a run that completed without producing output.
pub const MSG_NO_OUTPUT: &str = "Program selesai dijalankan (tidak ada output)";

/// Where the controller is in its cycle. Cyclic, no terminal state: every
/// run returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Settling,
}

/// Delays in the run cycle. Defaults mirror the playground UI timings; tests
/// shrink them (or run under paused time) so a cycle costs nothing.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Pause before generation so a UI can repaint its running indicator.
    pub debounce: Duration,
    /// The settle window: how long after execution to wait before deciding
    /// the run produced no output.
    pub settle: Duration,
    /// Pause before start is re-enabled.
    pub cooldown: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            settle: Duration::from_millis(50),
            cooldown: Duration::from_millis(1000),
        }
    }
}

/// What a run observed when it started, for the no-output comparison.
#[derive(Debug, Clone, Copy)]
struct RunSession {
    start_len: usize,
}

/// Drives one run at a time and owns the output channel.
///
/// Every failure inside a cycle is absorbed into a single channel entry; the
/// state machine always reaches `Idle` again. The one undefended case is a
/// generated program whose execution never returns: there is no timeout
/// around execution, so such a program stalls the whole pipeline.
pub struct RunController {
    generator: CodeGenerator,
    channel: OutputChannel,
    config: RunConfig,
    state: RunState,
}

impl RunController {
    pub fn new(generator: CodeGenerator) -> Self {
        Self::with_config(generator, RunConfig::default())
    }

    pub fn with_config(generator: CodeGenerator, config: RunConfig) -> Self {
        Self {
            generator,
            channel: OutputChannel::new(),
            config,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn channel(&self) -> &OutputChannel {
        &self.channel
    }

    /// Run one full cycle against the given graph snapshot.
    ///
    /// Returns `false` without doing anything when a run is already in
    /// flight (at most one run at a time); otherwise runs to completion and
    /// returns `true` once the controller is back at `Idle`.
    pub async fn start(&mut self, graph: &BlockGraph) -> bool {
        if self.state != RunState::Idle {
            tracing::debug!(state = ?self.state, "start ignored, run already in flight");
            return false;
        }
        self.state = RunState::Running;
        let session = RunSession {
            start_len: self.channel.len(),
        };

        if !self.config.debounce.is_zero() {
            tokio::time::sleep(self.config.debounce).await;
        }

        match self.generator.generate(graph) {
            Err(err) => {
                tracing::error!(%err, "code generation failed");
                self.channel.append(format!("Error: {err}"));
            }
            Ok(code) if code.trim().is_empty() => {
                tracing::info!("nothing to run");
                self.channel.append(MSG_EMPTY_PROGRAM);
            }
            Ok(code) => {
                tracing::debug!(bytes = code.len(), "executing generated program");
                if let Err(err) = blockpad_eval::execute(&code, &mut self.channel) {
                    tracing::error!(%err, "execution failed");
                    self.channel.append(format!("Error: {err}"));
                }
            }
        }

        self.settle(session).await;
        true
    }

    /// Clear the output log.
    ///
    /// Independent of the state machine: it does not touch Running/Settling.
    /// Resetting while a run is in flight races with that run's own appends,
    /// which may reappear after the clear.
    pub fn reset(&mut self) {
        self.channel.reset();
    }

    async fn settle(&mut self, session: RunSession) {
        self.state = RunState::Settling;
        tokio::time::sleep(self.config.settle).await;

        // Execution is synchronous, so by now everything the run will ever
        // emit has landed. If nothing did, say so: "ran and did nothing" is
        // not otherwise observable.
        if self.channel.len() == session.start_len {
            self.channel.append(MSG_NO_OUTPUT);
        }

        tokio::time::sleep(self.config.cooldown).await;
        self.state = RunState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpad_codegen::Result as GenResult;
    use blockpad_graph::{BlockDefinition, BlockInstance, Catalog};

    fn fast_config() -> RunConfig {
        RunConfig {
            debounce: Duration::ZERO,
            settle: Duration::from_millis(5),
            cooldown: Duration::from_millis(5),
        }
    }

    fn setup() -> (Catalog, CodeGenerator) {
        let mut catalog = Catalog::stock();
        let mut generator = CodeGenerator::with_builtins();
        crate::init::install_print_block(&mut catalog, &mut generator);
        (catalog, generator)
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_ignored_while_not_idle() {
        let (catalog, generator) = setup();
        let mut controller = RunController::with_config(generator, fast_config());
        controller.state = RunState::Settling;

        let mut graph = BlockGraph::new();
        graph.add_block(&catalog, "text_print").unwrap();
        assert!(!controller.start(&graph).await);
        assert!(controller.channel().is_empty());
        assert_eq!(controller.state(), RunState::Settling);
    }

    #[tokio::test(start_paused = true)]
    async fn controller_returns_to_idle_after_a_run() {
        let (catalog, generator) = setup();
        let mut controller = RunController::with_config(generator, fast_config());

        let mut graph = BlockGraph::new();
        graph.add_block(&catalog, "text_print").unwrap();
        assert!(controller.start(&graph).await);
        assert_eq!(controller.state(), RunState::Idle);
    }

    // A statement generator whose output runs without emitting anything,
    // to reach the settle window's no-output branch.
    fn silent_statement(
        _gen: &CodeGenerator,
        _graph: &BlockGraph,
        _block: &BlockInstance,
    ) -> GenResult<String> {
        Ok("\"noop\";\n".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn silent_run_gets_the_no_output_marker() {
        let (mut catalog, mut generator) = setup();
        catalog.register(BlockDefinition::statement("silent"));
        generator.register_statement("silent", silent_statement);
        let mut controller = RunController::with_config(generator, fast_config());

        let mut graph = BlockGraph::new();
        graph.add_block(&catalog, "silent").unwrap();
        controller.start(&graph).await;

        let events = controller.channel().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text, MSG_NO_OUTPUT);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_is_independent_of_the_state_machine() {
        let (catalog, generator) = setup();
        let mut controller = RunController::with_config(generator, fast_config());

        let graph = crate::init::seed_example_graph(&catalog).unwrap();
        controller.start(&graph).await;
        assert_eq!(controller.channel().len(), 1);

        controller.reset();
        assert!(controller.channel().is_empty());
        assert_eq!(controller.state(), RunState::Idle);
    }
}
