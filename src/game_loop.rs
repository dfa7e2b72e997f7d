//! Timer-driven tick loop.
//!
//! One [`Session`] bundles everything a game instance owns: board config, the
//! engine, the drawing surface, the status / control text nodes and the loop's
//! cancel token. The loop is a chain of one-shot callbacks: a tick schedules its
//! successor only after its own draw has returned, so at most one callback is
//! ever pending and the engine is never touched by two ticks at once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::engine::{Direction, Engine, GameStatus};
use crate::error::{GameError, Result};
use crate::geometry::board_rect;
use crate::input;
use crate::render::{self, Surface, TextSink};

/// Runs a callback once after a delay.
pub trait Scheduler {
    fn schedule_once(&self, delay_ms: f64, task: Box<dyn FnOnce()>) -> Result<()>;
}

/// A task that runs at most once, from whichever holder gets to it first.
#[derive(Clone)]
pub struct OnceTask(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl OnceTask {
    pub fn new(task: Box<dyn FnOnce()>) -> Self {
        Self(Rc::new(RefCell::new(Some(task))))
    }

    /// Returns whether this call ran the task.
    pub fn run(&self) -> bool {
        let task = self.0.borrow_mut().take();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}

/// Hand `task` to `request` for deferred execution. If the request is refused
/// the task runs immediately, so a tick is never lost.
pub fn defer_or_run<R>(task: Box<dyn FnOnce()>, request: R)
where
    R: FnOnce(OnceTask) -> Result<()>,
{
    let once = OnceTask::new(task);
    if let Err(e) = request(once.clone()) {
        warn!("deferral refused ({}); running the task now", e);
        once.run();
    }
}

/// Shared stop flag, checked before every tick.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Armed, waiting for the start action.
    Idle,
    Running,
    /// Engine reported won / lost; the loop has stopped for good.
    Terminal,
    /// A tick failed; the session is dead until the page reloads.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Ended(GameStatus),
    Cancelled,
}

pub struct Session<E, S, T> {
    pub(crate) config: GameConfig,
    pub(crate) engine: E,
    pub(crate) surface: S,
    pub(crate) status_text: T,
    pub(crate) control: T,
    pub(crate) state: LoopState,
    pub(crate) cancel: CancelToken,
    ticks: u64,
}

impl<E: Engine, S: Surface, T: TextSink> Session<E, S, T> {
    pub fn new(config: GameConfig, engine: E, surface: S, status_text: T, control: T) -> Result<Self> {
        config.validate()?;
        if engine.width() != config.board.width {
            return Err(GameError::InvalidConfig(format!(
                "engine width {} does not match board width {}",
                engine.width(),
                config.board.width
            )));
        }
        Ok(Self {
            config,
            engine,
            surface,
            status_text,
            control,
            state: LoopState::Idle,
            cancel: CancelToken::new(),
            ticks: 0,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn delay_ms(&self) -> f64 {
        self.config.delay_ms()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Stop the loop before its next tick. The engine is left untouched.
    pub fn stop(&mut self) {
        if !self.cancel.is_cancelled() {
            info!("game loop cancelled after {} ticks", self.ticks);
        }
        self.cancel.cancel();
    }

    /// Full redraw of the current engine state.
    pub fn draw(&mut self) -> Result<()> {
        render::draw_frame(
            &self.engine,
            &mut self.surface,
            &self.status_text,
            &self.config.board,
            &self.config.palette,
        )
    }

    pub fn handle_key(&mut self, code: &str) -> Option<Direction> {
        let direction = input::route_key(&mut self.engine, code)?;
        debug!("direction {:?}", direction);
        Some(direction)
    }

    /// One loop iteration. Terminal status is checked before the engine moves.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.cancel.is_cancelled() {
            return Ok(TickOutcome::Cancelled);
        }
        if self.state != LoopState::Running {
            warn!("tick fired in state {:?}; ignoring", self.state);
            return Ok(TickOutcome::Cancelled);
        }
        if let Some(status) = self.engine.status().filter(|s| s.is_terminal()) {
            self.finish(status);
            return Ok(TickOutcome::Ended(status));
        }

        self.surface.clear_rect(board_rect(&self.config.board));
        self.engine.update();
        self.ticks += 1;
        self.draw()?;
        debug!("tick {} drawn", self.ticks);
        Ok(TickOutcome::Continue)
    }

    fn finish(&mut self, status: GameStatus) {
        self.state = LoopState::Terminal;
        render::draw_game_status(&self.engine, &self.status_text);
        self.control.set_text(&self.config.labels.play_again);
        info!("game ended: {:?} after {} ticks", status, self.ticks);
    }

    /// Fatal error: log it, stop the loop and show it instead of freezing.
    pub fn fail(&mut self, err: &GameError) {
        error!("game loop stopped: {}", err);
        self.state = LoopState::Failed;
        self.cancel.cancel();
        self.status_text.set_text(&format!("Error: {}", err));
        self.control.set_text(&self.config.labels.play_again);
    }
}

/// Queue the next tick. The callback re-queues itself only while the game runs.
pub fn schedule_tick<E, S, T, Sch>(session: Rc<RefCell<Session<E, S, T>>>, scheduler: Rc<Sch>)
where
    E: Engine + 'static,
    S: Surface + 'static,
    T: TextSink + 'static,
    Sch: Scheduler + ?Sized + 'static,
{
    let delay = session.borrow().delay_ms();
    let task_session = Rc::clone(&session);
    let task_scheduler = Rc::clone(&scheduler);
    let queued = scheduler.schedule_once(
        delay,
        Box::new(move || {
            let outcome = task_session.borrow_mut().tick();
            match outcome {
                Ok(TickOutcome::Continue) => schedule_tick(task_session, task_scheduler),
                Ok(TickOutcome::Ended(_)) | Ok(TickOutcome::Cancelled) => {}
                Err(e) => task_session.borrow_mut().fail(&e),
            }
        }),
    );
    if let Err(e) = queued {
        session.borrow_mut().fail(&e);
    }
}
