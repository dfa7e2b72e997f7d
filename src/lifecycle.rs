//! Start / restart control.
//!
//! The control starts the loop while the engine has not started yet; in any
//! other state it reloads the page, which throws the whole session away.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;

use crate::config::Labels;
use crate::engine::{Engine, GameStatus};
use crate::error::Result;
use crate::game_loop::{LoopState, Scheduler, Session, schedule_tick};
use crate::render::{Surface, TextSink};

/// What activating the control resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    StartLoop,
    Reload,
}

/// Owner of the page; a reload discards every session on it.
pub trait Host {
    fn reload(&self) -> Result<()>;
}

/// Control text for a given engine status.
pub fn control_label(status: Option<GameStatus>, labels: &Labels) -> &str {
    match status {
        None => &labels.start,
        Some(GameStatus::Playing) => &labels.in_progress,
        Some(GameStatus::Won) | Some(GameStatus::Lost) => &labels.play_again,
    }
}

impl<E: Engine, S: Surface, T: TextSink> Session<E, S, T> {
    /// Put the page in its waiting-to-start state and draw the opening board.
    pub fn arm(&mut self) -> Result<()> {
        self.state = LoopState::Idle;
        self.control
            .set_text(control_label(self.engine.status(), &self.config.labels));
        self.draw()?;
        info!(
            "armed {}x{} board, snake at {:?}",
            self.config.board.width,
            self.config.board.width,
            self.engine.snake_cells().first()
        );
        Ok(())
    }

    /// Decide what the control does now. Starting happens here; scheduling the
    /// first tick and reloading are left to the caller.
    pub fn activate_control(&mut self) -> Result<ControlAction> {
        if self.state == LoopState::Failed || self.engine.status().is_some() {
            return Ok(ControlAction::Reload);
        }
        self.control.set_text(&self.config.labels.in_progress);
        self.engine.start();
        self.state = LoopState::Running;
        self.draw()?;
        info!("game started");
        Ok(ControlAction::StartLoop)
    }
}

/// Click handler body: start the loop or reload the page.
pub fn activate<E, S, T, Sch, H>(
    session: &Rc<RefCell<Session<E, S, T>>>,
    scheduler: &Rc<Sch>,
    host: &H,
) -> Result<ControlAction>
where
    E: Engine + 'static,
    S: Surface + 'static,
    T: TextSink + 'static,
    Sch: Scheduler + ?Sized + 'static,
    H: Host + ?Sized,
{
    let action = session.borrow_mut().activate_control();
    match action {
        Ok(ControlAction::StartLoop) => {
            schedule_tick(Rc::clone(session), Rc::clone(scheduler));
        }
        Ok(ControlAction::Reload) => {
            info!("reloading page");
            session.borrow_mut().stop();
            host.reload()?;
        }
        Err(ref e) => session.borrow_mut().fail(e),
    }
    action
}
