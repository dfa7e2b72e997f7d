// Shared native test doubles: a virtual-clock scheduler, a recording engine,
// recording text nodes and a counting surface. No browser APIs.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_snake::config::{Palette, Rgb};
use wasm_snake::engine::{Direction, Engine, GameStatus, World};
use wasm_snake::geometry::Rect;
use wasm_snake::lifecycle::Host;
use wasm_snake::render::{PixelSurface, Surface, TextSink};
use wasm_snake::{GameConfig, Result, Scheduler, Session};

/// Deterministic scheduler: tasks fire in due order and time jumps to each due time.
#[derive(Default)]
pub struct VirtualScheduler {
    now: Cell<f64>,
    queue: RefCell<Vec<(f64, Box<dyn FnOnce()>)>>,
    pub fired_at: RefCell<Vec<f64>>,
    pub max_pending: Cell<usize>,
    pub running: Cell<bool>,
}

impl VirtualScheduler {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fire at most `limit` tasks; returns how many fired.
    pub fn run(&self, limit: usize) -> usize {
        let mut fired = 0;
        while fired < limit {
            let next = {
                let mut q = self.queue.borrow_mut();
                if q.is_empty() {
                    break;
                }
                let (idx, _) = q
                    .iter()
                    .enumerate()
                    .min_by(|a, b| a.1.0.total_cmp(&b.1.0))
                    .expect("non-empty queue");
                q.remove(idx)
            };
            let (due, task) = next;
            self.now.set(due);
            self.fired_at.borrow_mut().push(due);
            assert!(!self.running.get(), "task fired while another was running");
            self.running.set(true);
            task();
            self.running.set(false);
            fired += 1;
        }
        fired
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_once(&self, delay_ms: f64, task: Box<dyn FnOnce()>) -> Result<()> {
        let mut q = self.queue.borrow_mut();
        q.push((self.now.get() + delay_ms, task));
        self.max_pending.set(self.max_pending.get().max(q.len()));
        Ok(())
    }
}

/// Text node that remembers everything written to it.
#[derive(Clone, Default)]
pub struct RecordingText(Rc<RefCell<Vec<String>>>);

impl RecordingText {
    pub fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().len()
    }
}

impl TextSink for RecordingText {
    fn set_text(&self, text: &str) {
        self.0.borrow_mut().push(text.to_string());
    }
}

/// Pixel surface that also counts draw calls.
#[derive(Clone)]
pub struct CountingSurface {
    pub pixels: PixelSurface,
    pub clears: usize,
    pub fills: usize,
    pub lines: usize,
}

impl CountingSurface {
    pub fn new(edge: u32) -> Self {
        Self { pixels: PixelSurface::new(edge, edge), clears: 0, fills: 0, lines: 0 }
    }

    pub fn draw_calls(&self) -> usize {
        self.clears + self.fills + self.lines
    }
}

impl Surface for CountingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.clears += 1;
        self.pixels.clear_rect(rect);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.fills += 1;
        self.pixels.fill_rect(rect, color);
    }

    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        self.lines += 1;
        self.pixels.stroke_line(x0, y0, x1, y1, color);
    }
}

/// Knobs shared between a test and the engine it has handed to a session.
#[derive(Clone, Default)]
pub struct Probe {
    pub directions: Rc<RefCell<Vec<Direction>>>,
    pub updates: Rc<Cell<usize>>,
    pub forced_status: Rc<Cell<Option<GameStatus>>>,
    pub overrun: Rc<Cell<bool>>,
}

/// Wraps a real [`World`] and records every command it receives.
pub struct RecordingEngine {
    pub inner: World,
    pub probe: Probe,
}

impl RecordingEngine {
    pub fn new(width: u32, snake_index: u32) -> (Self, Probe) {
        let probe = Probe::default();
        let inner = World::with_reward_picker(width, snake_index, Box::new(|_| 0));
        (Self { inner, probe: probe.clone() }, probe)
    }
}

impl Engine for RecordingEngine {
    fn width(&self) -> u32 {
        self.inner.width()
    }
    fn start(&mut self) {
        self.inner.start();
    }
    fn change_direction(&mut self, direction: Direction) {
        self.probe.directions.borrow_mut().push(direction);
        self.inner.change_direction(direction);
    }
    fn update(&mut self) {
        self.probe.updates.set(self.probe.updates.get() + 1);
        self.inner.update();
    }
    fn status(&self) -> Option<GameStatus> {
        self.probe.forced_status.get().or(self.inner.status())
    }
    fn status_text(&self) -> String {
        match self.probe.forced_status.get() {
            Some(GameStatus::Lost) => "You Lost!".to_string(),
            Some(GameStatus::Won) => "You Won!".to_string(),
            _ => self.inner.status_text(),
        }
    }
    fn snake_cells(&self) -> &[u32] {
        self.inner.snake_cells()
    }
    fn snake_length(&self) -> usize {
        self.inner.snake_length() + usize::from(self.probe.overrun.get())
    }
    fn reward_cell(&self) -> Option<u32> {
        self.inner.reward_cell()
    }
    fn epoch(&self) -> u64 {
        self.inner.epoch()
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub reloads: Cell<usize>,
}

impl Host for RecordingHost {
    fn reload(&self) -> Result<()> {
        self.reloads.set(self.reloads.get() + 1);
        Ok(())
    }
}

/// Palette where grid, head, body and reward are all distinct.
pub fn distinct_palette() -> Palette {
    Palette {
        grid: Rgb(10, 10, 10),
        head: Rgb(0x78, 0x78, 0x78),
        body: Rgb(0, 0, 200),
        reward: Rgb(0xff, 0, 0),
    }
}

pub fn test_config(width: u32) -> GameConfig {
    let mut config = GameConfig::default();
    config.board.width = width;
    config.palette = distinct_palette();
    config
}

pub type TestSession = Session<RecordingEngine, CountingSurface, RecordingText>;

pub struct Harness {
    pub session: Rc<RefCell<TestSession>>,
    pub scheduler: Rc<VirtualScheduler>,
    pub host: RecordingHost,
    pub probe: Probe,
    pub status: RecordingText,
    pub control: RecordingText,
}

/// An armed session on a `width`-wide board with the snake head at `snake_index`.
pub fn harness(width: u32, snake_index: u32) -> Harness {
    let config = test_config(width);
    let (engine, probe) = RecordingEngine::new(width, snake_index);
    let status = RecordingText::default();
    let control = RecordingText::default();
    let surface = CountingSurface::new(config.board.canvas_px());
    let mut session = Session::new(config, engine, surface, status.clone(), control.clone())
        .expect("valid session");
    session.arm().expect("arm");
    Harness {
        session: Rc::new(RefCell::new(session)),
        scheduler: Rc::new(VirtualScheduler::default()),
        host: RecordingHost::default(),
        probe,
        status,
        control,
    }
}
