//! Browser wiring: DOM lookup, listeners, timers.
//!
//! Nothing in here holds game rules. It builds a [`Session`] over the page's
//! canvas and text nodes, then hands keyboard and click events to it.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window, window};

use crate::config::GameConfig;
use crate::engine::World;
use crate::error::{GameError, Result};
use crate::game_loop::{CancelToken, Scheduler, Session, defer_or_run};
use crate::lifecycle::{self, Host};
use crate::random::random_below;
use crate::render::CanvasSurface;

type WebSession = Session<World, CanvasSurface, HtmlElement>;

/// `setTimeout` for the delay, then the tick itself runs in the next animation frame.
pub struct WebScheduler {
    window: Window,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WebScheduler {
    fn schedule_once(&self, delay_ms: f64, task: Box<dyn FnOnce()>) -> Result<()> {
        let frame_window = self.window.clone();
        let on_timeout = Closure::once_into_js(move || {
            defer_or_run(task, |once| {
                let on_frame = Closure::once_into_js(move |_ts: f64| {
                    once.run();
                });
                frame_window.request_animation_frame(on_frame.unchecked_ref())?;
                Ok(())
            });
        });
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.unchecked_ref(),
                delay_ms.round() as i32,
            )
            .map_err(|e| GameError::Schedule(format!("{:?}", e)))?;
        Ok(())
    }
}

pub struct WebHost {
    window: Window,
}

impl Host for WebHost {
    fn reload(&self) -> Result<()> {
        self.window.location().reload()?;
        Ok(())
    }
}

/// Handle returned to JS; dropping it does not stop the game, `stop()` does.
#[wasm_bindgen]
pub struct GameHandle {
    cancel: CancelToken,
}

#[wasm_bindgen]
impl GameHandle {
    /// Cancel the tick loop before its next iteration.
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            info!("game stopped by host page");
        }
        self.cancel.cancel();
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

pub fn boot(config: GameConfig) -> Result<GameHandle> {
    config.validate()?;
    let win = window().ok_or(GameError::MissingGlobal("window"))?;
    let doc = win.document().ok_or(GameError::MissingGlobal("document"))?;

    let canvas: HtmlCanvasElement = match doc.get_element_by_id(&config.elements.canvas) {
        Some(el) => el
            .dyn_into()
            .map_err(|_| GameError::MissingElement(config.elements.canvas.clone()))?,
        None => create_element(&doc, "canvas", &config.elements.canvas)?
            .dyn_into()
            .map_err(|_| GameError::MissingElement(config.elements.canvas.clone()))?,
    };
    let edge = config.board.canvas_px();
    canvas.set_width(edge);
    canvas.set_height(edge);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| GameError::MissingElement(format!("{} 2d context", config.elements.canvas)))?
        .dyn_into()
        .map_err(|_| GameError::MissingElement(format!("{} 2d context", config.elements.canvas)))?;

    let status = find_or_create(&doc, "div", &config.elements.status)?;
    let control = find_or_create(&doc, "button", &config.elements.control)?;

    let snake_index = random_below(config.board.cell_count()) as u32;
    let world = World::new(config.board.width, snake_index);
    let session: Rc<RefCell<WebSession>> = Rc::new(RefCell::new(Session::new(
        config,
        world,
        CanvasSurface::new(ctx),
        status,
        control.clone(),
    )?));
    session.borrow_mut().arm()?;

    listen_for_arrows(&doc, Rc::clone(&session))?;

    let scheduler = Rc::new(WebScheduler::new(win.clone()));
    let host = WebHost { window: win };
    let click_session = Rc::clone(&session);
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        if let Err(e) = lifecycle::activate(&click_session, &scheduler, &host) {
            error!("control action failed: {}", e);
        }
    }) as Box<dyn FnMut(_)>);
    control.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    let cancel = session.borrow().cancel_token();
    Ok(GameHandle { cancel })
}

/// Input router: one document-level keydown listener for the page's lifetime.
fn listen_for_arrows(doc: &Document, session: Rc<RefCell<WebSession>>) -> Result<()> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        match session.try_borrow_mut() {
            Ok(mut s) => {
                s.handle_key(&evt.code());
            }
            Err(_) => warn!("key {} dropped: session busy", evt.code()),
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn find_or_create(doc: &Document, tag: &str, id: &str) -> Result<HtmlElement> {
    let el = match doc.get_element_by_id(id) {
        Some(el) => el,
        None => create_element(doc, tag, id)?,
    };
    el.dyn_into()
        .map_err(|_| GameError::MissingElement(id.to_string()))
}

fn create_element(doc: &Document, tag: &str, id: &str) -> Result<web_sys::Element> {
    let body = doc.body().ok_or(GameError::MissingGlobal("document body"))?;
    let el = doc.create_element(tag)?;
    el.set_id(id);
    body.append_child(&el)?;
    info!("created missing <{} id=\"{}\">", tag, id);
    Ok(el)
}
