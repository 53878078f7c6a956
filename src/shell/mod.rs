//! Browser presentation shell.
//!
//! Owns the running `Card` in a thread-local, mounts the DOM and rain canvas,
//! and drives everything from one `requestAnimationFrame` loop: advance the
//! card clock to the frame timestamp, paint pending rain frames, write the
//! view onto the DOM, then perform any scrolls that came due.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, Window, window};

use crate::card::{Card, UiEvent};
use crate::config::CardConfig;
use crate::error::{CardError, Result};
use crate::mission::Anchor;
use crate::rng::XorShift;
use crate::view::CardView;

mod canvas;
mod dom;
mod input;
mod style;

pub use canvas::CANVAS_ID;
pub use dom::ROOT_ID;
pub use style::STYLE_ID;

struct Shell {
    card: Card<XorShift>,
    canvas: canvas::RainCanvas,
    dom: dom::Dom,
    // Skip DOM writes when nothing changed since the last frame.
    last_view: Option<CardView>,
    generation: Generation,
    // Pending requestAnimationFrame handle of this mount's loop.
    frame_handle: Rc<Cell<Option<i32>>>,
}

/// Tags one mount. A frame loop only drives the shell of its own mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Generation(u32);

impl Generation {
    fn next() -> Self {
        NEXT_GENERATION.with(|next| {
            let n = next.get().wrapping_add(1);
            next.set(n);
            Generation(n)
        })
    }

    fn owns(self, mounted: Option<Generation>) -> bool {
        mounted == Some(self)
    }
}

thread_local! {
    static SHELL: RefCell<Option<Shell>> = RefCell::new(None);
    static NEXT_GENERATION: Cell<u32> = const { Cell::new(0) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn start(config: CardConfig) -> Result<()> {
    if is_running() {
        return Err(CardError::AlreadyRunning);
    }
    let win = window().ok_or(CardError::NoWindow)?;
    let doc = win.document().ok_or(CardError::NoDocument)?;

    let (width, height) = viewport(&win)?;
    style::install(&doc)?;
    let canvas = canvas::RainCanvas::mount(&doc, width, height)?;
    let dom = dom::Dom::build(&doc)?;
    let card = Card::new(config, (width, height), XorShift::from_entropy(), now_ms(&win))?;

    input::wire(&dom)?;
    let generation = Generation::next();
    let frame_handle = Rc::new(Cell::new(None));
    SHELL.with(|cell| {
        *cell.borrow_mut() = Some(Shell {
            card,
            canvas,
            dom,
            last_view: None,
            generation,
            frame_handle: frame_handle.clone(),
        })
    });
    start_frame_loop(&win, generation, frame_handle)?;
    info!("card started");
    Ok(())
}

/// Tear the card down: timers cancelled, frame loop ends, markup removed.
pub fn stop() {
    let shell = SHELL.with(|cell| cell.borrow_mut().take());
    if let Some(mut shell) = shell {
        if let (Some(handle), Some(win)) = (shell.frame_handle.take(), window()) {
            if let Err(err) = win.cancel_animation_frame(handle) {
                warn!("cancel frame failed: {:?}", err);
            }
        }
        shell.card.teardown();
        shell.dom.remove();
        shell.canvas.remove();
        debug!("card stopped");
    }
}

pub fn is_running() -> bool {
    SHELL.with(|cell| cell.borrow().is_some())
}

/// Feed one UI event to the running card and redraw right away.
pub(crate) fn dispatch(event: UiEvent) {
    let Some(win) = window() else { return };
    let now = now_ms(&win);
    SHELL.with(|cell| {
        if let Some(shell) = cell.borrow_mut().as_mut() {
            shell.card.handle(event, now);
            shell.render(&win);
        }
    });
}

impl Shell {
    fn frame(&mut self, win: &Window, now: f64) {
        self.card.advance(now);
        self.render(win);
    }

    fn render(&mut self, win: &Window) {
        for frame in self.card.take_rain_frames() {
            if let Err(err) = self.canvas.paint(self.card.rain(), &frame) {
                warn!("rain paint failed: {err}");
            }
        }
        let view = self.card.view();
        if self.last_view.as_ref() != Some(&view) {
            if let Err(err) = self.dom.apply(&view) {
                warn!("view update failed: {err}");
            }
            self.last_view = Some(view);
        }
        for anchor in self.card.take_scrolls() {
            if let Err(err) = scroll_to(win, anchor) {
                warn!("scroll to #{} failed: {err}", anchor.dom_id());
            }
        }
    }
}

fn start_frame_loop(
    win: &Window,
    generation: Generation,
    handle: Rc<Cell<Option<i32>>>,
) -> Result<()> {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let h = handle.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        h.set(None);
        let Some(w) = window() else { return };
        let running = SHELL.with(|cell| match cell.borrow_mut().as_mut() {
            Some(shell) if generation.owns(Some(shell.generation)) => {
                shell.frame(&w, ts);
                true
            }
            _ => false,
        });
        if !running {
            debug!("frame loop {generation:?} ended");
            return;
        }
        if let Some(cb) = f.borrow().as_ref() {
            h.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = g.borrow().as_ref() {
        handle.set(Some(win.request_animation_frame(cb.as_ref().unchecked_ref())?));
    }
    Ok(())
}

fn scroll_to(win: &Window, anchor: Anchor) -> Result<()> {
    let doc = win.document().ok_or(CardError::NoDocument)?;
    let el = doc
        .get_element_by_id(anchor.dom_id())
        .ok_or_else(|| CardError::MissingElement(anchor.dom_id().to_string()))?;
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
    debug!("scrolled to #{}", anchor.dom_id());
    Ok(())
}

fn viewport(win: &Window) -> Result<(u32, u32)> {
    let w = win.inner_width()?.as_f64().unwrap_or(0.0);
    let h = win.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w.max(0.0) as u32, h.max(0.0) as u32))
}

fn now_ms(win: &Window) -> f64 {
    win.performance().map(|p| p.now()).unwrap_or(0.0)
}
