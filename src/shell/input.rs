//! DOM listeners. Each one turns a browser event into a `UiEvent` and hands
//! it to the running card; after `stop_card` they find no card and do nothing.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use super::{dispatch, dom::Dom};
use crate::card::UiEvent;
use crate::error::Result;

pub fn wire(dom: &Dom) -> Result<()> {
    // Form submit (button click or Enter in the field).
    listen(&dom.gate_form, "submit", |evt: Event| {
        evt.prevent_default();
        dispatch(UiEvent::GateSubmit);
    })?;

    {
        let field = dom.gate_input.clone();
        listen(&dom.gate_input, "input", move |_evt: Event| {
            dispatch(UiEvent::GateInput(field.value()));
        })?;
    }

    listen(&dom.briefing_btn, "click", |_evt: Event| dispatch(UiEvent::Briefing))?;
    listen(&dom.mission1_btn, "click", |_evt: Event| dispatch(UiEvent::Mission1Pressed))?;
    listen(&dom.mission3_btn, "click", |_evt: Event| dispatch(UiEvent::Mission3Pressed))?;

    // Pulses fire on press-down, not click, so rapid tapping counts every press.
    listen(&dom.hack_btn, "mousedown", |_evt: Event| dispatch(UiEvent::HackPulse))?;
    listen(&dom.hack_btn, "touchstart", |evt: Event| {
        // Suppress the emulated mousedown that would double count.
        evt.prevent_default();
        dispatch(UiEvent::HackPulse);
    })?;
    Ok(())
}

fn listen<F>(target: &Element, kind: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the elements; stop_card detaches the elements.
    closure.forget();
    Ok(())
}

