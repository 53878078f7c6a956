//! Captain Card core crate.
//!
//! An interactive greeting card for the browser: a cosmetic password gate, a
//! typewriter boot sequence, then three unlock screens (a button, a decaying
//! "hack" meter, a final reveal) over a falling-glyph background.
//!
//! Everything with behaviour lives in DOM-free modules (`card`, `mission`,
//! `meter`, `gate`, `typewriter`, `rain`, `timer`) so it runs under native
//! tests; `shell` is the thin browser layer started by `start_card()`.

use wasm_bindgen::prelude::*;

pub mod card;
pub mod config;
pub mod error;
pub mod gate;
pub mod meter;
pub mod mission;
pub mod rain;
pub mod rng;
pub mod shell;
pub mod timer;
pub mod typewriter;
pub mod view;

pub use card::{Card, UiEvent};
pub use config::CardConfig;
pub use error::CardError;
pub use mission::{Anchor, Mission, SectionState, Stage, Transition};
pub use view::CardView;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    {
        // A second init (hot reload) fails harmlessly.
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_card() -> Result<(), JsValue> {
    shell::start(CardConfig::default()).map_err(Into::into)
}

/// Start with JSON overrides, e.g. `{"passphrase": "major"}`. Unknown keys are
/// rejected; missing keys keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_card_with_config(json: &str) -> Result<(), JsValue> {
    let config = CardConfig::from_json(json)?;
    shell::start(config).map_err(Into::into)
}

#[wasm_bindgen]
pub fn stop_card() {
    shell::stop();
}

#[wasm_bindgen]
pub fn card_running() -> bool {
    shell::is_running()
}
