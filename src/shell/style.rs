//! Stylesheet injected at mount. Military HUD / CRT look.

use web_sys::Document;

use crate::error::Result;

pub const STYLE_ID: &str = "cc-style";

const CSS: &str = r#"
:root { --bg: #0a0f05; --term: #0f1a0b; --text: #8FBC8F; --neon: #39FF14; --gold: #FFD700; --danger: #ff3333; }
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg); color: var(--text); font-family: 'Courier Prime', monospace; overflow-x: hidden; }
[hidden] { display: none !important; }
#rain-canvas { position: fixed; top: 0; left: 0; z-index: 0; opacity: 0.15; pointer-events: none; }
#card-root::before { content: " "; position: fixed; inset: 0; z-index: 999; pointer-events: none;
  background: linear-gradient(rgba(18,16,16,0) 50%, rgba(0,0,0,0.25) 50%), linear-gradient(90deg, rgba(255,0,0,0.06), rgba(0,255,0,0.02), rgba(0,0,255,0.06));
  background-size: 100% 2px, 3px 100%; }
.hud-box { background: rgba(15,26,11,0.9); border: 1px solid var(--text); box-shadow: 0 0 10px rgba(57,255,20,0.1); position: relative; padding: 2rem; }
.hud-btn { background: transparent; border: 1px solid var(--neon); color: var(--neon); font-family: 'Black Ops One', system-ui, cursive;
  text-transform: uppercase; letter-spacing: 2px; cursor: pointer; padding: 1rem 2rem; transition: all 0.3s ease; }
.hud-btn:hover { background: var(--neon); color: #000; box-shadow: 0 0 15px var(--neon); }
.hud-btn:active { transform: scale(0.98); }
.hud-btn.gold { border-color: var(--gold); color: var(--gold); }
.cursor-blink { animation: blink 1s step-end infinite; }
@keyframes blink { 50% { opacity: 0; } }
.glow-text { text-shadow: 0 0 5px var(--neon); color: var(--neon); }
.gold-glow { text-shadow: 0 0 10px var(--gold); color: var(--gold); }
#gate { position: fixed; inset: 0; z-index: 50; background: #000; display: flex; align-items: center; justify-content: center; padding: 1rem; }
#gate form { display: flex; flex-direction: column; gap: 1rem; }
#gate-input { background: var(--term); border: 1px solid var(--neon); color: var(--neon); padding: 0.75rem; font-family: monospace; outline: none; }
#gate-error { color: var(--danger); font-size: 0.75rem; }
#hud { position: fixed; top: 0; left: 0; width: 100%; padding: 0.5rem; display: flex; justify-content: space-between; z-index: 50;
  pointer-events: none; color: var(--neon); font-size: 0.75rem; background: rgba(0,0,0,0.5); border-bottom: 1px solid rgba(57,255,20,0.3); }
#boot { height: 100vh; display: flex; align-items: center; justify-content: center; color: var(--neon); padding: 2rem; position: relative; z-index: 1; }
#landing, .section { min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 1rem; position: relative; z-index: 1; }
.section { transition: all 0.7s; }
.section.locked { opacity: 0.2; filter: blur(2px); pointer-events: none; }
.section .hud-box { width: 100%; max-width: 48rem; }
.section-head { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid var(--neon); padding-bottom: 1rem; margin-bottom: 1.5rem; }
.badge { font-size: 0.75rem; border: 1px solid var(--neon); color: var(--neon); padding: 0.25rem 0.5rem; }
.locked .badge { border-color: var(--danger); color: var(--danger); }
#meter-track { width: 100%; height: 1.5rem; border: 1px solid var(--neon); padding: 0.25rem; margin-bottom: 1.5rem; }
#meter-bar { height: 100%; width: 0%; background: var(--neon); transition: width 75ms linear; }
.meter-head { display: flex; justify-content: space-between; font-size: 0.75rem; color: var(--neon); margin-bottom: 0.5rem; }
#hack-btn { width: 100%; }
.unstable { font-size: 0.65rem; text-align: center; color: #f87171; }
#reveal-text { color: #e0e0e0; font-size: 1.125rem; line-height: 1.6; }
footer { padding: 3rem 0; text-align: center; font-size: 0.65rem; letter-spacing: 0.5em; text-transform: uppercase; color: rgba(57,255,20,0.5); position: relative; z-index: 1; }
"#;

pub fn install(doc: &Document) -> Result<()> {
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(CSS));
    match doc.head() {
        Some(head) => head.append_child(&style)?,
        None => doc.body().ok_or(crate::error::CardError::NoBody)?.append_child(&style)?,
    };
    Ok(())
}
