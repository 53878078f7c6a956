//! Static markup plus the per-frame write of a `CardView` onto it.
//!
//! All markup is inserted once at mount; afterwards the shell only toggles
//! `hidden`, swaps section classes and updates text by element id.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::error::{CardError, Result};
use crate::typewriter::CURSOR;
use crate::view::CardView;

pub const ROOT_ID: &str = "card-root";

const MARKUP: &str = r#"
<div id="gate">
  <div class="hud-box" style="max-width:28rem;width:100%;">
    <h2 class="glow-text" style="text-align:center;">CLASSIFIED SYSTEM</h2>
    <p style="text-align:center;font-size:0.75rem;margin-bottom:2rem;">MINISTRY OF DEFENSE // CYBER DIVISION</p>
    <form id="gate-form" autocomplete="off">
      <label style="font-size:0.75rem;letter-spacing:0.2em;">SECURITY CLEARANCE REQUIRED</label>
      <input id="gate-input" type="text" placeholder="ENTER YOUR FUTURE RANK" autofocus>
      <p id="gate-error" hidden></p>
      <button type="submit" class="hud-btn">AUTHENTICATE</button>
    </form>
    <div style="margin-top:2rem;font-size:10px;text-align:center;opacity:0.5;">
      <p>AUTHORIZED PERSONNEL ONLY</p><p>IP LOGGED: ::1</p>
    </div>
  </div>
</div>
<div id="hud" hidden>
  <div><span>OP: ESHA</span> &nbsp; <span>STATUS: ACTIVE</span></div>
  <div><span>SECURE CONN</span></div>
</div>
<div id="boot" hidden><span id="boot-text"></span><span class="cursor-blink">_</span></div>
<main id="missions" hidden>
  <div id="landing">
    <h1 class="glow-text" style="font-family:'Black Ops One',cursive;font-size:3rem;text-transform:uppercase;">Mission: Captain Esha</h1>
    <div class="hud-box" style="max-width:36rem;margin-bottom:3rem;">
      <p><span class="glow-text">&gt; TARGET:</span> Esha<br>
      <span class="glow-text">&gt; OBJECTIVE:</span> Army Officer (Captain)<br>
      <span class="glow-text">&gt; CURRENT ASSET:</span> Computer Science Degree<br>
      <span class="glow-text">&gt; ANALYSIS:</span> <span class="gold-glow">The perfect combination.</span></p>
    </div>
    <button id="briefing-btn" class="hud-btn">INITIATE BRIEFING</button>
  </div>

  <section id="mission-1" class="section locked"><div class="hud-box">
    <div class="section-head"><h2 class="glow-text section-title"></h2><span class="badge"></span></div>
    <p>"I want to be a Captain. Why am I doing CS?"</p>
    <p style="opacity:0.8;font-size:0.875rem;">INTELLIGENCE REPORT: The subject believes these two paths are conflicting. Analysis suggests otherwise.</p>
    <button id="mission1-btn" class="hud-btn" style="width:100%;">REQUEST TACTICAL ANALYSIS</button>
    <div id="mission1-done" hidden style="border:1px solid #39FF14;padding:1rem;text-align:center;">
      <p class="glow-text">ANALYSIS COMPLETE</p><p style="font-size:0.75rem;">DATA TRANSMITTING TO TERMINAL 02...</p>
    </div>
  </div></section>

  <section id="mission-2" class="section locked"><div class="hud-box">
    <div class="section-head"><h2 class="glow-text section-title"></h2><span class="badge"></span></div>
    <p style="text-align:center;">Modern warfare is not just trenches.<br>It is <span class="gold-glow">Intelligence. Cyber Defense. Signals.</span></p>
    <p style="text-align:center;font-size:0.875rem;opacity:0.7;">The Army doesn't just need soldiers. They need <b style="color:#fff;">Hackers</b>.</p>
    <div id="meter-panel">
      <div class="meter-head"><span>ENCRYPTION LEVEL</span><span id="meter-integrity"></span></div>
      <div id="meter-track"><div id="meter-bar"></div></div>
      <button id="hack-btn" class="hud-btn"></button>
      <p class="unstable">CONNECTION UNSTABLE... MAINTAIN STREAM</p>
    </div>
    <div id="mission2-done" hidden style="text-align:center;">
      <h3 class="gold-glow">SYSTEM OVERRIDDEN</h3><p>Your CS degree is your weapon, Captain.</p>
    </div>
  </div></section>

  <section id="mission-3" class="section locked"><div class="hud-box">
    <div class="section-head"><h2 class="glow-text section-title"></h2><span class="badge"></span></div>
    <div id="mission3-prompt" style="text-align:center;">
      <p>Final authorization required to view personnel file.</p>
      <button id="mission3-btn" class="hud-btn gold">OPEN FILE: ESHA</button>
    </div>
    <div id="personnel-file" hidden style="text-align:center;">
      <h2 class="gold-glow" style="font-family:'Black Ops One',cursive;font-size:2.25rem;">CAPTAIN ESHA</h2>
      <div style="border-left:2px solid #FFD700;padding-left:1.5rem;text-align:left;max-width:32rem;margin:0 auto;">
        <p><span id="reveal-text"></span><span class="cursor-blink">_</span></p>
        <p class="glow-text" style="font-size:0.875rem;margin-top:2rem;">// END TRANSMISSION<br>// P.S. I believe in you.</p>
      </div>
    </div>
  </div></section>

  <footer>Top Secret // Eyes Only</footer>
</main>
"#;

/// Handles to every element the shell writes to or listens on.
pub struct Dom {
    pub root: Element,
    pub gate: Element,
    pub gate_form: Element,
    pub gate_input: HtmlInputElement,
    pub gate_error: Element,
    pub hud: Element,
    pub boot: Element,
    pub boot_text: Element,
    pub missions: Element,
    pub briefing_btn: Element,
    pub sections: [Element; 3],
    pub mission1_btn: Element,
    pub mission1_done: Element,
    pub meter_panel: Element,
    pub meter_bar: HtmlElement,
    pub meter_integrity: Element,
    pub hack_btn: Element,
    pub mission2_done: Element,
    pub mission3_prompt: Element,
    pub mission3_btn: Element,
    pub personnel_file: Element,
    pub reveal_text: Element,
}

impl Dom {
    pub fn build(doc: &Document) -> Result<Self> {
        let body = doc.body().ok_or(CardError::NoBody)?;
        let root = doc.create_element("div")?;
        root.set_id(ROOT_ID);
        root.set_inner_html(MARKUP);
        body.append_child(&root)?;

        let get = |id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| CardError::MissingElement(id.to_string()))
        };
        let cast_err = |id: &str| CardError::MissingElement(id.to_string());

        let sections = [get("mission-1")?, get("mission-2")?, get("mission-3")?];
        Ok(Self {
            gate: get("gate")?,
            gate_form: get("gate-form")?,
            gate_input: get("gate-input")?
                .dyn_into()
                .map_err(|_| cast_err("gate-input"))?,
            gate_error: get("gate-error")?,
            hud: get("hud")?,
            boot: get("boot")?,
            boot_text: get("boot-text")?,
            missions: get("missions")?,
            briefing_btn: get("briefing-btn")?,
            mission1_btn: get("mission1-btn")?,
            mission1_done: get("mission1-done")?,
            meter_panel: get("meter-panel")?,
            meter_bar: get("meter-bar")?
                .dyn_into()
                .map_err(|_| cast_err("meter-bar"))?,
            meter_integrity: get("meter-integrity")?,
            hack_btn: get("hack-btn")?,
            mission2_done: get("mission2-done")?,
            mission3_prompt: get("mission3-prompt")?,
            mission3_btn: get("mission3-btn")?,
            personnel_file: get("personnel-file")?,
            reveal_text: get("reveal-text")?,
            sections,
            root,
        })
    }

    pub fn apply(&self, view: &CardView) -> Result<()> {
        // Gate
        set_hidden(&self.gate, view.gate.is_none())?;
        if let Some(gate) = &view.gate {
            if self.gate_input.value() != gate.input {
                self.gate_input.set_value(&gate.input);
            }
            set_hidden(&self.gate_error, gate.error.is_none())?;
            self.gate_error.set_text_content(gate.error);
        }

        set_hidden(&self.hud, !view.show_hud())?;

        // Boot screen
        set_hidden(&self.boot, view.boot_text.is_none())?;
        if let Some(text) = &view.boot_text {
            self.boot_text.set_text_content(Some(without_cursor(text)));
        }

        set_hidden(&self.missions, !view.show_missions())?;

        for (el, section) in self.sections.iter().zip(view.sections.iter()) {
            let class = if section.is_active() {
                "section active"
            } else {
                "section locked"
            };
            el.set_class_name(class);
            if let Some(title) = el.query_selector(".section-title")? {
                title.set_text_content(Some(section.title));
            }
            if let Some(badge) = el.query_selector(".badge")? {
                badge.set_text_content(Some(section.badge()));
            }
        }

        // Mission 1
        set_hidden(&self.mission1_btn, view.mission1_done())?;
        set_hidden(&self.mission1_done, !view.mission1_done())?;

        // Mission 2
        set_hidden(&self.meter_panel, view.meter.complete)?;
        set_hidden(&self.mission2_done, !view.meter.complete)?;
        self.meter_bar
            .style()
            .set_property("width", &format!("{}%", view.meter.progress))?;
        self.meter_integrity
            .set_text_content(Some(&format!("{}% INTEGRITY", view.meter.integrity)));
        self.hack_btn.set_text_content(Some(view.meter.label));

        // Mission 3
        set_hidden(&self.mission3_prompt, view.mission3_done())?;
        set_hidden(&self.personnel_file, !view.mission3_done())?;
        if let Some(text) = &view.reveal_text {
            self.reveal_text.set_text_content(Some(without_cursor(text)));
        }
        Ok(())
    }

    pub fn remove(&self) {
        self.root.remove();
    }
}

/// The cursor is a separate blinking span in the markup.
fn without_cursor(rendered: &str) -> &str {
    rendered.strip_suffix(CURSOR).unwrap_or(rendered)
}

fn set_hidden(el: &Element, hidden: bool) -> Result<()> {
    if hidden {
        el.set_attribute("hidden", "")?;
    } else {
        el.remove_attribute("hidden")?;
    }
    Ok(())
}
