//! The card's single state container.
//!
//! `Card` owns every piece of UI state plus the timer queue that drives it.
//! The shell feeds it DOM events through `handle` and the frame clock through
//! `advance`, then reads back a `CardView`, pending rain frames and pending
//! scroll requests. Nothing here touches the DOM, so the whole flow runs under
//! native tests with a hand-driven clock.

use log::{debug, info};

use crate::config::CardConfig;
use crate::error::Result;
use crate::gate::{AuthGate, GateOutcome};
use crate::meter::{DecayMeter, PulseOutcome};
use crate::mission::{Anchor, Mission, MissionMachine, Stage, Transition, TransitionError};
use crate::rain::{RainField, RainFrame};
use crate::rng::{Entropy, XorShift};
use crate::timer::{TimerId, Timers};
use crate::typewriter::{Typewriter, TypewriterEvent};
use crate::view::{CardView, GATE_ERROR_TEXT, GateView, MeterView};

/// Rain frames the shell has not painted yet; older ones are dropped.
const MAX_PENDING_RAIN_FRAMES: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// Text field changed.
    GateInput(String),
    GateSubmit,
    /// "INITIATE BRIEFING" on the landing screen.
    Briefing,
    Mission1Pressed,
    /// Press-down on the meter button.
    HackPulse,
    Mission3Pressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CardTimer {
    RainFrame,
    BootDelay,
    BootType,
    RevealType,
    Decay,
    ClearGateError,
    Scroll(Anchor),
}

/// Live timer per owner, so each can be cancelled on teardown or supersede.
#[derive(Debug, Default)]
struct Slots {
    rain: Option<TimerId>,
    boot_delay: Option<TimerId>,
    boot_type: Option<TimerId>,
    reveal_type: Option<TimerId>,
    decay: Option<TimerId>,
    gate_error: Option<TimerId>,
    scroll: Option<TimerId>,
}

pub struct Card<R: Entropy = XorShift> {
    config: CardConfig,
    machine: MissionMachine,
    gate: AuthGate,
    meter: DecayMeter,
    boot_text: Option<Typewriter>,
    reveal_text: Option<Typewriter>,
    rain: RainField,
    rng: R,
    timers: Timers<CardTimer>,
    slots: Slots,
    rain_frames: Vec<RainFrame>,
    scrolls: Vec<Anchor>,
    torn_down: bool,
}

impl<R: Entropy> Card<R> {
    /// Mount the card at clock `now`. The rain and the meter decay start
    /// running immediately, as on page load.
    pub fn new(config: CardConfig, viewport: (u32, u32), rng: R, now: f64) -> Result<Self> {
        config.validate()?;
        let rain = RainField::new(
            viewport.0,
            viewport.1,
            config.rain_glyph_px,
            &config.rain_alphabet,
            config.rain_reset_probability,
        );
        let mut card = Self {
            gate: AuthGate::new(&config.passphrase),
            meter: DecayMeter::new(config.meter_step, config.decay_step),
            machine: MissionMachine::new(),
            boot_text: None,
            reveal_text: None,
            rain,
            rng,
            timers: Timers::new(now),
            slots: Slots::default(),
            rain_frames: Vec::new(),
            scrolls: Vec::new(),
            torn_down: false,
            config,
        };
        card.slots.rain = Some(card.timers.every(card.config.rain_interval_ms, CardTimer::RainFrame));
        card.slots.decay = Some(card.timers.every(card.config.decay_interval_ms, CardTimer::Decay));
        info!(
            "card mounted: {}x{} viewport, {} rain columns",
            viewport.0,
            viewport.1,
            card.rain.columns()
        );
        Ok(card)
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.machine.stage()
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn meter(&self) -> &DecayMeter {
        &self.meter
    }

    pub fn rain(&self) -> &RainField {
        &self.rain
    }

    pub fn boot_typewriter(&self) -> Option<&Typewriter> {
        self.boot_text.as_ref()
    }

    pub fn reveal_typewriter(&self) -> Option<&Typewriter> {
        self.reveal_text.as_ref()
    }

    pub fn now(&self) -> f64 {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn rain_running(&self) -> bool {
        self.slots.rain.is_some_and(|id| self.timers.is_pending(id))
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Run every timer due up to `now`, in order.
    pub fn advance(&mut self, now: f64) {
        while let Some((_, timer)) = self.timers.pop_due(now) {
            self.on_timer(timer);
        }
    }

    /// Apply a UI event at `now`. Timers due before the event run first.
    pub fn handle(&mut self, event: UiEvent, now: f64) {
        if self.torn_down {
            return;
        }
        self.advance(now);
        match event {
            UiEvent::GateInput(value) => {
                if !self.stage().is_authenticated() {
                    self.gate.set_input(&value);
                }
            }
            UiEvent::GateSubmit => self.submit_gate(),
            UiEvent::Briefing => {
                if self.stage().is_booted() {
                    debug!("briefing requested");
                    self.scrolls.push(Anchor::Mission1);
                }
            }
            UiEvent::Mission1Pressed => {
                self.apply(Transition::CompleteMission1);
            }
            UiEvent::HackPulse => self.pulse(),
            UiEvent::Mission3Pressed => {
                self.apply(Transition::CompleteMission3);
            }
        }
    }

    fn submit_gate(&mut self) {
        if self.stage().is_authenticated() {
            return;
        }
        self.timers.cancel_slot(&mut self.slots.gate_error);
        match self.gate.submit() {
            GateOutcome::Granted => {
                self.apply(Transition::Authenticate);
            }
            GateOutcome::Denied => {
                debug!("gate denied");
                self.slots.gate_error = Some(
                    self.timers
                        .after(self.config.error_display_ms, CardTimer::ClearGateError),
                );
            }
        }
    }

    fn pulse(&mut self) {
        // The meter button is only live while mission 2 is the active section.
        if !self.stage().section(Mission::Two).is_active() {
            return;
        }
        if self.meter.pulse() == PulseOutcome::Saturated {
            self.timers.cancel_slot(&mut self.slots.decay);
            self.apply(Transition::CompleteMission2);
        }
    }

    fn on_timer(&mut self, timer: CardTimer) {
        match timer {
            CardTimer::RainFrame => {
                let frame = self.rain.step(&mut self.rng);
                if self.rain_frames.len() >= MAX_PENDING_RAIN_FRAMES {
                    self.rain_frames.remove(0);
                }
                self.rain_frames.push(frame);
            }
            CardTimer::Decay => self.meter.decay(),
            CardTimer::ClearGateError => {
                self.slots.gate_error = None;
                self.gate.clear_error();
            }
            CardTimer::BootDelay => {
                self.slots.boot_delay = None;
                self.apply(Transition::CompleteBoot);
            }
            CardTimer::BootType => {
                let done = self
                    .boot_text
                    .as_mut()
                    .and_then(Typewriter::tick)
                    .is_some_and(|ev| ev == TypewriterEvent::Completed);
                if done {
                    self.timers.cancel_slot(&mut self.slots.boot_type);
                    self.apply(Transition::CompleteBoot);
                }
            }
            CardTimer::RevealType => {
                let done = self
                    .reveal_text
                    .as_mut()
                    .and_then(Typewriter::tick)
                    .is_some();
                if done {
                    self.timers.cancel_slot(&mut self.slots.reveal_type);
                    info!("final message revealed");
                }
            }
            CardTimer::Scroll(anchor) => {
                self.slots.scroll = None;
                self.scrolls.push(anchor);
            }
        }
    }

    /// Returns whether the stage moved.
    fn apply(&mut self, transition: Transition) -> bool {
        match self.machine.advance(transition) {
            Ok(stage) => {
                info!("stage -> {stage:?}");
                self.enter(stage);
                true
            }
            Err(err @ TransitionError::AlreadyPast(_)) => {
                debug!("{transition:?} ignored: {err}");
                false
            }
            Err(err @ TransitionError::NotReady(_)) => {
                debug!("{transition:?} refused: {err}");
                false
            }
        }
    }

    fn enter(&mut self, stage: Stage) {
        match stage {
            Stage::Authenticated => {
                // Two independent routes to boot; the transition is idempotent.
                self.slots.boot_delay = Some(
                    self.timers
                        .after(self.config.boot_delay_ms, CardTimer::BootDelay),
                );
                let mut tw =
                    Typewriter::new(&self.config.boot_text, self.config.boot_char_delay_ms);
                let typed = tw.start().is_some();
                if !typed {
                    self.slots.boot_type =
                        Some(self.timers.every(tw.delay_ms(), CardTimer::BootType));
                }
                self.boot_text = Some(tw);
                if typed {
                    self.apply(Transition::CompleteBoot);
                }
            }
            Stage::Booted => {
                // The boot screen is gone: its typewriter never reports completion.
                self.timers.cancel_slot(&mut self.slots.boot_delay);
                self.timers.cancel_slot(&mut self.slots.boot_type);
                self.boot_text = None;
            }
            Stage::Mission3Done => {
                let mut tw =
                    Typewriter::new(&self.config.reveal_text, self.config.reveal_char_delay_ms);
                if tw.start().is_some() {
                    info!("final message revealed");
                } else {
                    self.slots.reveal_type =
                        Some(self.timers.every(tw.delay_ms(), CardTimer::RevealType));
                }
                self.reveal_text = Some(tw);
            }
            Stage::Locked | Stage::Mission1Done | Stage::Mission2Done => {}
        }
        if let Some(anchor) = stage.scroll_anchor() {
            self.timers.cancel_slot(&mut self.slots.scroll);
            self.slots.scroll = Some(
                self.timers
                    .after(self.config.scroll_delay_ms, CardTimer::Scroll(anchor)),
            );
        }
    }

    pub fn take_rain_frames(&mut self) -> Vec<RainFrame> {
        std::mem::take(&mut self.rain_frames)
    }

    pub fn take_scrolls(&mut self) -> Vec<Anchor> {
        std::mem::take(&mut self.scrolls)
    }

    pub fn view(&self) -> CardView {
        let stage = self.stage();
        CardView {
            stage,
            gate: (!stage.is_authenticated()).then(|| GateView {
                input: self.gate.input().to_string(),
                error: self.gate.error_visible().then_some(GATE_ERROR_TEXT),
            }),
            boot_text: self.boot_text.as_ref().map(Typewriter::render),
            sections: CardView::sections_for(stage),
            meter: MeterView {
                progress: self.meter.progress(),
                integrity: self.meter.integrity(),
                label: self.meter.button_label(),
                complete: self.meter.is_complete(),
            },
            reveal_text: self.reveal_text.as_ref().map(Typewriter::render),
        }
    }

    /// Cancel every timer and drop in-flight reveals. The card ignores all
    /// further input.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.slots = Slots::default();
        self.boot_text = None;
        self.reveal_text = None;
        self.rain_frames.clear();
        self.scrolls.clear();
        self.torn_down = true;
        debug!("card torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;

    fn card() -> Card<Scripted> {
        Card::new(CardConfig::default(), (140, 280), Scripted::new(vec![0.5]), 0.0).unwrap()
    }

    fn auth(card: &mut Card<Scripted>, now: f64) {
        card.handle(UiEvent::GateInput("captain".into()), now);
        card.handle(UiEvent::GateSubmit, now);
    }

    #[test]
    fn starts_locked_with_rain_and_decay_running() {
        let c = card();
        assert_eq!(c.stage(), Stage::Locked);
        assert_eq!(c.pending_timers(), 2);
        assert!(c.rain_running());
        assert!(c.view().gate.is_some());
    }

    #[test]
    fn boot_delay_wins_and_discards_boot_typewriter() {
        let mut c = card();
        auth(&mut c, 100.0);
        assert_eq!(c.stage(), Stage::Authenticated);
        assert!(c.boot_typewriter().is_some());
        c.advance(1599.0);
        assert_eq!(c.stage(), Stage::Authenticated);
        let shown = c.boot_typewriter().map(Typewriter::revealed_len).unwrap();
        assert_eq!(shown, 29); // 1450 ms / 50 ms
        c.advance(1600.0);
        assert_eq!(c.stage(), Stage::Booted);
        assert!(c.boot_typewriter().is_none());
        // Only rain, decay and the pending scroll remain.
        assert_eq!(c.pending_timers(), 3);
    }

    #[test]
    fn short_boot_text_boots_through_the_typewriter() {
        let config = CardConfig {
            boot_text: "OK".into(),
            ..CardConfig::default()
        };
        let mut c = Card::new(config, (140, 280), Scripted::new(vec![0.5]), 0.0).unwrap();
        auth(&mut c, 0.0);
        c.advance(99.0);
        assert_eq!(c.stage(), Stage::Authenticated);
        c.advance(100.0);
        assert_eq!(c.stage(), Stage::Booted);
        // The delay timer was cancelled along with the boot screen.
        c.advance(2000.0);
        assert_eq!(c.stage(), Stage::Booted);
    }

    #[test]
    fn empty_boot_text_boots_at_the_auth_instant() {
        let config = CardConfig {
            boot_text: String::new(),
            ..CardConfig::default()
        };
        let mut c = Card::new(config, (140, 280), Scripted::new(vec![0.5]), 0.0).unwrap();
        auth(&mut c, 300.0);
        assert_eq!(c.stage(), Stage::Booted);
        assert!(c.boot_typewriter().is_none());
        // Rain, decay and the landing scroll; no boot timers left behind.
        assert_eq!(c.pending_timers(), 3);
        c.advance(800.0);
        assert_eq!(c.take_scrolls(), vec![Anchor::Landing]);
    }

    #[test]
    fn empty_reveal_text_arms_no_typewriter_timer() {
        let config = CardConfig {
            reveal_text: String::new(),
            ..CardConfig::default()
        };
        let mut c = Card::new(config, (140, 280), Scripted::new(vec![0.5]), 0.0).unwrap();
        auth(&mut c, 0.0);
        c.advance(1500.0);
        c.handle(UiEvent::Mission1Pressed, 1500.0);
        for _ in 0..10 {
            c.handle(UiEvent::HackPulse, 1500.0);
        }
        c.handle(UiEvent::Mission3Pressed, 1500.0);
        assert_eq!(c.stage(), Stage::Mission3Done);
        let tw = c.reveal_typewriter().unwrap();
        assert!(tw.is_complete());
        // Rain and the personnel-file scroll only; decay stopped at saturation.
        assert_eq!(c.pending_timers(), 2);
    }

    #[test]
    fn repeated_denials_extend_the_error() {
        let mut c = card();
        c.handle(UiEvent::GateInput("major".into()), 0.0);
        c.handle(UiEvent::GateSubmit, 0.0);
        assert!(c.gate().error_visible());
        c.handle(UiEvent::GateSubmit, 1500.0);
        c.advance(2100.0);
        assert!(c.gate().error_visible());
        c.advance(3500.0);
        assert!(!c.gate().error_visible());
        assert_eq!(c.stage(), Stage::Locked);
    }

    #[test]
    fn pulses_before_mission_two_are_ignored() {
        let mut c = card();
        auth(&mut c, 0.0);
        c.advance(1500.0);
        for _ in 0..10 {
            c.handle(UiEvent::HackPulse, 1500.0);
        }
        assert_eq!(c.meter().progress(), 0);
        assert_eq!(c.stage(), Stage::Booted);
    }

    #[test]
    fn rain_frames_are_bounded_until_drained() {
        let mut c = card();
        c.advance(10_000.0);
        let frames = c.take_rain_frames();
        assert!(!frames.is_empty() && frames.len() <= MAX_PENDING_RAIN_FRAMES);
        assert_eq!(frames[0].glyphs.len(), 10);
        assert!(c.take_rain_frames().is_empty());
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut c = card();
        auth(&mut c, 0.0);
        c.teardown();
        assert_eq!(c.pending_timers(), 0);
        assert!(!c.rain_running());
        c.advance(5_000.0);
        assert_eq!(c.stage(), Stage::Authenticated);
        c.handle(UiEvent::Mission1Pressed, 6_000.0);
        assert_eq!(c.stage(), Stage::Authenticated);
        assert!(c.take_rain_frames().is_empty());
    }
}
