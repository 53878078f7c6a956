//! The "hack" minigame: presses push progress up, a timer drains it.

pub const FULL: u8 = 100;

/// Above this the pulse button switches to its breaching label.
pub const BREACH_LABEL_THRESHOLD: u8 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseOutcome {
    Charged(u8),
    Saturated,
    /// Already complete; the press did nothing.
    Ignored,
}

#[derive(Clone, Debug)]
pub struct DecayMeter {
    progress: u8,
    complete: bool,
    step: u8,
    decay_step: u8,
}

impl DecayMeter {
    pub fn new(step: u8, decay_step: u8) -> Self {
        Self {
            progress: 0,
            complete: false,
            step,
            decay_step,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Remaining "encryption" shown beside the bar.
    pub fn integrity(&self) -> u8 {
        FULL - self.progress
    }

    pub fn pulse(&mut self) -> PulseOutcome {
        if self.complete {
            return PulseOutcome::Ignored;
        }
        self.progress = self.progress.saturating_add(self.step).min(FULL);
        if self.progress == FULL {
            self.complete = true;
            PulseOutcome::Saturated
        } else {
            PulseOutcome::Charged(self.progress)
        }
    }

    /// One passive decay tick. Never touches a completed meter.
    pub fn decay(&mut self) {
        if !self.complete {
            self.progress = self.progress.saturating_sub(self.decay_step);
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.progress > BREACH_LABEL_THRESHOLD {
            "BREACHING FIREWALL..."
        } else {
            "TAP REPEATEDLY TO DEPLOY CODE"
        }
    }
}
