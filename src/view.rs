//! Read-only snapshot of everything the shell draws. Pure function of card state.

use crate::mission::{Mission, SectionState, Stage};

pub const GATE_ERROR_TEXT: &str = "ACCESS DENIED. INCORRECT RANK.";

/// (dom id, title) for the three mission sections.
pub const MISSION_SECTIONS: [(&str, &str); 3] = [
    ("mission-1", "01 // THE DILEMMA"),
    ("mission-2", "02 // THE REALITY"),
    ("mission-3", "03 // CLASSIFIED INTEL"),
];

#[derive(Clone, Debug, PartialEq)]
pub struct GateView {
    pub input: String,
    pub error: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionView {
    pub id: &'static str,
    pub title: &'static str,
    pub state: SectionState,
}

impl SectionView {
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Lock marker for locked sections, a "SECURE" badge otherwise.
    pub fn badge(&self) -> &'static str {
        match self.state {
            SectionState::Active => "SECURE",
            SectionState::Locked => "LOCKED",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeterView {
    pub progress: u8,
    pub integrity: u8,
    pub label: &'static str,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub stage: Stage,
    /// `Some` only while the gate is up.
    pub gate: Option<GateView>,
    /// Rendered boot typewriter, between authentication and boot.
    pub boot_text: Option<String>,
    pub sections: [SectionView; 3],
    pub meter: MeterView,
    /// Rendered final message once the personnel file is open.
    pub reveal_text: Option<String>,
}

impl CardView {
    pub fn show_hud(&self) -> bool {
        self.stage.is_authenticated()
    }

    pub fn show_missions(&self) -> bool {
        self.stage.is_booted()
    }

    pub fn mission1_done(&self) -> bool {
        self.stage.mission1_done()
    }

    pub fn mission3_done(&self) -> bool {
        self.stage.mission3_done()
    }

    pub(crate) fn sections_for(stage: Stage) -> [SectionView; 3] {
        Mission::ALL.map(|mission| {
            let (id, title) = MISSION_SECTIONS[mission.index()];
            SectionView {
                id,
                title,
                state: stage.section(mission),
            }
        })
    }
}
