//! Mission progression as a single ordered stage.
//!
//! Stages only move forward. Each `Transition` is guarded on the stage right
//! before its target, so e.g. mission 2 can never be done without mission 1.

use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    #[default]
    Locked,
    Authenticated,
    Booted,
    Mission1Done,
    Mission2Done,
    Mission3Done,
}

impl Stage {
    pub fn is_authenticated(self) -> bool {
        self >= Stage::Authenticated
    }
    pub fn is_booted(self) -> bool {
        self >= Stage::Booted
    }
    pub fn mission1_done(self) -> bool {
        self >= Stage::Mission1Done
    }
    pub fn mission2_done(self) -> bool {
        self >= Stage::Mission2Done
    }
    pub fn mission3_done(self) -> bool {
        self >= Stage::Mission3Done
    }

    /// Where the page scrolls after arriving at this stage, if anywhere.
    pub fn scroll_anchor(self) -> Option<Anchor> {
        match self {
            Stage::Locked | Stage::Authenticated => None,
            Stage::Booted => Some(Anchor::Landing),
            Stage::Mission1Done => Some(Anchor::Mission2),
            Stage::Mission2Done => Some(Anchor::Mission3),
            Stage::Mission3Done => Some(Anchor::PersonnelFile),
        }
    }

    /// Visual state of a mission section at this stage.
    pub fn section(self, mission: Mission) -> SectionState {
        let active = match mission {
            Mission::One => self.is_booted(),
            Mission::Two => self.mission1_done(),
            Mission::Three => self.mission2_done(),
        };
        if active {
            SectionState::Active
        } else {
            SectionState::Locked
        }
    }
}

/// The three mission sections, in page order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mission {
    One,
    Two,
    Three,
}

impl Mission {
    pub const ALL: [Mission; 3] = [Mission::One, Mission::Two, Mission::Three];

    /// Zero-based position on the page.
    pub fn index(self) -> usize {
        match self {
            Mission::One => 0,
            Mission::Two => 1,
            Mission::Three => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Authenticate,
    CompleteBoot,
    CompleteMission1,
    CompleteMission2,
    CompleteMission3,
}

impl Transition {
    pub fn target(self) -> Stage {
        match self {
            Transition::Authenticate => Stage::Authenticated,
            Transition::CompleteBoot => Stage::Booted,
            Transition::CompleteMission1 => Stage::Mission1Done,
            Transition::CompleteMission2 => Stage::Mission2Done,
            Transition::CompleteMission3 => Stage::Mission3Done,
        }
    }

    fn requires(self) -> Stage {
        match self {
            Transition::Authenticate => Stage::Locked,
            Transition::CompleteBoot => Stage::Authenticated,
            Transition::CompleteMission1 => Stage::Booted,
            Transition::CompleteMission2 => Stage::Mission1Done,
            Transition::CompleteMission3 => Stage::Mission2Done,
        }
    }
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionError {
    /// The stage is already at or beyond the target. Repeats land here.
    #[error("already at {0:?}")]
    AlreadyPast(Stage),
    /// A prerequisite stage has not been reached.
    #[error("not ready (at {0:?})")]
    NotReady(Stage),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionState {
    Active,
    Locked,
}

impl SectionState {
    pub fn is_active(self) -> bool {
        self == SectionState::Active
    }
}

/// Scroll targets; the string is the DOM id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Landing,
    Mission1,
    Mission2,
    Mission3,
    PersonnelFile,
}

impl Anchor {
    pub fn dom_id(self) -> &'static str {
        match self {
            Anchor::Landing => "landing",
            Anchor::Mission1 => "mission-1",
            Anchor::Mission2 => "mission-2",
            Anchor::Mission3 => "mission-3",
            Anchor::PersonnelFile => "personnel-file",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MissionMachine {
    stage: Stage,
}

impl MissionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn advance(&mut self, transition: Transition) -> Result<Stage, TransitionError> {
        if self.stage >= transition.target() {
            return Err(TransitionError::AlreadyPast(self.stage));
        }
        if self.stage != transition.requires() {
            return Err(TransitionError::NotReady(self.stage));
        }
        self.stage = transition.target();
        Ok(self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Transition; 5] = [
        Transition::Authenticate,
        Transition::CompleteBoot,
        Transition::CompleteMission1,
        Transition::CompleteMission2,
        Transition::CompleteMission3,
    ];

    #[test]
    fn happy_path_in_order() {
        let mut m = MissionMachine::new();
        for t in ALL {
            assert_eq!(m.advance(t), Ok(t.target()));
        }
        assert!(m.stage().mission3_done());
    }

    #[test]
    fn skipping_ahead_is_refused() {
        let mut m = MissionMachine::new();
        assert_eq!(
            m.advance(Transition::CompleteMission2),
            Err(TransitionError::NotReady(Stage::Locked))
        );
        m.advance(Transition::Authenticate).unwrap();
        assert_eq!(
            m.advance(Transition::CompleteMission1),
            Err(TransitionError::NotReady(Stage::Authenticated))
        );
        assert_eq!(m.stage(), Stage::Authenticated);
    }

    #[test]
    fn repeat_boot_is_idempotent() {
        let mut m = MissionMachine::new();
        m.advance(Transition::Authenticate).unwrap();
        m.advance(Transition::CompleteBoot).unwrap();
        assert_eq!(
            m.advance(Transition::CompleteBoot),
            Err(TransitionError::AlreadyPast(Stage::Booted))
        );
        assert_eq!(m.stage(), Stage::Booted);
    }

    #[test]
    fn never_moves_backwards_under_any_sequence() {
        // Every sequence of length 6 over the 5 transitions.
        let mut seq = [0usize; 6];
        loop {
            let mut m = MissionMachine::new();
            let mut last = m.stage();
            for &i in &seq {
                let _ = m.advance(ALL[i]);
                assert!(m.stage() >= last);
                last = m.stage();
            }
            let mut k = 0;
            while k < seq.len() {
                seq[k] += 1;
                if seq[k] < ALL.len() {
                    break;
                }
                seq[k] = 0;
                k += 1;
            }
            if k == seq.len() {
                break;
            }
        }
    }

    #[test]
    fn sections_follow_stage() {
        assert_eq!(Stage::Authenticated.section(Mission::One), SectionState::Locked);
        assert_eq!(Stage::Booted.section(Mission::One), SectionState::Active);
        assert_eq!(Stage::Booted.section(Mission::Two), SectionState::Locked);
        assert_eq!(Stage::Mission1Done.section(Mission::Two), SectionState::Active);
        assert_eq!(Stage::Mission1Done.section(Mission::Three), SectionState::Locked);
        assert_eq!(Stage::Mission2Done.section(Mission::Three), SectionState::Active);
        let active = Mission::ALL.map(|m| Stage::Mission3Done.section(m).is_active());
        assert_eq!(active, [true; 3]);
    }

    #[test]
    fn transition_errors_are_std_errors() {
        fn describe(err: &dyn std::error::Error) -> String {
            err.to_string()
        }
        assert_eq!(
            describe(&TransitionError::AlreadyPast(Stage::Booted)),
            "already at Booted"
        );
        assert_eq!(
            describe(&TransitionError::NotReady(Stage::Locked)),
            "not ready (at Locked)"
        );
    }

    #[test]
    fn anchors() {
        assert_eq!(Stage::Authenticated.scroll_anchor(), None);
        assert_eq!(Stage::Mission1Done.scroll_anchor(), Some(Anchor::Mission2));
        assert_eq!(Anchor::Mission3.dom_id(), "mission-3");
    }
}
