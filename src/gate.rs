//! The password screen. Purely cosmetic: one hardcoded rank, no lockout.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Granted,
    Denied,
}

#[derive(Clone, Debug)]
pub struct AuthGate {
    passphrase: String,
    input: String,
    error_visible: bool,
}

impl AuthGate {
    pub fn new(passphrase: &str) -> Self {
        Self {
            passphrase: normalize(passphrase),
            input: String::new(),
            error_visible: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mirror of the text field.
    pub fn set_input(&mut self, value: &str) {
        self.input.clear();
        self.input.push_str(value);
    }

    pub fn error_visible(&self) -> bool {
        self.error_visible
    }

    /// Check the current input. A miss raises the error flag and empties the
    /// field; the caller owns the timer that calls `clear_error`.
    pub fn submit(&mut self) -> GateOutcome {
        if normalize(&self.input) == self.passphrase {
            self.error_visible = false;
            GateOutcome::Granted
        } else {
            self.error_visible = true;
            self.input.clear();
            GateOutcome::Denied
        }
    }

    pub fn clear_error(&mut self) {
        self.error_visible = false;
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(gate: &mut AuthGate, text: &str) -> GateOutcome {
        gate.set_input(text);
        gate.submit()
    }

    #[test]
    fn accepts_case_and_whitespace_variants() {
        for attempt in ["captain", "CAPTAIN", " Captain  ", "\tcApTaIn\n"] {
            let mut gate = AuthGate::new("CAPTAIN");
            assert_eq!(submit(&mut gate, attempt), GateOutcome::Granted, "{attempt:?}");
            assert!(!gate.error_visible());
        }
    }

    #[test]
    fn rejects_and_clears_input() {
        let mut gate = AuthGate::new("CAPTAIN");
        for attempt in ["", "major", "capt ain", "CAPTAINS", "lieutenant"] {
            assert_eq!(submit(&mut gate, attempt), GateOutcome::Denied, "{attempt:?}");
            assert!(gate.error_visible());
            assert_eq!(gate.input(), "");
            gate.clear_error();
            assert!(!gate.error_visible());
        }
    }

    #[test]
    fn passphrase_is_normalized_too() {
        let mut gate = AuthGate::new(" major ");
        assert_eq!(submit(&mut gate, "MAJOR"), GateOutcome::Granted);
    }
}
