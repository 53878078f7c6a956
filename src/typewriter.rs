//! Time-paced text reveal. The owner ticks it every `delay_ms`; one character
//! becomes visible per tick.

pub const CURSOR: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterEvent {
    Completed,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    // Byte offsets of each char end, so the revealed prefix is a cheap slice.
    boundaries: Vec<usize>,
    revealed: usize,
    delay_ms: f64,
    completion_fired: bool,
}

impl Typewriter {
    pub fn new(text: &str, delay_ms: f64) -> Self {
        let mut tw = Self {
            text: String::new(),
            boundaries: Vec::new(),
            revealed: 0,
            delay_ms,
            completion_fired: false,
        };
        tw.restart(text);
        tw
    }

    /// Swap in a new source string and start again from zero.
    pub fn restart(&mut self, text: &str) {
        self.text = text.to_string();
        self.boundaries = text.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        self.revealed = 0;
        self.completion_fired = false;
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.len()
    }

    /// Call once when the reveal is mounted. Empty text has nothing to type,
    /// so it reports `Completed` here instead of waiting for a tick.
    pub fn start(&mut self) -> Option<TypewriterEvent> {
        self.take_completion()
    }

    /// Reveal one more character. Returns `Completed` exactly once, on the
    /// tick that reveals the last character.
    pub fn tick(&mut self) -> Option<TypewriterEvent> {
        if self.revealed < self.len() {
            self.revealed += 1;
        }
        self.take_completion()
    }

    fn take_completion(&mut self) -> Option<TypewriterEvent> {
        if self.is_complete() && !self.completion_fired {
            self.completion_fired = true;
            return Some(TypewriterEvent::Completed);
        }
        None
    }

    pub fn revealed(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.boundaries[n - 1]],
        }
    }

    /// Revealed prefix followed by the cursor glyph.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.revealed().len() + 1);
        out.push_str(self.revealed());
        out.push(CURSOR);
        out
    }
}
