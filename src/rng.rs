//! Cheap randomness for the rain effect (not crypto secure).

/// Source of uniform samples in `[0, 1)`. Injected into the rain so tests can
/// script exactly which glyphs are drawn and which columns reset.
pub trait Entropy {
    fn next_f64(&mut self) -> f64;

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// xorshift64* generator.
#[derive(Clone, Debug)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    pub fn new(seed: u64) -> Self {
        // All-zero state is a fixed point.
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    /// Seed from the browser's crypto RNG.
    #[cfg(feature = "rng")]
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::new(u64::from_le_bytes(buf)),
            Err(err) => {
                log::warn!("getrandom failed ({err}); seeding rain from the clock");
                Self::from_clock()
            }
        }
    }

    #[cfg(not(feature = "rng"))]
    pub fn from_entropy() -> Self {
        Self::from_clock()
    }

    fn from_clock() -> Self {
        let now = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        // Linear transform like an LCG step so nearby timestamps diverge.
        Self::new(
            now.to_bits()
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407),
        )
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl Entropy for XorShift {
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits map exactly onto the f64 mantissa.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of samples, cycling. Test helper, also handy for
/// deterministic screenshots.
#[derive(Clone, Debug)]
pub struct Scripted {
    samples: Vec<f64>,
    pos: usize,
}

impl Scripted {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, pos: 0 }
    }
}

impl Entropy for Scripted {
    fn next_f64(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let v = self.samples[self.pos % self.samples.len()];
        self.pos += 1;
        v
    }
}
