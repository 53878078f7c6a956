//! Falling-glyph background. The model only decides what to draw where; the
//! shell paints the translucent overlay and then each glyph of a `RainFrame`.

use crate::rng::Entropy;

pub const GLYPH_COLOR: &str = "#39FF14";
pub const TRAIL_OVERLAY: &str = "rgba(0, 0, 0, 0.05)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainGlyph {
    pub ch: char,
    pub x: f64,
    pub y: f64,
}

/// Glyphs for one tick, painted after the trail overlay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RainFrame {
    pub glyphs: Vec<RainGlyph>,
}

#[derive(Clone, Debug)]
pub struct RainField {
    width: u32,
    height: u32,
    glyph_px: u32,
    alphabet: Vec<char>,
    reset_probability: f64,
    // Row index per column, in glyph units.
    drops: Vec<u32>,
}

impl RainField {
    /// Sized once; the field does not follow later viewport resizes.
    pub fn new(width: u32, height: u32, glyph_px: u32, alphabet: &str, reset_probability: f64) -> Self {
        let glyph_px = glyph_px.max(1);
        let columns = (width / glyph_px) as usize;
        Self {
            width,
            height,
            glyph_px,
            alphabet: alphabet.chars().collect(),
            reset_probability,
            drops: vec![1; columns],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn glyph_px(&self) -> u32 {
        self.glyph_px
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn font(&self) -> String {
        format!("{}px monospace", self.glyph_px)
    }

    pub fn step(&mut self, rng: &mut impl Entropy) -> RainFrame {
        let px = self.glyph_px as f64;
        let mut glyphs = Vec::with_capacity(self.drops.len());
        for (col, drop) in self.drops.iter_mut().enumerate() {
            let ch = if self.alphabet.is_empty() {
                ' '
            } else {
                self.alphabet[rng.index(self.alphabet.len())]
            };
            glyphs.push(RainGlyph {
                ch,
                x: col as f64 * px,
                y: *drop as f64 * px,
            });
            // Drops past the bottom linger until a lucky roll sends them back up,
            // which staggers the streak lengths.
            if *drop as f64 * px > self.height as f64 && rng.next_f64() < self.reset_probability {
                *drop = 0;
            }
            *drop += 1;
        }
        RainFrame { glyphs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;

    #[test]
    fn column_count_is_floored() {
        let rain = RainField::new(100, 50, 14, "01", 0.025);
        assert_eq!(rain.columns(), 7);
        assert!(rain.drops().iter().all(|&d| d == 1));
        assert_eq!(rain.font(), "14px monospace");
    }

    #[test]
    fn one_glyph_per_column_advancing_by_one_row() {
        let mut rain = RainField::new(42, 1000, 14, "AB", 0.025);
        let mut rng = Scripted::new(vec![0.0]);
        let frame = rain.step(&mut rng);
        assert_eq!(frame.glyphs.len(), 3);
        assert_eq!(frame.glyphs[2], RainGlyph { ch: 'A', x: 28.0, y: 14.0 });
        assert_eq!(rain.drops(), &[2, 2, 2]);
    }

    #[test]
    fn resets_only_past_the_bottom_and_only_on_a_lucky_roll() {
        // height 28: row 3 (y = 42) is past the bottom.
        let mut rain = RainField::new(14, 28, 14, "X", 0.5);
        // Each column draws a glyph sample, then a reset sample only when past the bottom.
        let mut unlucky = Scripted::new(vec![0.0, 0.9]);
        rain.step(&mut unlucky); // row 1 -> 2
        rain.step(&mut unlucky); // row 2 -> 3
        assert_eq!(rain.drops(), &[3]);
        let mut unlucky = Scripted::new(vec![0.0, 0.9]);
        rain.step(&mut unlucky); // past bottom, roll 0.9 fails
        assert_eq!(rain.drops(), &[4]);
        let mut lucky = Scripted::new(vec![0.0, 0.1]);
        rain.step(&mut lucky); // past bottom, roll 0.1 resets
        assert_eq!(rain.drops(), &[1]);
    }

    #[test]
    fn zero_probability_never_resets() {
        let mut rain = RainField::new(28, 14, 14, "01", 0.0);
        let mut rng = Scripted::new(vec![0.0]);
        for _ in 0..50 {
            rain.step(&mut rng);
        }
        assert_eq!(rain.drops(), &[51, 51]);
    }

    #[test]
    fn glyphs_come_from_the_alphabet() {
        let alphabet = "010101 CAPTAIN";
        let mut rain = RainField::new(140, 140, 14, alphabet, 0.025);
        let mut rng = crate::rng::XorShift::new(99);
        for _ in 0..20 {
            for g in rain.step(&mut rng).glyphs {
                assert!(alphabet.contains(g.ch));
            }
        }
    }
}
