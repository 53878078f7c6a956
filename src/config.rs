//! Tunables for the card. `Default` reproduces the shipped card; JSON overrides
//! (feature `serde_json`) may be partial since every field falls back to its default.

use crate::error::{CardError, Result};

pub const BOOT_TEXT: &str =
    "INITIALIZING SYSTEM... LOADING PROFILES... DECRYPTING MISSION DATA... WELCOME CAPTAIN.";

pub const REVEAL_TEXT: &str = "You aren't lost. You are preparing. Every line of code you write is training for the strategic mind you will need in the field. The uniform is waiting for you.";

pub const RAIN_ALPHABET: &str = "010101 CAPTAIN ESHA ARMY CS CODE 01001";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CardConfig {
    /// Compared after trim + case fold.
    pub passphrase: String,
    pub error_display_ms: f64,
    pub boot_delay_ms: f64,
    pub scroll_delay_ms: f64,

    pub boot_text: String,
    pub boot_char_delay_ms: f64,
    pub reveal_text: String,
    pub reveal_char_delay_ms: f64,

    pub meter_step: u8,
    pub decay_step: u8,
    pub decay_interval_ms: f64,

    pub rain_interval_ms: f64,
    pub rain_glyph_px: u32,
    pub rain_alphabet: String,
    /// Chance per tick that a column past the bottom edge restarts at the top.
    pub rain_reset_probability: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            passphrase: "CAPTAIN".to_string(),
            error_display_ms: 2000.0,
            boot_delay_ms: 1500.0,
            scroll_delay_ms: 500.0,
            boot_text: BOOT_TEXT.to_string(),
            boot_char_delay_ms: 50.0,
            reveal_text: REVEAL_TEXT.to_string(),
            reveal_char_delay_ms: 30.0,
            meter_step: 10,
            decay_step: 1,
            decay_interval_ms: 50.0,
            rain_interval_ms: 33.0,
            rain_glyph_px: 14,
            rain_alphabet: RAIN_ALPHABET.to_string(),
            rain_reset_probability: 0.025,
        }
    }
}

impl CardConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.passphrase.trim().is_empty() {
            return Err(invalid("passphrase must not be blank"));
        }
        let periods = [
            ("error_display_ms", self.error_display_ms),
            ("boot_delay_ms", self.boot_delay_ms),
            ("boot_char_delay_ms", self.boot_char_delay_ms),
            ("reveal_char_delay_ms", self.reveal_char_delay_ms),
            ("decay_interval_ms", self.decay_interval_ms),
            ("rain_interval_ms", self.rain_interval_ms),
        ];
        for (name, value) in periods {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(&format!("{name} must be a positive number of ms")));
            }
        }
        // Zero is allowed here: scroll immediately.
        if !(self.scroll_delay_ms.is_finite() && self.scroll_delay_ms >= 0.0) {
            return Err(invalid("scroll_delay_ms must not be negative"));
        }
        if self.meter_step == 0 {
            return Err(invalid("meter_step must be positive"));
        }
        if self.rain_glyph_px == 0 {
            return Err(invalid("rain_glyph_px must be positive"));
        }
        if self.rain_alphabet.is_empty() {
            return Err(invalid("rain_alphabet must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.rain_reset_probability) {
            return Err(invalid("rain_reset_probability must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> CardError {
    CardError::InvalidConfig(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        CardConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_meter_step() {
        let cfg = CardConfig {
            meter_step: 0,
            ..CardConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CardError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_probability_and_intervals() {
        let cfg = CardConfig {
            rain_reset_probability: 1.5,
            ..CardConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = CardConfig {
            decay_interval_ms: 0.0,
            ..CardConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = CardConfig {
            passphrase: "   ".into(),
            ..CardConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = CardConfig::from_json(r#"{"passphrase":"major","boot_delay_ms":900}"#).unwrap();
        assert_eq!(cfg.passphrase, "major");
        assert_eq!(cfg.boot_delay_ms, 900.0);
        assert_eq!(cfg.meter_step, 10);
        assert_eq!(cfg.rain_alphabet, RAIN_ALPHABET);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_is_validated() {
        let err = CardConfig::from_json(r#"{"rain_alphabet":""}"#).unwrap_err();
        assert!(matches!(err, CardError::InvalidConfig(_)));
        let err = CardConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, CardError::ConfigParse(_)));
        let err = CardConfig::from_json(r#"{"pasphrase":"typo"}"#).unwrap_err();
        assert!(matches!(err, CardError::ConfigParse(_)));
    }
}
