//! Static configuration for one game instance.
//!
//! Everything here is fixed once the page has booted; a different board or tick
//! rate means a fresh page load. With the `serde` feature every struct can be
//! deserialized and missing fields fall back to [`Default`].

use crate::error::{GameError, Result};

/// Square board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    pub width: u32,
    pub cell_size_px: u32,
}

impl BoardConfig {
    pub fn new(width: u32, cell_size_px: u32) -> Self {
        Self { width, cell_size_px }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.width as usize
    }

    /// Canvas edge length in pixels (the canvas is square).
    pub fn canvas_px(&self) -> u32 {
        self.width * self.cell_size_px
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { width: 5, cell_size_px: 20 }
    }
}

/// Text shown on the start / restart control.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Labels {
    pub start: String,
    pub in_progress: String,
    pub play_again: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            start: "Start".to_string(),
            in_progress: "Playing...".to_string(),
            play_again: "Play again?".to_string(),
        }
    }
}

/// An opaque RGB colour. Parsed from `#rrggbb` in configs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn parse_hex(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| GameError::InvalidConfig(format!("colour `{}` is not #rrggbb", s)))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GameError::InvalidConfig(format!("colour `{}` is not #rrggbb", s)))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Packed `0xRRGGBBAA`, fully opaque.
    pub fn to_rgba(self) -> u32 {
        u32::from_be_bytes([self.0, self.1, self.2, 0xff])
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(de)?;
        Rgb::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Palette {
    pub grid: Rgb,
    pub head: Rgb,
    pub body: Rgb,
    pub reward: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Rgb::BLACK,
            head: Rgb(0x78, 0x78, 0x78),
            body: Rgb::BLACK,
            reward: Rgb(0xff, 0x00, 0x00),
        }
    }
}

/// DOM element ids the bootstrap looks up (or creates).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub canvas: String,
    pub status: String,
    pub control: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "snake-world".to_string(),
            status: "game-status".to_string(),
            control: "game-control-btn".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub board: BoardConfig,
    pub fps: f64,
    pub elements: ElementIds,
    pub labels: Labels,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            fps: 6.0,
            elements: ElementIds::default(),
            labels: Labels::default(),
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.board.width == 0 {
            return Err(GameError::InvalidConfig("board width must be positive".into()));
        }
        if self.board.cell_size_px == 0 {
            return Err(GameError::InvalidConfig("cell size must be positive".into()));
        }
        let w = self.board.width;
        if w.checked_mul(w).is_none() || w.checked_mul(self.board.cell_size_px).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "board of width {} with {}px cells is too large",
                w, self.board.cell_size_px
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    /// Delay between ticks, constant for the session.
    pub fn delay_ms(&self) -> f64 {
        1000.0 / self.fps
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
