//! Mode 0 palette: 16 pens, each set to one of the 27 firmware colours.
//!
//! Firmware colour `n` encodes its three channels in base 3 as
//! `n = 9 * green + 3 * red + blue`, each channel being off, half or full.
//! The RGB value for every pen is computed once when the palette is built so
//! the presenter only does a table lookup per pixel.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;

/// Number of pens in mode 0.
pub const PEN_COUNT: usize = 16;
/// Highest firmware colour number.
pub const MAX_FIRMWARE_COLOUR: u8 = 26;

/// Inks the firmware assigns to each pen at power-on. Pens the game does not
/// set keep these.
pub const DEFAULT_INKS: [u8; PEN_COUNT] = [
    1, 24, 20, 6, 26, 0, 2, 8, 10, 12, 14, 16, 18, 22, 24, 16,
];

/// Palette used by the Persea scene: haze, outline, skin, sky, clothes and
/// hair first, floor last.
pub const PERSEA_PALETTE: [u8; PEN_COUNT] = [
    14, 0, 15, 11, 2, 6, 26, 13, 3, 9, 18, 24, 12, 4, 22, 21,
];

const CHANNEL_LEVELS: [u8; 3] = [0x00, 0x80, 0xFF];

/// RGB for a firmware colour, or `None` if `n > 26`.
pub fn firmware_to_rgb(n: u8) -> Option<[u8; 3]> {
    if n > MAX_FIRMWARE_COLOUR {
        return None;
    }
    let green = CHANNEL_LEVELS[(n / 9) as usize];
    let red = CHANNEL_LEVELS[((n / 3) % 3) as usize];
    let blue = CHANNEL_LEVELS[(n % 3) as usize];
    Some([red, green, blue])
}

/// Current pen-to-colour assignment.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    inks: [u8; PEN_COUNT],
    rgb: [[u8; 3]; PEN_COUNT],
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_inks(DEFAULT_INKS)
    }
}

impl Palette {
    fn from_inks(inks: [u8; PEN_COUNT]) -> Self {
        let mut rgb = [[0; 3]; PEN_COUNT];
        for (slot, ink) in rgb.iter_mut().zip(inks) {
            *slot = firmware_to_rgb(ink).unwrap_or([0, 0, 0]);
        }
        Self { inks, rgb }
    }

    /// Set the first `colours.len()` pens; the rest keep their power-on inks.
    pub fn from_firmware(colours: &[u8]) -> Result<Self, String> {
        if colours.len() > PEN_COUNT {
            return Err(format!(
                "palette has {} colours, mode 0 has only {} pens",
                colours.len(),
                PEN_COUNT
            ));
        }
        let mut inks = DEFAULT_INKS;
        for (pen, &colour) in colours.iter().enumerate() {
            if colour > MAX_FIRMWARE_COLOUR {
                return Err(format!("pen {pen}: firmware colour {colour} out of range 0..=26"));
            }
            inks[pen] = colour;
        }
        Ok(Self::from_inks(inks))
    }

    /// Parse a comma separated list such as `"0,26,13"`.
    pub fn parse(list: &str) -> Result<Self, String> {
        let mut colours: ArrayVec<u8, PEN_COUNT> = ArrayVec::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let colour = item
                .parse::<u8>()
                .map_err(|e| format!("bad firmware colour '{item}': {e}"))?;
            colours
                .try_push(colour)
                .map_err(|_| format!("palette has more than {PEN_COUNT} colours"))?;
        }
        Self::from_firmware(&colours)
    }

    /// RGB of `pen`.
    pub fn rgb(&self, pen: u8) -> [u8; 3] {
        self.rgb[(pen & 0x0F) as usize]
    }

    /// Comma separated firmware colours, the format [`Palette::parse`] reads.
    pub fn to_list(&self) -> String {
        self.inks
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}
