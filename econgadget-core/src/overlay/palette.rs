//! Chart colors.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Tableau 10 categorical cycle.
pub const TABLEAU_10: [Rgb; 10] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
];

pub const ORANGE: Rgb = Rgb(0xff, 0xa5, 0x00);
pub const GREEN: Rgb = Rgb(0x00, 0x80, 0x00);
pub const BLUE: Rgb = Rgb(0x00, 0x00, 0xff);

/// Palette color for position `index`, cycling.
pub fn color_for(index: usize) -> Rgb {
    TABLEAU_10[index % TABLEAU_10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_after_ten() {
        assert_eq!(color_for(0), color_for(10));
        assert_ne!(color_for(0), color_for(1));
        assert_eq!(color_for(3).to_string(), "#d62728");
    }
}
