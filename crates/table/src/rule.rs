use serde::{Deserialize, Serialize};
use tabula_types::Color;

/// How a rule is stroked. The order follows the palette enumeration, and
/// combining two rules that meet keeps the later one in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Stroke {
    #[default]
    None = 0,
    Solid,
    Dashed,
    Thick,
    Thin,
    Double,
}

impl Stroke {
    pub const COUNT: usize = 6;
    pub const ALL: [Stroke; Stroke::COUNT] = [
        Stroke::None,
        Stroke::Solid,
        Stroke::Dashed,
        Stroke::Thick,
        Stroke::Thin,
        Stroke::Double,
    ];

    pub fn combine(self, other: Stroke) -> Stroke {
        self.max(other)
    }

    fn from_bits(bits: u8) -> Stroke {
        Stroke::ALL.get(bits as usize).copied().unwrap_or(Stroke::None)
    }
}

/// A packed rule: stroke in the low nibble, color palette index above it.
/// Zero is "no rule".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RuleCode(u8);

impl RuleCode {
    pub const NONE: RuleCode = RuleCode(0);
    const STROKE_MASK: u8 = 0x0f;
    const COLOR_SHIFT: u8 = 4;

    /// Packs a stroke with a rule color palette index (taken modulo the
    /// palette size).
    pub fn new(stroke: Stroke, color_index: usize) -> Self {
        if stroke == Stroke::None {
            return Self::NONE;
        }
        let color = (color_index % crate::PALETTE_SIZE) as u8;
        RuleCode(stroke as u8 | (color << Self::COLOR_SHIFT))
    }

    pub fn stroke(self) -> Stroke {
        Stroke::from_bits(self.0 & Self::STROKE_MASK)
    }

    pub fn color_index(self) -> usize {
        (self.0 >> Self::COLOR_SHIFT) as usize
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<Stroke> for RuleCode {
    fn from(stroke: Stroke) -> Self {
        RuleCode::new(stroke, 0)
    }
}

/// A resolved rule as reported by [`crate::TableProvider::get_rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderStyle {
    pub stroke: Stroke,
    pub color: Color,
}

impl BorderStyle {
    pub const NONE: BorderStyle = BorderStyle {
        stroke: Stroke::None,
        color: Color::BLACK,
    };
}
