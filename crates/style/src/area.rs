//! Cell and area styles.
use serde::{Deserialize, Serialize};
use tabula_types::{Axis, Color, PerAxis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Right,
    Left,
    Center,
    /// Text left-aligned, numbers right-aligned.
    Mixed,
    /// Aligned on the decimal point, `offset` 1/96 inch from the right.
    Decimal { offset: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellStyle {
    pub halign: HAlign,
    pub valign: VAlign,
    /// Inner margins in 1/96 inch, `[start, end]` per axis.
    pub margins: PerAxis<[i32; 2]>,
}

impl CellStyle {
    pub const DEFAULT_MARGINS: PerAxis<[i32; 2]> = PerAxis([[8, 11], [1, 1]]);

    pub const fn aligned(halign: HAlign, valign: VAlign) -> Self {
        Self {
            halign,
            valign,
            margins: Self::DEFAULT_MARGINS,
        }
    }

    pub fn margin_sum(&self, axis: Axis) -> i32 {
        let [a, b] = self.margins[axis];
        a + b
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::aligned(HAlign::Right, VAlign::Top)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub markup: bool,
    /// Foreground colors for odd and even rows.
    pub fg: [Color; 2],
    /// Background colors for odd and even rows.
    pub bg: [Color; 2],
    pub typeface: Option<String>,
    /// Size in points; 0 inherits the layout font size.
    pub size: i32,
}

impl FontStyle {
    pub const fn plain() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            markup: false,
            fg: [Color::BLACK, Color::BLACK],
            bg: [Color::WHITE, Color::WHITE],
            typeface: None,
            size: 0,
        }
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::plain()
    }
}

/// The complete style of one table area or cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaStyle {
    pub cell: CellStyle,
    pub font: FontStyle,
}

const H_ALIGNS: [HAlign; 3] = [HAlign::Left, HAlign::Center, HAlign::Right];
const V_ALIGNS: [VAlign; 3] = [VAlign::Top, VAlign::Center, VAlign::Bottom];

static ALIGNED_STYLES: [[AreaStyle; 3]; 3] = {
    const fn row(h: HAlign) -> [AreaStyle; 3] {
        [
            AreaStyle::aligned(h, V_ALIGNS[0]),
            AreaStyle::aligned(h, V_ALIGNS[1]),
            AreaStyle::aligned(h, V_ALIGNS[2]),
        ]
    }
    [row(H_ALIGNS[0]), row(H_ALIGNS[1]), row(H_ALIGNS[2])]
};

impl AreaStyle {
    pub const fn aligned(halign: HAlign, valign: VAlign) -> Self {
        Self {
            cell: CellStyle::aligned(halign, valign),
            font: FontStyle::plain(),
        }
    }

    /// The shared default style for a plain cell with the given alignment.
    ///
    /// `Mixed` and `Decimal` have no precomputed entry and map to `Right`.
    pub fn for_alignment(halign: HAlign, valign: VAlign) -> &'static AreaStyle {
        let h = match halign {
            HAlign::Left => 0,
            HAlign::Center => 1,
            HAlign::Right | HAlign::Mixed | HAlign::Decimal { .. } => 2,
        };
        let v = match valign {
            VAlign::Top => 0,
            VAlign::Center => 1,
            VAlign::Bottom => 2,
        };
        &ALIGNED_STYLES[h][v]
    }
}
