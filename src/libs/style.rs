//! Cell presentation rules and the style pass.
//!
//! Styling is expressed as a small table from [`StyleRole`] to [`StyleRule`].
//! Variants are composed from a shared data rule plus override fields instead
//! of being defined independently, so every data cell shares the same border
//! and font baseline.
//!
//! The style pass ([`apply_styles`]) only attaches a role to cells that
//! already exist; it never changes a value and never adds or removes rows.
//!
//! ## Role Mapping
//!
//! | Cells                                         | Role        |
//! |-----------------------------------------------|-------------|
//! | Row 1 of every sheet                          | `Header`    |
//! | Detail No., Year, Block, Payment Method, Ref. | `Centered`  |
//! | Detail Amount                                 | `Monetary`  |
//! | Detail Receipt                                | `Link`      |
//! | Everything else                               | `Data`      |

use crate::libs::workbook::{Workbook, DETAIL_SHEET_NAME};
use serde::Serialize;

/// Dark green header fill.
pub const HEADER_FILL: u32 = 0x1B5E20;
/// Header text color.
pub const WHITE: u32 = 0xFFFFFF;
/// Monetary text color.
pub const MONEY_GREEN: u32 = 0x2E7D32;
/// Link-like text color.
pub const LINK_BLUE: u32 = 0x1565C0;
/// Data cell border color.
pub const LIGHT_GRAY: u32 = 0xD9D9D9;
/// Header border color.
pub const HEADER_BORDER: u32 = 0x000000;

/// Detail columns rendered with the centered rule (0-based).
const CENTERED_COLUMNS: [usize; 5] = [0, 2, 3, 6, 7];
const AMOUNT_COLUMN: usize = 5;
const RECEIPT_COLUMN: usize = 8;

/// The presentation role of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleRole {
    Header,
    Data,
    Centered,
    Monetary,
    Link,
}

impl StyleRole {
    pub const ALL: [StyleRole; 5] = [
        StyleRole::Header,
        StyleRole::Data,
        StyleRole::Centered,
        StyleRole::Monetary,
        StyleRole::Link,
    ];

    /// The presentation rule for this role.
    pub fn rule(self) -> StyleRule {
        let data = StyleRule::data();
        match self {
            StyleRole::Header => StyleRule {
                bold: true,
                font_color: Some(WHITE),
                fill_color: Some(HEADER_FILL),
                align: Align::Center,
                border_color: HEADER_BORDER,
                ..data
            },
            StyleRole::Data => data,
            StyleRole::Centered => StyleRule {
                align: Align::Center,
                ..data
            },
            StyleRole::Monetary => StyleRule {
                bold: true,
                font_color: Some(MONEY_GREEN),
                align: Align::Right,
                ..data
            },
            StyleRole::Link => StyleRule {
                font_color: Some(LINK_BLUE),
                underline: true,
                ..data
            },
        }
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Border {
    None,
    Thin,
}

/// A reusable bundle of cell presentation attributes.
///
/// Colors are `0xRRGGBB`; `None` means the engine default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub bold: bool,
    pub underline: bool,
    pub font_color: Option<u32>,
    pub fill_color: Option<u32>,
    pub align: Align,
    pub border: Border,
    pub border_color: u32,
}

impl StyleRule {
    /// Base rule every data cell starts from: left aligned, thin light-gray border.
    pub fn data() -> Self {
        StyleRule {
            bold: false,
            underline: false,
            font_color: None,
            fill_color: None,
            align: Align::Left,
            border: Border::Thin,
            border_color: LIGHT_GRAY,
        }
    }
}

/// Role of a data cell in the detail sheet.
pub fn detail_role(col: usize) -> StyleRole {
    match col {
        AMOUNT_COLUMN => StyleRole::Monetary,
        RECEIPT_COLUMN => StyleRole::Link,
        c if CENTERED_COLUMNS.contains(&c) => StyleRole::Centered,
        _ => StyleRole::Data,
    }
}

/// Attaches a style role to every populated cell of the workbook.
///
/// Row 1 of every sheet gets the header rule. Detail data cells are styled by
/// column; all other sheets use the plain data rule.
pub fn apply_styles(workbook: &mut Workbook) {
    let mut styled = 0usize;

    for sheet in &mut workbook.sheets {
        let is_detail = sheet.name == DETAIL_SHEET_NAME;
        let widths = sheet.rows.iter().map(Vec::len).collect::<Vec<_>>();

        for (row, width) in widths.into_iter().enumerate() {
            for col in 0..width {
                let role = match (row, is_detail) {
                    (0, _) => StyleRole::Header,
                    (_, true) => detail_role(col),
                    (_, false) => StyleRole::Data,
                };
                if let Some(cell) = sheet.cell_mut(row, col) {
                    cell.style = Some(role);
                    styled += 1;
                }
            }
        }
    }

    tracing::debug!(cells = styled, "styles applied");
}
