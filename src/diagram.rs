//! Three-line diagram: bit ranges, boundary ticks, and the command text under them.
//!
//! ```text
//! bits:|63 3b 61|    60|   59|58 11b 48|47..     32b     ..16|15 16b 0|
//!              ^      ^     ^         ^                     ^        ^|
//! cmds:¨¨Type:'F¨ 'EXT=¨.ACK=¨ Id:0xFHH¨ from IPv4.Address32@¨¨¨:D.16@¨
//! ```
//!
//! Every segment of the three lines has the same display width. The label
//! always wins: bit descriptions are padded to fit it, never the reverse.

use crate::ast::{Field, FieldKind, Layout};
use unicode_width::UnicodeWidthChar;

/// Pads labels that are narrower than their bit description.
pub const FILLER: char = '¨';
/// Marks the low end of every field.
pub const TICK: char = '^';

/// Terminal columns taken by `c`. Control characters take none.
pub fn char_columns(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Terminal columns taken by `text`, summed per character as [`char_columns`].
pub fn columns(text: &str) -> usize {
    text.chars().map(char_columns).sum()
}

/// Drawing of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub bits: String,
    pub marks: String,
    pub cmds: String,
}

impl Segment {
    pub fn new(field: &Field<'_>) -> Self {
        if field.kind == FieldKind::LiteralTail {
            return Segment {
                cmds: field.label.to_string(),
                ..Segment::default()
            };
        }
        // one column for the separator after the label
        let slot = columns(field.label) + 1;
        let bits = describe_bits(field, slot);
        let mut marks = " ".repeat(bits.len() - 1);
        marks.push(TICK);
        let mut cmds: String = std::iter::repeat(FILLER)
            .take(bits.len().saturating_sub(slot))
            .collect();
        cmds.push_str(field.label);
        cmds.push(FILLER);
        Segment { bits, marks, cmds }
    }
}

/// `|lo` for one bit, otherwise `|hi Nb lo`, `|hi.. Nb ..lo` or that form
/// widened to `slot` columns.
fn describe_bits(field: &Field<'_>, slot: usize) -> String {
    let (hi, lo, width) = (field.high_bit(), field.low_bit, field.width);
    if width <= 1 {
        let lo = lo.to_string();
        let pad = slot.saturating_sub(lo.len() + 1);
        return format!("|{}{lo}", " ".repeat(pad));
    }
    let short = format!("|{hi} {width}b {lo}");
    if slot <= short.len() {
        return short;
    }
    let long = format!("|{hi}.. {width}b ..{lo}");
    if slot <= long.len() {
        return long;
    }
    let extra = slot - long.len();
    format!(
        "|{hi}.. {}{width}b{} ..{lo}",
        " ".repeat(extra - extra / 2),
        " ".repeat(extra / 2)
    )
}

/// The three rendered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub bits: String,
    pub marks: String,
    pub cmds: String,
}

/// Draw `layout` high bit first. `overflow` swaps the `bits:` caption for ` ERR:`.
pub fn render(layout: &Layout<'_>, overflow: bool) -> Diagram {
    let mut diagram = Diagram {
        bits: if overflow { " ERR:" } else { "bits:" }.to_string(),
        marks: "     ".to_string(),
        cmds: format!("cmds:{FILLER}"),
    };
    for field in layout.display_order() {
        let segment = Segment::new(field);
        diagram.bits.push_str(&segment.bits);
        diagram.marks.push_str(&segment.marks);
        diagram.cmds.push_str(&segment.cmds);
    }
    diagram.bits.push('|');
    diagram.marks.push('|');
    diagram
}
