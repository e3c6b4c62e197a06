//! Scan driver and bit accountant: turns a picture string into a [`Layout`].

use crate::ast::{Diagnostic, DiagnosticKind, Field, FieldKind, Layout, PicError, MAX_FIELDS};
use crate::command::measure;
use crate::scan::{Padded, Scanner};

/// Running bit offset. Starts at bit 0 and only grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitBudget {
    offset: u32,
}

impl BitBudget {
    /// Index of the next free bit.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Commit `width` bits and return the low bit of the committed range.
    pub fn commit(&mut self, width: u32) -> u32 {
        let low = self.offset;
        self.offset += width;
        low
    }
}

/// Command whose label is still being collected.
struct Pending {
    low_bit: u32,
    width: u32,
    kind: FieldKind,
}

/// Scan a picture string low bits first.
///
/// Stops at the first shape error. A layout wider than 64 bits is still
/// returned; see [`Layout::overflow`].
pub fn scan(pic: &str) -> Result<Layout<'_>, Diagnostic> {
    let padded = Padded::new(pic);
    let bytes = padded.as_bytes();
    let mut scanner = Scanner::new(bytes);
    let mut budget = BitBudget::default();
    let mut fields = Vec::new();
    // padded position of the last character belonging to the open label
    let mut label_end = padded.last();
    let mut pending: Option<Pending> = None;

    loop {
        let next = scanner.next();
        let boundary = next.map_or(0, |(pos, _)| pos);
        // padded `boundary + 1 ..= label_end` is input `boundary .. label_end`
        let span = boundary..label_end;
        let label = &pic[span.clone()];
        fields.push(match pending.take() {
            None => Field {
                low_bit: 0,
                width: 0,
                label,
                label_span: span,
                kind: FieldKind::LiteralTail,
            },
            Some(p) => Field {
                low_bit: p.low_bit,
                width: p.width,
                label,
                label_span: span,
                kind: p.kind,
            },
        });
        let Some((pos, cmd)) = next else { break };

        label_end = pos;
        let shape = measure(bytes, pos, cmd).map_err(|r| positional(r.error, r.at, pos))?;
        if fields.len() >= MAX_FIELDS {
            return Err(positional(PicError::TooManyFields, pos, pos));
        }
        log::trace!(
            "{:?} `{}` at {}: {} bit(s)",
            shape.kind,
            &padded.as_str()[shape.start..=pos],
            pos - 1,
            shape.width
        );
        let low_bit = budget.commit(shape.width);
        scanner.resume_at(shape.start);
        pending = Some(Pending {
            low_bit,
            width: shape.width,
            kind: shape.kind,
        });
    }

    log::debug!("scanned {} field(s), {} bit(s)", fields.len(), budget.offset());
    Ok(Layout { input: pic, fields })
}

/// Diagnostic for a run starting at padded `at` whose command ends at padded `end`.
fn positional(error: PicError, at: usize, end: usize) -> Diagnostic {
    Diagnostic {
        error,
        span: at.saturating_sub(1)..end,
        kind: DiagnosticKind::Positional,
    }
}
