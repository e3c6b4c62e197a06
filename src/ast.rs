//! Data model for a scanned picture string: fields, layout and diagnostics.

use std::ops::Range;

/// Hard limit on bits a picture string may describe.
pub const MAX_BITS: u32 = 64;

/// Sanity bound on the number of fields one picture string may produce.
pub const MAX_FIELDS: usize = 256;

/// What produced a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of the `<`, `=`, `>`, `?` marks or a `B`.
    SingleBit,
    /// `A` (7 bits), `C` (8 bits) or `G` (5 bits).
    FixedRange,
    /// Run of `H`, optionally completed by one leading `B`, `E` or `F`.
    HexChain,
    /// Run of `F`, optionally completed by one leading `E` (octal byte).
    OctalChain,
    /// Run of `E`.
    TwoBitChain,
    /// `D` lead-in followed by `dd@`.
    DecimalNumber,
    /// `!dd@` padding.
    Skip,
    /// `IPv4.Address32@`.
    Ipv4Address,
    /// Literal text after the last command; carries no bits.
    LiteralTail,
}

/// One bit range together with the text that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub low_bit: u32,
    pub width: u32,
    /// Literal text preceding the command, up to and including the command itself.
    pub label: &'a str,
    /// Byte range of `label` inside the input string.
    pub label_span: Range<usize>,
    pub kind: FieldKind,
}

impl Field<'_> {
    /// Index of the most significant bit. Equals `low_bit` for zero-width fields.
    pub fn high_bit(&self) -> u32 {
        self.low_bit + self.width.saturating_sub(1)
    }
}

/// Fields of a successfully scanned picture string, in scan order (lowest bit first).
///
/// The first entry is always the [`FieldKind::LiteralTail`] holding whatever
/// text follows the last command, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<'a> {
    pub input: &'a str,
    pub fields: Vec<Field<'a>>,
}

impl<'a> Layout<'a> {
    /// Bits committed by all fields.
    pub fn total_bits(&self) -> u32 {
        self.fields.iter().map(|f| f.width).sum()
    }

    /// Fields high bit first, the order they are drawn in.
    pub fn display_order(&self) -> impl Iterator<Item = &Field<'a>> {
        self.fields.iter().rev()
    }

    /// `Some` when the layout is complete but describes more than [`MAX_BITS`].
    pub fn overflow(&self) -> Option<Diagnostic> {
        (self.total_bits() > MAX_BITS).then(|| Diagnostic {
            error: PicError::TooManyBits,
            span: 0..self.input.len(),
            kind: DiagnosticKind::Overflow,
        })
    }
}

/// Reasons a picture string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PicError {
    #[error("Misleading use of B/E/F number. See section 'Valid Numbers' in docs.")]
    MisleadingNumber,
    #[error("Bad shape of a Hex number. See section 'Valid Numbers' in docs.")]
    BadHexShape,
    #[error("Misplaced @")]
    MisplacedAt,
    #[error("Bad bitcount.")]
    BadBitcount,
    #[error("Can't find valid start command for this dd@.")]
    MissingLeadIn,
    #[error("Invalid pic for IPv4.")]
    InvalidIpv4,
    #[error("Pic string takes more than 64 bits!")]
    TooManyBits,
    #[error("Pic string has more than 256 fields!")]
    TooManyFields,
}

/// Whether a diagnostic points at a spot or covers the whole string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Scanning stopped at the offending run.
    Positional,
    /// Detected only after the whole string was consumed.
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: PicError,
    /// Byte range in the input. For positional errors it starts at the
    /// offending run and ends after the command that triggered the check.
    pub span: Range<usize>,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for Diagnostic {}
