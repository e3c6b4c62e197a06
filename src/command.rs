//! Command validators: bit width and shape rules for every command character.
//!
//! ## Valid numbers
//!
//! - Before a run of `H` may come a *single* completing `B`, `E` or `F`
//!   (`BH` 5 bits, `EH` 6, `FH` 7, `HH` 8, `BHH` 9 ...). Anything digit-like
//!   glued before that is a bad hex shape.
//! - `EFF` is a full octal byte (2+3+3 bits) and must not be glued to a
//!   digit-capable character. A lone `F` must not follow another number
//!   digit (`H`, `F`, `E`, `B`), a lone `E` must not follow any command
//!   letter; longer `F` or `E` runs are rejected outright.
//! - A `B` must not follow a digit-capable character other than another `B`.
//! - An asterisk right after an `H`, `F` or `E` run turns its checks off:
//!   `FFF*`, `EFHH*`. An empty quote pair between commands separates them:
//!   `F''F''F`, `B''EH`.

use crate::ast::{FieldKind, PicError};

/// One of the four single-bit marks that also open a label shield.
pub fn is_mark(b: u8) -> bool {
    matches!(b, b'<'..=b'?')
}

/// Characters that make a glued `B` look like part of a wider number.
fn is_glue_digit(b: u8) -> bool {
    matches!(b, b'1'..=b'H') && !matches!(b, b':' | b';')
}

/// Command letters that may start a number.
fn is_number_letter(b: u8) -> bool {
    matches!(b, b'A'..=b'H')
}

/// Letters that are digits of a hex, octal or binary number.
fn is_number_digit(b: u8) -> bool {
    matches!(b, b'H' | b'F' | b'E' | b'B')
}

/// A `*` right after the run ending at `pos` turns its checks off.
fn checks_off(pic: &[u8], pos: usize) -> bool {
    pic.get(pos + 1) == Some(&b'*')
}

const IPV4_PIC: &[u8] = b"IPv4.Address32@";

/// Command recognized at one position of the padded picture. `D` and the
/// digits are lead-ins read by the `@` validator, never commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `<`, `=`, `>` or `?`.
    Mark,
    /// `B`.
    Bit,
    /// `A`, `C` or `G` with their fixed width.
    Range(u32),
    /// `H`.
    Hex,
    /// `F`.
    Octal,
    /// `E`.
    TwoBit,
    /// `@` closing a `dd@` variable field.
    Variable,
}

impl Command {
    pub fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            b if is_mark(b) => Command::Mark,
            b'B' => Command::Bit,
            b'A' => Command::Range(7),
            b'C' => Command::Range(8),
            b'G' => Command::Range(5),
            b'H' => Command::Hex,
            b'F' => Command::Octal,
            b'E' => Command::TwoBit,
            b'@' => Command::Variable,
            _ => return None,
        })
    }
}

/// A command accepted by its validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Leftmost padded position the command consumed.
    pub start: usize,
    pub width: u32,
    pub kind: FieldKind,
}

/// A command rejected by its validator, with the position the caret starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub error: PicError,
    pub at: usize,
}

fn reject<T>(error: PicError, at: usize) -> Result<T, Rejection> {
    Err(Rejection { error, at })
}

/// Validate `cmd`, the command at padded position `pos`.
///
/// `pic` must be framed as by [`crate::scan::Padded`].
pub fn measure(pic: &[u8], pos: usize, cmd: Command) -> Result<Shape, Rejection> {
    match cmd {
        Command::Mark => Ok(Shape {
            start: pos,
            width: 1,
            kind: FieldKind::SingleBit,
        }),
        Command::Bit => single_bit(pic, pos),
        Command::Range(width) => Ok(Shape {
            start: pos,
            width,
            kind: FieldKind::FixedRange,
        }),
        Command::Hex => hex_chain(pic, pos),
        Command::Octal => octal_chain(pic, pos),
        Command::TwoBit => two_bit_chain(pic, pos),
        Command::Variable => variable(pic, pos),
    }
}

/// Character left of `pos`, or `None` at the start marker.
fn before(pic: &[u8], pos: usize) -> Option<u8> {
    (pos > 1).then(|| pic[pos - 1])
}

/// Walk left over identical characters; returns the run start and its length.
fn run_start(pic: &[u8], pos: usize) -> (usize, u32) {
    let b = pic[pos];
    let mut start = pos;
    while start > 1 && pic[start - 1] == b {
        start -= 1;
    }
    (start, (pos - start + 1) as u32)
}

fn single_bit(pic: &[u8], pos: usize) -> Result<Shape, Rejection> {
    if let Some(prev) = before(pic, pos) {
        if prev != b'B' && is_glue_digit(prev) {
            return reject(PicError::MisleadingNumber, pos);
        }
    }
    Ok(Shape {
        start: pos,
        width: 1,
        kind: FieldKind::SingleBit,
    })
}

fn hex_chain(pic: &[u8], pos: usize) -> Result<Shape, Rejection> {
    let unchecked = checks_off(pic, pos);
    let (mut start, run) = run_start(pic, pos);
    let mut width = 4 * run;
    let completer = match before(pic, start) {
        Some(b'F') => 3,
        Some(b'E') => 2,
        Some(b'B') => 1,
        _ => 0,
    };
    if completer > 0 {
        width += completer;
        start -= 1;
    }
    if !unchecked && before(pic, start).is_some_and(is_number_digit) {
        return reject(PicError::BadHexShape, start);
    }
    Ok(Shape {
        start,
        width,
        kind: FieldKind::HexChain,
    })
}

fn octal_chain(pic: &[u8], pos: usize) -> Result<Shape, Rejection> {
    let unchecked = checks_off(pic, pos);
    let (mut start, run) = run_start(pic, pos);
    let mut width = 3 * run;
    let octal = run == 2 && before(pic, start) == Some(b'E');
    if octal {
        width += 2;
        start -= 1;
    }
    let prev = before(pic, start);
    let ok = unchecked
        || (run == 1 && !prev.is_some_and(is_number_digit))
        || (octal && !prev.is_some_and(is_glue_digit));
    if !ok {
        return reject(PicError::MisleadingNumber, start);
    }
    Ok(Shape {
        start,
        width,
        kind: FieldKind::OctalChain,
    })
}

fn two_bit_chain(pic: &[u8], pos: usize) -> Result<Shape, Rejection> {
    let unchecked = checks_off(pic, pos);
    let (start, run) = run_start(pic, pos);
    let ok = unchecked || (run == 1 && !before(pic, start).is_some_and(is_number_letter));
    if !ok {
        return reject(PicError::MisleadingNumber, start);
    }
    Ok(Shape {
        start,
        width: 2 * run,
        kind: FieldKind::TwoBitChain,
    })
}

/// `!dd@`, `D<filler>dd@` or `IPv4.Address32@`, with `pos` at the `@`.
fn variable(pic: &[u8], pos: usize) -> Result<Shape, Rejection> {
    if pos < 3 {
        return reject(PicError::MisplacedAt, 0);
    }
    let (tens, ones) = (pic[pos - 2], pic[pos - 1]);
    if !tens.is_ascii_digit() || !ones.is_ascii_digit() {
        return reject(PicError::BadBitcount, pos - 2);
    }
    let bits = u32::from(tens - b'0') * 10 + u32::from(ones - b'0');
    if bits == 0 || bits > 64 {
        return reject(PicError::BadBitcount, pos - 2);
    }
    // longer decimal fields need a longer filler between `D` and the digits
    let reach = if bits > 16 { (bits / 3) as usize } else { 4 };

    if pic[pos - 3] == b'!' {
        return Ok(Shape {
            start: pos - 3,
            width: bits,
            kind: FieldKind::Skip,
        });
    }
    if pos >= reach && pic[pos - reach] == b'D' {
        return Ok(Shape {
            start: pos - reach,
            width: bits,
            kind: FieldKind::DecimalNumber,
        });
    }
    let span = IPV4_PIC.len() - 1;
    if pos > span && pic[pos - span] == b'I' {
        let start = pos - span;
        if &pic[start..=pos] != IPV4_PIC {
            return reject(PicError::InvalidIpv4, start);
        }
        return Ok(Shape {
            start,
            width: 32,
            kind: FieldKind::Ipv4Address,
        });
    }
    reject(PicError::MissingLeadIn, pos - 2)
}
