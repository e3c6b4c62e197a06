//! Backward shielding scanner.
//!
//! The picture is walked from its last character toward its first. At every
//! character three escapes are tried in order:
//!
//! - a backslash to the left makes the character literal and is skipped with it;
//! - an apostrophe toggles quoting, or closes a label shield;
//! - a single-bit mark (`<`, `=`, `>`, `?`) opens a label shield, inside which
//!   only further marks are commands.
//!
//! Everything else that is not a command character is label text.

use crate::command::Command;

/// Byte placed before the picture so that index 0 is never a command.
pub const START: u8 = b'?';

/// Picture framed by the start marker and a trailing space.
///
/// Positions handed out by [`Scanner`] index into these bytes; input byte
/// `i` lives at padded position `i + 1`.
#[derive(Debug, Clone)]
pub struct Padded {
    text: String,
}

impl Padded {
    pub fn new(pic: &str) -> Self {
        let mut text = String::with_capacity(pic.len() + 2);
        text.push(START as char);
        text.push_str(pic);
        text.push(' ');
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Padded position of the last input byte (the start marker for empty input).
    pub fn last(&self) -> usize {
        self.text.len() - 2
    }

    /// Input text with the trailing space, as echoed under an error.
    pub fn echo(&self) -> &str {
        &self.text[1..]
    }
}

/// Scanning mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shield {
    #[default]
    Open,
    /// Inside an apostrophe quote: nothing is a command.
    Quoted,
    /// After a single-bit mark: only marks are commands.
    Label,
}

/// Yields command characters with their padded positions, right to left.
///
/// Validators may consume characters to the left of a command; they report
/// the leftmost one back through [`Scanner::resume_at`].
#[derive(Debug, Clone)]
pub struct Scanner<'p> {
    pic: &'p [u8],
    pos: usize,
    shield: Shield,
}

impl<'p> Scanner<'p> {
    pub fn new(pic: &'p [u8]) -> Self {
        Self {
            pic,
            pos: pic.len().saturating_sub(1),
            shield: Shield::Open,
        }
    }

    /// Continue scanning left of `pos`.
    pub fn resume_at(&mut self, pos: usize) {
        self.pos = pos;
    }
}

impl Iterator for Scanner<'_> {
    type Item = (usize, Command);

    fn next(&mut self) -> Option<(usize, Command)> {
        while self.pos > 1 {
            self.pos -= 1;
            let pos = self.pos;
            let b = self.pic[pos];
            if self.pic[pos - 1] == b'\\' {
                self.pos -= 1;
                continue;
            }
            match (b, self.shield) {
                (b'\'', Shield::Open) => self.shield = Shield::Quoted,
                (b'\'', _) => self.shield = Shield::Open,
                (_, Shield::Quoted) => {}
                (b, shield) => match (Command::from_byte(b), shield) {
                    (Some(Command::Mark), _) => {
                        self.shield = Shield::Label;
                        return Some((pos, Command::Mark));
                    }
                    (Some(cmd), Shield::Open) => return Some((pos, cmd)),
                    _ => {}
                },
            }
        }
        self.pos = 0;
        None
    }
}
