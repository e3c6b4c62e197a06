//! # bplint — bitpeek picture string linter
//!
//! A picture string describes how up to 64 bits of an integer are shown:
//! literal label text mixed with one-character field commands. This crate
//! checks that the command sequence is well formed and unambiguous, works
//! out the bit range of every command, and draws a three-line map from bit
//! ranges to the text that produced them.
//!
//! ## Commands
//!
//! - `<` `=` `>` `?`: one bit each; also open a label shield
//! - `B` 1 bit, `E` 2, `F` 3, `H` 4 (number digits, see [`command`])
//! - `A` 7 bits, `C` 8, `G` 5
//! - `!dd@` skip `dd` bits, `D<filler>dd@` decimal, `IPv4.Address32@`
//! - `'...'` quotes text, `\x` escapes one character, `*` after a run
//!   turns its number checks off
//!
//! ## Example
//!
//! ```
//! let report = bplint::validate("D.11@");
//! assert_eq!(report.status, "OK.");
//! assert_eq!(report.bits, "bits:|10 11b 0|");
//! ```
//!
//! Scanning runs from the last character to the first, so the first field
//! found holds bit 0.

pub mod ast;
pub mod command;
pub mod diagram;
pub mod layout;
pub mod lint;
pub mod parser;
pub mod report;
pub mod scan;

pub use ast::{Diagnostic, DiagnosticKind, Field, FieldKind, Layout, PicError, MAX_BITS};
pub use layout::scan;
pub use lint::{check, validate, Report};
pub use parser::{locate, LocateError, LocateOptions, PicLiteral};
