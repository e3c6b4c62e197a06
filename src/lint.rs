//! Result assembler: picture string in, four report lines out.
//!
//! A successful check yields `OK.` followed by the diagram. A shape error
//! yields the message, an empty line, the picture itself and a caret line
//! pointing at the offending run. An overflow keeps the diagram and only
//! changes the status and the `bits:` caption.
//!
//! ```text
//! Error: Misleading use of B/E/F number. See section 'Valid Numbers' in docs.
//!
//! Bad one:BEFF (9b)
//!         ^^^^HERE
//! ```

use crate::ast::{Diagnostic, Layout};
use crate::diagram::{char_columns, render};
use crate::layout::scan;
use crate::scan::Padded;
use std::fmt;

/// Status line of a clean picture string.
pub const OK: &str = "OK.";

/// The four report lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// `OK.` or `Error: <message>`.
    pub status: String,
    pub bits: String,
    pub marks: String,
    pub cmds: String,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.status == OK
    }

    pub fn lines(&self) -> [&str; 4] {
        [&self.status, &self.bits, &self.marks, &self.cmds]
    }

    pub fn into_lines(self) -> [String; 4] {
        [self.status, self.bits, self.marks, self.cmds]
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}\n{}", self.status, self.bits, self.marks, self.cmds)
    }
}

/// Check a picture string and draw its report.
pub fn validate(pic: &str) -> Report {
    let report = match scan(pic) {
        Ok(layout) => {
            let overflow = layout.overflow();
            let diagram = render(&layout, overflow.is_some());
            Report {
                status: match overflow {
                    Some(diag) => format!("Error: {diag}"),
                    None => OK.to_string(),
                },
                bits: diagram.bits,
                marks: diagram.marks,
                cmds: diagram.cmds,
            }
        }
        Err(diag) => {
            let padded = Padded::new(pic);
            Report {
                status: format!("Error: {diag}"),
                bits: String::new(),
                marks: padded.echo().to_string(),
                cmds: caret_line(&padded, &diag),
            }
        }
    };
    log::debug!("{:?}: {}", pic, report.status);
    report
}

/// Like [`scan`], but a layout wider than 64 bits is an error too.
pub fn check(pic: &str) -> Result<Layout<'_>, Diagnostic> {
    let layout = scan(pic)?;
    match layout.overflow() {
        Some(diag) => Err(diag),
        None => Ok(layout),
    }
}

/// Carets under the offending run, starting two columns early so that even
/// a one-character run stays visible. Columns follow the echoed picture.
fn caret_line(padded: &Padded, diag: &Diagnostic) -> String {
    let mut line = String::new();
    for (i, c) in padded.as_str()[..diag.span.end].char_indices() {
        let mark = if i + 1 >= diag.span.start { '^' } else { ' ' };
        line.extend(std::iter::repeat(mark).take(char_columns(c)));
    }
    line.push_str("HERE");
    line
}
