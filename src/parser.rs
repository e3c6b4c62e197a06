//! Locate annotated picture strings in Go or Rust source using PEST.
//!
//! A picture string is announced by a line comment above it:
//!
//! ```text
//! //bitpeek:sometag:1
//! {`Example`, `Type:'F 'EXT=.ACK= Id:0xFHH from IPv4.Address32@:D.16@`},
//! ```
//!
//! The optional tag is matched against [`LocateOptions::tag_filter`]; the
//! optional skip digit (0 to 7) passes over that many string literals first,
//! so `:1` above skips `Example`.

use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SourceParser;

/// Highest skip count a marker may carry.
pub const MAX_SKIP: u8 = 7;

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("Parse error: {0}")]
    Grammar(#[from] Box<pest::error::Error<Rule>>),
}

#[derive(Debug, Clone, Default)]
pub struct LocateOptions {
    /// Only markers whose tag contains this text are honoured.
    pub tag_filter: Option<String>,
}

impl LocateOptions {
    fn accepts(&self, tag: Option<&str>) -> bool {
        match self.tag_filter.as_deref() {
            None | Some("") => true,
            Some(filter) => tag.is_some_and(|t| t.contains(filter)),
        }
    }
}

/// A string literal announced by a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicLiteral<'a> {
    pub tag: Option<&'a str>,
    /// Literal content between the delimiters, escapes untouched.
    pub text: &'a str,
    /// 1-based line the literal starts on.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker<'a> {
    tag: Option<&'a str>,
    skip: u8,
}

fn build_marker(pair: pest::iterators::Pair<'_, Rule>) -> Marker<'_> {
    let mut marker = Marker { tag: None, skip: 0 };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::tag => {
                let tag = inner.as_str().trim_end();
                marker.tag = (!tag.is_empty()).then_some(tag);
            }
            Rule::skip => {
                marker.skip = match inner.as_str().bytes().next() {
                    Some(d @ b'0'..=b'7') => d - b'0',
                    _ => 0,
                };
            }
            _ => {}
        }
    }
    marker
}

/// Find every announced picture string in `source`, in source order.
pub fn locate<'a>(source: &'a str, options: &LocateOptions) -> Result<Vec<PicLiteral<'a>>, LocateError> {
    let pairs = SourceParser::parse(Rule::source, source).map_err(Box::new)?;
    let mut found = Vec::new();
    let mut armed: Option<Marker<'a>> = None;

    for pair in pairs.flat_map(|p| p.into_inner()) {
        match pair.as_rule() {
            Rule::marker => {
                let marker = build_marker(pair);
                if options.accepts(marker.tag) {
                    log::debug!("marker {:?} skip {}", marker.tag, marker.skip);
                    armed = Some(marker);
                }
            }
            Rule::string | Rule::raw_string | Rule::rust_raw_string => {
                let Some(marker) = armed.as_mut() else { continue };
                if marker.skip > 0 {
                    marker.skip -= 1;
                    continue;
                }
                let line = pair.line_col().0;
                let text = pair.into_inner().next().map_or("", |body| body.as_str());
                log::debug!("picture string at line {line}: {text:?}");
                found.push(PicLiteral {
                    tag: marker.tag,
                    text,
                    line,
                });
                armed = None;
            }
            _ => {}
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        locate(source, &LocateOptions::default())
            .expect("locate")
            .into_iter()
            .map(|p| p.text)
            .collect()
    }

    #[test]
    fn marker_parts() {
        let src = "//bitpeek:Ovl:1 \n";
        let pair = SourceParser::parse(Rule::source, src)
            .expect("parse")
            .flat_map(|p| p.into_inner())
            .find(|p| p.as_rule() == Rule::marker)
            .expect("marker");
        assert_eq!(build_marker(pair), Marker { tag: Some("Ovl"), skip: 1 });
    }

    #[test]
    fn skip_digit_out_of_range_is_zero() {
        assert_eq!(texts("//bitpeek:t:8\n\"a\" \"b\""), vec!["a"]);
        assert_eq!(texts("//bitpeek:t:x\n\"a\""), vec!["a"]);
        assert_eq!(texts("//bitpeek:t:2\n\"a\" `b` r\"c\""), vec!["c"]);
    }

    #[test]
    fn unmarked_literals_are_ignored() {
        assert!(texts("let a = \"D.11@\";\n").is_empty());
        assert!(texts("//bitpeeking\n\"D.11@\"").is_empty());
    }

    #[test]
    fn marker_disarms_after_one_literal() {
        assert_eq!(texts("//bitpeek\n\"A\" \"C\"\n"), vec!["A"]);
    }

    #[test]
    fn escapes_and_quotes_do_not_confuse_scanning() {
        let src = "//bitpeek\nlet q = '\"'; let s = \"x\\\"y\";";
        assert_eq!(texts(src), vec!["x\\\"y"]);
        let src = "//bitpeek\n/* \"not\" */ r#\"a\"b\"#";
        assert_eq!(texts(src), vec!["a\"b"]);
    }

    #[test]
    fn filter_matches_tag_substring() {
        let src = "//bitpeek:alpha\n\"A\"\n//bitpeek:beta\n\"C\"\n//bitpeek\n\"G\"";
        let options = LocateOptions {
            tag_filter: Some("et".to_string()),
        };
        let found = locate(src, &options).expect("locate");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "C");
        assert_eq!(found[0].tag, Some("beta"));
        assert_eq!(found[0].line, 4);
    }
}
