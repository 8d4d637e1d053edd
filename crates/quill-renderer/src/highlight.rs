//! Code block highlighting.
//!
//! Syntax highlighting itself is out of scope: [`Highlighter`] is the seam a
//! real highlighter plugs into. [`PlainHighlighter`] escapes the code and marks
//! the lines selected by the `highlight` attribute.

use std::fmt::Write;
use std::ops::RangeInclusive;

use crate::error::RenderError;
use crate::util::escape_html;

/// Produces markup for a code block body.
///
/// The returned string is inserted verbatim inside
/// `<figure class="code-block">`, so it must already be escaped.
pub trait Highlighter: Send + Sync {
    fn highlight(
        &self,
        code: &str,
        lang: Option<&str>,
        spec: &HighlightSpec,
    ) -> Result<String, RenderError>;
}

/// Lines selected for emphasis, parsed from `highlight="1,3-5"`.
///
/// Line numbers are 1-based and ranges inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightSpec {
    ranges: Vec<RangeInclusive<usize>>,
}

impl HighlightSpec {
    /// Parse a comma-separated list of line numbers and `a-b` ranges.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_renderer::HighlightSpec;
    ///
    /// let spec = HighlightSpec::parse("2, 4-5").unwrap();
    /// assert!(spec.contains(2));
    /// assert!(!spec.contains(3));
    /// assert!(spec.contains(5));
    /// assert!(HighlightSpec::parse("4-2").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Self, RenderError> {
        let invalid = |reason: &str| RenderError::HighlightSpec {
            spec: spec.to_owned(),
            reason: reason.to_owned(),
        };
        let line = |s: &str| -> Result<usize, RenderError> {
            match s.trim().parse::<usize>() {
                Ok(0) => Err(invalid("line numbers start at 1")),
                Ok(n) => Ok(n),
                Err(_) => Err(invalid(&format!("`{}` is not a line number", s.trim()))),
            }
        };

        let mut ranges = Vec::new();
        for part in spec.split(',').filter(|p| !p.trim().is_empty()) {
            let range = match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (line(start)?, line(end)?);
                    if start > end {
                        return Err(invalid("range end is before its start"));
                    }
                    start..=end
                }
                None => {
                    let n = line(part)?;
                    n..=n
                }
            };
            ranges.push(range);
        }
        Ok(Self { ranges })
    }

    /// Whether 1-based `line` is selected.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(&line))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Highlighter that escapes code without colouring it.
///
/// Emits one `<span class="line">` per source line; selected lines also get
/// the configured class.
#[derive(Clone, Debug)]
pub struct PlainHighlighter {
    line_class: String,
}

impl PlainHighlighter {
    /// Class added to selected lines unless configured otherwise.
    pub const DEFAULT_LINE_CLASS: &'static str = "hl-line";

    #[must_use]
    pub fn new(line_class: impl Into<String>) -> Self {
        Self {
            line_class: line_class.into(),
        }
    }
}

impl Default for PlainHighlighter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINE_CLASS)
    }
}

impl Highlighter for PlainHighlighter {
    fn highlight(
        &self,
        code: &str,
        lang: Option<&str>,
        spec: &HighlightSpec,
    ) -> Result<String, RenderError> {
        let mut out = String::with_capacity(code.len() + 64);
        match lang {
            Some(lang) => write!(out, r#"<pre><code class="language-{}">"#, escape_html(lang))?,
            None => out.push_str("<pre><code>"),
        }
        for (index, line) in code.lines().enumerate() {
            if spec.contains(index + 1) {
                write!(
                    out,
                    r#"<span class="line {}">"#,
                    escape_html(&self.line_class)
                )?;
            } else {
                out.push_str(r#"<span class="line">"#);
            }
            out.push_str(&escape_html(line));
            out.push_str("</span>\n");
        }
        out.push_str("</code></pre>");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_spec() {
        assert!(HighlightSpec::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_single_lines_and_ranges() {
        let spec = HighlightSpec::parse("1,3-4").unwrap();
        let selected: Vec<_> = (1..=5).filter(|&n| spec.contains(n)).collect();
        assert_eq!(selected, vec![1, 3, 4]);
    }

    #[test]
    fn test_parse_rejects_zero() {
        let err = HighlightSpec::parse("0").unwrap_err();
        assert!(err.to_string().contains("start at 1"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = HighlightSpec::parse("1-x").unwrap_err();
        assert!(err.to_string().contains("`x` is not a line number"));
    }

    #[test]
    fn test_plain_highlighter_with_language() {
        let html = PlainHighlighter::default()
            .highlight("let a = 1;\nlet b = a < 2;\n", Some("rust"), &HighlightSpec::default())
            .unwrap();
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\"><span class=\"line\">let a = 1;</span>\n\
             <span class=\"line\">let b = a &lt; 2;</span>\n</code></pre>"
        );
    }

    #[test]
    fn test_plain_highlighter_marks_lines() {
        let spec = HighlightSpec::parse("2").unwrap();
        let html = PlainHighlighter::new("hl")
            .highlight("a\nb\n", None, &spec)
            .unwrap();
        assert_eq!(
            html,
            "<pre><code><span class=\"line\">a</span>\n<span class=\"line hl\">b</span>\n</code></pre>"
        );
    }

    #[test]
    fn test_plain_highlighter_escapes_line_class() {
        let spec = HighlightSpec::parse("1").unwrap();
        let html = PlainHighlighter::new("a\"><b")
            .highlight("x\n", None, &spec)
            .unwrap();
        assert_eq!(
            html,
            "<pre><code><span class=\"line a&quot;&gt;&lt;b\">x</span>\n</code></pre>"
        );
    }
}
