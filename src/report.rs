//! Diagnostic rendering for the CLI.
//!
//! Parse errors carry raw byte spans; this module attaches the source text
//! and renders them through miette so spans become labeled underlines and
//! remedies become help text.

use miette::{NamedSource, Report};
use sprig_syntax::{LineMap, ParseError};

/// Render a batch of errors against their source, one report after another.
pub fn render_errors(name: &str, source: &str, errors: &[ParseError]) -> String {
    let mut out = String::new();
    for err in errors {
        let report = Report::new(err.clone())
            .with_source_code(NamedSource::new(name, source.to_string()));
        out.push_str(&format!("{report:?}"));
    }
    out
}

/// One-line summary of an error, for compact listings.
pub fn summarize(name: &str, source: &str, err: &ParseError) -> String {
    let map = LineMap::new(source);
    let (line, col) = map.offset_to_line_col(err.span.start);
    format!("{name}:{line}:{col}: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_use_line_and_column() {
        let source = "a\n(b";
        let errors = sprig_syntax::parse(source).unwrap_err();
        let summary = summarize("demo.sg", source, &errors[0]);
        assert!(summary.starts_with("demo.sg:2:1:"), "got {summary}");
        assert!(summary.contains("unmatched open delimiter"));
    }

    #[test]
    fn rendered_reports_include_the_remedy() {
        let source = "x =";
        let parsed = sprig_syntax::parse(source).unwrap();
        let rendered = render_errors("demo.sg", source, &parsed.errors);
        assert!(rendered.contains("missing its operand"));
    }
}
