//! Caret-style rendering of a [`GraphQLError`] against its source text,
//! using `ariadne`'s `Report` builder for the box-drawing and color the
//! plain [`GraphQLError::caret_excerpt`] doesn't attempt.

use ariadne::{Label, Report, ReportKind, Source};

use super::GraphQLError;

/// Renders `error` as a multi-line, caret-annotated report pointing at
/// `offset` within `source_name`/`body`. Falls back to just the message if
/// `error` carries no position at all.
pub fn render(error: &GraphQLError, source_name: &str, body: &str) -> String {
    let Some(&offset) = error.positions.first() else {
        return error.message.clone();
    };
    let offset = offset.min(body.len());
    let span = offset..offset;

    let mut buffer = Vec::new();
    let report = Report::build(ReportKind::Error, source_name, offset)
        .with_message(&error.message)
        .with_label(Label::new((source_name, span)).with_message(&error.message))
        .finish();

    if report.write((source_name, Source::from(body)), &mut buffer).is_err() {
        return error.message.clone();
    }

    String::from_utf8(buffer).unwrap_or_else(|_| error.message.clone())
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::error::GraphQLError;

    #[test]
    fn falls_back_to_the_message_without_a_position() {
        let error = GraphQLError::new("boom");
        assert_eq!(render(&error, "test", "{}"), "boom");
    }

    #[test]
    fn renders_a_report_when_a_position_is_present() {
        let error = GraphQLError::new("unexpected token").at_offset("{ a", 3);
        let rendered = render(&error, "test.graphql", "{ a");
        assert!(rendered.contains("unexpected token"));
    }
}
