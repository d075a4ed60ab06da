//! Prometheus text exposition rendering.
//!
//! Output is `# HELP` and `# TYPE` lines followed by one line per stored
//! series, in first-seen order, joined with `\n` and without a trailing
//! newline. A `__suffix` label is moved onto the metric name; every other
//! label is rendered, and an empty label set still renders as `{}`.

use std::fmt::Write;

use crate::labels::{LabelSet, SUFFIX_LABEL};
use crate::metric::{Metric, MetricKind};

/// Escape a label value: `\` -> `\\`, `"` -> `\"`, newline -> `\n`.
/// Single pass, so inserted backslashes are never escaped again.
pub fn escape_label_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render<K: MetricKind>(metric: &Metric<K>) -> String {
    let kind = metric.kind();
    let name = metric.full_name();

    let mut lines = Vec::with_capacity(2 + metric.store().len());
    lines.push(format!("# HELP {} {}", name, metric.help()));
    lines.push(format!("# TYPE {} {}", name, kind.type_name()));
    for (labels, value) in metric.values() {
        lines.push(sample_line(name, labels, &kind.render_value(&value)));
    }
    lines.join("\n")
}

/// Join several rendered metrics into one scrape body.
pub fn render_all<I, S>(rendered: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rendered
        .into_iter()
        .map(|s| s.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn sample_line(name: &str, mut labels: LabelSet, value: &str) -> String {
    let suffix = labels.remove(SUFFIX_LABEL).unwrap_or_default();

    let mut line = String::new();
    let _ = write!(line, "{}{}{{", name, suffix);
    for (i, (k, v)) in labels.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let _ = write!(line, "{}=\"{}\"", k, escape_label_value(v));
    }
    let _ = write!(line, "}} {}", value);
    line
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::metric::MetricOpts;
    use expect_test::expect;

    struct Count;

    impl MetricKind for Count {
        type Value = u64;

        fn type_name(&self) -> &'static str {
            "counter"
        }

        fn default_value(&self) -> u64 {
            0
        }

        fn render_value(&self, value: &u64) -> String {
            value.to_string()
        }
    }

    fn metric() -> Metric<Count> {
        Metric::new(
            MetricOpts::new("requests", "Total requests")
                .namespace("http")
                .subsystem("server"),
            Count,
        )
        .unwrap()
    }

    #[test]
    fn escapes_label_values() {
        assert_eq!(escape_label_value("a"), "a");
        assert_eq!(escape_label_value("a\"b"), "a\\\"b");
        assert_eq!(escape_label_value("a\\b"), "a\\\\b");
        assert_eq!(escape_label_value("a\nb"), "a\\nb");
        assert_eq!(escape_label_value("\\\"\n"), "\\\\\\\"\\n");
        assert_eq!(escape_label_value("\\n"), "\\\\n");
    }

    #[test]
    fn renders_single_sample() {
        let m = metric();
        m.upsert(&LabelSet::new([("method", "GET")]), |v| v + 5);
        expect![[r#"
            # HELP http_server_requests Total requests
            # TYPE http_server_requests counter
            http_server_requests{method="GET"} 5"#]]
        .assert_eq(&m.serialize());
    }

    #[test]
    fn renders_header_only_without_samples() {
        let m = metric();
        assert_eq!(
            render(&m),
            "# HELP http_server_requests Total requests\n# TYPE http_server_requests counter"
        );
    }

    #[test]
    fn empty_label_set_keeps_braces() {
        let m = metric();
        m.upsert(&LabelSet::default(), |v| v + 1);
        assert!(m.serialize().ends_with("\nhttp_server_requests{} 1"));
    }

    #[test]
    fn suffix_label_moves_onto_name() {
        let m = metric();
        let labels = LabelSet::default()
            .with(SUFFIX_LABEL, "_count")
            .with("le", "0.5");
        m.upsert(&labels, |v| v + 3);
        let out = m.serialize();
        assert!(out.ends_with("\nhttp_server_requests_count{le=\"0.5\"} 3"));
        assert!(!out.contains("__suffix"));

        // the stored label set itself is untouched
        assert_eq!(m.values()[0].0.get(SUFFIX_LABEL), Some("_count"));
    }

    #[test]
    fn suffix_only_renders_empty_braces() {
        let m = metric();
        m.upsert(&LabelSet::new([(SUFFIX_LABEL, "_sum")]), |v| v + 2);
        assert!(m.serialize().ends_with("\nhttp_server_requests_sum{} 2"));
    }

    #[test]
    fn renders_in_first_seen_order_with_escaping() {
        let m = metric();
        let a = LabelSet::new([("path", "/a\"b"), ("method", "GET")]);
        let b = LabelSet::new([("path", "c:\\d\ne"), ("method", "POST")]);
        m.upsert(&a, |v| v + 1);
        m.upsert(&b, |v| v + 1);
        m.upsert(&a, |v| v + 1);

        let first = m.serialize();
        expect![[r#"
            # HELP http_server_requests Total requests
            # TYPE http_server_requests counter
            http_server_requests{path="/a\"b",method="GET"} 2
            http_server_requests{path="c:\\d\ne",method="POST"} 1"#]]
        .assert_eq(&first);
        assert_eq!(first, m.serialize());
    }

    #[test]
    fn render_all_joins_metrics() {
        let m = metric();
        let joined = render_all([m.serialize(), m.serialize()]);
        assert_eq!(joined.lines().count(), 4);
        assert!(!joined.ends_with('\n'));
    }
}
