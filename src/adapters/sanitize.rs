//! Log sanitization for self-reported health values.
//!
//! The primary protection is that answer values never reach logging calls
//! in the first place; services only log aggregate facts (tier, pattern,
//! counts). This writer is the fallback layer: anything that slips through
//! (debug-printed answer records, ages, email addresses in feedback text)
//! is redacted before it hits the log sink.

use regex::Regex;
use std::io::Write;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// A compiled redaction pattern with its replacement text.
struct RedactionPattern {
    regex: Regex,
    replacement: &'static str,
}

static PATTERNS: OnceLock<Vec<RedactionPattern>> = OnceLock::new();

fn patterns() -> &'static Vec<RedactionPattern> {
    PATTERNS.get_or_init(|| {
        let build = |pattern: &str, replacement: &'static str| RedactionPattern {
            // Patterns are static and known-valid; a failure here is a bug.
            regex: Regex::new(pattern).expect("invalid redaction pattern"),
            replacement,
        };

        vec![
            // Numeric answer fields leaked via Debug output or ad-hoc logs.
            build(
                r"(?i)\b(age|stress_level)\s*[:=]\s*(?:Some\()?\d+\)?",
                "$1=[redacted]",
            ),
            // Enum answer fields leaked via Debug output.
            build(
                r"(?i)\b(cycle_length|period_pain|sleep_quality|mood_changes|sugar_cravings|weight_change|facial_hair|missed_periods|acne|hair_loss|anxiety|activity_level|diet_pattern|family_history)\s*[:=]\s*(?:Some\()?[A-Za-z][A-Za-z ]*\)?",
                "$1=[redacted]",
            ),
            // Email addresses (possible in free-text feedback).
            build(
                r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
                "[redacted-email]",
            ),
        ]
    })
}

/// Redact sensitive values from a log line.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let mut output = input.to_string();
    for pattern in patterns() {
        output = pattern
            .regex
            .replace_all(&output, pattern.replacement)
            .into_owned();
    }
    output
}

/// A `MakeWriter` that sanitizes every log line before writing it to the
/// wrapped writer.
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
        }
    }
}

/// Writer wrapper applying [`sanitize`] to each buffer.
pub struct SanitizingWriter<W> {
    inner: W,
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let sanitized = sanitize(&text);
        self.inner.write_all(sanitized.as_bytes())?;
        // Report the original length so callers never see a short write.
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_numeric_answer_fields() {
        assert_eq!(sanitize("age: 34"), "age=[redacted]");
        assert_eq!(sanitize("stress_level=9"), "stress_level=[redacted]");
        assert_eq!(sanitize("age: Some(27)"), "age=[redacted]");
    }

    #[test]
    fn test_redacts_enum_answer_fields() {
        let line = "answers: cycle_length: Irregular, facial_hair: Some(Noticeable)";
        let sanitized = sanitize(line);
        assert!(sanitized.contains("cycle_length=[redacted]"));
        assert!(sanitized.contains("facial_hair=[redacted]"));
        assert!(!sanitized.contains("Irregular"));
        assert!(!sanitized.contains("Noticeable"));
    }

    #[test]
    fn test_redacts_emails() {
        let sanitized = sanitize("contact me at user@example.com please");
        assert_eq!(sanitized, "contact me at [redacted-email] please");
    }

    #[test]
    fn test_leaves_aggregate_logs_alone() {
        let line = "Screening complete: risk=High Risk, pattern=Lean PCOS, consult=true";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_writer_passes_through() {
        let mut buf = Vec::new();
        {
            let mut writer = SanitizingWriter { inner: &mut buf };
            writer.write_all(b"age: 34 done").expect("Should write");
        }
        assert_eq!(String::from_utf8(buf).expect("utf8"), "age=[redacted] done");
    }
}
