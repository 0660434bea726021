//! User-submitted reports of suspicious content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporter recorded when the submitter does not name one.
pub const ANONYMOUS_REPORTER: &str = "anonymous";

/// Report identifier: milliseconds since the Unix epoch at submission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(u64);

impl ReportId {
    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Derive an id from a submission timestamp. Pre-epoch times map to 0.
    pub fn from_datetime(ts: &DateTime<Utc>) -> Self {
        Self(u64::try_from(ts.timestamp_millis()).unwrap_or(0))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The smallest id strictly greater than this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A report of suspect content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub text: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default = "default_reporter")]
    pub reporter: String,
    #[serde(with = "crate::time::iso_millis")]
    pub created_at: DateTime<Utc>,
}

fn default_reporter() -> String {
    ANONYMOUS_REPORTER.to_string()
}

impl Report {
    /// Build a report submitted at `now`.
    ///
    /// Empty `source_url` is stored as `None` and an empty or missing
    /// `reporter` becomes [`ANONYMOUS_REPORTER`].
    pub fn new(
        text: impl Into<String>,
        source_url: Option<String>,
        reporter: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReportId::from_datetime(&now),
            text: text.into(),
            source_url: source_url.filter(|s| !s.is_empty()),
            reporter: reporter
                .filter(|r| !r.is_empty())
                .unwrap_or_else(default_reporter),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn id_is_submission_millis() {
        let report = Report::new("hello", None, None, at(1_700_000_000_123));
        assert_eq!(report.id, ReportId::new(1_700_000_000_123));
    }

    #[test]
    fn missing_reporter_defaults_to_anonymous() {
        let report = Report::new("hello", None, None, at(0));
        assert_eq!(report.reporter, ANONYMOUS_REPORTER);

        let report = Report::new("hello", None, Some(String::new()), at(0));
        assert_eq!(report.reporter, ANONYMOUS_REPORTER);
    }

    #[test]
    fn empty_source_url_is_absent() {
        let report = Report::new("hello", Some(String::new()), Some("ann".into()), at(0));
        assert_eq!(report.source_url, None);
        assert_eq!(report.reporter, "ann");
    }

    #[test]
    fn serializes_camel_case_with_null_source() {
        let report = Report::new("hello", None, None, at(1_700_000_000_123));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1_700_000_000_123u64,
                "text": "hello",
                "sourceUrl": null,
                "reporter": "anonymous",
                "createdAt": "2023-11-14T22:13:20.123Z",
            })
        );
    }

    #[test]
    fn deserializes_records_missing_optional_fields() {
        let report: Report = serde_json::from_str(
            r#"{"id":5,"text":"t","createdAt":"2024-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(report.source_url, None);
        assert_eq!(report.reporter, ANONYMOUS_REPORTER);
    }

    #[test]
    fn pre_epoch_ids_clamp_to_zero() {
        assert_eq!(ReportId::from_datetime(&at(-5)), ReportId::new(0));
    }
}
