use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{canonical::to_canonical_string, Result, SubmitterConfig};

/// A single application submission.
///
/// Fields are declared in the order they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    action_run_link: String,
    email: String,
    name: String,
    repository_link: String,
    resume_link: String,
    timestamp: String,
}

impl Payload {
    /// Build a payload from `config`, stamped with `timestamp`.
    pub fn new(config: &SubmitterConfig, timestamp: DateTime<Utc>) -> Payload {
        Payload {
            action_run_link: config.action_run_link.clone(),
            email: config.email.clone(),
            name: config.full_name.clone(),
            repository_link: config.repository_link.clone(),
            resume_link: config.cv_link.clone(),
            timestamp: format_timestamp(timestamp),
        }
    }

    /// Canonical JSON form of the payload. These are the bytes that get signed and sent.
    pub fn canonical_json(&self) -> Result<String> {
        to_canonical_string(self)
    }

    /// Submission time, already formatted.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Applicant's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applicant's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Link to the applicant's CV.
    pub fn resume_link(&self) -> &str {
        &self.resume_link
    }

    /// Link to the source repository.
    pub fn repository_link(&self) -> &str {
        &self.repository_link
    }

    /// Link to the CI run performing the submission.
    pub fn action_run_link(&self) -> &str {
        &self.action_run_link
    }
}

/// Format `timestamp` as ISO-8601 with microsecond precision and a literal `Z`, e.g.
/// `2024-05-01T12:30:00.000042Z`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
