//! In-memory login audit log.
//!
//! Append-only for the lifetime of a session. One entry is written per onboarding.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub role: String,
    pub username: String,
}

#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a login event stamped with the current UTC time.
    pub fn record(&mut self, role: impl Into<String>, username: impl Into<String>) -> &AuditEntry {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            role: role.into(),
            username: username.into(),
        };
        tracing::debug!(role = %entry.role, "audit entry recorded");
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_in_call_order() {
        let mut log = AuditLog::new();
        assert!(log.is_empty());

        log.record("Patient", "Ada");
        log.record("Nurse", "Sam");
        log.record("Doctor", "Lee");

        let users: Vec<&str> = log.entries().iter().map(|e| e.username.as_str()).collect();
        assert_eq!(users, vec!["Ada", "Sam", "Lee"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn timestamps_do_not_go_backwards() {
        let mut log = AuditLog::new();
        log.record("Patient", "Ada");
        log.record("Patient", "Ben");

        let entries = log.entries();
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }

    #[test]
    fn record_returns_new_entry() {
        let mut log = AuditLog::new();
        let entry = log.record("Admin", "Kim");
        assert_eq!(entry.role, "Admin");
        assert_eq!(entry.username, "Kim");
    }

    #[test]
    fn entry_serializes_with_rfc3339_timestamp() {
        let mut log = AuditLog::new();
        let entry = log.record("Patient", "Ada").clone();

        let json = serde_json::to_value(&entry).expect("entry should serialize");
        assert_eq!(json["role"], "Patient");
        assert_eq!(json["username"], "Ada");
        let stamp = json["timestamp"].as_str().expect("timestamp should be a string");
        let parsed: DateTime<Utc> = stamp.parse().expect("timestamp should be RFC 3339");
        assert_eq!(parsed, entry.timestamp);
    }
}
