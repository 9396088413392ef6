use chrono::NaiveDateTime;
use serde::Serialize;

/// Format used for sign-in timestamps, in exports and on screen.
pub const SIGNED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single roster entry.
///
/// `id` is the identity of the record (trimmed text, not guaranteed unique).
/// `present` / `signed_at` are the attendance ledger for the current session
/// and are never persisted in the roster cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub present: bool,
    #[serde(serialize_with = "serialize_signed_at")]
    pub signed_at: Option<NaiveDateTime>,
}

impl StudentRecord {
    /// New, absent record. Both fields are trimmed.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            present: false,
            signed_at: None,
        }
    }

    pub fn sign(&mut self, at: NaiveDateTime) {
        self.present = true;
        self.signed_at = Some(at);
    }

    pub fn clear(&mut self) {
        self.present = false;
        self.signed_at = None;
    }

    /// Text shown by the roll display: `"<id>  <name>"`.
    pub fn display_text(&self) -> String {
        format!("{}  {}", self.id, self.name)
    }

    pub fn status_str(&self) -> &'static str {
        if self.present { "present" } else { "absent" }
    }

    pub fn signed_at_str(&self) -> String {
        self.signed_at
            .map(|t| t.format(SIGNED_AT_FORMAT).to_string())
            .unwrap_or_default()
    }
}

fn serialize_signed_at<S>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(t) => s.serialize_str(&t.format(SIGNED_AT_FORMAT).to_string()),
        None => s.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_record_is_trimmed_and_absent() {
        let r = StudentRecord::new("  007 ", " Bond\t");
        assert_eq!(r.id, "007");
        assert_eq!(r.name, "Bond");
        assert!(!r.present);
        assert!(r.signed_at.is_none());
        assert_eq!(r.status_str(), "absent");
        assert_eq!(r.signed_at_str(), "");
    }

    #[test]
    fn sign_then_clear() {
        let at = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(8, 5, 9)
            .unwrap();
        let mut r = StudentRecord::new("1", "A");
        r.sign(at);
        assert!(r.present);
        assert_eq!(r.signed_at_str(), "2025-09-01 08:05:09");

        r.clear();
        assert!(!r.present);
        assert!(r.signed_at.is_none());
    }

    #[test]
    fn display_text_uses_two_spaces() {
        let r = StudentRecord::new("12", "Li Lei");
        assert_eq!(r.display_text(), "12  Li Lei");
    }
}
