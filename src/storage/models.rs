use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persistierter Sitzungs-Zustand: die Zahlen-Historie eines Tisches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub numbers: Vec<u8>,
    pub created_at: String, // ISO 8601
    pub updated_at: String, // ISO 8601
}

impl SessionRecord {
    pub fn new() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            session_id: Uuid::new_v4(),
            numbers: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Aktualisiert den Änderungs-Zeitstempel
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339();
    }

    /// Gültig = jede Zahl im Wertebereich 0-36
    pub fn is_valid(&self) -> bool {
        self.numbers.iter().all(|&n| n <= 36)
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty_and_valid() {
        let record = SessionRecord::new();
        assert!(record.numbers.is_empty());
        assert!(record.is_valid());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_out_of_domain_numbers_invalidate_record() {
        let mut record = SessionRecord::new();
        record.numbers = vec![5, 37];
        assert!(!record.is_valid());
    }
}
