use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::fs;
use uuid::Uuid;

use crate::storage::models::SessionRecord;

/// Dateibasierter JSON Storage Layer
///
/// Eine Datei pro Sitzung unter dem Daten-Verzeichnis. Defektes oder
/// wertebereichs-fremdes JSON wird verworfen und wie eine fehlende Sitzung
/// behandelt - der Kern bekommt davon nichts mit.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Erstelle neue Store-Instanz, legt das Verzeichnis bei Bedarf an
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).await?;

        Ok(Self { data_dir })
    }

    fn session_path(&self, session_id: Uuid) -> PathBuf {
        self.data_dir.join(format!("session-{}.json", session_id))
    }

    /// Speichere Sitzung als JSON
    pub async fn put_session(&self, record: &SessionRecord) -> Result<()> {
        let payload = serde_json::to_vec_pretty(record)?;
        fs::write(self.session_path(record.session_id), payload).await?;

        Ok(())
    }

    /// Lade Sitzung; `None` bei fehlender oder verworfener Datei
    pub async fn get_session(&self, session_id: Uuid) -> Result<Option<SessionRecord>> {
        let path = self.session_path(session_id);

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<SessionRecord>(&raw) {
            Ok(record) if record.is_valid() => Ok(Some(record)),
            Ok(record) => {
                tracing::warn!(
                    session_id = %session_id,
                    "Discarding persisted history with out-of-domain numbers ({} entries)",
                    record.numbers.len()
                );
                self.delete_session(session_id).await?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Discarding malformed session file"
                );
                self.delete_session(session_id).await?;
                Ok(None)
            }
        }
    }

    /// Lösche Sitzungs-Datei (fehlende Datei ist kein Fehler)
    pub async fn delete_session(&self, session_id: Uuid) -> Result<()> {
        match fs::remove_file(self.session_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Anzahl persistierter Sitzungen (für den Status-Endpunkt)
    pub async fn session_count(&self) -> Result<usize> {
        let mut entries = fs::read_dir(&self.data_dir).await?;
        let mut count = 0;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with("session-") && name.ends_with(".json") {
                count += 1;
            }
        }

        Ok(count)
    }
}
