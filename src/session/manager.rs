use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::roulette::{AnalysisResult, Analyzer};
use crate::session::error::SessionError;
use crate::storage::{FileStore, SessionRecord};

/// Verwaltet die Zahlen-Historien aller Sitzungen
///
/// Ersetzt den impliziten globalen Zustand des ursprünglichen Designs durch
/// explizite, per UUID adressierte Sitzungen. Jede Mutation persistiert und
/// rechnet die komplette Analyse neu - der Kern hält keinen inkrementellen
/// Zustand.
pub struct SessionManager {
    analyzer: Analyzer,
    store: Arc<FileStore>,
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl SessionManager {
    pub fn new(analyzer: Analyzer, store: Arc<FileStore>) -> Self {
        Self {
            analyzer,
            store,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Validierung an der Aufrufer-Grenze: nur ganze Zahlen 0-36
    fn validate_number(number: i64) -> Result<u8, SessionError> {
        if (0..=36).contains(&number) {
            Ok(number as u8)
        } else {
            Err(SessionError::InvalidNumber(number))
        }
    }

    /// Neue Sitzung mit leerer Historie
    pub async fn create(&self) -> Result<(Uuid, AnalysisResult), SessionError> {
        let record = SessionRecord::new();
        let session_id = record.session_id;

        self.store.put_session(&record).await?;

        let analysis = self.analyzer.analyze(&record.numbers);
        self.sessions.write().await.insert(session_id, record);

        tracing::info!(session_id = %session_id, "Session created");

        Ok((session_id, analysis))
    }

    /// Holt die Sitzung aus dem Speicher, fällt auf den Store zurück
    async fn load(&self, session_id: Uuid) -> Result<SessionRecord, SessionError> {
        if let Some(record) = self.sessions.read().await.get(&session_id) {
            return Ok(record.clone());
        }

        // Restore nach Neustart, analog zum Laden beim Seiten-Reload
        let record = self
            .store
            .get_session(session_id)
            .await?
            .ok_or(SessionError::NotFound(session_id))?;

        // entry(): ein inzwischen mutierter Eintrag gewinnt gegen den Restore
        let mut sessions = self.sessions.write().await;
        Ok(sessions.entry(session_id).or_insert(record).clone())
    }

    /// Führt eine Mutation unter exklusivem Zugriff aus
    ///
    /// Der Write-Lock liegt über der kompletten Sequenz Laden -> Mutieren ->
    /// Persistieren, sonst überschreiben konkurrierende Mutationen derselben
    /// Sitzung gegenseitig ihre Snapshots.
    async fn mutate<F>(&self, session_id: Uuid, op: F) -> Result<AnalysisResult, SessionError>
    where
        F: FnOnce(&mut SessionRecord) -> Result<(), SessionError>,
    {
        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&session_id) {
            // Restore nach Neustart, analog zum Laden beim Seiten-Reload
            let record = self
                .store
                .get_session(session_id)
                .await?
                .ok_or(SessionError::NotFound(session_id))?;
            sessions.insert(session_id, record);
        }

        let record = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        op(&mut *record)?;
        record.touch();
        self.store.put_session(record).await?;

        Ok(self.analyzer.analyze(&record.numbers))
    }

    /// Analyse über den aktuellen Stand, ohne Mutation
    pub async fn analysis(&self, session_id: Uuid) -> Result<AnalysisResult, SessionError> {
        let record = self.load(session_id).await?;
        Ok(self.analyzer.analyze(&record.numbers))
    }

    /// Hängt eine gefallene Zahl an die Historie an
    pub async fn append(
        &self,
        session_id: Uuid,
        number: i64,
    ) -> Result<AnalysisResult, SessionError> {
        let number = Self::validate_number(number)?;

        self.mutate(session_id, |record| {
            record.numbers.push(number);
            tracing::info!(
                session_id = %session_id,
                number,
                total = record.numbers.len(),
                "Number added"
            );
            Ok(())
        })
        .await
    }

    /// Entfernt die zuletzt eingetragene Zahl
    pub async fn undo(&self, session_id: Uuid) -> Result<AnalysisResult, SessionError> {
        self.mutate(session_id, |record| {
            let removed = record.numbers.pop().ok_or(SessionError::EmptyHistory)?;
            tracing::info!(session_id = %session_id, number = removed, "Last number removed");
            Ok(())
        })
        .await
    }

    /// Korrigiert einen Eintrag an beliebiger Position
    pub async fn edit(
        &self,
        session_id: Uuid,
        index: usize,
        number: i64,
    ) -> Result<AnalysisResult, SessionError> {
        let number = Self::validate_number(number)?;

        self.mutate(session_id, move |record| {
            let len = record.numbers.len();
            let slot = record
                .numbers
                .get_mut(index)
                .ok_or(SessionError::IndexOutOfBounds { index, len })?;

            let previous = *slot;
            *slot = number;
            tracing::info!(
                session_id = %session_id,
                index,
                previous,
                number,
                "Number edited"
            );
            Ok(())
        })
        .await
    }

    /// Setzt die Historie komplett zurück
    pub async fn clear(&self, session_id: Uuid) -> Result<AnalysisResult, SessionError> {
        self.mutate(session_id, |record| {
            record.numbers.clear();
            tracing::info!(session_id = %session_id, "History cleared");
            Ok(())
        })
        .await
    }

    /// Anzahl aktuell geladener Sitzungen
    pub async fn loaded_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roulette::TriggerKind;

    async fn manager() -> (SessionManager, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()).await.unwrap());
        (SessionManager::new(Analyzer::default(), store), dir)
    }

    #[tokio::test]
    async fn test_append_and_analyze() {
        let (manager, _dir) = manager().await;
        let (session_id, initial) = manager.create().await.unwrap();
        assert_eq!(initial.pattern.id, 0);

        for number in [17, 20, 7, 6] {
            manager.append(session_id, number).await.unwrap();
        }
        let result = manager.append(session_id, 13).await.unwrap();

        assert_eq!(result.history, vec![17, 20, 7, 6, 13]);
        assert_eq!(result.trigger.kind, TriggerKind::ConvergenceStrong);
        assert!(result.playable);
    }

    #[tokio::test]
    async fn test_invalid_number_is_rejected() {
        let (manager, _dir) = manager().await;
        let (session_id, _) = manager.create().await.unwrap();

        for number in [-1, 37, 1000] {
            let err = manager.append(session_id, number).await.unwrap_err();
            assert!(matches!(err, SessionError::InvalidNumber(_)));
        }

        let result = manager.analysis(session_id).await.unwrap();
        assert!(result.history.is_empty());
    }

    #[tokio::test]
    async fn test_undo() {
        let (manager, _dir) = manager().await;
        let (session_id, _) = manager.create().await.unwrap();

        manager.append(session_id, 3).await.unwrap();
        manager.append(session_id, 16).await.unwrap();
        let result = manager.undo(session_id).await.unwrap();
        assert_eq!(result.history, vec![3]);

        manager.undo(session_id).await.unwrap();
        let err = manager.undo(session_id).await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyHistory));
    }

    #[tokio::test]
    async fn test_edit() {
        let (manager, _dir) = manager().await;
        let (session_id, _) = manager.create().await.unwrap();

        manager.append(session_id, 3).await.unwrap();
        manager.append(session_id, 16).await.unwrap();

        let result = manager.edit(session_id, 1, 22).await.unwrap();
        assert_eq!(result.history, vec![3, 22]);

        let err = manager.edit(session_id, 5, 1).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::IndexOutOfBounds { index: 5, len: 2 }
        ));
    }

    #[tokio::test]
    async fn test_clear() {
        let (manager, _dir) = manager().await;
        let (session_id, _) = manager.create().await.unwrap();

        manager.append(session_id, 3).await.unwrap();
        let result = manager.clear(session_id).await.unwrap();

        assert!(result.history.is_empty());
        assert_eq!(result.pattern.id, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_serialized() {
        let (manager, _dir) = manager().await;
        let manager = Arc::new(manager);
        let (session_id, _) = manager.create().await.unwrap();

        // 20 parallele Appends, jede Zahl muss die Historie erreichen
        let mut handles = Vec::new();
        for _ in 0..20 {
            let manager = manager.clone();
            handles.push(tokio::spawn(async move {
                manager.append(session_id, 7).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let result = manager.analysis(session_id).await.unwrap();
        assert_eq!(result.history.len(), 20);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let (manager, _dir) = manager().await;
        let err = manager.analysis(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_session_survives_manager_restart() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()).await.unwrap());

        let manager = SessionManager::new(Analyzer::default(), store.clone());
        let (session_id, _) = manager.create().await.unwrap();
        manager.append(session_id, 3).await.unwrap();
        manager.append(session_id, 16).await.unwrap();
        drop(manager);

        // Neuer Manager, gleiche Dateien: Historie kommt aus dem Store
        let manager = SessionManager::new(Analyzer::default(), store);
        let result = manager.analysis(session_id).await.unwrap();
        assert_eq!(result.history, vec![3, 16]);
    }
}
