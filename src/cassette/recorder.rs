//! Recording role: execute live, capture the outcome, return it untouched.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::format::{self, CassetteEntry, RequestDescriptor, ResponseRecord, Row, Scalar};
use crate::error::TapeError;
use crate::ports::backend::{BackendCursor, BackendError};
use crate::ports::cursor::{CursorFuture, SqlCursor};
use crate::ports::store::CassetteStore;

/// Cursor that delegates every query to a live backend while appending each
/// completed query/response pair to a capture session's staging resource.
///
/// Recording never changes observable query results: after materializing
/// the result set for capture, the backend's read cursor is rewound so the
/// caller's subsequent fetches see exactly what they would have seen with
/// recording off. A failed execution captures nothing.
pub struct RecordingCursor {
    backend: Box<dyn BackendCursor>,
    store: Arc<dyn CassetteStore>,
    staging: PathBuf,
}

impl RecordingCursor {
    /// Creates a recording cursor appending to `staging`.
    ///
    /// Pure: nothing touches the filesystem until the first `execute`
    /// completes against the live backend.
    #[must_use]
    pub fn new(
        backend: Box<dyn BackendCursor>,
        store: Arc<dyn CassetteStore>,
        staging: impl Into<PathBuf>,
    ) -> Self {
        Self { backend, store, staging: staging.into() }
    }

    async fn capture(
        &mut self,
        query: &str,
        params: Option<Vec<Scalar>>,
        prepare: Option<bool>,
        binary: Option<bool>,
    ) -> Result<(), TapeError> {
        self.backend.execute(query, params.as_deref(), prepare, binary).await?;

        let response = match self.backend.fetch_all().await {
            Ok(rows) => {
                // Rewind so the caller observes the identical sequence.
                self.backend.seek_absolute(0).await?;
                ResponseRecord::Rows(rows)
            }
            Err(BackendError::NoResultSet) => ResponseRecord::NoResult,
            Err(e) => return Err(e.into()),
        };

        let entry = CassetteEntry {
            request: RequestDescriptor { query: query.to_string(), params, prepare, binary },
            response,
        };
        // One fragment, one append: a cancellation lands strictly before or
        // strictly after this write, never inside it.
        let fragment = format::encode_entry(&entry)?;
        if let Some(parent) = self.staging.parent() {
            self.store.make_dirs(parent, true).await?;
        }
        self.store.append(&self.staging, &fragment).await?;
        debug!(query, path = %self.staging.display(), "captured entry");
        Ok(())
    }
}

impl SqlCursor for RecordingCursor {
    fn execute<'a>(
        &'a mut self,
        query: &'a str,
        params: Option<Vec<Scalar>>,
        prepare: Option<bool>,
        binary: Option<bool>,
    ) -> CursorFuture<'a, ()> {
        Box::pin(self.capture(query, params, prepare, binary))
    }

    fn fetch_all(&mut self) -> CursorFuture<'_, Vec<Row>> {
        Box::pin(async move { Ok(self.backend.fetch_all().await?) })
    }

    fn fetch_one(&mut self) -> CursorFuture<'_, Option<Row>> {
        Box::pin(async move { Ok(self.backend.fetch_one().await?) })
    }
}

#[cfg(test)]
mod tests {
    use std::future;

    use tempfile::TempDir;

    use super::*;
    use crate::adapters::store::BlockingStore;
    use crate::ports::backend::BackendFuture;

    enum Step {
        Rows(Vec<Row>),
        NoResult,
        Fail(String),
    }

    /// Minimal scripted driver cursor with buffered rows and a read position.
    struct StubBackend {
        steps: Vec<Step>,
        buffered: Option<Vec<Row>>,
        position: usize,
    }

    impl StubBackend {
        fn new(mut steps: Vec<Step>) -> Self {
            steps.reverse();
            Self { steps, buffered: None, position: 0 }
        }
    }

    fn ready<'a, T: Send + 'a>(result: Result<T, BackendError>) -> BackendFuture<'a, T> {
        Box::pin(future::ready(result))
    }

    impl BackendCursor for StubBackend {
        fn execute<'a>(
            &'a mut self,
            _query: &'a str,
            _params: Option<&'a [Scalar]>,
            _prepare: Option<bool>,
            _binary: Option<bool>,
        ) -> BackendFuture<'a, ()> {
            let result = match self.steps.pop() {
                Some(Step::Rows(rows)) => {
                    self.buffered = Some(rows);
                    self.position = 0;
                    Ok(())
                }
                Some(Step::NoResult) => {
                    self.buffered = None;
                    self.position = 0;
                    Ok(())
                }
                Some(Step::Fail(msg)) => Err(BackendError::Execution(msg)),
                None => Err(BackendError::Execution("script exhausted".into())),
            };
            ready(result)
        }

        fn fetch_all(&mut self) -> BackendFuture<'_, Vec<Row>> {
            let result = match &self.buffered {
                Some(rows) => {
                    let start = self.position.min(rows.len());
                    let out = rows[start..].to_vec();
                    self.position = rows.len();
                    Ok(out)
                }
                None => Err(BackendError::NoResultSet),
            };
            ready(result)
        }

        fn fetch_one(&mut self) -> BackendFuture<'_, Option<Row>> {
            let result = match &self.buffered {
                Some(rows) if self.position < rows.len() => {
                    let row = rows[self.position].clone();
                    self.position += 1;
                    Ok(Some(row))
                }
                Some(_) => Ok(None),
                None => Err(BackendError::NoResultSet),
            };
            ready(result)
        }

        fn seek_absolute(&mut self, index: usize) -> BackendFuture<'_, ()> {
            let result = match &self.buffered {
                Some(_) => {
                    self.position = index;
                    Ok(())
                }
                None => Err(BackendError::NoResultSet),
            };
            ready(result)
        }
    }

    fn cursor_for(dir: &TempDir, steps: Vec<Step>) -> (RecordingCursor, PathBuf) {
        let staging = dir.path().join("capture.sql.tmp");
        let store: Arc<dyn CassetteStore> = Arc::new(BlockingStore);
        (RecordingCursor::new(Box::new(StubBackend::new(steps)), store, &staging), staging)
    }

    #[tokio::test]
    async fn completed_query_is_appended_and_results_stay_observable() {
        let dir = TempDir::new().unwrap();
        let rows = vec![vec![Scalar::Int(1), Scalar::Text("a".into())]];
        let (mut cursor, staging) = cursor_for(&dir, vec![Step::Rows(rows.clone())]);

        cursor.execute("SELECT * FROM t", None, None, None).await.unwrap();
        // transparency: the caller still reads the full live result
        assert_eq!(cursor.fetch_all().await.unwrap(), rows);

        let entries = format::decode_stream(&std::fs::read_to_string(&staging).unwrap()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].request.query, "SELECT * FROM t");
        assert_eq!(entries[0].response, ResponseRecord::Rows(rows));
    }

    #[tokio::test]
    async fn no_result_statement_is_captured_as_no_result() {
        let dir = TempDir::new().unwrap();
        let (mut cursor, staging) = cursor_for(&dir, vec![Step::NoResult]);

        cursor.execute("CREATE TABLE t (i int)", None, None, None).await.unwrap();

        let entries = format::decode_stream(&std::fs::read_to_string(&staging).unwrap()).unwrap();
        assert_eq!(entries[0].response, ResponseRecord::NoResult);
    }

    #[tokio::test]
    async fn failed_execution_is_propagated_and_not_captured() {
        let dir = TempDir::new().unwrap();
        let (mut cursor, staging) =
            cursor_for(&dir, vec![Step::Fail("syntax error".into())]);

        let err = cursor.execute("SELEC 1", None, None, None).await.unwrap_err();
        assert!(matches!(err, TapeError::Backend(BackendError::Execution(_))));
        assert!(!staging.exists(), "a failed execution must append nothing");
    }

    #[tokio::test]
    async fn appends_accumulate_in_completion_order() {
        let dir = TempDir::new().unwrap();
        let (mut cursor, staging) = cursor_for(
            &dir,
            vec![
                Step::NoResult,
                Step::Rows(vec![vec![Scalar::Int(1)]]),
                Step::Rows(vec![vec![Scalar::Int(2)]]),
            ],
        );

        cursor.execute("CREATE TABLE t (i int)", None, None, None).await.unwrap();
        cursor.execute("SELECT 1", None, None, None).await.unwrap();
        cursor.execute("SELECT 2", None, None, None).await.unwrap();

        let entries = format::decode_stream(&std::fs::read_to_string(&staging).unwrap()).unwrap();
        let queries: Vec<&str> =
            entries.iter().map(|e| e.request.query.as_str()).collect();
        assert_eq!(queries, ["CREATE TABLE t (i int)", "SELECT 1", "SELECT 2"]);
    }

    #[tokio::test]
    async fn recorded_params_keep_their_order() {
        let dir = TempDir::new().unwrap();
        let (mut cursor, staging) = cursor_for(&dir, vec![Step::NoResult]);
        let params = vec![Scalar::Int(2), Scalar::Text("b".into())];

        cursor
            .execute("INSERT INTO t VALUES (%s, %s)", Some(params.clone()), Some(true), None)
            .await
            .unwrap();

        let entries = format::decode_stream(&std::fs::read_to_string(&staging).unwrap()).unwrap();
        assert_eq!(entries[0].request.params, Some(params));
        assert_eq!(entries[0].request.prepare, Some(true));
        assert_eq!(entries[0].request.binary, None);
    }
}
