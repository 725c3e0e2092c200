//! Scripted stand-in for the live-driver boundary, shared across suites.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future;

use sqltape::cassette::format::{Row, Scalar};
use sqltape::ports::backend::{BackendCursor, BackendError, BackendFuture};

/// Outcome of one scripted `execute` call.
pub enum Outcome {
    /// Statement yields a buffered result set.
    Rows(Vec<Row>),
    /// Statement yields no result set (DDL and friends).
    NoResult,
    /// Statement fails outright.
    Fail(String),
}

/// Backend cursor serving a pre-scripted sequence of outcomes, buffering
/// rows with a read position the way a real driver cursor does.
pub struct ScriptedBackend {
    script: VecDeque<Outcome>,
    buffered: Option<Vec<Row>>,
    position: usize,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Outcome>) -> Self {
        Self { script: script.into(), buffered: None, position: 0 }
    }
}

fn ready<'a, T: Send + 'a>(result: Result<T, BackendError>) -> BackendFuture<'a, T> {
    Box::pin(future::ready(result))
}

impl BackendCursor for ScriptedBackend {
    fn execute<'a>(
        &'a mut self,
        _query: &'a str,
        _params: Option<&'a [Scalar]>,
        _prepare: Option<bool>,
        _binary: Option<bool>,
    ) -> BackendFuture<'a, ()> {
        let result = match self.script.pop_front() {
            Some(Outcome::Rows(rows)) => {
                self.buffered = Some(rows);
                self.position = 0;
                Ok(())
            }
            Some(Outcome::NoResult) => {
                self.buffered = None;
                self.position = 0;
                Ok(())
            }
            Some(Outcome::Fail(msg)) => Err(BackendError::Execution(msg)),
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
