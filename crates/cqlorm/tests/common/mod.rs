//! Fake sessions shared by the integration tests.
#![allow(dead_code)]

use cqlorm::{BoxError, Consistency, CqlSession, CqlValue, Record, RowIter};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone, PartialEq, Record)]
pub struct User {
    pub id: i64,
    pub name: String,
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

/// One statement the session received.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub kind: CallKind,
    pub cql: String,
    pub values: Vec<CqlValue>,
    pub consistency: Consistency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Execute,
    Query,
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<Call>,
    rows: Vec<Vec<CqlValue>>,
    echo: bool,
    error: Option<String>,
    close_error: Option<String>,
}

/// A recording session that serves canned rows.
///
/// In echo mode every executed statement's values become the row set served to the
/// next query.
#[derive(Debug, Default, Clone)]
pub struct FakeSession {
    state: Arc<Mutex<FakeState>>,
    closed: Arc<AtomicUsize>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Vec<CqlValue>>) -> Self {
        let session = Self::new();
        session.state.lock().unwrap().rows = rows;
        session
    }

    pub fn echo() -> Self {
        let session = Self::new();
        session.state.lock().unwrap().echo = true;
        session
    }

    pub fn failing(message: &str) -> Self {
        let session = Self::new();
        session.state.lock().unwrap().error = Some(message.to_string());
        session
    }

    pub fn close_fails(self, message: &str) -> Self {
        self.state.lock().unwrap().close_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls().pop().expect("no statement was sent")
    }

    /// Number of row iterators closed explicitly.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    fn record(
        &self,
        kind: CallKind,
        cql: &str,
        values: &[CqlValue],
        consistency: Consistency,
    ) -> Result<(), BoxError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            kind,
            cql: cql.to_string(),
            values: values.to_vec(),
            consistency,
        });
        if let Some(message) = &state.error {
            return Err(message.clone().into());
        }
        if kind == CallKind::Execute && state.echo {
            state.rows = vec![values.to_vec()];
        }
        Ok(())
    }
}

pub struct FakeRows {
    rows: VecDeque<Vec<CqlValue>>,
    total: usize,
    close_error: Option<String>,
    closed: Arc<AtomicUsize>,
}

impl RowIter for FakeRows {
    fn next_row(&mut self) -> impl Future<Output = Result<Option<Vec<CqlValue>>, BoxError>> + Send {
        let row = self.rows.pop_front();
        async move { Ok(row) }
    }

    fn row_count(&self) -> usize {
        self.total
    }

    fn close(self) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.closed.fetch_add(1, Ordering::SeqCst);
        let result = match self.close_error {
            Some(message) => Err(message.into()),
            None => Ok(()),
        };
        async move { result }
    }
}

impl CqlSession for FakeSession {
    type Rows = FakeRows;

    fn execute(
        &self,
        cql: &str,
        values: &[CqlValue],
        consistency: Consistency,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let result = self.record(CallKind::Execute, cql, values, consistency);
        async move { result }
    }

    fn query(
        &self,
        cql: &str,
        values: &[CqlValue],
        consistency: Consistency,
    ) -> impl Future<Output = Result<FakeRows, BoxError>> + Send {
        let result = self
            .record(CallKind::Query, cql, values, consistency)
            .map(|()| {
                let state = self.state.lock().unwrap();
                FakeRows {
                    rows: state.rows.iter().cloned().collect(),
                    total: state.rows.len(),
                    close_error: state.close_error.clone(),
                    closed: Arc::clone(&self.closed),
                }
            });
        async move { result }
    }
}

/// A session that fails the test if any statement reaches it.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicSession;

impl CqlSession for PanicSession {
    type Rows = FakeRows;

    #[allow(unreachable_code)]
    fn execute(
        &self,
        cql: &str,
        _values: &[CqlValue],
        _consistency: Consistency,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        panic!("session must not be reached, got: {cql}");
        async { Ok(()) }
    }

    #[allow(unreachable_code)]
    fn query(
        &self,
        cql: &str,
        _values: &[CqlValue],
        _consistency: Consistency,
    ) -> impl Future<Output = Result<FakeRows, BoxError>> + Send {
        panic!("session must not be reached, got: {cql}");
        async { Err("unreachable".into()) }
    }
}
