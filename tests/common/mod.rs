#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request},
};
use serde_json::json;
use weblinks::{
    error::AppError,
    transaction::{UnitOfWork, UnitOfWorkScope},
};

/// Lifecycle events observed by [`RecordingUnitOfWork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Started,
    Committed,
    RolledBack,
}

/// Unit of work that records every scope transition instead of touching a database.
#[derive(Clone, Default)]
pub struct RecordingUnitOfWork {
    events: Arc<Mutex<Vec<Event>>>,
    fail_commit: bool,
}

impl RecordingUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_commit() -> Self {
        Self {
            fail_commit: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl UnitOfWork for RecordingUnitOfWork {
    async fn start(&self) -> Result<Box<dyn UnitOfWorkScope>, AppError> {
        self.events.lock().unwrap().push(Event::Started);
        Ok(Box::new(RecordingScope {
            events: self.events.clone(),
            fail_commit: self.fail_commit,
        }))
    }
}

struct RecordingScope {
    events: Arc<Mutex<Vec<Event>>>,
    fail_commit: bool,
}

#[async_trait]
impl UnitOfWorkScope for RecordingScope {
    async fn commit(&mut self) -> Result<(), AppError> {
        if self.fail_commit {
            return Err(AppError::internal("commit refused", json!({})));
        }
        self.events.lock().unwrap().push(Event::Committed);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), AppError> {
        self.events.lock().unwrap().push(Event::RolledBack);
        Ok(())
    }
}

/// Builds a bare request for driving a router without a server.
pub fn create_request(target_url: &str, method: Method) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(target_url)
        .body(Body::empty())
        .unwrap()
}
