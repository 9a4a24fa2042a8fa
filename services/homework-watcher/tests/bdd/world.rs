//! BDD test world for the homework watcher

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cucumber::World;
use homework_watcher::engine::Engine;
use homework_watcher::io::{HttpClient, HttpResponse};
use homework_watcher::notifier::{Notification, Notifier};
use homework_watcher::{Credentials, WatcherError};

/// One canned reply of the status API
#[derive(Debug, Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    Unreachable,
}

/// Status API double: replays its script, then keeps repeating the last reply
#[derive(Debug, Default)]
pub struct ScriptedApi {
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    from_dates: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn push(&self, reply: Reply) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn from_dates(&self) -> Vec<String> {
        self.from_dates.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Option<Reply> {
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = self.script.lock().unwrap().pop_front() {
            *last = Some(reply);
        }
        last.clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedApi {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> homework_watcher::Result<HttpResponse> {
        for (name, value) in query {
            if *name == "from_date" {
                self.from_dates.lock().unwrap().push(value.to_string());
            }
        }

        match self.next_reply() {
            Some(Reply::Respond { status, body }) => Ok(HttpResponse { status, body }),
            Some(Reply::Unreachable) | None => {
                Err(WatcherError::Http("connection refused".to_string()))
            }
        }
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_watcher::Result<HttpResponse> {
        Err(WatcherError::Http("unexpected POST to status API".to_string()))
    }
}

/// Notifier double that records every message and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub failing: Mutex<bool>,
    pub sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, notification: &Notification) -> homework_watcher::Result<()> {
        if *self.failing.lock().unwrap() {
            return Err(WatcherError::Delivery("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[derive(Debug, Default, World)]
pub struct WatcherWorld {
    pub api: Arc<ScriptedApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub engine: Option<Engine>,
    pub initial_cursor: i64,

    // Startup testing
    pub credentials: Option<Credentials>,
    pub startup_result: Option<homework_watcher::Result<()>>,
}
