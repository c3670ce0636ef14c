//! In-memory data source for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pulseboard_shared::{AppError, AppResult};
use serde_json::Value;

use crate::source::DataSource;

type Reply = (Duration, AppResult<Value>);

/// Scripted [`DataSource`].
///
/// Each path holds a queue of replies. A fetch takes the next reply, or
/// repeats the last one when only one is left. Unknown paths answer 404.
#[derive(Default)]
pub struct FakeSource {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(self: Arc<Self>, path: &str, reply: AppResult<Value>) -> Arc<Self> {
        self.route_delayed(path, Duration::ZERO, reply)
    }

    pub fn route_delayed(
        self: Arc<Self>,
        path: &str,
        delay: Duration,
        reply: AppResult<Value>,
    ) -> Arc<Self> {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back((delay, reply));
        self
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn queries(&self) -> Vec<Vec<(String, String)>> {
        self.calls.lock().unwrap().iter().map(|(_, q)| q.clone()).collect()
    }

    pub fn last_query(&self) -> Vec<(String, String)> {
        self.queries().pop().unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn fetch(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), query.to_vec()));

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(path) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some((delay, outcome)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                outcome
            }
            None => Err(AppError::status(404, "Not Found")),
        }
    }
}
