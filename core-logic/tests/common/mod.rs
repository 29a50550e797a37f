#![allow(dead_code)]

use async_trait::async_trait;
use core_logic::{ApiClient, ApiReply, Endpoint, MessageId, NetworkError, DESTROY_PATH};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List {
        path: String,
        query: Vec<(String, String)>,
    },
    Destroy(MessageId),
}

/// In-memory API client answering from queued replies.
///
/// List endpoints pop their queue and answer `[]` once it is exhausted.
/// Deletions answer 200 unless a status or transport error was scripted
/// for that id.
pub struct ScriptedClient {
    label: String,
    lists: Mutex<HashMap<&'static str, VecDeque<ApiReply>>>,
    delete_status: Mutex<HashMap<MessageId, u16>>,
    delete_transport_errors: Mutex<Vec<MessageId>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedClient {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            lists: Mutex::new(HashMap::new()),
            delete_status: Mutex::new(HashMap::new()),
            delete_transport_errors: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn page(self, endpoint: Endpoint, ids: &[MessageId]) -> Self {
        let body = format!(
            "[{}]",
            ids.iter()
                .map(|id| format!(r#"{{"id_str":"{}"}}"#, id))
                .collect::<Vec<_>>()
                .join(",")
        );
        self.reply(endpoint, ApiReply::new(200, body))
    }

    pub fn rate_limited(self, endpoint: Endpoint) -> Self {
        self.reply(endpoint, ApiReply::new(429, r#"{"errors":[{"code":88}]}"#))
    }

    pub fn reply(self, endpoint: Endpoint, reply: ApiReply) -> Self {
        self.lists
            .lock()
            .unwrap()
            .entry(endpoint.path())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn delete_answers(self, id: MessageId, status: u16) -> Self {
        self.delete_status.lock().unwrap().insert(id, status);
        self
    }

    pub fn delete_drops_connection(self, id: MessageId) -> Self {
        self.delete_transport_errors.lock().unwrap().push(id);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List { path, .. } if path == endpoint.path()))
            .count()
    }

    pub fn destroyed(&self) -> Vec<MessageId> {
        let mut ids: Vec<MessageId> = self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Destroy(id) => Some(id),
                _ => None,
            })
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl ApiClient for ScriptedClient {
    fn label(&self) -> &str {
        &self.label
    }

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiReply, NetworkError> {
        self.calls.lock().unwrap().push(Call::List {
            path: path.to_string(),
            query: query.to_vec(),
        });

        let next = self
            .lists
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(|q| q.pop_front());
        Ok(next.unwrap_or_else(|| ApiReply::new(200, "[]")))
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<ApiReply, NetworkError> {
        assert_eq!(path, DESTROY_PATH);
        let id: MessageId = form
            .iter()
            .find(|(k, _)| k == "id")
            .and_then(|(_, v)| v.parse().ok())
            .expect("destroy without id");

        self.calls.lock().unwrap().push(Call::Destroy(id));

        if self.delete_transport_errors.lock().unwrap().contains(&id) {
            return Err(NetworkError::Transport {
                endpoint: DESTROY_PATH.to_string(),
                reason: "connection reset by peer".to_string(),
            });
        }

        let status = self
            .delete_status
            .lock()
            .unwrap()
            .get(&id)
            .copied()
            .unwrap_or(200);
        Ok(ApiReply::new(status, "{}"))
    }
}
