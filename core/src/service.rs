//! Async remote collection client.
//!
//! `RecordService` pairs the stateless `RecordClient` with a `Transport`
//! and exposes the five collection operations as futures. Every failure,
//! whether from the transport or from the response status, leaves here as
//! a normalized `ApiError`.

use crate::client::RecordClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Record, RecordDraft, RecordId};

#[derive(Debug, Clone)]
pub struct RecordService<T> {
    client: RecordClient,
    transport: T,
}

impl<T: Transport> RecordService<T> {
    pub fn new(client: RecordClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &RecordClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list(&self) -> Result<Vec<Record>, ApiError> {
        let response = self.send(self.client.build_list()).await?;
        self.client.parse_list(response).inspect_err(log_failure)
    }

    pub async fn get_one(&self, id: RecordId) -> Result<Record, ApiError> {
        let response = self.send(self.client.build_get(id)).await?;
        self.client.parse_get(response).inspect_err(log_failure)
    }

    pub async fn create(&self, draft: &RecordDraft) -> Result<Record, ApiError> {
        let request = self.client.build_create(draft).inspect_err(log_failure)?;
        let response = self.send(request).await?;
        self.client.parse_create(response).inspect_err(log_failure)
    }

    pub async fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<Record, ApiError> {
        let request = self.client.build_update(id, draft).inspect_err(log_failure)?;
        let response = self.send(request).await?;
        self.client.parse_update(response).inspect_err(log_failure)
    }

    pub async fn remove(&self, id: RecordId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete(id)).await?;
        self.client.parse_delete(response).inspect_err(log_failure)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await.map_err(|e| {
            tracing::warn!(error = %e, "transport failure");
            ApiError::from(e)
        })?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn log_failure(e: &ApiError) {
    tracing::warn!(kind = ?e.kind(), error = %e, "request failed");
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::future::Future;

    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::TransportError;
    use crate::types::Diet;

    /// Replays canned results and remembers what was asked.
    #[derive(Default)]
    struct Canned {
        replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn reply(self, status: u16, text: &str, body: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(HttpResponse {
                status,
                status_text: text.to_string(),
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        fn fail(self, e: TransportError) -> Self {
            self.replies.borrow_mut().push_back(Err(e));
            self
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
            self.seen.borrow_mut().push(request);
            let reply = self.replies.borrow_mut().pop_front().expect("no canned reply left");
            async move { reply }
        }
    }

    fn service(canned: Canned) -> RecordService<Canned> {
        RecordService::new(RecordClient::new("http://api.test"), canned)
    }

    const BRONTO: &str = r#"{"id":9,"name":"Brontosaurus","species":"B. excelsus","period":"Late Jurassic","diet":"Herbivore","length":22.0,"weight":15.0}"#;

    #[tokio::test]
    async fn get_one_decodes_record() {
        let svc = service(Canned::default().reply(200, "OK", BRONTO));
        let record = svc.get_one(9).await.unwrap();
        assert_eq!(record.name, "Brontosaurus");
        assert_eq!(svc.transport().seen.borrow()[0].path, "http://api.test/records/9");
    }

    #[tokio::test]
    async fn get_one_missing_is_not_found() {
        let svc = service(Canned::default().reply(404, "Not Found", ""));
        let err = svc.get_one(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn create_sends_draft_and_returns_server_record() {
        let svc = service(Canned::default().reply(201, "Created", BRONTO));
        let draft = RecordDraft {
            name: "Brontosaurus".to_string(),
            species: "B. excelsus".to_string(),
            period: "Late Jurassic".to_string(),
            diet: Diet::Herbivore,
            length: 22.0,
            weight: 15.0,
            description: None,
            image_url: None,
        };
        let record = svc.create(&draft).await.unwrap();
        assert_eq!(record.id, Some(9));
        let seen = svc.transport().seen.borrow();
        let sent: RecordDraft = serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, draft);
    }

    #[tokio::test]
    async fn transport_failure_is_normalized() {
        let svc = service(Canned::default().fail(TransportError::Unreachable("refused".to_string())));
        let err = svc.remove(3).await.unwrap_err();
        assert_eq!(err.message(), "Could not connect to the server");
    }

    #[tokio::test]
    async fn list_twice_yields_equal_entries() {
        let body = format!("[{BRONTO}]");
        let svc = service(Canned::default().reply(200, "OK", &body).reply(200, "OK", &body));
        let first = svc.list().await.unwrap();
        let second = svc.list().await.unwrap();
        assert_eq!(first, second);
    }
}
