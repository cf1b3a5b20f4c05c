//! Stateless HTTP request builder and response parser for the records API.
//!
//! # Design
//! `RecordClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Both halves report failures as a normalized `ApiError`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Failure};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Record, RecordDraft, RecordId};

/// Collection path appended to the base URL.
pub const RESOURCE: &str = "records";

/// Synchronous, stateless client for the records API.
#[derive(Debug, Clone)]
pub struct RecordClient {
    base_url: String,
}

impl RecordClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{RESOURCE}", self.base_url)
    }

    fn item_url(&self, id: RecordId) -> String {
        format!("{}/{RESOURCE}/{id}", self.base_url)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: RecordId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, draft: &RecordDraft) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_url(), draft)
    }

    pub fn build_update(&self, id: RecordId, draft: &RecordDraft) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.item_url(id), draft)
    }

    pub fn build_delete(&self, id: RecordId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Record>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Record, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// The created record must carry its server-assigned id; a body without
    /// one is treated like any other undecodable body.
    pub fn parse_create(&self, response: HttpResponse) -> Result<Record, ApiError> {
        check_status(&response)?;
        let record: Record = decode(&response)?;
        if record.id.is_none() {
            tracing::warn!(status = response.status, "created record has no id");
            return Err(undecodable(&response));
        }
        Ok(record)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Record, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_request<T: Serialize>(method: HttpMethod, path: String, payload: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| Failure::ClientSide(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Map non-success status codes to a normalized `ApiError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(Failure::from_status(response.status, &response.status_text).into())
}

/// A success status with an undecodable body goes through the generic status
/// branch, so the user sees "Error 200: OK" rather than parser internals.
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(status = response.status, error = %e, "response body did not decode");
        undecodable(response)
    })
}

fn undecodable(response: &HttpResponse) -> ApiError {
    Failure::HttpStatus {
        status: response.status,
        status_text: response.status_text.clone(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::Diet;

    fn client() -> RecordClient {
        RecordClient::new("http://localhost:3000")
    }

    fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn draft() -> RecordDraft {
        RecordDraft {
            name: "Velociraptor".to_string(),
            species: "V. mongoliensis".to_string(),
            period: "Late Cretaceous".to_string(),
            diet: Diet::Carnivore,
            length: 2.0,
            weight: 0.015,
            description: None,
            image_url: None,
        }
    }

    const RAPTOR: &str = r#"{"id":3,"name":"Velociraptor","species":"V. mongoliensis","period":"Late Cretaceous","diet":"Carnivore","length":2.0,"weight":0.015}"#;

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/records");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_produces_correct_request() {
        let req = client().build_get(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/records/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_produces_correct_request() {
        let req = client().build_create(&draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/records");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Velociraptor");
        assert_eq!(body["diet"], "Carnivore");
        assert!(body.get("id").is_none());
        assert!(body.get("imageUrl").is_none());
    }

    #[test]
    fn build_update_targets_item_path() {
        let req = client().build_update(3, &draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/records/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["species"], "V. mongoliensis");
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/records/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RecordClient::new("http://localhost:3000/api//");
        assert_eq!(client.build_list().path, "http://localhost:3000/api/records");
    }

    #[test]
    fn parse_list_success() {
        let body = format!("[{RAPTOR}]");
        let records = client().parse_list(response(200, "OK", &body)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, Some(3));
        assert_eq!(records[0].diet, Diet::Carnivore);
    }

    #[test]
    fn parse_get_not_found() {
        let err = client().parse_get(response(404, "Not Found", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Record not found");
    }

    #[test]
    fn parse_create_accepts_any_success_status() {
        for status in [200, 201] {
            let record = client().parse_create(response(status, "Created", RAPTOR)).unwrap();
            assert_eq!(record.id, Some(3));
        }
    }

    #[test]
    fn parse_create_without_id_is_rejected() {
        let body = r#"{"name":"Velociraptor","species":"V. mongoliensis","period":"Late Cretaceous","diet":"Carnivore","length":2.0,"weight":0.015}"#;
        let err = client().parse_create(response(201, "Created", body)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OtherHttpStatus);
        assert_eq!(err.message(), "Error 201: Created");
    }

    #[test]
    fn parse_create_server_error() {
        let err = client()
            .parse_create(response(500, "Internal Server Error", "boom"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn parse_update_unmapped_status() {
        let err = client().parse_update(response(409, "Conflict", "")).unwrap_err();
        assert_eq!(err.message(), "Error 409: Conflict");
    }

    #[test]
    fn parse_delete_success_ignores_body() {
        assert!(client().parse_delete(response(204, "No Content", "")).is_ok());
        assert!(client().parse_delete(response(200, "OK", "{}")).is_ok());
    }

    #[test]
    fn parse_delete_not_found() {
        let err = client().parse_delete(response(404, "Not Found", "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_list_bad_json_uses_status_branch() {
        let err = client().parse_list(response(200, "OK", "not json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OtherHttpStatus);
        assert_eq!(err.message(), "Error 200: OK");
    }
}
