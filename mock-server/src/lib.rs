use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    Herbivore,
    Carnivore,
    Omnivore,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub period: String,
    pub diet: Diet,
    pub length: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of POST and PUT. A client-supplied `id` is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInput {
    pub name: String,
    pub species: String,
    pub period: String,
    pub diet: Diet,
    pub length: f64,
    pub weight: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl RecordInput {
    fn into_record(self, id: i64) -> Record {
        Record {
            id,
            name: self.name,
            species: self.species,
            period: self.period,
            diet: self.diet,
            length: self.length,
            weight: self.weight,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    records: BTreeMap<i64, Record>,
}

impl Store {
    fn insert(&mut self, input: RecordInput) -> Record {
        self.next_id += 1;
        let record = input.into_record(self.next_id);
        self.records.insert(record.id, record.clone());
        record
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/records", get(list_records).post(create_record))
        .route("/records/{id}", get(get_record).put(update_record).delete(delete_record))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_records(State(db): State<Db>) -> Json<Vec<Record>> {
    let store = db.read().await;
    Json(store.records.values().cloned().collect())
}

async fn create_record(
    State(db): State<Db>,
    Json(input): Json<RecordInput>,
) -> (StatusCode, Json<Record>) {
    let record = db.write().await.insert(input);
    tracing::info!(id = record.id, "record created");
    (StatusCode::CREATED, Json(record))
}

async fn get_record(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Record>, StatusCode> {
    let store = db.read().await;
    store.records.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_record(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<RecordInput>,
) -> Result<Json<Record>, StatusCode> {
    let mut store = db.write().await;
    let slot = store.records.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_record(id);
    tracing::info!(id, "record updated");
    Ok(Json(slot.clone()))
}

async fn delete_record(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.records.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
