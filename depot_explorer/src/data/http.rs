//! HTTP storage backend: dedicated thread + reqwest against the storage REST API.

use std::thread;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::data::channel::{serve_requests, Mutation, StorageEvent, StorageRequest};
use crate::data::error::StorageError;
use crate::data::model::{BoxId, BoxRecord, BoxUpdate, NewBox, Warehouse, WarehouseId};
use crate::data::{InventoryChannel, StorageBackend, StorageConfig};

const EVENT_CAPACITY: usize = 64;

/// Storage backend speaking to the warehouse API over HTTP.
pub struct HttpStorage {
    config: StorageConfig,
}

impl HttpStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

impl StorageBackend for HttpStorage {
    fn spawn(self) -> InventoryChannel {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (evt_tx, evt_rx) = crossbeam_channel::bounded(EVENT_CAPACITY);
        let config = self.config;

        thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    warn!("storage: failed to build tokio runtime: {err}");
                    let _ = evt_tx.send(StorageEvent::FetchFailed {
                        seq: 0,
                        error: StorageError::Runtime(err),
                    });
                    return;
                }
            };
            let api = ApiClient::new(config.api_url, config.warehouse_id);
            info!("storage: serving requests against {}", api.base);
            serve_requests(req_rx, evt_tx, |request| rt.block_on(api.handle(request)));
        });

        InventoryChannel::new(req_tx, evt_rx)
    }
}

struct ApiClient {
    http: Client,
    base: Url,
    warehouse_id: WarehouseId,
}

impl ApiClient {
    fn new(base: Url, warehouse_id: WarehouseId) -> Self {
        Self {
            http: Client::new(),
            base,
            warehouse_id,
        }
    }

    async fn handle(&self, request: StorageRequest) -> Vec<StorageEvent> {
        match request {
            StorageRequest::Refresh { seq } => {
                let warehouse = match self.fetch_warehouse().await {
                    Ok(warehouse) => StorageEvent::Warehouse { seq, warehouse },
                    Err(error) => {
                        warn!("storage: warehouse fetch failed: {error}");
                        StorageEvent::FetchFailed { seq, error }
                    }
                };
                let boxes = match self.fetch_boxes().await {
                    Ok(boxes) => {
                        debug!("storage: fetched {} boxes", boxes.len());
                        StorageEvent::Boxes { seq, boxes }
                    }
                    Err(error) => {
                        warn!("storage: box fetch failed: {error}");
                        StorageEvent::FetchFailed { seq, error }
                    }
                };
                vec![warehouse, boxes]
            }
            StorageRequest::CreateBox(draft) => vec![settle(
                "create",
                self.create_box(&draft).await.map(Mutation::Created),
            )],
            StorageRequest::UpdateBox { id, update } => vec![settle(
                "update",
                self.update_box(id, &update).await.map(|()| Mutation::Updated(id)),
            )],
            StorageRequest::DeleteBox(id) => vec![settle(
                "delete",
                self.delete_box(id).await.map(|()| Mutation::Deleted(id)),
            )],
        }
    }

    async fn fetch_warehouse(&self) -> Result<Warehouse, StorageError> {
        let url = self.endpoint(&format!("api/warehouses/{}", self.warehouse_id))?;
        let response = self.http.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::WarehouseNotFound(self.warehouse_id));
        }
        read_json(response).await
    }

    async fn fetch_boxes(&self) -> Result<Vec<BoxRecord>, StorageError> {
        let url = self.endpoint("api/boxes")?;
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    async fn create_box(&self, draft: &NewBox) -> Result<BoxRecord, StorageError> {
        let url = self.endpoint("api/boxes")?;
        let response = self.http.post(url).json(draft).send().await?;
        read_json(response).await
    }

    async fn update_box(&self, id: BoxId, update: &BoxUpdate) -> Result<(), StorageError> {
        let url = self.endpoint(&format!("api/boxes/{id}"))?;
        let response = self.http.put(url).json(update).send().await?;
        expect_success(response).await.map(drop)
    }

    async fn delete_box(&self, id: BoxId) -> Result<(), StorageError> {
        let url = self.endpoint(&format!("api/boxes/{id}"))?;
        let response = self.http.delete(url).send().await?;
        expect_success(response).await.map(drop)
    }

    fn endpoint(&self, path: &str) -> Result<Url, StorageError> {
        Ok(self.base.join(path)?)
    }
}

fn settle(action: &'static str, result: Result<Mutation, StorageError>) -> StorageEvent {
    match result {
        Ok(mutation) => {
            info!("storage: {action} succeeded");
            StorageEvent::Mutated(mutation)
        }
        Err(error) => {
            warn!("storage: {action} failed: {error}");
            StorageEvent::MutationFailed { action, error }
        }
    }
}

async fn expect_success(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StorageError::Api {
        status: status.as_u16(),
        message: api_message(&message),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StorageError> {
    let body = expect_success(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// The API answers errors either as a bare string or as a problem-details object.
fn api_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(text) = value.as_str() {
            return text.to_string();
        }
        if let Some(title) = value.get("title").and_then(|t| t.as_str()) {
            return title.to_string();
        }
    }
    if body.is_empty() {
        "no details".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_onto_base() {
        let api = ApiClient::new("http://localhost:5204".parse().unwrap(), 3);
        let url = api.endpoint("api/warehouses/3").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5204/api/warehouses/3");
    }

    #[test]
    fn api_message_reads_plain_and_problem_bodies() {
        assert_eq!(api_message("\"Slot 9 not found.\""), "Slot 9 not found.");
        assert_eq!(api_message(r#"{"title":"Not Found","status":404}"#), "Not Found");
        assert_eq!(api_message("teapot"), "teapot");
        assert_eq!(api_message(""), "no details");
    }
}
