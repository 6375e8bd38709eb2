use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::WorkshopError;
use crate::models::Client;
use crate::storage::{read_collection, write_collection, ClientStore};

const CLIENTS_FILE: &str = "clients.json";

/// JSON-file-backed client store, keyed by national id.
pub struct JsonClientStore {
    file_path: PathBuf,
    cache: RwLock<Vec<Client>>,
}

impl JsonClientStore {
    pub async fn new(data_dir: PathBuf) -> Result<Self, WorkshopError> {
        tokio::fs::create_dir_all(&data_dir).await?;
        let file_path = data_dir.join(CLIENTS_FILE);
        let clients: Vec<Client> = read_collection(&file_path).await?;
        tracing::debug!(count = clients.len(), "loaded client collection");
        Ok(Self {
            file_path,
            cache: RwLock::new(clients),
        })
    }

    async fn persist(&self, clients: &[Client]) -> Result<(), WorkshopError> {
        write_collection(&self.file_path, clients).await
    }
}

fn keep_if_blank(current: &str, replacement: Option<&str>) -> String {
    match replacement {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => current.to_string(),
    }
}

#[async_trait]
impl ClientStore for JsonClientStore {
    async fn list(&self) -> Result<Vec<Client>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache.clone())
    }

    async fn insert(&self, client: Client) -> Result<(), WorkshopError> {
        let mut cache = self.cache.write().await;
        if cache.contains(&client) {
            return Err(WorkshopError::DuplicateClient);
        }
        cache.push(client);
        self.persist(&cache).await?;
        Ok(())
    }

    /// Replace the client's name and phone. Absent or blank replacements
    /// keep the stored value.
    async fn update(
        &self,
        client: &Client,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Client, WorkshopError> {
        let mut cache = self.cache.write().await;
        let idx = cache
            .iter()
            .position(|c| c == client)
            .ok_or(WorkshopError::ClientNotFound)?;

        let updated = Client::new(
            &cache[idx].national_id,
            &keep_if_blank(&cache[idx].name, name),
            &keep_if_blank(&cache[idx].phone, phone),
        )?;
        cache[idx] = updated.clone();
        self.persist(&cache).await?;
        Ok(updated)
    }

    async fn find(&self, client: &Client) -> Result<Option<Client>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache.iter().find(|c| *c == client).cloned())
    }

    async fn delete(&self, client: &Client) -> Result<(), WorkshopError> {
        let mut cache = self.cache.write().await;
        let idx = cache
            .iter()
            .position(|c| c.national_id.eq_ignore_ascii_case(&client.national_id))
            .ok_or(WorkshopError::ClientNotFound)?;
        cache.remove(idx);
        self.persist(&cache).await?;
        Ok(())
    }
}
