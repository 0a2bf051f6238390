//! REST implementation of the record store port.
//!
//! Follows the hosted store's PostgREST conventions: one route per table
//! under `/rest/v1/`, equality filters in the query string, JSON bodies,
//! and `Prefer` headers to control returned representations.

use crate::core::{OwnerId, Record, RecordId, Result, SyncError};
use crate::store::{DeleteOutcome, RecordStore, StoreConfig, prepare_for_write, require_owner};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::RequestBuilder;

/// Thin client issuing select/insert/update/delete against named remote
/// tables over HTTPS, always filtered by owner.
pub struct RestStore {
    http: reqwest::Client,
    config: StoreConfig,
}

impl RestStore {
    /// Builds a store client from validated configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SyncError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    fn authed(&self, builder: RequestBuilder, write: bool) -> RequestBuilder {
        let builder = builder
            .header("apikey", self.config.api_key.as_str())
            .bearer_auth(&self.config.api_key);
        if self.config.schema == "public" {
            return builder;
        }
        // Non-default schemas are selected via profile headers.
        if write {
            builder.header("Content-Profile", self.config.schema.as_str())
        } else {
            builder.header("Accept-Profile", self.config.schema.as_str())
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        Err(SyncError::Transport(format!("HTTP {status}: {snippet}")))
    }

    async fn insert_one(&self, table: &str, record: &Record) -> Result<()> {
        let response = self
            .authed(self.http.post(self.table_url(table)), true)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_one(
        &self,
        table: &str,
        id: &RecordId,
        record: &Record,
        owner: &OwnerId,
    ) -> Result<()> {
        let response = self
            .authed(self.http.patch(self.table_url(table)), true)
            .query(&[
                ("id", format!("eq.{id}")),
                ("user_id", format!("eq.{owner}")),
            ])
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn fetch_all(&self, table: &str, owner: &OwnerId) -> Result<Vec<Record>> {
        require_owner(owner)?;
        let response = self
            .authed(self.http.get(self.table_url(table)), false)
            .query(&[("user_id", format!("eq.{owner}")), ("select", "*".to_string())])
            .send()
            .await?;
        let response = Self::check(response).await?;
        let records: Vec<Record> = response.json().await?;
        Ok(records)
    }

    async fn upsert_many(&self, table: &str, records: Vec<Record>, owner: &OwnerId) -> Result<()> {
        require_owner(owner)?;
        if records.is_empty() {
            return Ok(());
        }

        let total = records.len();
        let operations = records.into_iter().map(|record| {
            let prepared = prepare_for_write(record, owner);
            async move {
                match prepared.id() {
                    Some(id) => self.update_one(table, &id, &prepared, owner).await,
                    None => self.insert_one(table, &prepared).await,
                }
            }
        });

        // Fire all operations, then report. In-flight siblings are not
        // cancelled when one fails.
        let results = join_all(operations).await;
        let mut failed = 0usize;
        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                failed += 1;
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
        if failed > 0 {
            log::warn!("upsert_many: {failed}/{total} operations failed on '{table}'");
            return Err(SyncError::PartialWrite {
                failed,
                total,
                first_error: first_error.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn delete_one(
        &self,
        table: &str,
        id: &RecordId,
        owner: &OwnerId,
    ) -> Result<DeleteOutcome> {
        require_owner(owner)?;
        let response = self
            .authed(self.http.delete(self.table_url(table)), true)
            .query(&[
                ("id", format!("eq.{id}")),
                ("user_id", format!("eq.{owner}")),
            ])
            // Ask for the deleted rows back so a zero-row match is
            // distinguishable from a real delete.
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let response = Self::check(response).await?;
        let deleted: Vec<Record> = response.json().await?;
        if deleted.is_empty() {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}
