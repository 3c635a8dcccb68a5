use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::normalize::normalize_records;
use crate::models::RestaurantEntity;

/// Errors that can occur when reading the restaurant table
#[derive(Debug, Error)]
pub enum AirtableError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Airtable request failed with status {status}")]
    ApiError { status: u16, details: String },

    #[error("Pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },
}

/// One page of raw table records
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub records: Vec<Value>,
    /// Opaque continuation token; absent on the last page
    #[serde(default)]
    pub offset: Option<String>,
}

/// Airtable REST client for the restaurant table
///
/// Pages through the table with the continuation token the API hands
/// back. Records are returned raw; normalization happens per record.
pub struct AirtableClient {
    table_url: String,
    token: String,
    page_size: u32,
    max_pages: usize,
    client: Client,
}

impl AirtableClient {
    /// Create a new Airtable client
    pub fn new(
        endpoint: &str,
        base_id: &str,
        table_name: &str,
        token: String,
        page_size: u32,
        max_pages: usize,
        timeout: Duration,
    ) -> Result<Self, AirtableError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            table_url: table_url(endpoint, base_id, table_name),
            token,
            page_size,
            max_pages,
            client,
        })
    }

    /// Fetch one page of raw records
    pub async fn fetch_page(&self, offset: Option<&str>) -> Result<RecordPage, AirtableError> {
        let mut url = format!("{}?pageSize={}", self.table_url, self.page_size);
        if let Some(offset) = offset {
            url.push_str("&offset=");
            url.push_str(&urlencoding::encode(offset));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let details = response.text().await.unwrap_or_default();
            tracing::error!("Airtable request failed: {} - {}", status, details);
            return Err(AirtableError::ApiError {
                status: status.as_u16(),
                details,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch every raw record by following continuation tokens
    ///
    /// Any failing page fails the whole fetch.
    pub async fn fetch_all_records(&self) -> Result<Vec<Value>, AirtableError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > self.max_pages {
                return Err(AirtableError::PaginationLimit {
                    max_pages: self.max_pages,
                });
            }

            let page = self.fetch_page(offset.as_deref()).await?;
            tracing::debug!(page = page_count, records = page.records.len(), "Fetched Airtable page");
            records.extend(page.records);

            match page.offset.filter(|o| !o.is_empty()) {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    /// Fetch and normalize every restaurant in the table
    pub async fn fetch_restaurants(&self) -> Result<Vec<RestaurantEntity>, AirtableError> {
        let records = self.fetch_all_records().await?;
        let restaurants = normalize_records(&records);

        tracing::info!("Loaded {} restaurants from {} records", restaurants.len(), records.len());

        Ok(restaurants)
    }
}

/// Table names go in the path with spaces as `+`
fn table_url(endpoint: &str, base_id: &str, table_name: &str) -> String {
    format!(
        "{}/{}/{}",
        endpoint.trim_end_matches('/'),
        base_id,
        urlencoding::encode(table_name).replace("%20", "+")
    )
}
