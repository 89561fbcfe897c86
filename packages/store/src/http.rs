//! REST implementation of the persistence gateway.
//!
//! Status mapping: 404 → `NotFound`, 409 → `Conflict`; any other failure
//! body is matched against the order-index uniqueness message pattern
//! before falling back to `Server`, since some stores report the
//! constraint violation as a plain 400/500.

use crate::dto::{ComponentPayload, ComponentRecord, PageDraft, PageRecord};
use crate::error::{StoreError, StoreResult};
use crate::gateway::PersistenceGateway;
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

fn order_conflict_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)order[ _-]?index|duplicate.*order").expect("conflict pattern is valid")
    })
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderBody<'a> {
    ordered_ids: &'a [i64],
}

#[derive(Deserialize)]
struct SlugExistsResponse {
    exists: bool,
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass a success through; translate anything else into the taxonomy.
    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "store request failed");
        Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound(body),
            StatusCode::CONFLICT => StoreError::Conflict(body),
            _ if order_conflict_pattern().is_match(&body) => StoreError::Conflict(body),
            _ => StoreError::Server {
                status: status.as_u16(),
                message: body,
            },
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> StoreResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|err| StoreError::Codec(err.to_string()))
    }
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    async fn list_components(&self, page_id: i64) -> StoreResult<Vec<ComponentRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/pages/{page_id}/components")))
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn create_component(
        &self,
        page_id: i64,
        payload: ComponentPayload,
    ) -> StoreResult<ComponentRecord> {
        let response = self
            .client
            .post(self.url(&format!("/pages/{page_id}/components")))
            .json(&payload)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn update_component(
        &self,
        component_id: i64,
        payload: ComponentPayload,
    ) -> StoreResult<ComponentRecord> {
        let response = self
            .client
            .put(self.url(&format!("/components/{component_id}")))
            .json(&payload)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn delete_component(&self, component_id: i64) -> StoreResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/components/{component_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn reorder_components(&self, page_id: i64, ordered_ids: &[i64]) -> StoreResult<()> {
        let response = self
            .client
            .put(self.url(&format!("/pages/{page_id}/components/order")))
            .json(&ReorderBody { ordered_ids })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn create_page(&self, draft: PageDraft) -> StoreResult<PageRecord> {
        let response = self
            .client
            .post(self.url("/pages"))
            .json(&draft)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn get_page(&self, page_id: i64) -> StoreResult<PageRecord> {
        let response = self
            .client
            .get(self.url(&format!("/pages/{page_id}")))
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn check_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        let mut request = self
            .client
            .get(self.url("/pages/slug-exists"))
            .query(&[("slug", slug)]);
        if let Some(id) = exclude_id {
            request = request.query(&[("excludeId", id.to_string())]);
        }

        let response = request.send().await?;
        let body: SlugExistsResponse = Self::decode(Self::check(response).await?).await?;
        Ok(body.exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_pattern_matches_store_messages() {
        let pattern = order_conflict_pattern();
        assert!(pattern.is_match("duplicate key value violates order_index uniqueness"));
        assert!(pattern.is_match("OrderIndex must be unique per page"));
        assert!(pattern.is_match("order index 3 already in use"));
        assert!(!pattern.is_match("name must not be empty"));
    }
}
