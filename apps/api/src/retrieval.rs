//! Resume passage retrieval — a narrow named interface over the external
//! vector-similarity service. The service itself (embedding, chunking,
//! indexing) is out of scope; the core only asks it for the top-k passages
//! relevant to a query and treats every failure as "no grounding available".

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const RETRIEVAL_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait PassageRetriever: Send + Sync {
    /// Top-k resume passages for a query, most relevant first.
    async fn relevant_passages(
        &self,
        candidate_id: &str,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>>;
}

#[derive(Debug, Serialize)]
struct RetrievalRequest<'a> {
    candidate_id: &'a str,
    query: &'a str,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct RetrievalResponse {
    passages: Vec<String>,
}

/// Adapter for the HTTP retrieval service configured via `RETRIEVER_URL`.
pub struct HttpPassageRetriever {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPassageRetriever {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(RETRIEVAL_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl PassageRetriever for HttpPassageRetriever {
    async fn relevant_passages(
        &self,
        candidate_id: &str,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>> {
        let url = format!("{}/query", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&RetrievalRequest {
                candidate_id,
                query,
                k,
            })
            .send()
            .await?
            .error_for_status()?;
        let body: RetrievalResponse = response.json().await?;
        Ok(body.passages)
    }
}
