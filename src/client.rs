// Copyright 2026 Newsdesk Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP access to the search and document services.
//!
//! Every call is a single GET with query-string parameters and a JSON body
//! in the response. Cookies are carried across requests. No retries and no
//! timeouts; a transport failure surfaces as [`ApiError::Network`] and is
//! terminal for that one call.

use anyhow::Context;
use anyhow::Result;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::model::DocResponse;
use crate::model::SearchRequest;
use crate::model::SearchResponse;
use crate::model::SimilarDocsResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .context("create HTTP client")?;
        Ok(Self { client, config })
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let url = format!(
            "{}?query={}&min_index={}&max_index={}&sort_order={}&min_date={}&max_date={}",
            self.config.search_url,
            urlencoding::encode(&request.query),
            request.min_index,
            request.max_index,
            request.sort_order.as_str(),
            urlencoding::encode(&request.min_date),
            urlencoding::encode(&request.max_date),
        );
        self.get_json(&url).await
    }

    pub async fn get_doc(&self, doc_id: &str) -> Result<DocResponse, ApiError> {
        let url = format!(
            "{}?doc_id={}",
            self.config.get_doc_url,
            urlencoding::encode(doc_id)
        );
        self.get_json(&url).await
    }

    pub async fn get_similar_docs(&self, doc_id: &str) -> Result<SimilarDocsResponse, ApiError> {
        let url = format!(
            "{}?doc_id={}",
            self.config.get_similar_docs_url,
            urlencoding::encode(doc_id)
        );
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let body = response.json::<T>().await?;
        Ok(body)
    }
}
