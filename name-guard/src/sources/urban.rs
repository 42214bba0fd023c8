//! Urban Dictionary client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use super::http::{build_client, handle_response};
use super::{SlangDefinition, SlangLookup, SourceResult};
use crate::config::ServiceConfig;

/// Slang lookups against the Urban Dictionary `define` endpoint.
#[derive(Debug, Clone)]
pub struct UrbanDictionaryClient {
    config: Arc<ServiceConfig>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct DefineResponse {
    #[serde(default)]
    list: Vec<DefineEntry>,
}

#[derive(Debug, Deserialize)]
struct DefineEntry {
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    thumbs_up: Option<u64>,
}

impl UrbanDictionaryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: Arc<ServiceConfig>) -> SourceResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl SlangLookup for UrbanDictionaryClient {
    async fn define(&self, term: &str) -> SourceResult<Vec<SlangDefinition>> {
        let url = format!("{}/v0/define", self.config.slang_endpoint());

        let response = self.client.get(&url).query(&[("term", term)]).send().await?;
        let body: DefineResponse = handle_response(response).await?;

        // Entries without a definition carry no signal.
        Ok(body
            .list
            .into_iter()
            .filter_map(|entry| {
                entry
                    .definition
                    .map(|text| SlangDefinition::new(text, entry.thumbs_up.unwrap_or(0)))
            })
            .collect())
    }
}
