//! Free Dictionary API client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use super::http::{build_client, handle_response};
use super::{LexicalLookup, Sense, SourceError, SourceResult};
use crate::config::ServiceConfig;

/// Dictionary lookups against the Free Dictionary API
/// (`/api/v2/entries/en/<word>`).
#[derive(Debug, Clone)]
pub struct FreeDictionaryClient {
    config: Arc<ServiceConfig>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<Definition>,
    #[serde(default)]
    synonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    definition: String,
    #[serde(default)]
    synonyms: Vec<String>,
}

impl FreeDictionaryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: Arc<ServiceConfig>) -> SourceResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }
}

/// Flattens entries into senses. Meaning-level synonyms are attached to the
/// first definition of that meaning.
fn flatten(entries: Vec<Entry>) -> Vec<Sense> {
    let mut senses = Vec::new();
    for meaning in entries.into_iter().flat_map(|e| e.meanings) {
        let mut shared = Some(meaning.synonyms);
        for def in meaning.definitions {
            let mut synonyms = def.synonyms;
            if let Some(extra) = shared.take() {
                synonyms.extend(extra);
            }
            senses.push(Sense {
                definition: def.definition,
                synonyms,
            });
        }
    }
    senses
}

#[async_trait]
impl LexicalLookup for FreeDictionaryClient {
    async fn senses(&self, word: &str) -> SourceResult<Vec<Sense>> {
        let mut url = reqwest::Url::parse(self.config.dictionary_endpoint()).map_err(|e| {
            SourceError::Configuration {
                message: format!("invalid dictionary endpoint: {e}"),
            }
        })?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Configuration {
                message: "dictionary endpoint cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "v2", "entries", "en", word]);

        let response = self.client.get(url).send().await?;

        // Unknown words come back as 404 with a "No Definitions Found" body.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let entries: Vec<Entry> = handle_response(response).await?;
        Ok(flatten(entries))
    }
}
