// ABOUTME: Web and video search plugin delegating network access to a SearchBackend
// ABOUTME: Merges web and YouTube hits into one payload with a spoken result count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! # Web Search Plugin
//!
//! `web_search` looks up reference material for the current lesson. The
//! network calls live behind [`SearchBackend`] so hosts choose the provider
//! (Wikipedia, Brave, the `YouTube` Data API) and tests inject a stub.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tutor_core::errors::{RegistryError, ToolError};

use super::args::{invalid, parse_args};
use crate::plugins::{
    ObjectSchema, PermissionSet, PluginDescriptor, TextRule, ToolCategory, VoicePromptConfig,
};
use crate::tools::{to_payload, PluginHandler, ToolContext, ToolResult};

/// Plugin id
pub const PLUGIN_ID: &str = "web_search";

const MIN_QUERY_CHARS: usize = 2;
const MAX_QUERY_CHARS: usize = 500;

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// `web` or `youtube`
    #[serde(rename = "type")]
    pub kind: String,
    /// Page or video title
    pub title: String,
    /// Link to the resource
    pub url: String,
    /// Short excerpt, when the provider returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SearchHit {
    /// A web page hit
    #[must_use]
    pub fn web(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::Web.as_str().to_owned(),
            title: title.into(),
            url: url.into(),
            description: None,
        }
    }

    /// A video hit
    #[must_use]
    pub fn youtube(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::Youtube.as_str().to_owned(),
            title: title.into(),
            url: url.into(),
            description: None,
        }
    }
}

/// Web search results and the provider that produced them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebSearchResponse {
    /// Hits in provider order
    pub results: Vec<SearchHit>,
    /// Provider name, such as `wikipedia` or `brave`
    pub source: String,
}

/// Search backend failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Provider reported an error
    #[error("{message}")]
    Backend {
        /// Provider message, surfaced to the learner
        message: String,
    },
    /// Provider failed without a usable message
    #[error("Search failed")]
    Unavailable,
}

impl SearchError {
    /// Provider error with a message
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Network access used by the search plugin
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search encyclopedic and general web sources
    async fn web_search(&self, query: &str) -> Result<WebSearchResponse, SearchError>;

    /// Search educational videos
    async fn youtube_search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// Which sources to query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Web only
    Web,
    /// `YouTube` only
    Youtube,
    /// Both, web hits first
    #[default]
    All,
}

impl SearchKind {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Youtube => "youtube",
            Self::All => "all",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default, rename = "type")]
    kind: SearchKind,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload {
    query: String,
    search_type: SearchKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_source: Option<String>,
    result_count: usize,
    results: Vec<SearchHit>,
    created_at: String,
}

/// Handler for `web_search`
pub struct WebSearchHandler {
    backend: Arc<dyn SearchBackend>,
}

impl WebSearchHandler {
    /// Create a handler over a search backend
    #[must_use]
    pub const fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
    ) -> Result<(Vec<SearchHit>, Option<String>), SearchError> {
        match kind {
            SearchKind::Web => {
                let web = self.backend.web_search(query).await?;
                Ok((web.results, Some(web.source)))
            }
            SearchKind::Youtube => Ok((self.backend.youtube_search(query).await?, None)),
            SearchKind::All => {
                let (web, videos) = tokio::try_join!(
                    self.backend.web_search(query),
                    self.backend.youtube_search(query)
                )?;
                let mut results = web.results;
                results.extend(videos);
                Ok((results, Some(web.source)))
            }
        }
    }
}

#[async_trait]
impl PluginHandler for WebSearchHandler {
    async fn handle(&self, args: Value, _context: &ToolContext) -> ToolResult<Value> {
        let args: SearchArgs = parse_args(args)?;
        let query = args.query.trim();
        let length = query.chars().count();
        if !(MIN_QUERY_CHARS..=MAX_QUERY_CHARS).contains(&length) {
            return Err(invalid(
                "query",
                format!(
                    "query must contain between {MIN_QUERY_CHARS} and {MAX_QUERY_CHARS} characters"
                ),
            ));
        }

        let (results, search_source) = self
            .search(query, args.kind)
            .await
            .map_err(|e| ToolError::from_error(&e))?;

        if results.is_empty() {
            return Err(ToolError::execution_failed(format!(
                "No results found for '{query}'"
            )));
        }
        debug!(query, hits = results.len(), "Search completed");

        to_payload(&SearchPayload {
            query: query.to_owned(),
            search_type: args.kind,
            search_source,
            result_count: results.len(),
            results,
            created_at: Utc::now().to_rfc3339(),
        })
    }
}

/// Build the `web_search` descriptor
///
/// # Errors
///
/// Returns `RegistryError` if the descriptor cannot be built
pub fn descriptor(backend: Arc<dyn SearchBackend>) -> Result<PluginDescriptor, RegistryError> {
    let schema = ObjectSchema::new()
        .field(
            "query",
            TextRule::new()
                .trimmed()
                .min_chars(MIN_QUERY_CHARS)
                .max_chars(MAX_QUERY_CHARS),
        )
        .optional(
            "type",
            TextRule::new().one_of([
                SearchKind::Web.as_str(),
                SearchKind::Youtube.as_str(),
                SearchKind::All.as_str(),
            ]),
        );

    PluginDescriptor::builder(PLUGIN_ID, "Ricerca Web", ToolCategory::Utility)
        .schema(Arc::new(schema))
        .handler(Arc::new(WebSearchHandler::new(backend)))
        .voice_prompt(
            VoicePromptConfig::new("Vuoi che cerchi informazioni su {query}?")
                .requires_context(["query"])
                .with_fallback("Vuoi che faccia una ricerca?"),
        )
        .voice_feedback(
            VoicePromptConfig::new("Ho trovato {resultCount} risultati per {query}.")
                .requires_context(["resultCount", "query"])
                .with_fallback("Ecco i risultati della ricerca."),
        )
        .triggers([
            "ricerca",
            "cerca",
            "search",
            "google",
            "wikipedia",
            "youtube",
            "video",
        ])
        .permissions(PermissionSet::READ_CONVERSATION | PermissionSet::VOICE_OUTPUT)
        .build()
}
