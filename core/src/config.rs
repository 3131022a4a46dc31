//! Base-URL configuration for the three backend services.
//!
//! # Design
//! `ClientConfig` is built once and then only read. Accessors receive it at
//! construction time instead of consulting process-wide state, so two
//! clients pointed at different deployments can live side by side.

use std::env;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const API_LINK_VAR: &str = "ONCOKB_API_LINK";
pub const CURATION_LINK_VAR: &str = "ONCOKB_CURATION_LINK";
pub const ONCO_TREE_LINK_VAR: &str = "ONCOKB_ONCOTREE_LINK";

/// Immutable set of base-URL fragments.
///
/// Each link is stored without a trailing slash; endpoints are joined as
/// `{link}/{endpoint}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_link: String,
    curation_link: String,
    onco_tree_link: String,
}

/// Shape of the JSON object produced by the external config loader.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    api_link: String,
    curation_link: String,
    onco_tree_link: String,
}

impl ClientConfig {
    pub fn new(api_link: &str, curation_link: &str, onco_tree_link: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_link: normalize("api link", api_link)?,
            curation_link: normalize("curation link", curation_link)?,
            onco_tree_link: normalize("oncotree link", onco_tree_link)?,
        })
    }

    /// Load the links from `ONCOKB_API_LINK`, `ONCOKB_CURATION_LINK` and
    /// `ONCOKB_ONCOTREE_LINK`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api = env::var(API_LINK_VAR).map_err(|_| ConfigError::Missing(API_LINK_VAR))?;
        let curation = env::var(CURATION_LINK_VAR).map_err(|_| ConfigError::Missing(CURATION_LINK_VAR))?;
        let onco_tree = env::var(ONCO_TREE_LINK_VAR).map_err(|_| ConfigError::Missing(ONCO_TREE_LINK_VAR))?;
        Self::new(&api, &curation, &onco_tree)
    }

    /// Parse `{"apiLink": .., "curationLink": .., "oncoTreeLink": ..}`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(raw)?;
        Self::new(&raw.api_link, &raw.curation_link, &raw.onco_tree_link)
    }

    pub fn api_link(&self) -> &str {
        &self.api_link
    }

    pub fn curation_link(&self) -> &str {
        &self.curation_link
    }

    pub fn onco_tree_link(&self) -> &str {
        &self.onco_tree_link
    }
}

fn normalize(name: &'static str, link: &str) -> Result<String, ConfigError> {
    let trimmed = link.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl { name, source })?;
    Ok(trimmed.to_string())
}
