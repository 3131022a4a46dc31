//! Selector enums and request payloads shared by the accessors.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::UnknownTag;

/// Where a read is served from.
///
/// `Fixture` targets a fixed relative path under `data/` and never touches a
/// configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Remote,
    Fixture,
}

/// Server-side utility listings exposed under `utils?cmd=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilsKind {
    Hotspot,
    AutoMutation,
}

impl UtilsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UtilsKind::Hotspot => "hotspot",
            UtilsKind::AutoMutation => "autoMutation",
        }
    }
}

impl FromStr for UtilsKind {
    type Err = UnknownTag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "hotspot" => Ok(UtilsKind::Hotspot),
            "autoMutation" => Ok(UtilsKind::AutoMutation),
            other => Err(UnknownTag {
                kind: "utils kind",
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UtilsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands that switch the server cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCommand {
    Reset,
    Enable,
    Disable,
}

impl CacheCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheCommand::Reset => "reset",
            CacheCommand::Enable => "enable",
            CacheCommand::Disable => "disable",
        }
    }
}

impl FromStr for CacheCommand {
    type Err = UnknownTag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "reset" => Ok(CacheCommand::Reset),
            "enable" => Ok(CacheCommand::Enable),
            "disable" => Ok(CacheCommand::Disable),
            other => Err(UnknownTag {
                kind: "cache command",
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CacheCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a batched OncoTree search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TumorTypeQuery {
    #[serde(rename = "type")]
    pub kind: String,
    pub query: String,
    pub exact_match: bool,
}

/// Body of `POST tumorTypes/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TumorTypeSearch {
    pub queries: Vec<TumorTypeQuery>,
    pub version: String,
}
