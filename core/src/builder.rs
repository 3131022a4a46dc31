//! Pure request construction for every OncoKB accessor.
//!
//! # Design
//! `RequestBuilder` holds only a `ClientConfig` and never performs I/O.
//! Each `build_*` method maps its inputs one-to-one onto an `HttpRequest`,
//! so the exact wire shape of every operation can be asserted without a
//! transport. `OncoKbClient` pairs this with a `Transport` to dispatch.
//!
//! Reads that have a fixture variant take a `Source`. Fixture requests use a
//! fixed relative path and never consult the config.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::HttpRequest;
use crate::params::ParamBag;
use crate::serialize::{form_body, path_segment, query_url, query_url_keep_empty};
use crate::types::{CacheCommand, Source, TumorTypeQuery, TumorTypeSearch, UtilsKind};

/// Status sent when a gene status update carries none.
pub const DEFAULT_GENE_STATUS: &str = "Not ready";

/// OncoTree data version requested by every taxonomy lookup.
pub const ONCO_TREE_VERSION: &str = "oncokb";

/// MSKCC isoform overrides published with vcf2maf.
pub const ISOFORM_OVERRIDES_URL: &str =
    "https://raw.githubusercontent.com/mskcc/vcf2maf/master/data/isoform_overrides_at_mskcc";

pub mod fixture {
    pub const TUMOR_TYPES: &str = "data/tumorType.json";
    pub const GENES: &str = "data/gene.json";
    pub const DATA_SUMMARY: &str = "data/summary.json";
    pub const GENE_STATUS: &str = "data/geneStatus.json";
    pub const ALTERATIONS: &str = "data/alteration.json";
    pub const ONCOKB_INFO: &str = "data/oncokbInfo.json";
    pub const ANNOTATION: &str = "data/annotation.xml";
    pub const HOTSPOT: &str = "data/hotspot.json";
    pub const AUTO_MUTATION: &str = "data/autoMutation.json";
}

/// Stateless builder of `HttpRequest`s against a fixed `ClientConfig`.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: ClientConfig,
}

impl RequestBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn api(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.api_link())
    }

    fn curation(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.curation_link())
    }

    fn onco_tree(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.onco_tree_link())
    }

    fn read(source: Source, remote: impl FnOnce() -> String, fixture: &'static str) -> HttpRequest {
        match source {
            Source::Remote => HttpRequest::get(remote()),
            Source::Fixture => HttpRequest::get(fixture),
        }
    }

    // -----------------------------------------------------------------------
    // Curation data
    // -----------------------------------------------------------------------

    pub fn build_tumor_types(&self, source: Source) -> HttpRequest {
        Self::read(source, || self.api("tumorType.json"), fixture::TUMOR_TYPES)
    }

    pub fn build_genes(&self, source: Source) -> HttpRequest {
        Self::read(source, || self.curation("gene.json"), fixture::GENES)
    }

    /// The summary is only ever published as a static file, so both sources
    /// resolve to the fixture.
    pub fn build_data_summary(&self, _source: Source) -> HttpRequest {
        HttpRequest::get(fixture::DATA_SUMMARY)
    }

    pub fn build_alterations(&self, source: Source) -> HttpRequest {
        Self::read(source, || self.api("alteration.json"), fixture::ALTERATIONS)
    }

    pub fn build_oncokb_info(&self, source: Source) -> HttpRequest {
        Self::read(source, || self.curation("oncokbInfo.json"), fixture::ONCOKB_INFO)
    }

    /// `GET geneStatus.json?geneId=..`. A missing id is sent as an empty
    /// value rather than dropped.
    pub fn build_gene_status(&self, source: Source, gene_id: Option<&str>) -> HttpRequest {
        Self::read(
            source,
            || {
                let params = ParamBag::new().with("geneId", gene_id.unwrap_or(""));
                query_url_keep_empty(&self.api("geneStatus.json"), &params)
            },
            fixture::GENE_STATUS,
        )
    }

    /// Form-encoded status update. An empty status falls back to
    /// `DEFAULT_GENE_STATUS`; the fixture variant is a plain read.
    pub fn build_set_gene_status(
        &self,
        source: Source,
        gene_id: Option<&str>,
        status: Option<&str>,
    ) -> HttpRequest {
        match source {
            Source::Remote => {
                let params = ParamBag::new()
                    .with("geneId", gene_id.unwrap_or(""))
                    .with("status", status)
                    .with_default("status", DEFAULT_GENE_STATUS);
                HttpRequest::post_form(self.api("geneStatus.json"), form_body(&params))
            }
            Source::Fixture => HttpRequest::get(fixture::GENE_STATUS),
        }
    }

    // -----------------------------------------------------------------------
    // Variant annotation
    // -----------------------------------------------------------------------

    /// `GET var_annotation?..` with absent or empty parameters dropped.
    pub fn build_annotation(&self, source: Source, params: &ParamBag) -> HttpRequest {
        Self::read(source, || query_url(&self.api("var_annotation"), params), fixture::ANNOTATION)
    }

    /// `POST var_annotation` with the parameters in the query string and no
    /// body.
    pub fn build_post_annotation(&self, params: &ParamBag) -> HttpRequest {
        HttpRequest::post(query_url_keep_empty(&self.api("var_annotation"), params))
    }

    // -----------------------------------------------------------------------
    // Google Drive, mail and internal access
    // -----------------------------------------------------------------------

    /// Report parameters travel as one JSON string under `reportParams`.
    pub fn build_generate_google_doc<P: Serialize + ?Sized>(
        &self,
        report_params: &P,
    ) -> Result<HttpRequest, RequestError> {
        let params = ParamBag::new().with("reportParams", serde_json::to_string(report_params)?);
        Ok(HttpRequest::post_form(self.api("generateGoogleDoc"), form_body(&params)))
    }

    pub fn build_create_google_folder(&self, params: &ParamBag) -> HttpRequest {
        HttpRequest::post_form(self.api("createGoogleFolder"), form_body(params))
    }

    pub fn build_send_email(&self, params: &ParamBag) -> HttpRequest {
        HttpRequest::post_form(self.api("sendEmail"), form_body(params))
    }

    pub fn build_update_drive_annotation(&self, params: &ParamBag) -> HttpRequest {
        HttpRequest::post_form(self.curation("driveAnnotation"), form_body(params))
    }

    pub fn build_internal_access(&self) -> HttpRequest {
        HttpRequest::get(self.api("access"))
    }

    pub fn build_server_utils(&self, kind: UtilsKind, source: Source) -> HttpRequest {
        let fixture = match kind {
            UtilsKind::Hotspot => fixture::HOTSPOT,
            UtilsKind::AutoMutation => fixture::AUTO_MUTATION,
        };
        Self::read(source, || format!("{}?cmd={kind}", self.api("utils")), fixture)
    }

    // -----------------------------------------------------------------------
    // Server cache
    // -----------------------------------------------------------------------

    pub fn build_cache(&self, command: CacheCommand) -> HttpRequest {
        let params = ParamBag::new().with("cmd", command.as_str());
        HttpRequest::post_form(self.api("cache"), form_body(&params))
    }

    pub fn build_cache_status(&self) -> HttpRequest {
        let params = ParamBag::new().with("cmd", "getStatus");
        HttpRequest::get(query_url_keep_empty(&self.api("cache"), &params))
    }

    pub fn build_cache_update_gene(&self, hugo_symbol: &str) -> HttpRequest {
        let params = ParamBag::new().with("cmd", "updateGene").with("hugoSymbol", hugo_symbol);
        HttpRequest::post_form(self.api("cache"), form_body(&params))
    }

    // -----------------------------------------------------------------------
    // OncoTree
    // -----------------------------------------------------------------------

    pub fn build_main_types(&self) -> HttpRequest {
        HttpRequest::get(format!("{}?version={ONCO_TREE_VERSION}", self.onco_tree("mainTypes")))
    }

    /// Returns `None` when `main_type` is `.` or `..`, which cannot be sent
    /// as a path segment.
    pub fn build_tumor_types_by_main_type(&self, main_type: &str) -> Option<HttpRequest> {
        Some(HttpRequest::get(format!(
            "{}/{}?exactMatch=true&version={ONCO_TREE_VERSION}",
            self.onco_tree("tumorTypes/search/maintype"),
            path_segment(main_type)?,
        )))
    }

    /// Returns `None` when `kind` or `query` is missing, empty, `.` or `..`;
    /// no request is built in that case. `exact_match` defaults to `true`.
    pub fn build_tumor_type(
        &self,
        kind: Option<&str>,
        query: Option<&str>,
        exact_match: Option<bool>,
    ) -> Option<HttpRequest> {
        let kind = kind.filter(|k| !k.is_empty())?;
        let query = query.filter(|q| !q.is_empty())?;
        let exact_match = exact_match.unwrap_or(true);
        Some(HttpRequest::get(format!(
            "{}/{}/{}?exactMatch={exact_match}&version={ONCO_TREE_VERSION}",
            self.onco_tree("tumorTypes/search"),
            path_segment(kind)?,
            path_segment(query)?,
        )))
    }

    /// Batched exact main-type search, one query per input in order.
    pub fn build_tumor_types_by_main_types<S: AsRef<str>>(
        &self,
        main_types: &[S],
    ) -> Result<HttpRequest, RequestError> {
        let search = TumorTypeSearch {
            queries: main_types
                .iter()
                .map(|main_type| TumorTypeQuery {
                    kind: "maintype".to_string(),
                    query: main_type.as_ref().to_string(),
                    exact_match: true,
                })
                .collect(),
            version: ONCO_TREE_VERSION.to_string(),
        };
        let body = serde_json::to_string(&search)?;
        Ok(HttpRequest::post_json(self.onco_tree("tumorTypes/search"), body))
    }

    pub fn build_isoform_overrides(&self) -> HttpRequest {
        HttpRequest::get(ISOFORM_OVERRIDES_URL)
    }
}
