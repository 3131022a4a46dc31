//! Accessors that dispatch built requests through a caller-supplied transport.
//!
//! # Design
//! `OncoKbClient` owns a `RequestBuilder` and a `Transport`. Every accessor
//! builds one request, passes it to `dispatch`, and returns the transport's
//! pending handle unchanged. Nothing is awaited, retried or inspected here,
//! and no state survives between calls, so concurrent callers need no
//! coordination and may see responses complete in any order.

use serde::Serialize;
use tracing::{debug, trace};

use crate::builder::RequestBuilder;
use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::{HttpRequest, Transport};
use crate::params::ParamBag;
use crate::types::{CacheCommand, Source, UtilsKind};

/// OncoKB curation client bound to one configuration and one transport.
#[derive(Debug, Clone)]
pub struct OncoKbClient<T> {
    requests: RequestBuilder,
    transport: T,
}

impl<T: Transport> OncoKbClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            requests: RequestBuilder::new(config),
            transport,
        }
    }

    /// The builder behind every accessor, for callers that want the request
    /// without sending it.
    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Hand `request` to the transport and return its pending handle.
    pub fn dispatch(&self, request: HttpRequest) -> T::Pending {
        debug!(method = request.method.as_str(), target = %request.path, "dispatching request");
        if let Some(body) = &request.body {
            trace!(%body, "request body");
        }
        self.transport.execute(request)
    }

    pub fn tumor_types(&self, source: Source) -> T::Pending {
        self.dispatch(self.requests.build_tumor_types(source))
    }

    pub fn genes(&self, source: Source) -> T::Pending {
        self.dispatch(self.requests.build_genes(source))
    }

    pub fn data_summary(&self, source: Source) -> T::Pending {
        self.dispatch(self.requests.build_data_summary(source))
    }

    pub fn alterations(&self, source: Source) -> T::Pending {
        self.dispatch(self.requests.build_alterations(source))
    }

    pub fn oncokb_info(&self, source: Source) -> T::Pending {
        self.dispatch(self.requests.build_oncokb_info(source))
    }

    pub fn gene_status(&self, source: Source, gene_id: Option<&str>) -> T::Pending {
        trace!(?gene_id, "gene status lookup");
        self.dispatch(self.requests.build_gene_status(source, gene_id))
    }

    pub fn set_gene_status(&self, source: Source, gene_id: Option<&str>, status: Option<&str>) -> T::Pending {
        trace!(?gene_id, ?status, "gene status update");
        self.dispatch(self.requests.build_set_gene_status(source, gene_id, status))
    }

    pub fn annotation(&self, source: Source, params: &ParamBag) -> T::Pending {
        self.dispatch(self.requests.build_annotation(source, params))
    }

    pub fn post_annotation(&self, params: &ParamBag) -> T::Pending {
        self.dispatch(self.requests.build_post_annotation(params))
    }

    pub fn generate_google_doc<P: Serialize + ?Sized>(&self, report_params: &P) -> Result<T::Pending, RequestError> {
        let request = self.requests.build_generate_google_doc(report_params)?;
        Ok(self.dispatch(request))
    }

    pub fn create_google_folder(&self, params: &ParamBag) -> T::Pending {
        self.dispatch(self.requests.build_create_google_folder(params))
    }

    pub fn send_email(&self, params: &ParamBag) -> T::Pending {
        self.dispatch(self.requests.build_send_email(params))
    }

    pub fn update_drive_annotation(&self, params: &ParamBag) -> T::Pending {
        self.dispatch(self.requests.build_update_drive_annotation(params))
    }

    pub fn internal_access(&self) -> T::Pending {
        self.dispatch(self.requests.build_internal_access())
    }

    pub fn server_utils(&self, kind: UtilsKind, source: Source) -> T::Pending {
        self.dispatch(self.requests.build_server_utils(kind, source))
    }

    pub fn cache(&self, command: CacheCommand) -> T::Pending {
        self.dispatch(self.requests.build_cache(command))
    }

    pub fn cache_status(&self) -> T::Pending {
        self.dispatch(self.requests.build_cache_status())
    }

    pub fn cache_update_gene(&self, hugo_symbol: &str) -> T::Pending {
        self.dispatch(self.requests.build_cache_update_gene(hugo_symbol))
    }

    pub fn main_types(&self) -> T::Pending {
        self.dispatch(self.requests.build_main_types())
    }

    /// `None` without touching the transport when `main_type` is `.` or `..`.
    pub fn tumor_types_by_main_type(&self, main_type: &str) -> Option<T::Pending> {
        match self.requests.build_tumor_types_by_main_type(main_type) {
            Some(request) => Some(self.dispatch(request)),
            None => {
                debug!(main_type, "main type lookup skipped");
                None
            }
        }
    }

    /// `None` without touching the transport when `kind` or `query` is
    /// missing or a dot segment.
    pub fn tumor_type(&self, kind: Option<&str>, query: Option<&str>, exact_match: Option<bool>) -> Option<T::Pending> {
        match self.requests.build_tumor_type(kind, query, exact_match) {
            Some(request) => Some(self.dispatch(request)),
            None => {
                debug!(?kind, ?query, "tumor type lookup skipped");
                None
            }
        }
    }

    pub fn tumor_types_by_main_types<S: AsRef<str>>(&self, main_types: &[S]) -> Result<T::Pending, RequestError> {
        let request = self.requests.build_tumor_types_by_main_types(main_types)?;
        Ok(self.dispatch(request))
    }

    pub fn isoform_overrides(&self) -> T::Pending {
        self.dispatch(self.requests.build_isoform_overrides())
    }
}
