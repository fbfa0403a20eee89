//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the plugin
//! thread and the background worker that loads the application index and
//! answers asynchronous searches. Requests carry the caller's trace context so
//! worker spans join the plugin-side trace.

use crate::app::query::SearchToken;
use crate::domain::AppEntry;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry ids of the current span.
    ///
    /// Returns `None` when the span context is invalid, for example when no
    /// OpenTelemetry layer is installed.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_applications(LoadApplications { dirs: Vec<String> }),
    search_applications(SearchApplications { query: String, token: SearchToken }),
}

/// Messages sent from the plugin thread to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Scan `dirs` and build the application index.
    LoadApplications {
        /// Applications directories, `~` allowed.
        dirs: Vec<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Filter the loaded index by `query`; the answer echoes `token`.
    SearchApplications {
        query: String,
        token: SearchToken,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadApplications { trace_context, .. }
            | Self::SearchApplications { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The index was loaded; the worker now answers searches against it.
    ApplicationsLoaded { apps: Vec<AppEntry> },

    /// No application source could be read.
    IndexLoadFailed { message: String },

    /// Results for the search tagged `token`, in index order.
    SearchResults { token: SearchToken, results: Vec<AppEntry> },

    /// The search tagged `token` could not be answered.
    SearchFailed { token: SearchToken, message: String },
}
