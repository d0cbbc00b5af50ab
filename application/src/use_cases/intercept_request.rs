//! Outbound request interception.
//!
//! [`OutboundInterceptor`] sits in front of the host's [`ChatTransport`]. For
//! each outgoing body it decides, through the shared workflow, whether the
//! terminal user turn is replaced:
//!
//! ```text
//! Idle             → user turn becomes the decision prompt
//! AwaitingDecision → body passes through
//! AwaitingResults  → search runs, user turn becomes the synthesis
//!                    (or fallback) prompt
//! ```
//!
//! Anything that is not a qualifying chat request passes through byte for
//! byte.

use crate::ports::chat_transport::{ChatTransport, StreamHandle, TransportError};
use crate::use_cases::web_search::WebSearchUseCase;
use crate::workflow::SearchWorkflow;
use async_trait::async_trait;
use relay_domain::prompt::PromptTemplate;
use relay_domain::request::ChatRequestBody;
use relay_domain::util::log_preview;
use relay_domain::workflow::{Effect, OutboundTurn, PendingSearch, WorkflowEvent};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request-rewriting wrapper around the host's transport.
pub struct OutboundInterceptor {
    inner: Arc<dyn ChatTransport>,
    workflow: Arc<SearchWorkflow>,
    search: WebSearchUseCase,
}

impl OutboundInterceptor {
    pub fn new(
        inner: Arc<dyn ChatTransport>,
        workflow: Arc<SearchWorkflow>,
        search: WebSearchUseCase,
    ) -> Self {
        Self {
            inner,
            workflow,
            search,
        }
    }

    /// Return the body that should actually be sent.
    pub async fn rewrite(&self, body: String) -> String {
        let Some(mut request) = ChatRequestBody::parse(&body) else {
            debug!("Outbound body is not a qualifying chat request, passing through");
            return body;
        };

        let turn = OutboundTurn::from_body(&request);
        let effects = match self
            .workflow
            .dispatch(WorkflowEvent::OutboundRequest(turn))
        {
            Ok(effects) => effects,
            Err(rejected) => {
                warn!("Outbound request rejected by workflow: {}", rejected);
                return body;
            }
        };

        let mut rewritten = false;
        for effect in effects {
            match effect {
                Effect::RewriteLastTurn(content) => {
                    info!("Replacing user turn with decision prompt");
                    request.set_last_content(content);
                    rewritten = true;
                }
                Effect::RunSearch(pending) => {
                    let content = self.fold_search(&pending).await;
                    request.set_last_content(content);
                    rewritten = true;
                    if let Err(rejected) = self.workflow.dispatch(WorkflowEvent::SearchSettled {
                        round_trip: pending.round_trip,
                    }) {
                        debug!("Search settled after the workflow moved on: {}", rejected);
                    }
                }
                other => warn!("Unexpected effect at interception: {:?}", other),
            }
        }

        if rewritten { request.to_body() } else { body }
    }

    async fn fold_search(&self, pending: &PendingSearch) -> String {
        match self.search.execute(&pending.keywords).await {
            Some(results) => {
                info!(
                    "Folding search results for: {}",
                    log_preview(&pending.keywords, 80)
                );
                PromptTemplate::synthesis(
                    pending.prior_history.as_deref(),
                    &pending.original_query,
                    &pending.keywords,
                    &results,
                )
            }
            None => {
                info!("No search results, sending fallback prompt");
                PromptTemplate::fallback(&pending.original_query, &pending.keywords)
            }
        }
    }
}

#[async_trait]
impl ChatTransport for OutboundInterceptor {
    async fn send(&self, body: String) -> Result<StreamHandle, TransportError> {
        let body = self.rewrite(body).await;
        self.inner.send(body).await
    }
}
