use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use jointravel_shared::reaction::{ErrorBody, ReactionStatus, ReactionType, ToggleRequest};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::{ReactionStore, Session, StoreError, SubjectId};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`ReactionStore`] backed by the JoinTravel HTTP API.
///
/// Build it once at startup and share it; the inner reqwest client pools
/// connections.
#[derive(Clone)]
pub struct HttpReactionStore {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl HttpReactionStore {
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Other(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            session,
        })
    }

    fn reactions_url(&self, subject: &SubjectId) -> String {
        format!(
            "{}/reviews/{}/reactions",
            self.base_url,
            urlencoding::encode(subject.as_str())
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<ReactionStatus, StoreError> {
        let response = self.authorize(request).send().await.map_err(transport_error)?;

        if response.status().is_success() {
            return response.json().await.map_err(|e| {
                StoreError::Decode(format!("failed to parse reaction status: {e}"))
            });
        }

        Err(rejection(response).await)
    }
}

#[async_trait]
impl ReactionStore for HttpReactionStore {
    async fn status(&self, subject: &SubjectId) -> Result<ReactionStatus, StoreError> {
        self.send(self.client.get(self.reactions_url(subject))).await
    }

    async fn toggle(
        &self,
        subject: &SubjectId,
        requested: ReactionType,
    ) -> Result<ReactionStatus, StoreError> {
        let body = ToggleRequest {
            reaction_type: requested,
        };

        self.send(self.client.post(self.reactions_url(subject)).json(&body))
            .await
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() || err.is_connect() || err.is_request() {
        StoreError::Unreachable(err.to_string())
    } else if err.is_decode() || err.is_body() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Other(err.to_string())
    }
}

async fn rejection(response: Response) -> StoreError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return StoreError::Unauthorized;
    }

    // Error payloads are best effort: a proxy page or empty body leaves no message.
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);

    tracing::debug!(status = status.as_u16(), ?message, "reaction store rejected request");

    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}
