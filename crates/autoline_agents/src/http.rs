//! HTTP clients for the external agent services.
//!
//! Each client POSTs a small JSON body to its configured endpoint. The
//! supervisor replies with a complete JSON document; the robot, ticketing,
//! and knowledge-base services reply with a chunked text body that is
//! surfaced as a [`TextStream`].

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AgentEndpoints;
use crate::error::{AgentError, AgentResult};
use crate::traits::{DecisionAgent, KnowledgeBase, StreamingAgent, TextStream};

/// Retry attempts for the non-streaming supervisor call.
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageBody<'a> {
    message: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptBody<'a> {
    prompt: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KbBody<'a> {
    query: &'a str,
    context: &'a str,
    priority: u8,
}

/// Shared plumbing for one agent endpoint.
#[derive(Clone)]
struct ServiceClient {
    name: &'static str,
    url: String,
    client: reqwest::Client,
}

impl ServiceClient {
    fn new(name: &'static str, url: String, timeout: Duration) -> AgentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::request(name, e.to_string()))?;
        Ok(Self { name, url, client })
    }

    async fn post<B: Serialize>(&self, body: &B) -> AgentResult<reqwest::Response> {
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AgentError::request(self.name, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Http {
                agent: self.name.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Convert a chunked response body into a text stream.
    ///
    /// Chunks are decoded lossily; a malformed byte at a chunk boundary
    /// degrades to a replacement character instead of killing the stream.
    fn into_text_stream(&self, response: reqwest::Response) -> TextStream {
        let name = self.name;
        response
            .bytes_stream()
            .map(move |chunk| match chunk {
                Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => Err(AgentError::stream(name, e.to_string())),
            })
            .boxed()
    }
}

/// Client for the supervisor decision agent.
pub struct SupervisorClient {
    inner: ServiceClient,
}

impl SupervisorClient {
    pub fn new(endpoints: &AgentEndpoints) -> AgentResult<Self> {
        Ok(Self {
            inner: ServiceClient::new(
                "supervisor",
                endpoints.supervisor_url.clone(),
                endpoints.timeout(),
            )?,
        })
    }
}

#[async_trait]
impl DecisionAgent for SupervisorClient {
    async fn decide(&self, message: &str, session_id: &str) -> AgentResult<String> {
        let body = MessageBody {
            message,
            session_id,
        };

        // Transient failures (network, 5xx, 429) are retried with backoff.
        let mut last_error = None;
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << attempt);
                warn!(attempt, "Retrying supervisor request");
                tokio::time::sleep(delay).await;
            }

            match self.inner.post(&body).await {
                Ok(response) => {
                    let raw = response
                        .text()
                        .await
                        .map_err(|e| AgentError::request("supervisor", e.to_string()))?;
                    debug!(bytes = raw.len(), "Supervisor decision received");
                    return Ok(raw);
                }
                Err(e @ AgentError::Request { .. }) => last_error = Some(e),
                Err(AgentError::Http {
                    agent,
                    status,
                    body,
                }) if status >= 500 || status == 429 => {
                    last_error = Some(AgentError::Http {
                        agent,
                        status,
                        body,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| AgentError::request("supervisor", "max retries exceeded")))
    }
}

/// Client for the robot task-execution agent.
pub struct RobotClient {
    inner: ServiceClient,
}

impl RobotClient {
    pub fn new(endpoints: &AgentEndpoints) -> AgentResult<Self> {
        Ok(Self {
            inner: ServiceClient::new("robot", endpoints.robot_url.clone(), endpoints.timeout())?,
        })
    }
}

#[async_trait]
impl StreamingAgent for RobotClient {
    async fn stream(&self, prompt: &str, session_id: &str) -> AgentResult<TextStream> {
        let response = self
            .inner
            .post(&PromptBody { prompt, session_id })
            .await?;
        Ok(self.inner.into_text_stream(response))
    }
}

/// Client for the ticketing agent.
pub struct TicketingClient {
    inner: ServiceClient,
}

impl TicketingClient {
    pub fn new(endpoints: &AgentEndpoints) -> AgentResult<Self> {
        Ok(Self {
            inner: ServiceClient::new(
                "ticketing",
                endpoints.ticketing_url.clone(),
                endpoints.timeout(),
            )?,
        })
    }
}

#[async_trait]
impl StreamingAgent for TicketingClient {
    async fn stream(&self, prompt: &str, session_id: &str) -> AgentResult<TextStream> {
        let response = self
            .inner
            .post(&PromptBody { prompt, session_id })
            .await?;
        Ok(self.inner.into_text_stream(response))
    }
}

/// Client for the knowledge-base query service.
pub struct KnowledgeBaseClient {
    inner: ServiceClient,
}

impl KnowledgeBaseClient {
    pub fn new(endpoints: &AgentEndpoints) -> AgentResult<Self> {
        Ok(Self {
            inner: ServiceClient::new("knowledge base", endpoints.kb_url.clone(), endpoints.timeout())?,
        })
    }
}

#[async_trait]
impl KnowledgeBase for KnowledgeBaseClient {
    async fn query(
        &self,
        question: &str,
        contextual_query: &str,
        priority: u8,
    ) -> AgentResult<TextStream> {
        let response = self
            .inner
            .post(&KbBody {
                query: question,
                context: contextual_query,
                priority,
            })
            .await?;
        Ok(self.inner.into_text_stream(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> AgentEndpoints {
        AgentEndpoints {
            supervisor_url: "https://agents.example.com/supervisor".to_string(),
            robot_url: "https://agents.example.com/robot".to_string(),
            ticketing_url: "https://agents.example.com/ticketing".to_string(),
            kb_url: "https://agents.example.com/kb".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_clients_build_from_endpoints() {
        let endpoints = endpoints();
        assert!(SupervisorClient::new(&endpoints).is_ok());
        assert!(RobotClient::new(&endpoints).is_ok());
        assert!(TicketingClient::new(&endpoints).is_ok());
        assert!(KnowledgeBaseClient::new(&endpoints).is_ok());
    }

    #[test]
    fn test_request_bodies_use_camel_case() {
        let body = PromptBody {
            prompt: "hello",
            session_id: "abc",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sessionId"], "abc");

        let kb = KbBody {
            query: "q",
            context: "c",
            priority: 7,
        };
        let json = serde_json::to_value(&kb).unwrap();
        assert_eq!(json["priority"], 7);
    }
}
