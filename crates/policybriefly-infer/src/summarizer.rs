//! Remote-first summarization with a local extractive fallback.

use policybriefly_analyze::summary::{fallback_summary, Summary, SummarySource, SummaryTier};
use tracing::{info, warn};

use crate::config::{InferenceSettings, SUMMARY_INSTRUCTION};
use crate::error::InferenceError;
use crate::providers::InferenceClient;

/// Produces a [`Summary`] for any input; never fails.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: InferenceClient,
}

impl Summarizer {
    pub fn new(settings: InferenceSettings) -> policybriefly_core::Result<Self> {
        Ok(Self {
            client: InferenceClient::new(settings)?,
        })
    }

    pub fn settings(&self) -> &InferenceSettings {
        self.client.settings()
    }

    /// Summarize `text`, trying the remote model first.
    ///
    /// `run_token` overrides the configured credential for this call only.
    /// Any remote failure is logged and recorded as the fallback reason.
    pub async fn summarize(&self, text: &str, tier: SummaryTier, run_token: Option<&str>) -> Summary {
        match self.remote_summary(text, tier, run_token).await {
            Ok(remote) => {
                let settings = self.settings();
                info!("Remote summary from {} model {}", settings.provider, settings.model);
                Summary {
                    text: remote,
                    tier,
                    source: SummarySource::Remote {
                        provider: settings.provider.to_string(),
                        model: settings.model.clone(),
                    },
                    fallback_reason: None,
                }
            }
            Err(reason) => {
                match reason {
                    InferenceError::NotConfigured | InferenceError::EmptyInput => {
                        info!("Using rule-based summary: {}", reason)
                    }
                    _ => warn!("AI summary failed ({}), using rule-based summary", reason),
                }
                Summary {
                    text: fallback_summary(text, tier),
                    tier,
                    source: SummarySource::Fallback,
                    fallback_reason: Some(reason.to_string()),
                }
            }
        }
    }

    /// The remote path alone, with its failure reason intact.
    pub async fn remote_summary(
        &self,
        text: &str,
        tier: SummaryTier,
        run_token: Option<&str>,
    ) -> Result<String, InferenceError> {
        let token = self
            .settings()
            .resolve_token(run_token)
            .ok_or(InferenceError::NotConfigured)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(InferenceError::EmptyInput);
        }

        let snippet: String = text.chars().take(self.settings().max_input_chars).collect();
        self.client
            .generate(SUMMARY_INSTRUCTION, &snippet, tier.max_new_tokens(), token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use policybriefly_core::{BrieflyConfig, ProviderKind};
    use serde_json::{json, Value};

    const DOC: &str = "The deadline is January 15, 2025. ACME Corporation must comply with \
                       the new reporting requirement. Penalties apply after the deadline.";

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn settings(provider: ProviderKind, url: String, token: Option<&str>) -> InferenceSettings {
        let mut s = InferenceSettings::from_config(&BrieflyConfig::default());
        s.provider = provider;
        s.url = url;
        s.model = "stub".into();
        s.default_token = token.map(str::to_string);
        s.timeout = Duration::from_millis(500);
        s
    }

    fn hf_router() -> Router {
        Router::new().route(
            "/models/stub",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("");
                if auth != "Bearer good-token" {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad token"})));
                }
                assert_eq!(body["parameters"]["max_new_tokens"], 100);
                (
                    StatusCode::OK,
                    Json(json!([{"summary_text": "ACME must report by January 15, 2025."}])),
                )
            }),
        )
    }

    #[tokio::test]
    async fn test_remote_success() {
        let base = serve(hf_router()).await;
        let s = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            format!("{}/models", base),
            Some("good-token"),
        ))
        .unwrap();

        let summary = s.summarize(DOC, SummaryTier::Short, None).await;
        assert_eq!(summary.text, "ACME must report by January 15, 2025.");
        assert_eq!(
            summary.source,
            SummarySource::Remote {
                provider: "huggingface".into(),
                model: "stub".into()
            }
        );
        assert!(summary.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn test_bad_credential_falls_back() {
        let base = serve(hf_router()).await;
        let s = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            format!("{}/models", base),
            Some("good-token"),
        ))
        .unwrap();

        assert_eq!(
            s.remote_summary(DOC, SummaryTier::Short, Some("wrong")).await,
            Err(InferenceError::Unauthorized(401))
        );
        let summary = s.summarize(DOC, SummaryTier::Short, Some("wrong")).await;
        assert!(summary.is_fallback());
        assert!(summary.text.starts_with("The deadline is January 15, 2025."));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        // Nothing listens on the discard port.
        let s = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            "http://127.0.0.1:9/models".into(),
            Some("token"),
        ))
        .unwrap();

        let summary = s.summarize(DOC, SummaryTier::Medium, None).await;
        assert!(summary.is_fallback());
        assert!(!summary.text.is_empty());
        assert!(summary.fallback_reason.unwrap().starts_with("request failed"));
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let router = Router::new().route(
            "/models/stub",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!([{"generated_text": "too late"}]))
            }),
        );
        let base = serve(router).await;
        let s = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            format!("{}/models", base),
            Some("token"),
        ))
        .unwrap();

        assert!(matches!(
            s.remote_summary(DOC, SummaryTier::Short, None).await,
            Err(InferenceError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_plain_text_body_and_server_errors() {
        let router = Router::new()
            .route("/models/stub", post(|| async { "<html>oops</html>" }))
            .route(
                "/v1/chat/completions",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let base = serve(router).await;

        let hf = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            format!("{}/models", base),
            Some("token"),
        ))
        .unwrap();
        // A bare text/plain body is accepted as the summary itself.
        assert_eq!(
            hf.remote_summary(DOC, SummaryTier::Short, None).await.unwrap(),
            "<html>oops</html>"
        );

        let openai = Summarizer::new(settings(
            ProviderKind::OpenAI,
            format!("{}/v1/chat/completions", base),
            Some("token"),
        ))
        .unwrap();
        assert_eq!(
            openai.remote_summary(DOC, SummaryTier::Short, None).await,
            Err(InferenceError::Status {
                status: 500,
                body: "boom".into()
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        let router = Router::new()
            .route("/models/stub", post(|| async { Json(json!({"foo": 1})) }))
            .route(
                "/v1/chat/completions",
                post(|| async {
                    (
                        [(axum::http::header::CONTENT_TYPE, "application/json")],
                        "not json",
                    )
                }),
            );
        let base = serve(router).await;

        let hf = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            format!("{}/models", base),
            Some("token"),
        ))
        .unwrap();
        assert!(matches!(
            hf.remote_summary(DOC, SummaryTier::Short, None).await,
            Err(InferenceError::Malformed(_))
        ));
        let summary = hf.summarize(DOC, SummaryTier::Short, None).await;
        assert!(summary.is_fallback());
        assert!(summary.fallback_reason.unwrap().starts_with("malformed response"));
        assert!(summary.text.starts_with("The deadline is January 15, 2025."));

        let openai = Summarizer::new(settings(
            ProviderKind::OpenAI,
            format!("{}/v1/chat/completions", base),
            Some("token"),
        ))
        .unwrap();
        assert!(matches!(
            openai.remote_summary(DOC, SummaryTier::Short, None).await,
            Err(InferenceError::Malformed(_))
        ));
        assert!(openai.summarize(DOC, SummaryTier::Short, None).await.is_fallback());
    }

    #[tokio::test]
    async fn test_openai_success() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "stub");
                assert_eq!(body["messages"][0]["role"], "system");
                Json(json!({"choices": [{"message": {"content": "  Firms must report.  "}}]}))
            }),
        );
        let base = serve(router).await;
        let s = Summarizer::new(settings(
            ProviderKind::OpenAI,
            format!("{}/v1/chat/completions", base),
            Some("token"),
        ))
        .unwrap();
        let summary = s.summarize(DOC, SummaryTier::Detailed, None).await;
        assert_eq!(summary.text, "Firms must report.");
        assert!(!summary.is_fallback());
    }

    #[tokio::test]
    async fn test_no_credential_skips_remote() {
        let s = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            "http://127.0.0.1:9/models".into(),
            None,
        ))
        .unwrap();
        let summary = s.summarize(DOC, SummaryTier::Short, None).await;
        assert!(summary.is_fallback());
        assert_eq!(summary.fallback_reason.as_deref(), Some("no API credential configured"));
    }

    #[tokio::test]
    async fn test_blank_text_is_never_sent() {
        let s = Summarizer::new(settings(
            ProviderKind::HuggingFace,
            "http://127.0.0.1:9/models".into(),
            Some("token"),
        ))
        .unwrap();
        assert_eq!(
            s.remote_summary("  \n ", SummaryTier::Short, None).await,
            Err(InferenceError::EmptyInput)
        );
        let summary = s.summarize("  \n ", SummaryTier::Short, None).await;
        assert!(!summary.text.is_empty());
    }
}
