use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Upper bound on a single generation call. The backend can take a while to
/// assemble a plan and images, but it must not hang the submit flow forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Wire payload for one generation request.
#[derive(Debug, Serialize, Clone)]
pub struct DesignRequest {
    pub room_type: String,
    pub dimensions: String,
    pub style: String,
    pub budget: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vibe: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DesignResult {
    pub summary: String,
    pub images: Vec<String>,
    pub posts: Vec<String>,
}

impl DesignResult {
    /// Map an untyped response body into a result. The backend has shipped
    /// several payload shapes, so any of `summary`, `images` and `posts` may
    /// be missing or wrong-typed; each falls back to its empty value.
    pub fn from_value(value: &Value) -> Self {
        Self {
            summary: value
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            images: string_list(value.get("images")),
            posts: string_list(value.get("posts")),
        }
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Seam between the submit flow and the remote design service, so the
/// workflow can be exercised against a double.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &DesignRequest) -> Result<DesignResult, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct HttpGenerator {
    pub base_url: String,
}

impl HttpGenerator {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerator {
    async fn generate(&self, request: &DesignRequest) -> Result<DesignResult, GenerationError> {
        let client = Client::new();
        let resp = client
            .post(format!("{}/design", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status,
                message: text,
            });
        }

        // An unparseable body counts as a failed call, not as an empty plan.
        let body: Value = resp.json().await?;
        Ok(DesignResult::from_value(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> DesignRequest {
        DesignRequest {
            room_type: "Bedroom".into(),
            dimensions: "10x12".into(),
            style: "Boho".into(),
            budget: "800".into(),
            vibe: "plants".into(),
        }
    }

    #[test]
    fn test_request_uses_wire_field_names() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["room_type"], "Bedroom");
        assert_eq!(value["dimensions"], "10x12");
        assert_eq!(value["style"], "Boho");
        assert_eq!(value["budget"], "800");
        assert_eq!(value["vibe"], "plants");
    }

    #[test]
    fn test_request_omits_empty_vibe() {
        let mut request = request();
        request.vibe = String::new();
        let value = serde_json::to_value(request).unwrap();
        assert!(value.get("vibe").is_none());
    }

    #[test]
    fn test_result_maps_full_payload() {
        let body = json!({"summary": "Cozy plan", "images": ["a.png", "b.png"]});
        let result = DesignResult::from_value(&body);
        assert_eq!(result.summary, "Cozy plan");
        assert_eq!(result.images, vec!["a.png", "b.png"]);
        assert!(result.posts.is_empty());
    }

    #[test]
    fn test_result_defaults_on_empty_object() {
        let result = DesignResult::from_value(&json!({}));
        assert_eq!(result, DesignResult::default());
    }

    #[test]
    fn test_result_ignores_wrong_typed_fields() {
        let body = json!({"summary": 42, "images": "nope", "posts": {"a": 1}});
        let result = DesignResult::from_value(&body);
        assert_eq!(result, DesignResult::default());
    }

    #[test]
    fn test_result_keeps_only_string_entries() {
        let body = json!({
            "images": ["a.png", 7, null, "b.png"],
            "posts": ["Reading nook ideas"]
        });
        let result = DesignResult::from_value(&body);
        assert_eq!(result.images, vec!["a.png", "b.png"]);
        assert_eq!(result.posts, vec!["Reading nook ideas"]);
    }
}
