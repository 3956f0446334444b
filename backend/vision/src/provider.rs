//! Vision providers — send a bag photo to a hosted vision LLM.

use base64::{engine::general_purpose::STANDARD, Engine};
use beanscan_core::BeanScanError;
use tracing::info;

/// Supported vision providers.
pub enum VisionProvider {
    OpenAI { api_key: String, model: String },
    Gemini { api_key: String },
}

impl VisionProvider {
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::OpenAI { api_key: api_key.into(), model: model.into() }
    }

    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::Gemini { api_key: api_key.into() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI { .. } => "openai",
            Self::Gemini { .. } => "gemini",
        }
    }
}

/// Send an image to the provider and return the model's raw reply text.
///
/// Uses the caller's shared client so the process-wide request timeout
/// applies here too.
pub async fn describe_image(
    provider: &VisionProvider,
    client: &reqwest::Client,
    image_bytes: &[u8],
    mime_type: &str,
    prompt: &str,
) -> Result<String, BeanScanError> {
    let b64 = STANDARD.encode(image_bytes);
    match provider {
        VisionProvider::OpenAI { api_key, model } => {
            describe_via_openai(client, api_key, model, &b64, mime_type, prompt).await
        }
        VisionProvider::Gemini { api_key } => {
            describe_via_gemini(client, api_key, &b64, mime_type, prompt).await
        }
    }
}

async fn describe_via_openai(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    b64: &str,
    mime_type: &str,
    prompt: &str,
) -> Result<String, BeanScanError> {
    info!(model, "describing bag photo via OpenAI");
    let body = serde_json::json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompt },
                { "type": "image_url",
                  "image_url": { "url": format!("data:{};base64,{}", mime_type, b64) } }
            ]
        }],
        "max_tokens": 512
    });
    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| BeanScanError::VisionError {
            provider: "openai".into(),
            message: e.to_string(),
        })?;
    if !resp.status().is_success() {
        return Err(BeanScanError::VisionError {
            provider: "openai".into(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    let json: serde_json::Value =
        resp.json().await.map_err(|e| BeanScanError::VisionError {
            provider: "openai".into(),
            message: e.to_string(),
        })?;
    Ok(json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string())
}

async fn describe_via_gemini(
    client: &reqwest::Client,
    api_key: &str,
    b64: &str,
    mime_type: &str,
    prompt: &str,
) -> Result<String, BeanScanError> {
    info!("describing bag photo via Gemini");
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key={}",
        api_key
    );
    let body = serde_json::json!({
        "contents": [{ "parts": [
            { "text": prompt },
            { "inlineData": { "mimeType": mime_type, "data": b64 } }
        ]}]
    });
    let resp = client.post(&url).json(&body).send().await.map_err(|e| {
        BeanScanError::VisionError { provider: "gemini".into(), message: e.to_string() }
    })?;
    if !resp.status().is_success() {
        return Err(BeanScanError::VisionError {
            provider: "gemini".into(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    let json: serde_json::Value =
        resp.json().await.map_err(|e| BeanScanError::VisionError {
            provider: "gemini".into(),
            message: e.to_string(),
        })?;
    Ok(json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("")
        .to_string())
}
