//! DeepL REST API client.

use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    Formality,
    Language,
    ProviderError,
    TranslateOptions,
    Translator,
};

/// Host for free-tier keys.
const FREE_API_BASE: &str = "https://api-free.deepl.com";
/// Host for paid keys.
const PRO_API_BASE: &str = "https://api.deepl.com";

/// DeepL REST client implementing [`Translator`].
#[derive(Debug, Clone)]
pub struct DeepLClient {
    /// Shared HTTP client.
    http: Client,
    /// API host, selected from the key tier.
    api_base: String,
    /// Service credential.
    api_key: String,
}

impl DeepLClient {
    /// Create a client for an API key.
    ///
    /// Free-tier keys carry the `:fx` suffix and route to the free host.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let api_base = if api_key.ends_with(":fx") { FREE_API_BASE } else { PRO_API_BASE };
        Self { http: Client::new(), api_base: api_base.to_string(), api_key }
    }

    /// Override the API host (self-hosted proxies, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// `Authorization` header value.
    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }

    /// Fetch one of the supported-language catalogs.
    async fn languages(&self, kind: &str) -> Result<Vec<Language>, ProviderError> {
        let response = self
            .http
            .get(format!("{}/v2/languages", self.api_base))
            .header("Authorization", self.auth_header())
            .query(&[("type", kind)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Request body for `/v2/translate`.
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Texts to translate; always a single element here.
    text: [&'a str; 1],
    /// Resolved source language code.
    source_lang: &'a str,
    /// Resolved target language code.
    target_lang: &'a str,
    /// Register request; omitted for the default register.
    #[serde(skip_serializing_if = "Option::is_none")]
    formality: Option<&'a str>,
    /// Always "xml" so the placeholder guard tags are honored.
    tag_handling: &'a str,
    /// Tags whose content must not be translated.
    ignore_tags: [&'a str; 1],
    /// Free-text disambiguation context.
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
}

/// Response body for `/v2/translate`.
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// One entry per submitted text.
    translations: Vec<TranslatedText>,
}

/// A single translated text.
#[derive(Debug, Deserialize)]
struct TranslatedText {
    /// Translated text.
    text: String,
}

impl Translator for DeepLClient {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        options: &TranslateOptions,
    ) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            text: [text],
            source_lang,
            target_lang,
            formality: options.formality.map(|formality| match formality {
                Formality::Less => "less",
            }),
            tag_handling: "xml",
            ignore_tags: ["x"],
            context: options.context.as_deref(),
        };

        let response: TranslateResponse = self
            .http
            .post(format!("{}/v2/translate", self.api_base))
            .header("Authorization", self.auth_header())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .translations
            .into_iter()
            .next()
            .map(|translation| translation.text)
            .ok_or_else(|| ProviderError::UnexpectedResponse("empty translations array".to_string()))
    }

    async fn source_languages(&self) -> Result<Vec<Language>, ProviderError> {
        self.languages("source").await
    }

    async fn target_languages(&self) -> Result<Vec<Language>, ProviderError> {
        self.languages("target").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn free_tier_keys_route_to_free_host() {
        let free = DeepLClient::new("0123:fx");
        let pro = DeepLClient::new("0123");

        expect_that!(free.api_base, eq(FREE_API_BASE));
        expect_that!(pro.api_base, eq(PRO_API_BASE));
    }

    #[googletest::test]
    fn translate_request_omits_absent_options() {
        let request = TranslateRequest {
            text: ["Hello <x>{$name}</x>"],
            source_lang: "EN",
            target_lang: "DE",
            formality: None,
            tag_handling: "xml",
            ignore_tags: ["x"],
            context: None,
        };

        let json = serde_json::to_value(&request).unwrap();

        expect_that!(json.get("formality"), none());
        expect_that!(json.get("context"), none());
        expect_that!(
            json.get("tag_handling").and_then(serde_json::Value::as_str),
            some(eq("xml"))
        );
    }

    #[googletest::test]
    fn translate_request_serializes_informal_register() {
        let request = TranslateRequest {
            text: ["Hello"],
            source_lang: "EN",
            target_lang: "DE",
            formality: Some("less"),
            tag_handling: "xml",
            ignore_tags: ["x"],
            context: Some("greet"),
        };

        let json = serde_json::to_value(&request).unwrap();

        expect_that!(
            json.get("formality").and_then(serde_json::Value::as_str),
            some(eq("less"))
        );
        expect_that!(
            json.get("context").and_then(serde_json::Value::as_str),
            some(eq("greet"))
        );
    }
}
