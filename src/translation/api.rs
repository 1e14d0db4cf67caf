/*!
 * JSON contract of the translate endpoint.
 *
 * Pages post `{text, targetLang, sourceLang}` and read back
 * `{translatedText}`. The handler never fails; an aborted translation
 * answers with the original text.
 */

use serde::{Deserialize, Serialize};

use crate::language_utils::Language;

use super::core::{TranslationRequest, TranslationService};

/// Body of a translate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,

    /// Language to translate into
    pub target_lang: Language,

    /// Language of the text; detected when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<Language>,
}

/// Answer of a translate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    /// Translated text, or the original when translation was not possible
    pub translated_text: String,
}

impl From<TranslateRequest> for TranslationRequest {
    fn from(request: TranslateRequest) -> Self {
        Self {
            text: request.text,
            source_language: request.source_lang,
            target_language: request.target_lang,
        }
    }
}

/// Answer one translate call
pub async fn handle_translate_request(
    service: &TranslationService,
    request: TranslateRequest,
) -> TranslateResponse {
    let request = TranslationRequest::from(request);
    let translated_text = match service.translate_request(&request).await {
        Ok(translation) => translation.text,
        Err(fallback) => fallback.into_original(),
    };

    TranslateResponse { translated_text }
}
