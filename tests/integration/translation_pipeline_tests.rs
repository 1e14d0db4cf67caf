/*!
 * End-to-end tests of multi-chunk translation
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use td_translate::Language;
use td_translate::providers::mock::{MockProvider, MockRequest};
use td_translate::translation::{TranslationOptions, TranslationOrigin};

use crate::common;

#[tokio::test]
async fn test_thousand_char_text_shouldTranslateInThreeCallsJoinedByNewline() {
    let provider = Arc::new(MockProvider::working());
    let (service, _clock) = common::test_service(provider.clone());
    let text = common::sentence_paragraph(10, 100);

    let translation = service.translate(&text, Language::Ar, None).await.unwrap();

    assert_eq!(provider.call_count(), 3);
    assert_eq!(translation.origin, TranslationOrigin::Provider);

    let lines: Vec<&str> = translation.text.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.starts_with("[ar] ")));
}

#[tokio::test]
async fn test_chunks_shouldBeSentAndRejoinedInOrder() {
    let provider = Arc::new(MockProvider::working());
    let (service, _clock) = common::test_service(provider.clone());
    let paragraphs: Vec<String> = (0..8)
        .map(|i| format!("Section {} {}", i, "w".repeat(150)))
        .collect();
    let text = paragraphs.join("\n");

    let result = service.translate_text(&text, Language::Ar, Some(Language::En)).await;

    let requests = provider.requests();
    assert!(requests.len() > 1);
    let sent: Vec<String> = requests.iter().map(|r| r.text.clone()).collect();
    assert_eq!(
        common::non_whitespace(&sent.concat()),
        common::non_whitespace(&text)
    );

    let positions: Vec<usize> = (0..8)
        .map(|i| result.find(&format!("Section {} ", i)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn test_multi_chunk_translation_shouldPauseBetweenChunks() {
    let provider = Arc::new(MockProvider::working());
    let options = TranslationOptions {
        chunk_delay: Duration::from_millis(30),
        ..TranslationOptions::default()
    };
    let (service, _clock) = common::test_service_with_options(provider.clone(), options);
    let text = common::sentence_paragraph(10, 100);

    let start = Instant::now();
    service.translate_text(&text, Language::Ar, None).await;

    // Three chunks means two pauses
    assert_eq!(provider.call_count(), 3);
    assert!(start.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn test_arabic_text_withSentenceMarks_shouldTranslateToEnglish() {
    let provider = Arc::new(MockProvider::working());
    let (service, _clock) = common::test_service(provider.clone());
    let text = "نقدم خدمات الشحن البري والبحري؟ ".repeat(30);

    let result = service.translate_text(text.trim(), Language::En, None).await;

    assert!(provider.call_count() > 1);
    assert!(provider.requests().iter().all(|r| r.source_language == Language::Ar));
    assert!(result.lines().all(|line| line.starts_with("[en] ")));
}

#[tokio::test]
async fn test_repeated_long_text_shouldHitCacheForWholeText() {
    let provider = Arc::new(MockProvider::working());
    let (service, _clock) = common::test_service(provider.clone());
    let text = common::sentence_paragraph(10, 100);

    let first = service.translate_text(&text, Language::Ar, None).await;
    let second = service.translate(&text, Language::Ar, None).await.unwrap();

    assert_eq!(first, second.text);
    assert_eq!(second.origin, TranslationOrigin::Cache);
    assert_eq!(provider.call_count(), 3);
}

fn skip_second_chunk(request: &MockRequest) -> String {
    // The second chunk of `sentence_paragraph(10, 100)` starts with 'e'
    if request.text.starts_with('e') {
        request.text.clone()
    } else {
        MockProvider::default_translation(request)
    }
}

#[tokio::test]
async fn test_soft_failed_chunk_shouldLeaveOnlyThatChunkUntranslated() {
    let provider = Arc::new(MockProvider::working().with_custom_response(skip_second_chunk));
    let (service, _clock) = common::test_service(provider.clone());
    let text = common::sentence_paragraph(10, 100);

    let result = service.translate_text(&text, Language::Ar, None).await;

    let lines: Vec<&str> = result.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("[ar] a"));
    assert!(lines[1].starts_with('e'));
    assert!(lines[2].starts_with("[ar] i"));
}
