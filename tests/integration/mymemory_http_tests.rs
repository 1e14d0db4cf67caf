/*!
 * Tests for the MyMemory client against a local HTTP server
 */

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

use td_translate::Language;
use td_translate::errors::{ProviderError, TranslationError};
use td_translate::providers::Provider;
use td_translate::providers::mymemory::MyMemory;
use td_translate::translation::{Fallback, TranslationOrigin, TranslationService};

use crate::common;

/// Serve one canned response, handing back the request head that was received
async fn serve_once(status_line: &'static str, body: &str) -> (Url, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let body = body.to_string();
    let (head_tx, head_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buffer = [0u8; 1024];
        while !head.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            head.extend_from_slice(&buffer[..read]);
        }
        let _ = head_tx.send(String::from_utf8_lossy(&head).into_owned());

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    let url = Url::parse(&format!("http://{}/get", address)).unwrap();
    (url, head_rx)
}

fn client(url: Url) -> MyMemory {
    MyMemory::new(url, Duration::from_secs(5))
}

#[tokio::test]
async fn test_translate_chunk_withSuccessBody_shouldReturnTranslation() {
    let (url, head) = serve_once(
        "200 OK",
        r#"{"responseData":{"translatedText":"مرحبا"},"responseStatus":200,"responseDetails":""}"#,
    )
    .await;

    let result = client(url).translate_chunk("Hello", Language::En, Language::Ar).await;

    assert_eq!(result.unwrap(), "مرحبا");
    let head = head.await.unwrap();
    assert!(head.starts_with("GET /get?q=Hello&langpair=en%7Car "));
}

#[tokio::test]
async fn test_translate_chunk_withServerError_shouldReturnApiError() {
    let (url, _head) = serve_once("500 Internal Server Error", "boom").await;

    let result = client(url).translate_chunk("Hello", Language::En, Language::Ar).await;

    match result {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_translate_chunk_withNonJsonBody_shouldReturnParseError() {
    let (url, _head) = serve_once("200 OK", "<html>maintenance</html>").await;

    let result = client(url).translate_chunk("Hello", Language::En, Language::Ar).await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_translate_chunk_withFailureStatusInBody_shouldReturnOriginalChunk() {
    let (url, _head) = serve_once(
        "200 OK",
        r#"{"responseData":{"translatedText":"QUOTA EXCEEDED"},"responseStatus":403,"responseDetails":"QUOTA EXCEEDED"}"#,
    )
    .await;

    let result = client(url).translate_chunk("Hello", Language::En, Language::Ar).await;

    assert_eq!(result.unwrap(), "Hello");
}

#[tokio::test]
async fn test_test_connection_withFailureStatusInBody_shouldFail() {
    let (url, _head) = serve_once(
        "200 OK",
        r#"{"responseData":{"translatedText":""},"responseStatus":403,"responseDetails":"QUOTA EXCEEDED"}"#,
    )
    .await;

    let result = client(url).test_connection().await;

    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 403, .. })));
}

#[tokio::test]
async fn test_service_overServerError_shouldFallBackToOriginal() {
    let (url, _head) = serve_once("500 Internal Server Error", "boom").await;
    let service = TranslationService::new(Arc::new(client(url)), common::fast_options());

    let result = service.translate("Hello", Language::Ar, None).await;

    match result {
        Err(Fallback { original, error }) => {
            assert_eq!(original, "Hello");
            assert!(matches!(
                error,
                TranslationError::Provider(ProviderError::ApiError { status_code: 500, .. })
            ));
        }
        Ok(translation) => panic!("expected a fallback, got {:?}", translation),
    }
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_service_overSuccessBody_shouldTranslateAndCache() {
    let (url, _head) = serve_once(
        "200 OK",
        r#"{"responseData":{"translatedText":"مرحبا"},"responseStatus":"200"}"#,
    )
    .await;
    let service = TranslationService::new(Arc::new(client(url)), common::fast_options());

    let translation = service.translate("Hello", Language::Ar, None).await.unwrap();

    assert_eq!(translation.text, "مرحبا");
    assert_eq!(translation.origin, TranslationOrigin::Provider);

    // The one-shot server is gone, so this must come from the cache
    let again = service.translate("Hello", Language::Ar, None).await.unwrap();
    assert_eq!(again.origin, TranslationOrigin::Cache);
}
