/*!
 * Fallback chain tests over the mock transport
 */

use std::sync::Arc;
use std::time::Duration;

use nexo::errors::{ProviderError, TranslationError};
use nexo::providers::ProviderKind;
use nexo::providers::deepl::DeepL;
use nexo::providers::libretranslate::LibreTranslate;
use nexo::providers::transport::HttpResponse;
use nexo::translation::{ProviderSlot, SourceLanguage, TranslationOrchestrator, TranslationRequest};

use crate::common::mock_transport::{MockReply, MockTransport};
use crate::common::{self, DEEPL_URL, LIBRE_URL, MYMEMORY_URL};

fn failure_codes(error: &TranslationError) -> Vec<(String, &'static str)> {
    match error {
        TranslationError::AllProvidersFailed { failures } => failures
            .iter()
            .map(|f| (f.provider.clone(), f.code()))
            .collect(),
        other => panic!("expected AllProvidersFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_translate_withFirstProviderSucceeding_shouldNeverCallTheOthers() {
    let transport = Arc::new(
        MockTransport::new()
            .route(DEEPL_URL, MockReply::ok(common::deepl_ok("Hola")))
            .route(LIBRE_URL, MockReply::ok(common::libre_ok("Hola (libre)")))
            .route(MYMEMORY_URL, MockReply::ok(common::mymemory_ok("Hola (mymemory)"))),
    );
    let orchestrator = common::orchestrator_with(&common::test_config(), &transport);

    let result = orchestrator
        .translate(&TranslationRequest::new("Hello", "auto", "es"))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "deepl");
    assert_eq!(result.translated_text, "Hola");
    assert_eq!(result.detected_source_language.as_deref(), Some("en"));
    assert_eq!(transport.calls_to(DEEPL_URL), 1);
    assert_eq!(transport.calls_to(LIBRE_URL), 0);
    assert_eq!(transport.calls_to(MYMEMORY_URL), 0);
}

#[tokio::test]
async fn test_translate_withFirstProviderFailing_shouldFallThroughToSecond() {
    let failing_replies = [
        MockReply::status(500, "Internal Server Error"),
        MockReply::status(456, "Quota exceeded"),
        MockReply::ok(""),
        MockReply::ok("<html>not json</html>"),
        MockReply::ok(common::deepl_ok("   ")),
        MockReply::Fail(ProviderError::ConnectionError("refused".to_string())),
    ];

    for reply in failing_replies {
        let transport = Arc::new(
            MockTransport::new()
                .route(DEEPL_URL, reply.clone())
                .route(LIBRE_URL, MockReply::ok(common::libre_ok("Hola"))),
        );
        let orchestrator = common::orchestrator_with(&common::test_config(), &transport);

        let result = orchestrator
            .translate(&TranslationRequest::new("Hello", "en", "es"))
            .await
            .unwrap();

        assert_eq!(result.provider_used, "libretranslate", "after {:?}", reply);
        assert_eq!(result.translated_text, "Hola");
        assert_eq!(transport.calls_to(DEEPL_URL), 1);
        assert_eq!(transport.calls_to(MYMEMORY_URL), 0);
    }
}

#[tokio::test]
async fn test_translate_withAllProvidersFailing_shouldReportOneFailurePerProvider() {
    let transport = Arc::new(
        MockTransport::new()
            .route(DEEPL_URL, MockReply::status(403, "Forbidden"))
            .route(LIBRE_URL, MockReply::ok(r#"{"error":"Too many requests"}"#))
            .route(
                MYMEMORY_URL,
                MockReply::ok(r#"{"responseData":null,"responseStatus":429,"responseDetails":"QUOTA"}"#),
            ),
    );
    let orchestrator = common::orchestrator_with(&common::test_config(), &transport);

    let error = orchestrator
        .translate(&TranslationRequest::new("Hello", "en", "es"))
        .await
        .unwrap_err();

    assert_eq!(
        failure_codes(&error),
        vec![
            ("deepl".to_string(), "authentication"),
            ("libretranslate".to_string(), "embedded_error"),
            ("mymemory".to_string(), "embedded_error"),
        ]
    );
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn test_translate_withEmptyOrBlankText_shouldFailWithoutAnyCall() {
    let transport = Arc::new(MockTransport::new().route(DEEPL_URL, MockReply::ok(common::deepl_ok("x"))));
    let orchestrator = common::orchestrator_with(&common::test_config(), &transport);

    for text in ["", "   ", "\n\t"] {
        let error = orchestrator
            .translate(&TranslationRequest::new(text, "en", "es"))
            .await
            .unwrap_err();
        assert!(matches!(error, TranslationError::InvalidRequest(_)));
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_translate_withMissingTarget_shouldFailWithInvalidRequest() {
    let transport = Arc::new(MockTransport::new());
    let orchestrator = common::orchestrator_with(&common::test_config(), &transport);

    let request = TranslationRequest {
        source_text: "Hello".to_string(),
        source_language: SourceLanguage::Auto,
        target_language: String::new(),
    };
    let error = orchestrator.translate(&request).await.unwrap_err();
    assert!(matches!(error, TranslationError::InvalidRequest(_)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_translate_withAliasedCodes_shouldEchoCallerCodes() {
    let transport = Arc::new(
        MockTransport::new()
            .route(DEEPL_URL, MockReply::status(500, "down"))
            .route(LIBRE_URL, MockReply::status(500, "down"))
            .route(MYMEMORY_URL, MockReply::ok(common::mymemory_ok("Hei verden"))),
    );
    let orchestrator = common::orchestrator_with(&common::test_config(), &transport);

    let result = orchestrator
        .translate(&TranslationRequest::new("Hello world", "zh", "no"))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "mymemory");
    assert_eq!(result.source_language, SourceLanguage::Explicit("zh".to_string()));
    assert_eq!(result.target_language, "no");

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].form_value("source_lang"), Some("ZH"));
    assert_eq!(requests[0].form_value("target_lang"), Some("NB"));
    assert!(requests[2].url.contains("langpair=zh-CN%7Cnb"));
}

#[tokio::test]
async fn test_translate_withSlowProvider_shouldTimeOutAndFallThrough() {
    let transport = Arc::new(
        MockTransport::new()
            .route(
                DEEPL_URL,
                MockReply::Delayed(Duration::from_secs(5), HttpResponse::new(200, common::deepl_ok("late"))),
            )
            .route(LIBRE_URL, MockReply::ok(common::libre_ok("Hola"))),
    );
    let slots = vec![
        ProviderSlot::new(Box::new(DeepL::new("key", DEEPL_URL)), 0, Duration::from_millis(50)),
        ProviderSlot::new(Box::new(LibreTranslate::new(LIBRE_URL, "")), 1, Duration::from_secs(1)),
    ];
    let orchestrator = TranslationOrchestrator::new(slots, transport.clone());

    let result = orchestrator
        .translate(&TranslationRequest::new("Hello", "en", "es"))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "libretranslate");
    assert_eq!(transport.calls_to(DEEPL_URL), 1);
}

#[tokio::test]
async fn test_translate_withOnlySlowProvider_shouldReportTimeout() {
    let transport = Arc::new(MockTransport::new().route(
        LIBRE_URL,
        MockReply::Delayed(Duration::from_secs(5), HttpResponse::new(200, common::libre_ok("late"))),
    ));
    let slots = vec![ProviderSlot::new(
        Box::new(LibreTranslate::new(LIBRE_URL, "")),
        0,
        Duration::from_millis(20),
    )];
    let orchestrator = TranslationOrchestrator::new(slots, transport.clone());

    let error = orchestrator
        .translate(&TranslationRequest::new("Hello", "en", "es"))
        .await
        .unwrap_err();
    assert_eq!(failure_codes(&error), vec![("libretranslate".to_string(), "timeout")]);
}

#[tokio::test]
async fn test_translate_withExplicitSlots_shouldOrderByPriority() {
    let transport = Arc::new(
        MockTransport::new()
            .route(DEEPL_URL, MockReply::ok(common::deepl_ok("from deepl")))
            .route(LIBRE_URL, MockReply::ok(common::libre_ok("from libre"))),
    );
    let slots = vec![
        ProviderSlot::new(Box::new(DeepL::new("key", DEEPL_URL)), 7, Duration::from_secs(1)),
        ProviderSlot::new(Box::new(LibreTranslate::new(LIBRE_URL, "")), 3, Duration::from_secs(1)),
    ];
    let orchestrator = TranslationOrchestrator::new(slots, transport.clone());
    assert_eq!(orchestrator.provider_ids(), vec!["libretranslate", "deepl"]);

    let result = orchestrator
        .translate(&TranslationRequest::new("Hello", "en", "es"))
        .await
        .unwrap();
    assert_eq!(result.translated_text, "from libre");
    assert_eq!(transport.calls_to(DEEPL_URL), 0);
}

#[tokio::test]
async fn test_translate_withDisabledProvider_shouldSkipItSilently() {
    let mut config = common::test_config();
    for provider in &mut config.providers {
        if provider.kind().unwrap() == ProviderKind::DeepL {
            provider.api_key.clear();
        }
    }
    let transport = Arc::new(
        MockTransport::new()
            .route(LIBRE_URL, MockReply::status(500, "down"))
            .route(MYMEMORY_URL, MockReply::status(500, "down")),
    );
    let orchestrator = common::orchestrator_with(&config, &transport);

    let error = orchestrator
        .translate(&TranslationRequest::new("Hello", "en", "es"))
        .await
        .unwrap_err();

    let providers: Vec<String> = failure_codes(&error).into_iter().map(|(p, _)| p).collect();
    assert_eq!(providers, vec!["libretranslate", "mymemory"]);
    assert_eq!(transport.calls_to(DEEPL_URL), 0);
}

#[tokio::test]
async fn test_translate_withNoEnabledProvider_shouldFailWithEmptyDiagnostics() {
    let mut config = common::test_config();
    config.providers.clear();
    let transport = Arc::new(MockTransport::new());
    let orchestrator = common::orchestrator_with(&config, &transport);

    let error = orchestrator
        .translate(&TranslationRequest::new("Hello", "en", "es"))
        .await
        .unwrap_err();
    assert!(failure_codes(&error).is_empty());
    assert_eq!(error.diagnostics(), "no translation provider is enabled");
}

#[tokio::test]
async fn test_translate_concurrentCalls_shouldBeIndependent() {
    let transport = Arc::new(MockTransport::new().route(DEEPL_URL, MockReply::ok(common::deepl_ok("Hola"))));
    let orchestrator = Arc::new(common::orchestrator_with(&common::test_config(), &transport));

    let mut handles = Vec::new();
    for i in 0..8 {
        let orchestrator = orchestrator.clone();
        handles.push(tokio::spawn(async move {
            orchestrator
                .translate(&TranslationRequest::new(format!("Hello {}", i), "en", "es"))
                .await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().provider_used, "deepl");
    }
    assert_eq!(transport.calls_to(DEEPL_URL), 8);
}
