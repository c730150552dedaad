/*!
 * Config file to orchestrator lifecycle tests
 */

use std::collections::HashMap;
use std::sync::Arc;

use nexo::app_config::Config;
use nexo::translation::TranslationRequest;

use crate::common::mock_transport::{MockReply, MockTransport};
use crate::common::{self, DEEPL_URL, LIBRE_URL, MYMEMORY_URL};

const CONFIG_JSON: &str = r#"{
    "default_target_language": "fr",
    "log_level": "debug",
    "providers": [
        { "type": "mymemory", "priority": 2, "endpoint": "https://mymemory.test/get" },
        { "type": "libretranslate", "priority": 1, "endpoint": "https://libre.test/translate", "timeout_secs": 3 },
        { "type": "deepl", "priority": 0, "endpoint": "https://deepl.test/v2/translate" }
    ]
}"#;

#[tokio::test]
async fn test_configFile_withoutDeeplKey_shouldStartFromLibreTranslate() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_config_file(dir.path(), CONFIG_JSON).unwrap();

    let config = Config::load_or_default(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.default_target_language, "fr");

    let transport = Arc::new(MockTransport::new().route(LIBRE_URL, MockReply::ok(common::libre_ok("Bonjour"))));
    let orchestrator = common::orchestrator_with(&config, &transport);
    assert_eq!(orchestrator.provider_ids(), vec!["libretranslate", "mymemory"]);

    let result = orchestrator
        .translate(&TranslationRequest::new("Hello", "auto", &config.default_target_language))
        .await
        .unwrap();
    assert_eq!(result.translated_text, "Bonjour");
    assert_eq!(result.target_language, "fr");
    assert_eq!(transport.calls_to(DEEPL_URL), 0);
}

#[tokio::test]
async fn test_configFile_withEnvKey_shouldEnableDeeplFirst() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_config_file(dir.path(), CONFIG_JSON).unwrap();

    let env = HashMap::from([("DEEPL_API_KEY", "env-key:fx"), ("MYMEMORY_EMAIL", "ops@example.com")]);
    let mut config = Config::load_or_default(&path).unwrap();
    config.apply_env_overrides(|name| env.get(name).map(|v| v.to_string()));
    config.validate().unwrap();

    let transport = Arc::new(
        MockTransport::new()
            .route(DEEPL_URL, MockReply::status(429, "Too Many Requests"))
            .route(LIBRE_URL, MockReply::status(502, "Bad Gateway"))
            .route(MYMEMORY_URL, MockReply::ok(common::mymemory_ok("Salut"))),
    );
    let orchestrator = common::orchestrator_with(&config, &transport);
    assert_eq!(orchestrator.provider_ids(), vec!["deepl", "libretranslate", "mymemory"]);

    let result = orchestrator
        .translate(&TranslationRequest::new("Hi", "en", "fr"))
        .await
        .unwrap();
    assert_eq!(result.provider_used, "mymemory");

    let requests = transport.requests();
    assert_eq!(requests[0].header_value("Authorization"), Some("DeepL-Auth-Key env-key:fx"));
    assert!(requests[2].url.contains("de=ops%40example.com"));
}
