/*!
 * # nexo - translation with provider fallback
 *
 * A Rust library that translates text through several external translation
 * services, trying them in priority order until one succeeds, plus a small
 * heuristic language detector.
 *
 * ## Features
 *
 * - Ordered fallback over DeepL, LibreTranslate and MyMemory
 * - Per-provider language code aliases and timeouts
 * - Offline language detection for about forty languages
 * - JSON request/reply surface for callers
 * - ISO 639 language name lookup
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Requests, results and the fallback orchestrator
 * - `providers`: Clients for the translation backends:
 *   - `providers::deepl`: DeepL API client
 *   - `providers::libretranslate`: LibreTranslate API client
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::transport`: HTTP transport abstraction
 * - `detection`: Script and stop-word language detection
 * - `api`: JSON request handling
 * - `text_stats`: Word, sentence and reading time statistics
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod api;
pub mod app_config;
pub mod detection;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod text_stats;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, ProviderConfig};
pub use detection::{LanguageSignal, detect};
pub use errors::{AppError, ProviderError, ProviderFailure, TranslationError};
pub use language_utils::get_language_name;
pub use providers::ProviderKind;
pub use translation::{SourceLanguage, TranslationOrchestrator, TranslationRequest, TranslationResult};
