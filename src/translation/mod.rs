/*!
 * Translation orchestration.
 *
 * - `request`: request/result value objects and validation
 * - `orchestrator`: ordered provider fallback
 */

pub mod orchestrator;
pub mod request;

pub use orchestrator::{ProviderSlot, TranslationOrchestrator};
pub use request::{SourceLanguage, TranslationRequest, TranslationResult};
