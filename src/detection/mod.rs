/*!
 * Heuristic language detection.
 *
 * - `profiles`: the versioned script and stop-word table
 * - `detector`: scoring over a table
 */

pub mod detector;
pub mod profiles;

pub use detector::{ConfidenceLabel, Detector, LanguageSignal, confidence_label, detect};
pub use profiles::{DEFAULT_TABLE, DetectionTable, TABLE_VERSION};
