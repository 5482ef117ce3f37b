//! Brand-name matching pipeline
//!
//! Three strategies scan each page's visible text, always in the same order:
//! regex patterns, known bad variants ("detect" strings), and line-level
//! fuzzy comparison against canonical spellings. All of them honor the
//! official strings, which are never reported as deviations.

pub mod classifier;
pub mod engine;
pub mod record;
pub mod similarity;

pub use classifier::{StringClassifier, StringSets};
pub use engine::{MatchEngine, detect_matches, fuzzy_matches, regex_matches, scan};
pub use record::{MatchKind, MatchRecord};
pub use similarity::ratio;
