// Pattern library - the detectors run over every paragraph.
// - engine.rs: Detector trait and the ordered PatternLibrary
// - apostrophe.rs: straight apostrophes
// - nbsp.rs: missing non-breaking space before colons
// - phone.rs: phone numbers without non-breaking hyphens
// - agreement.rs: hand-authored exact-substring grammar rules
// - guillemets.rs: « » spacing

pub mod agreement;
pub mod apostrophe;
pub mod engine;
pub mod guillemets;
pub mod nbsp;
pub mod phone;

pub use agreement::{AgreementRule, GrammarAgreementDetector};
pub use apostrophe::ApostropheDetector;
pub use engine::*;
pub use guillemets::GuillemetSpacingDetector;
pub use nbsp::ColonSpacingDetector;
pub use phone::PhoneFormatDetector;
