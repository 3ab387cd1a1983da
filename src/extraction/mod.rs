pub mod markup;
pub mod record_extractor;

pub use markup::MarkupProfile;
pub use record_extractor::RecordExtractor;
