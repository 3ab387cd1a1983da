pub mod file_source;
pub mod http_source;
pub mod page_source;

pub use file_source::FilePageSource;
pub use http_source::HttpPageSource;
pub use page_source::{PageSource, ReadyMarker};
