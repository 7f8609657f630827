pub mod datasets;
pub mod progress;
pub mod splitter;

pub use datasets::FileParagraphSource;
pub use progress::SqliteProgressStore;
pub use splitter::RuleSplitter;
