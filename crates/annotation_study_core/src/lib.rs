pub mod domain;
pub mod flow;
pub mod justify;
pub mod ports;
pub mod stages;

pub use domain::{
    CompletionRow, Identity, NewEntry, Paragraph, ReaderPayload, ReaderView, SentenceConflict,
    StageDestination, StageEntry,
};
pub use flow::ReadingFlow;
pub use justify::label_conflicts;
pub use ports::{ParagraphSource, PortError, PortResult, ProgressStore, SentenceSplitter};
pub use stages::StageRouter;
