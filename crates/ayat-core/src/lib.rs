pub mod catalog;
pub mod commentary;
pub mod config;
pub mod messages;
pub mod picker;
pub mod resolver;
pub mod router;
pub mod source;
pub mod view;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogError, ChapterRecord};
pub use commentary::{Commentary, CommentaryPool};
pub use config::{ClampPolicy, Config};
pub use picker::ChapterPicker;
pub use resolver::Resolver;
pub use source::{AlQuranClient, ChapterFiles, LookupRequest, SourceError, SourceKind, VerseResult, VerseSource};
pub use view::{Hint, ViewBinding, ViewId, ViewState, VerseSlot};
