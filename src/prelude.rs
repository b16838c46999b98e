pub use crate::config::Config;
pub use crate::converter::Converter;
pub use crate::error::{ConversionError, SourceError};
pub use crate::loader::{Outcome, PolicyLoader};
pub use crate::parser::{html::HtmlParser, markdown::MarkdownParser, ParserProcedure};
pub use crate::source::{EmbeddedSource, FileSource, MarkdownSource, RemoteSource};
pub use crate::theme::{PreferenceStore, Theme};
