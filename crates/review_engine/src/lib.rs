//! Review engine: item sources, result sinks and effect execution.
mod config;
mod csv_text;
mod decode;
mod engine;
mod export;
mod fetch;
mod filename;
mod label;
mod metadata;
mod persist;
mod sink;
mod source;
mod types;

pub use config::{EngineConfig, EngineError, SourceConfig};
pub use csv_text::{escape_field, format_timestamp, parse_records, render_export_csv, EXPORT_HEADER};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use export::{export_decisions, ExportError, ExportSummary};
pub use fetch::{FetchError, FetchSettings, FetchedResource, Fetcher, ReqwestFetcher};
pub use filename::export_filename;
pub use label::{generate_session_label, sanitize_label};
pub use metadata::{parse_metadata, MetadataRow, FILENAME_COLUMN};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use sink::{DeferredSink, RemoteSink, ResultSink, SavePayload};
pub use source::{shuffle_items, ItemSource, MetadataItemSource, MetadataLocation, StaticItemSource};
pub use types::EngineEvent;
