pub mod record_extractor;
pub mod snapshot_writer;

pub use record_extractor::{
    format_address, format_token_id, ExtractedRecord, ExtractionProgress, FileExtraction,
    FileOutcome, HeaderIndex, RecordExtractor, TRANSFER_EVENT_SIGNATURE,
};
pub use snapshot_writer::{RunReport, SnapshotOutcome, SnapshotWriter};
