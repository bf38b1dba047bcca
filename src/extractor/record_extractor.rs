use crate::error::ChainSnapError;
use csv::{ReaderBuilder, StringRecord};
use num_bigint::{BigInt, BigUint, Sign};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

/// `keccak256("Transfer(address,address,uint256)")`
pub const TRANSFER_EVENT_SIGNATURE: &str =
    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

pub const SIGNATURE_COLUMN: &str = "topic0";
pub const ADDRESS_COLUMN: &str = "topic2";
pub const TOKEN_ID_COLUMN: &str = "topic3";

const ADDRESS_HEX_LEN: usize = 40;

/// One row of the snapshot: the receiving address and the transferred token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    pub address: String,
    #[serde(rename = "tokenId")]
    pub token_id: String,
}

impl ExtractedRecord {
    pub fn from_topics(raw_address: &str, raw_token_id: &str) -> Self {
        Self {
            address: format_address(raw_address),
            token_id: format_token_id(raw_token_id),
        }
    }
}

/// Positions of the columns the extractor reads, resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderIndex {
    signature: usize,
    address: usize,
    token_id: usize,
}

enum RowMatch {
    Short,
    Ignored,
    Matched(ExtractedRecord),
}

impl HeaderIndex {
    /// Resolves the required columns by exact name. On failure returns the
    /// names that were not found, in column order.
    pub fn resolve(header: &StringRecord) -> std::result::Result<Self, Vec<String>> {
        let position = |name: &str| header.iter().position(|column| column == name);

        match (
            position(SIGNATURE_COLUMN),
            position(ADDRESS_COLUMN),
            position(TOKEN_ID_COLUMN),
        ) {
            (Some(signature), Some(address), Some(token_id)) => Ok(Self {
                signature,
                address,
                token_id,
            }),
            (signature, address, token_id) => Err([
                (SIGNATURE_COLUMN, signature),
                (ADDRESS_COLUMN, address),
                (TOKEN_ID_COLUMN, token_id),
            ]
            .into_iter()
            .filter(|(_, found)| found.is_none())
            .map(|(name, _)| name.to_string())
            .collect()),
        }
    }

    pub fn min_fields(&self) -> usize {
        self.signature.max(self.address).max(self.token_id) + 1
    }

    fn match_row(&self, row: &StringRecord) -> RowMatch {
        if row.len() < self.min_fields() {
            return RowMatch::Short;
        }

        match (
            row.get(self.signature),
            row.get(self.address),
            row.get(self.token_id),
        ) {
            (Some(TRANSFER_EVENT_SIGNATURE), Some(address), Some(token_id)) => {
                RowMatch::Matched(ExtractedRecord::from_topics(address, token_id))
            }
            _ => RowMatch::Ignored,
        }
    }
}

/// Normalises an indexed address topic to `0x` plus its last 40 characters.
///
/// Whatever prefix the value had is discarded along with the padding. Values
/// shorter than 40 characters are kept whole.
pub fn format_address(raw: &str) -> String {
    let length = raw.chars().count();
    let tail = if length >= ADDRESS_HEX_LEN {
        raw.char_indices()
            .nth(length - ADDRESS_HEX_LEN)
            .map(|(offset, _)| &raw[offset..])
            .unwrap_or(raw)
    } else {
        raw
    };

    format!("0x{}", tail)
}

/// Renders a hex-encoded token id topic in base 10.
///
/// Accepts what a base-16 integer literal may look like: surrounding
/// whitespace, a sign, an optional `0x` prefix and single underscores
/// between digits. The value is read as base 16 whether or not the prefix is
/// there. Anything else comes back unchanged.
pub fn format_token_id(raw: &str) -> String {
    parse_hex(raw)
        .map(|value| value.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_hex(raw: &str) -> Option<BigInt> {
    let trimmed = raw.trim();
    let (sign, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
        (Sign::Minus, rest)
    } else {
        (Sign::Plus, trimmed.strip_prefix('+').unwrap_or(trimmed))
    };

    // An underscore may follow the prefix directly, never a bare sign.
    let digits = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => unsigned,
    };

    let well_formed = digits
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_hexdigit()));
    if !well_formed {
        return None;
    }

    let hex: String = digits.chars().filter(|&c| c != '_').collect();
    let magnitude = BigUint::parse_bytes(hex.as_bytes(), 16)?;
    Some(BigInt::from_biguint(sign, magnitude))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// Every row was read; individual rows may still have been rejected.
    Processed,
    /// Nothing usable in the file: no header or missing required columns.
    Skipped,
    /// The file could not be opened or read to the end.
    Failed,
}

/// Everything one input file contributed to a run.
#[derive(Debug)]
pub struct FileExtraction {
    pub path: PathBuf,
    pub records: Vec<ExtractedRecord>,
    pub issues: Vec<ChainSnapError>,
    pub rows_scanned: usize,
    pub outcome: FileOutcome,
}

impl FileExtraction {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            records: Vec::new(),
            issues: Vec::new(),
            rows_scanned: 0,
            outcome: FileOutcome::Processed,
        }
    }

    fn skip(&mut self, issue: ChainSnapError) {
        self.issues.push(issue);
        self.outcome = FileOutcome::Skipped;
    }

    fn fail(&mut self, issue: ChainSnapError) {
        self.issues.push(issue);
        self.outcome = FileOutcome::Failed;
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Default)]
pub struct RecordExtractor;

impl RecordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Scans one log file. Problems are captured in the returned value,
    /// never raised, so a bad file cannot stop the run.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> FileExtraction {
        let path = path.as_ref();

        match fs::read(path) {
            Ok(content) => self.extract_from_bytes(&content, path),
            Err(e) => {
                let mut extraction = FileExtraction::new(path);
                extraction.fail(io_failure(path, e));
                extraction
            }
        }
    }

    /// Scans delimited text held in memory; `path` is used for reporting only.
    ///
    /// Empty lines count as rows with no fields: one before the header makes
    /// the file empty, and one among the data rows is a short row.
    pub fn extract_from_bytes(&self, content: &[u8], path: &Path) -> FileExtraction {
        let mut extraction = FileExtraction::new(path);
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);
        let mut record = StringRecord::new();

        let header_found = match reader.read_record(&mut record) {
            Ok(found) => found,
            Err(e) => {
                extraction.fail(csv_failure(path, e));
                return extraction;
            }
        };
        if !header_found || blank_lines_before(content, &record) > 0 {
            extraction.skip(ChainSnapError::EmptyFile {
                path: extraction.display_path(),
            });
            return extraction;
        }

        let index = match HeaderIndex::resolve(&record) {
            Ok(index) => index,
            Err(columns) => {
                extraction.skip(ChainSnapError::MissingColumns {
                    path: extraction.display_path(),
                    columns,
                });
                return extraction;
            }
        };

        // The header is row 1.
        let mut row_number = 2;
        loop {
            let found = reader.read_record(&mut record);

            // The reader drops empty lines; each one is still a row.
            for _ in 0..blank_lines_before(content, &record) {
                extraction.rows_scanned += 1;
                extraction.issues.push(ChainSnapError::ShortRow {
                    path: extraction.display_path(),
                    row: row_number,
                });
                row_number += 1;
            }

            match found {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    extraction.fail(csv_failure(path, e));
                    break;
                }
            }
            extraction.rows_scanned += 1;

            match index.match_row(&record) {
                RowMatch::Short => extraction.issues.push(ChainSnapError::ShortRow {
                    path: extraction.display_path(),
                    row: row_number,
                }),
                RowMatch::Ignored => {}
                RowMatch::Matched(matched) => extraction.records.push(matched),
            }
            row_number += 1;
        }

        debug!(
            file = %path.display(),
            rows = extraction.rows_scanned,
            matched = extraction.records.len(),
            issues = extraction.issues.len(),
            "scanned log file"
        );

        extraction
    }
}

/// Counts the empty lines the reader skipped before `record` started.
///
/// A record's position is taken before skipping. After a `\r\n` record end
/// only the `\r` has been consumed, so a leading `\n` there is not a line.
fn blank_lines_before(content: &[u8], record: &StringRecord) -> usize {
    let offset = record
        .position()
        .and_then(|position| usize::try_from(position.byte()).ok())
        .unwrap_or(content.len());
    let mut rest = content.get(offset..).unwrap_or_default();

    if offset > 0 && content.get(offset - 1) == Some(&b'\r') {
        rest = rest.strip_prefix(b"\n").unwrap_or(rest);
    }

    let mut count = 0;
    while let Some(after) = rest
        .strip_prefix(b"\r\n")
        .or_else(|| rest.strip_prefix(b"\n"))
        .or_else(|| rest.strip_prefix(b"\r"))
    {
        rest = after;
        count += 1;
    }
    count
}

fn io_failure(path: &Path, error: io::Error) -> ChainSnapError {
    if error.kind() == io::ErrorKind::NotFound {
        ChainSnapError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        ChainSnapError::FileProcessing {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

fn csv_failure(path: &Path, error: csv::Error) -> ChainSnapError {
    match error.kind() {
        csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound => {
            ChainSnapError::FileNotFound {
                path: path.display().to_string(),
            }
        }
        _ => ChainSnapError::FileProcessing {
            path: path.display().to_string(),
            message: error.to_string(),
        },
    }
}

/// Running totals while the extractions of a run are folded together.
#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub total_files: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub rows_scanned: usize,
    pub records: Vec<ExtractedRecord>,
    pub start_time: Instant,
    pub errors: Vec<String>,
}

impl ExtractionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            files_processed: 0,
            files_skipped: 0,
            files_failed: 0,
            rows_scanned: 0,
            records: Vec::new(),
            start_time: Instant::now(),
            errors: Vec::new(),
        }
    }

    /// Appends a file's records after everything gathered so far.
    pub fn absorb(&mut self, extraction: FileExtraction) {
        match extraction.outcome {
            FileOutcome::Processed => self.files_processed += 1,
            FileOutcome::Skipped => self.files_skipped += 1,
            FileOutcome::Failed => self.files_failed += 1,
        }

        self.rows_scanned += extraction.rows_scanned;
        self.errors
            .extend(extraction.issues.iter().map(|issue| issue.to_string()));
        self.records.extend(extraction.records);
    }

    pub fn files_seen(&self) -> usize {
        self.files_processed + self.files_skipped + self.files_failed
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_seen() as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PADDED_ADDRESS: &str =
        "0x000000000000000000000000abcdefabcdefabcdefabcdefabcdefabcdefabcd";
    const OTHER_SIGNATURE: &str =
        "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925";

    fn extract(content: &str) -> FileExtraction {
        RecordExtractor::new().extract_from_bytes(content.as_bytes(), Path::new("logs.csv"))
    }

    #[test]
    fn test_format_address() {
        assert_eq!(
            format_address(PADDED_ADDRESS),
            "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd"
        );

        // exactly 40 characters without a prefix
        let bare = "1234567890123456789012345678901234567890";
        assert_eq!(format_address(bare), format!("0x{}", bare));

        // short values are kept whole, prefix fragment included
        assert_eq!(format_address("abc"), "0xabc");
        assert_eq!(format_address("0xabc"), "0x0xabc");
        assert_eq!(format_address(""), "0x");
    }

    #[test]
    fn test_format_address_ignores_existing_prefix_when_long() {
        // 41 characters: the prefix fragment is cut along with the padding.
        let raw = format!("x{}", "f".repeat(40));
        assert_eq!(format_address(&raw), format!("0x{}", "f".repeat(40)));
    }

    #[test]
    fn test_format_token_id() {
        assert_eq!(format_token_id("0x2a"), "42");
        assert_eq!(format_token_id("ff"), "255");
        assert_eq!(format_token_id("0X10"), "16");
        assert_eq!(format_token_id("0x0"), "0");
        assert_eq!(
            format_token_id("0x0000000000000000000000000000000000000000000000000000000000000001"),
            "1"
        );
    }

    #[test]
    fn test_format_token_id_is_always_hex() {
        // No prefix does not mean decimal.
        assert_eq!(format_token_id("10"), "16");
    }

    #[test]
    fn test_format_token_id_beyond_u128() {
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(
            format_token_id(&max),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_format_token_id_falls_back_to_raw() {
        assert_eq!(format_token_id("not-hex"), "not-hex");
        assert_eq!(format_token_id("0x"), "0x");
        assert_eq!(format_token_id(""), "");
        assert_eq!(format_token_id("0xzz"), "0xzz");
        assert_eq!(format_token_id("1__0"), "1__0");
        assert_eq!(format_token_id("_ff"), "_ff");
        assert_eq!(format_token_id("ff_"), "ff_");
        assert_eq!(format_token_id("- ff"), "- ff");
        assert_eq!(format_token_id("+-ff"), "+-ff");
    }

    #[test]
    fn test_format_token_id_literal_forms() {
        assert_eq!(format_token_id("-ff"), "-255");
        assert_eq!(format_token_id("+ff"), "255");
        assert_eq!(format_token_id("-0x1f"), "-31");
        assert_eq!(format_token_id("-0"), "0");
        assert_eq!(format_token_id("1_0"), "16");
        assert_eq!(format_token_id("0x_ff"), "255");
        assert_eq!(format_token_id("  0x2a\t"), "42");
    }

    #[test]
    fn test_header_resolution() {
        let header = StringRecord::from(vec!["block", "topic3", "topic0", "topic1", "topic2"]);
        let index = HeaderIndex::resolve(&header).unwrap();
        assert_eq!(index.min_fields(), 5);

        let header = StringRecord::from(vec!["topic0", "topic1"]);
        let missing = HeaderIndex::resolve(&header).unwrap_err();
        assert_eq!(missing, vec!["topic2", "topic3"]);
    }

    #[test]
    fn test_end_to_end_example() {
        let content = format!(
            "topic0,topic2,topic3\n{},{},0x1\n",
            TRANSFER_EVENT_SIGNATURE, PADDED_ADDRESS
        );
        let extraction = extract(&content);

        assert_eq!(extraction.outcome, FileOutcome::Processed);
        assert_eq!(
            extraction.records,
            vec![ExtractedRecord {
                address: "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd".to_string(),
                token_id: "1".to_string(),
            }]
        );
        assert!(extraction.issues.is_empty());
    }

    #[test]
    fn test_only_exact_signature_matches() {
        let content = format!(
            "topic0,topic2,topic3\n\
             {sig},{addr},0x1\n\
             {other},{addr},0x2\n\
             {upper},{addr},0x3\n\
             \" {sig}\",{addr},0x4\n\
             {sig},{addr},0x5\n",
            sig = TRANSFER_EVENT_SIGNATURE,
            other = OTHER_SIGNATURE,
            upper = TRANSFER_EVENT_SIGNATURE.to_uppercase(),
            addr = PADDED_ADDRESS,
        );
        let extraction = extract(&content);

        let token_ids: Vec<_> = extraction.records.iter().map(|r| r.token_id.as_str()).collect();
        assert_eq!(token_ids, vec!["1", "5"]);
        assert_eq!(extraction.rows_scanned, 5);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let content = format!(
            "block_number,address,topic0,topic1,topic2,topic3,data\n\
             100,0xcontract,{},0xfrom,{},0xff,0x\n",
            TRANSFER_EVENT_SIGNATURE, PADDED_ADDRESS
        );
        let extraction = extract(&content);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].token_id, "255");
    }

    #[test]
    fn test_short_rows_are_reported_and_skipped() {
        let content = format!(
            "topic0,topic2,topic3\n\
             {sig},{addr}\n\
             {sig},{addr},0x7\n",
            sig = TRANSFER_EVENT_SIGNATURE,
            addr = PADDED_ADDRESS,
        );
        let extraction = extract(&content);

        assert_eq!(extraction.outcome, FileOutcome::Processed);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].token_id, "7");
        assert!(matches!(
            extraction.issues.as_slice(),
            [ChainSnapError::ShortRow { row: 2, .. }]
        ));
    }

    #[test]
    fn test_blank_first_line_means_empty_file() {
        let content = format!(
            "\ntopic0,topic2,topic3\n{},0xabc,0x1\n",
            TRANSFER_EVENT_SIGNATURE
        );
        let extraction = extract(&content);

        assert_eq!(extraction.outcome, FileOutcome::Skipped);
        assert!(extraction.records.is_empty());
        assert!(matches!(
            extraction.issues.as_slice(),
            [ChainSnapError::EmptyFile { .. }]
        ));

        let extraction = extract("\r\n\r\n");
        assert_eq!(extraction.outcome, FileOutcome::Skipped);
    }

    #[test]
    fn test_blank_lines_are_short_rows() {
        let content = format!(
            "topic0,topic2,topic3\n\n{sig},abc\n{sig},{addr},0x1\n\n",
            sig = TRANSFER_EVENT_SIGNATURE,
            addr = PADDED_ADDRESS,
        );
        let extraction = extract(&content);

        let rows: Vec<_> = extraction
            .issues
            .iter()
            .map(|issue| match issue {
                ChainSnapError::ShortRow { row, .. } => *row,
                other => panic!("unexpected issue: {:?}", other),
            })
            .collect();
        assert_eq!(rows, vec![2, 3, 5]);
        assert_eq!(extraction.rows_scanned, 4);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.outcome, FileOutcome::Processed);
    }

    #[test]
    fn test_crlf_input() {
        let content = format!(
            "topic0,topic2,topic3\r\n{sig},{addr},0x1\r\n\r\n{sig},{addr},0x2\r\n",
            sig = TRANSFER_EVENT_SIGNATURE,
            addr = PADDED_ADDRESS,
        );
        let extraction = extract(&content);

        let token_ids: Vec<_> = extraction.records.iter().map(|r| r.token_id.as_str()).collect();
        assert_eq!(token_ids, vec!["1", "2"]);
        assert!(matches!(
            extraction.issues.as_slice(),
            [ChainSnapError::ShortRow { row: 3, .. }]
        ));
        assert_eq!(
            extraction.records[0].address,
            "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd"
        );
    }

    #[test]
    fn test_quoted_token_id_with_comma() {
        let content = format!(
            "topic0,topic2,topic3\n{},{},\"0x1,2\"\n",
            TRANSFER_EVENT_SIGNATURE, PADDED_ADDRESS
        );
        let extraction = extract(&content);

        assert!(extraction.issues.is_empty());
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].token_id, "0x1,2");
    }

    #[test]
    fn test_quoted_newline_is_not_a_blank_row() {
        let content = format!(
            "topic0,topic2,topic3,data\n{sig},{addr},0x1,\"a\n\nb\"\n{sig},abc\n",
            sig = TRANSFER_EVENT_SIGNATURE,
            addr = PADDED_ADDRESS,
        );
        let extraction = extract(&content);

        assert_eq!(extraction.records.len(), 1);
        assert!(matches!(
            extraction.issues.as_slice(),
            [ChainSnapError::ShortRow { row: 3, .. }]
        ));
    }

    #[test]
    fn test_empty_file_is_skipped() {
        let extraction = extract("");
        assert_eq!(extraction.outcome, FileOutcome::Skipped);
        assert!(extraction.records.is_empty());
        assert!(matches!(
            extraction.issues.as_slice(),
            [ChainSnapError::EmptyFile { .. }]
        ));
    }

    #[test]
    fn test_missing_columns_skip_file() {
        let content = format!(
            "topic0,topic1,topic3\n{},0xfrom,0x1\n",
            TRANSFER_EVENT_SIGNATURE
        );
        let extraction = extract(&content);

        assert_eq!(extraction.outcome, FileOutcome::Skipped);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.rows_scanned, 0);
        match extraction.issues.as_slice() {
            [ChainSnapError::MissingColumns { columns, .. }] => {
                assert_eq!(columns, &vec!["topic2".to_string()]);
            }
            other => panic!("unexpected issues: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_keeps_earlier_records() {
        let mut content = format!(
            "topic0,topic2,topic3\n{},{},0x1\n",
            TRANSFER_EVENT_SIGNATURE, PADDED_ADDRESS
        )
        .into_bytes();
        content.extend_from_slice(b"\xff\xfe,broken,row\n");

        let extraction =
            RecordExtractor::new().extract_from_bytes(&content, Path::new("bad.csv"));

        assert_eq!(extraction.outcome, FileOutcome::Failed);
        assert_eq!(extraction.records.len(), 1);
        assert!(matches!(
            extraction.issues.last(),
            Some(ChainSnapError::FileProcessing { .. })
        ));
    }

    #[test]
    fn test_missing_file_fails_without_panicking() {
        let temp_dir = TempDir::new().unwrap();
        let extraction = RecordExtractor::new().extract_file(temp_dir.path().join("gone.csv"));

        assert_eq!(extraction.outcome, FileOutcome::Failed);
        assert!(matches!(
            extraction.issues.as_slice(),
            [ChainSnapError::FileNotFound { .. }]
        ));
    }

    #[test]
    fn test_extract_file_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs.csv");
        fs::write(
            &path,
            format!(
                "topic0,topic2,topic3\n{},{},0x2a\n",
                TRANSFER_EVENT_SIGNATURE, PADDED_ADDRESS
            ),
        )
        .unwrap();

        let extraction = RecordExtractor::new().extract_file(&path);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].token_id, "42");
    }

    #[test]
    fn test_progress_folds_in_order() {
        let first = extract(&format!(
            "topic0,topic2,topic3\n{},{},0x1\n",
            TRANSFER_EVENT_SIGNATURE, PADDED_ADDRESS
        ));
        let second = extract("topic0,topic1\n");
        let third = extract(&format!(
            "topic0,topic2,topic3\n{},{},0x2\n",
            TRANSFER_EVENT_SIGNATURE, PADDED_ADDRESS
        ));

        let mut progress = ExtractionProgress::new(3);
        assert_eq!(progress.percentage(), 0.0);

        progress.absorb(first);
        progress.absorb(second);
        progress.absorb(third);

        assert_eq!(progress.files_processed, 2);
        assert_eq!(progress.files_skipped, 1);
        assert_eq!(progress.percentage(), 100.0);
        assert_eq!(progress.errors.len(), 1);

        let token_ids: Vec<_> = progress.records.iter().map(|r| r.token_id.as_str()).collect();
        assert_eq!(token_ids, vec!["1", "2"]);
    }
}
