pub mod file_filter;
pub mod log_scanner;

pub use file_filter::FileFilter;
pub use log_scanner::{LogFile, LogScanner, ScanStatistics};
