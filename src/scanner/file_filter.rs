use crate::config::InputConfig;
use crate::error::Result;
use glob::{MatchOptions, Pattern};
use std::path::Path;

// Shell globbing semantics: a leading dot must be matched literally.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

pub struct FileFilter {
    pattern: Pattern,
}

impl FileFilter {
    pub fn new(config: &InputConfig) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(&config.pattern)?,
        })
    }

    pub fn is_log_file(&self, path: &Path) -> bool {
        match path.file_name().and_then(|s| s.to_str()) {
            Some(filename) => self.pattern.matches_with(filename, MATCH_OPTIONS),
            None => false,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}
