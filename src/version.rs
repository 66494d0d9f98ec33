use crate::error::{BumpError, Result};
use log::debug;
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const DEV_SUFFIX: &str = "-dev";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseVersionError {
    #[error("'{0}' is not a version of the form vN or vN-dev")]
    Malformed(String),
    #[error("version number '{0}' is out of range")]
    OutOfRange(String),
}

/// A libkullo version: `vN` for a release, `vN-dev` while work on N is ongoing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionRecord {
    pub major_counter: u64,
    pub is_dev: bool,
}

impl VersionRecord {
    pub fn release(major_counter: u64) -> Self {
        Self { major_counter, is_dev: false }
    }

    pub fn dev(major_counter: u64) -> Self {
        Self { major_counter, is_dev: true }
    }

    /// The release this version leads up to (or is).
    pub fn released(&self) -> Self {
        Self::release(self.major_counter)
    }

    /// The development version following this one's release, `None` on overflow.
    pub fn next_dev(&self) -> Option<Self> {
        self.major_counter.checked_add(1).map(Self::dev)
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.major_counter)?;
        if self.is_dev {
            f.write_str(DEV_SUFFIX)?;
        }
        Ok(())
    }
}

impl FromStr for VersionRecord {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let malformed = || ParseVersionError::Malformed(s.to_string());
        let rest = s.strip_prefix('v').ok_or_else(malformed)?;
        let (digits, is_dev) = match rest.strip_suffix(DEV_SUFFIX) {
            Some(digits) => (digits, true),
            None => (rest, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let major_counter = digits
            .parse::<u64>()
            .map_err(|_| ParseVersionError::OutOfRange(digits.to_string()))?;
        Ok(Self { major_counter, is_dev })
    }
}

/// The tracked source file, held as its lines with the version declaration located.
#[derive(Debug, Clone)]
pub struct VersionFile {
    path: PathBuf,
    lines: Vec<String>,
    line_index: usize,
    token: Range<usize>,
    record: VersionRecord,
}

impl VersionFile {
    pub fn version_match_regex() -> Result<Regex> {
        Ok(Regex::new(r#"LIBKULLO_VERSION = "(v([0-9]+)(?:-dev)?)""#)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading version file: '{}'", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| BumpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Locates the first version declaration in `contents`.
    pub fn parse(path: impl AsRef<Path>, contents: &str) -> Result<Self> {
        let path = path.as_ref();
        let version_regex = Self::version_match_regex()?;
        let lines: Vec<String> = contents.split_inclusive('\n').map(str::to_owned).collect();

        for (line_index, line) in lines.iter().enumerate() {
            let Some(captures) = version_regex.captures(line) else {
                continue;
            };
            let Some(token) = captures.get(1) else {
                continue;
            };
            let record = token.as_str().parse::<VersionRecord>().map_err(|e| match e {
                ParseVersionError::OutOfRange(digits) => BumpError::InvalidVersionNumber {
                    path: path.to_path_buf(),
                    digits,
                },
                ParseVersionError::Malformed(_) => BumpError::VersionNotFound(path.to_path_buf()),
            })?;
            debug!(
                "Found current version {} on line {}",
                record,
                line_index + 1
            );
            return Ok(Self {
                path: path.to_path_buf(),
                token: token.range(),
                lines,
                line_index,
                record,
            });
        }

        Err(BumpError::VersionNotFound(path.to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> VersionRecord {
        self.record
    }

    /// 1-based line number of the version declaration.
    pub fn line_number(&self) -> usize {
        self.line_index + 1
    }

    pub fn version_line(&self) -> &str {
        &self.lines[self.line_index]
    }

    /// Rewrites the version token in memory; the rest of the line is kept.
    pub fn set_version(&mut self, record: VersionRecord) {
        let rendered = record.to_string();
        let start = self.token.start;
        self.lines[self.line_index].replace_range(self.token.clone(), &rendered);
        self.token = start..start + rendered.len();
        self.record = record;
    }

    pub fn contents(&self) -> String {
        self.lines.concat()
    }

    pub fn save(&self) -> Result<()> {
        debug!("Writing {} to '{}'", self.record, self.path.display());
        std::fs::write(&self.path, self.contents()).map_err(|source| BumpError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
