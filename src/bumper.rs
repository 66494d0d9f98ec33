use crate::error::{BumpError, Result};
use crate::git::VersionControl;
use crate::version::{VersionFile, VersionRecord};
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const DEFAULT_VERSION_FILE: &str = "kulloclient/util/version.cpp";

/// Versions written by one bump.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    pub previous: VersionRecord,
    pub released: VersionRecord,
    pub next_dev: VersionRecord,
}

/// Releases the version in the tracked file and moves it on to the next dev version.
pub struct VersionBumper<V: VersionControl> {
    path: PathBuf,
    vcs: V,
}

impl<V: VersionControl> VersionBumper<V> {
    pub fn new(path: impl Into<PathBuf>, vcs: V) -> Self {
        Self { path: path.into(), vcs }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Commits `vN` (tagged) and then `vN+1-dev`. Nothing is rolled back when a
    /// later step fails.
    pub fn run(&self) -> Result<BumpOutcome> {
        let mut file = VersionFile::load(&self.path)?;
        let previous = file.record();
        let released = previous.released();
        let next_dev = previous.next_dev().ok_or_else(|| BumpError::InvalidVersionNumber {
            path: self.path.clone(),
            digits: previous.major_counter.to_string(),
        })?;

        info!(
            "Bumping {} (line {}): {} -> {} -> {}",
            self.path.display(),
            file.line_number(),
            previous,
            released,
            next_dev
        );

        self.commit_version(&mut file, released)?;
        let tag_name = released.to_string();
        self.vcs.tag_annotated(&tag_name, "")?;

        self.commit_version(&mut file, next_dev)?;

        Ok(BumpOutcome { previous, released, next_dev })
    }

    fn commit_version(&self, file: &mut VersionFile, version: VersionRecord) -> Result<()> {
        file.set_version(version);
        file.save()?;
        debug!("Staging {}", self.path.display());
        self.vcs.add(&self.path)?;
        self.vcs.commit(&commit_message(version))
    }
}

pub fn commit_message(version: VersionRecord) -> String {
    format!("Set version: {version}")
}
