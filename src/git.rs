use crate::error::{BumpError, Result};
use git2::{Repository, Signature};
use log::{debug, info, warn};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// The three version-control operations a bump needs.
pub trait VersionControl {
    /// Stages a single path
    fn add(&self, path: &Path) -> Result<()>;
    /// Commits whatever is staged
    fn commit(&self, message: &str) -> Result<()>;
    /// Creates an annotated tag on the current `HEAD` commit
    fn tag_annotated(&self, name: &str, message: &str) -> Result<()>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn add(&self, path: &Path) -> Result<()> {
        (**self).add(path)
    }

    fn commit(&self, message: &str) -> Result<()> {
        (**self).commit(message)
    }

    fn tag_annotated(&self, name: &str, message: &str) -> Result<()> {
        (**self).tag_annotated(name, message)
    }
}

/// Drives the system `git` binary, inheriting the user's config and hooks.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(".")
    }
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self { workdir: workdir.into() }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn add_args(path: &Path) -> Vec<OsString> {
        vec!["add".into(), path.as_os_str().to_owned()]
    }

    pub fn commit_args(message: &str) -> Vec<OsString> {
        vec!["commit".into(), format!("-m{message}").into()]
    }

    pub fn tag_args(name: &str, message: &str) -> Vec<OsString> {
        vec![
            "tag".into(),
            format!("--message={message}").into(),
            "--annotate".into(),
            name.into(),
        ]
    }

    fn run_git(&self, args: &[OsString]) -> Result<()> {
        let command = display_command(args);
        debug!("Running `{}` in {:?}", command, self.workdir);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| BumpError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim_end());
        }

        if !output.status.success() {
            return Err(BumpError::ExternalCommand {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl VersionControl for GitCli {
    fn add(&self, path: &Path) -> Result<()> {
        self.run_git(&Self::add_args(path))
    }

    fn commit(&self, message: &str) -> Result<()> {
        info!("Creating commit: {}", message);
        self.run_git(&Self::commit_args(message))
    }

    fn tag_annotated(&self, name: &str, message: &str) -> Result<()> {
        info!("Creating tag: {}", name);
        self.run_git(&Self::tag_args(name, message))
    }
}

fn display_command(args: &[OsString]) -> String {
    std::iter::once(OsStr::new("git"))
        .chain(args.iter().map(OsString::as_os_str))
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

/// In-process git backend on libgit2.
pub struct GitTracker {
    pub repository: Repository,
}

impl GitTracker {
    /// Opens the repository containing the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repository = Repository::discover(path)?;

        debug!("Opened repository at {:?}", repository.path());

        Ok(GitTracker { repository })
    }

    /// Gets the repository signature from local git config
    fn get_signature(&self) -> Result<Signature<'_>> {
        Ok(self.repository.signature()?)
    }

    /// Maps `path` onto the index path git expects: relative to the work tree
    fn index_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self
            .repository
            .workdir()
            .ok_or_else(|| git2::Error::from_str("repository has no work tree"))?;
        let canonical = |p: &Path| {
            p.canonicalize().map_err(|source| BumpError::Io {
                path: p.to_path_buf(),
                source,
            })
        };
        let workdir = canonical(workdir)?;
        let absolute = canonical(path)?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                git2::Error::from_str(&format!(
                    "{} is outside the repository work tree {}",
                    path.display(),
                    workdir.display()
                ))
                .into()
            })
    }

    /// Stages one file
    pub fn stage_path(&self, path: &Path) -> Result<()> {
        let relative = self.index_path(path)?;
        let mut index = self.repository.index()?;

        index.add_path(&relative)?;
        index.write()?;

        debug!("Staged {:?}", relative);
        Ok(())
    }

    /// Creates a commit with the given message
    pub fn create_commit(&self, message: &str) -> Result<git2::Oid> {
        info!("Creating commit: {}", message);

        let mut index = self.repository.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repository.find_tree(tree_id)?;

        let sig = self.get_signature()?;

        let parent_commit = match self.repository.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => {
                warn!("No parent commit found - this will be the initial commit");
                None
            }
        };

        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        let commit_id = self
            .repository
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        info!("Created commit: {}", commit_id);
        Ok(commit_id)
    }

    /// Creates an annotated tag for the given commit
    pub fn create_tag(&self, tag_name: &str, commit_id: git2::Oid, message: &str) -> Result<git2::Oid> {
        info!("Creating tag: {}", tag_name);

        let sig = self.get_signature()?;
        let commit_obj = self
            .repository
            .find_object(commit_id, Some(git2::ObjectType::Commit))?;

        let tag_id = self.repository.tag(tag_name, &commit_obj, &sig, message, false)?;

        info!("Created tag: {}", tag_name);
        Ok(tag_id)
    }

    pub fn head_commit_id(&self) -> Result<git2::Oid> {
        Ok(self.repository.head()?.peel_to_commit()?.id())
    }

    /// Message of the commit `HEAD` points at, trailing newline trimmed
    pub fn head_commit_message(&self) -> Result<String> {
        let commit = self.repository.head()?.peel_to_commit()?;
        Ok(String::from_utf8_lossy(commit.message_bytes()).trim_end().to_string())
    }
}

impl VersionControl for GitTracker {
    fn add(&self, path: &Path) -> Result<()> {
        self.stage_path(path)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.create_commit(message).map(|_| ())
    }

    fn tag_annotated(&self, name: &str, message: &str) -> Result<()> {
        let head = self.head_commit_id()?;
        self.create_tag(name, head, message).map(|_| ())
    }
}
