//! Shared helpers for the integration tests.
//!
//! Not every helper is used by every test file.
#![allow(dead_code)]

use git2::Repository;
use std::path::Path;

/// Sets a local identity and turns off signing so commits and tags work anywhere
pub fn configure_test_identity(repo: &Repository) {
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    config.set_bool("commit.gpgsign", false).unwrap();
    config.set_bool("tag.gpgsign", false).unwrap();
}

/// Stages `relative` and commits it on `HEAD` with no parent
pub fn initial_commit(repo: &Repository, relative: &Path) {
    let mut index = repo.index().unwrap();
    index.add_path(relative).unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = repo.signature().unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .unwrap();
}

/// Sorted short names of all tags in the repository
pub fn tag_names(repo: &Repository) -> Vec<String> {
    let mut tags: Vec<String> = repo
        .tag_names(None)
        .unwrap()
        .iter()
        .flatten()
        .map(str::to_string)
        .collect();
    tags.sort();
    tags
}
