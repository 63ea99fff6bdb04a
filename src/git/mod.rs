//! Git queries used by the pre-commit gate.

use crate::error::Result;
use crate::traits::CommandRunner;

/// Get the current branch name.
///
/// Returns `None` on a detached HEAD or when the git query fails
/// (for example outside a repository).
///
/// # Errors
///
/// Returns an error if git cannot be run at all.
pub fn current_branch(runner: &dyn CommandRunner) -> Result<Option<String>> {
    let output = runner.run("git", &["branch", "--show-current"])?;
    if !output.success() {
        return Ok(None);
    }
    let branch = output.stdout.trim();
    if branch.is_empty() {
        Ok(None)
    } else {
        Ok(Some(branch.to_string()))
    }
}

/// Get staged files.
///
/// # Errors
///
/// Returns an error if git cannot be run at all.
pub fn staged_files(runner: &dyn CommandRunner) -> Result<Vec<String>> {
    let output = runner.run("git", &["diff", "--cached", "--name-only"])?;
    if output.success() {
        Ok(output.stdout.lines().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
    } else {
        Ok(Vec::new())
    }
}

/// Branch and index state that the commit policy looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitState {
    /// The current branch, if any.
    pub branch: Option<String>,
    /// Number of files in the index.
    pub staged_count: usize,
}

impl CommitState {
    /// Query the repository, treating any failure as "no branch, nothing staged".
    pub fn query(runner: &dyn CommandRunner) -> Self {
        let branch = current_branch(runner).unwrap_or_default();
        let staged_count = staged_files(runner).map(|files| files.len()).unwrap_or_default();
        Self { branch, staged_count }
    }

    /// Whether this state is a commit of staged work onto `protected`.
    pub fn commits_to(&self, protected: &str) -> bool {
        self.staged_count > 0 && self.branch.as_deref() == Some(protected)
    }
}
