use serde::{Deserialize, Serialize};

/// Signals derived from git context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitSignals {
    /// Current branch name (e.g., "feature/auth-refactor").
    pub current_branch: Option<String>,
    /// Files changed in recent commits.
    pub recently_modified_files: Vec<String>,
    /// Recent commit messages (most recent first).
    pub recent_commit_messages: Vec<String>,
    /// Files with uncommitted changes.
    pub uncommitted_files: Vec<String>,
    pub is_feature_branch: bool,
}

impl GitSignals {
    pub fn gather(
        current_branch: Option<String>,
        recently_modified_files: Vec<String>,
        recent_commit_messages: Vec<String>,
        uncommitted_files: Vec<String>,
    ) -> Self {
        let is_feature_branch = current_branch
            .as_deref()
            .is_some_and(|b| b.starts_with("feature/") || b.starts_with("feat/"));
        Self {
            current_branch,
            recently_modified_files,
            recent_commit_messages,
            uncommitted_files,
            is_feature_branch,
        }
    }

    /// Extract domain keywords from the branch name.
    /// e.g., "feature/auth-refactor" → ["auth", "refactor"]
    pub fn branch_keywords(&self) -> Vec<String> {
        self.current_branch
            .as_deref()
            .unwrap_or("")
            .split(['/', '-', '_'])
            .filter(|s| !s.is_empty() && !is_branch_prefix(s))
            .map(|s| s.to_lowercase())
            .collect()
    }

    /// Modified and uncommitted files, without duplicates.
    pub fn touched_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for file in self
            .recently_modified_files
            .iter()
            .chain(&self.uncommitted_files)
        {
            if !files.contains(&file.as_str()) {
                files.push(file);
            }
        }
        files
    }
}

/// Common branch prefixes that aren't meaningful keywords.
fn is_branch_prefix(s: &str) -> bool {
    matches!(
        s.to_lowercase().as_str(),
        "feature"
            | "feat"
            | "fix"
            | "bugfix"
            | "hotfix"
            | "release"
            | "chore"
            | "main"
            | "master"
            | "develop"
    )
}
