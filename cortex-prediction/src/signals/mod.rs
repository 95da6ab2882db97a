//! Signal types for predictive memory preloading.
//!
//! Four signal categories feed into prediction strategies:
//! - File signals: active file, recent files, patterns, imports, symbols, directory
//! - Temporal signals: time of day, day of week, session timing
//! - Behavioral signals: recent queries, intents, frequent memories
//! - Git signals: branch name, modified files, commit messages

pub mod behavioral_signals;
pub mod file_signals;
pub mod git_signals;
pub mod temporal_signals;

pub use behavioral_signals::BehavioralSignals;
pub use file_signals::FileSignals;
pub use git_signals::GitSignals;
pub use temporal_signals::{TemporalSignals, TimeOfDay};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the context a prediction is made in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSignals {
    pub file: FileSignals,
    pub temporal: TemporalSignals,
    pub behavioral: BehavioralSignals,
    pub git: GitSignals,
    pub gathered_at: DateTime<Utc>,
}

impl PredictionSignals {
    pub fn new(
        file: FileSignals,
        temporal: TemporalSignals,
        behavioral: BehavioralSignals,
        git: GitSignals,
    ) -> Self {
        Self {
            file,
            temporal,
            behavioral,
            git,
            gathered_at: Utc::now(),
        }
    }

    /// Cache key for this snapshot.
    ///
    /// Covers the fields that steer strategies. Clock-driven values that change
    /// every call (session duration, time since last query, gather time) are left
    /// out so repeated calls in the same context share an entry.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        let file = &self.file;
        feed(&mut hasher, "active_file", file.active_file.iter());
        feed(&mut hasher, "recent_files", file.recent_files.iter());
        feed(&mut hasher, "file_type", file.file_type.iter());
        feed(&mut hasher, "patterns", sorted(&file.detected_patterns).into_iter());
        feed(&mut hasher, "imports", sorted(&file.imports).into_iter());
        feed(&mut hasher, "symbols", sorted(&file.symbols).into_iter());
        feed(&mut hasher, "directory", file.directory.iter());

        let temporal = &self.temporal;
        feed(&mut hasher, "time_of_day", [temporal.time_of_day.as_str()].iter());
        feed(&mut hasher, "day_of_week", [temporal.day_of_week.to_string()].iter());
        feed(&mut hasher, "new_session", [temporal.is_new_session.to_string()].iter());

        let behavioral = &self.behavioral;
        feed(&mut hasher, "queries", behavioral.recent_queries.iter());
        let intents: Vec<&str> = behavioral.recent_intents.iter().map(|i| i.as_str()).collect();
        feed(&mut hasher, "intents", intents.iter());
        feed(&mut hasher, "frequent", sorted(&behavioral.frequent_memories).into_iter());
        feed(&mut hasher, "user_patterns", sorted(&behavioral.user_patterns).into_iter());

        let git = &self.git;
        feed(&mut hasher, "branch", git.current_branch.iter());
        feed(&mut hasher, "modified", sorted(&git.recently_modified_files).into_iter());
        feed(&mut hasher, "uncommitted", sorted(&git.uncommitted_files).into_iter());

        hasher.finalize().to_hex().to_string()
    }
}

impl Default for PredictionSignals {
    fn default() -> Self {
        Self::new(
            FileSignals::default(),
            TemporalSignals::default(),
            BehavioralSignals::default(),
            GitSignals::default(),
        )
    }
}

fn sorted(items: &[String]) -> Vec<&String> {
    let mut items: Vec<&String> = items.iter().collect();
    items.sort();
    items
}

fn feed<I, T>(hasher: &mut blake3::Hasher, label: &str, items: I)
where
    I: Iterator<Item = T>,
    T: AsRef<str>,
{
    hasher.update(label.as_bytes());
    hasher.update(&[0x1e]);
    for item in items {
        hasher.update(item.as_ref().as_bytes());
        hasher.update(&[0x1f]);
    }
}
