use cortex_core::errors::CortexResult;
use cortex_core::memory::BaseMemory;
use cortex_core::traits::{IMemoryStorage, MemoryFilter};

use crate::predicted::{PredictedMemory, PredictionStrategy};
use crate::signals::PredictionSignals;

use super::{with_importance_bonus, CandidateSet};

const ACTIVE_FILE_BASE: f64 = 0.7;
const DIRECT_LINK_BONUS: f64 = 0.15;
const IMPORT_BASE: f64 = 0.6;
const RECENT_FILE_BASE: f64 = 0.5;
const GIT_FILE_BASE: f64 = 0.45;
const DIRECTORY_BASE: f64 = 0.4;

/// File-based prediction strategy.
///
/// Predicts memories linked to the active file, its imports, recently opened
/// files, files touched in git, and finally anything under the same directory.
pub struct FileBasedStrategy;

impl FileBasedStrategy {
    pub async fn predict<S: IMemoryStorage>(
        signals: &PredictionSignals,
        storage: &S,
        limit: usize,
    ) -> CortexResult<Vec<PredictedMemory>> {
        let mut candidates = CandidateSet::default();
        let file = &signals.file;

        if let Some(active) = file.active_file.as_deref() {
            for memory in storage.find_by_file(active).await? {
                let prediction = predict(
                    &memory,
                    "linked to the active file",
                    ACTIVE_FILE_BASE,
                    format!("active_file:{active}"),
                )
                .with_component("direct_link", DIRECT_LINK_BONUS, memory.confidence.value());
                candidates.offer(with_importance_bonus(prediction, &memory));
            }
        }

        let linked_sources = file
            .imports
            .iter()
            .map(|f| (f.as_str(), "import", IMPORT_BASE, "linked to an import"))
            .chain(file.recent_files.iter().map(|f| {
                (f.as_str(), "recent_file", RECENT_FILE_BASE, "linked to a recent file")
            }))
            .chain(signals.git.touched_files().into_iter().map(|f| {
                (f, "git_modified", GIT_FILE_BASE, "linked to a file changed in git")
            }));
        for (path, kind, base, reason) in linked_sources {
            for memory in storage.find_by_file(path).await? {
                let prediction = predict(&memory, reason, base, format!("{kind}:{path}"));
                candidates.offer(with_importance_bonus(prediction, &memory));
            }
        }

        if let Some(directory) = file.directory.as_deref() {
            let filter = MemoryFilter {
                linked_file_prefix: Some(directory.to_string()),
                ..MemoryFilter::default()
            }
            .with_limit(limit);
            for memory in storage.search(&filter).await? {
                if candidates.contains(&memory.id) {
                    continue;
                }
                let prediction = predict(
                    &memory,
                    "linked to a file in the same directory",
                    DIRECTORY_BASE,
                    format!("directory:{directory}"),
                );
                candidates.offer(with_importance_bonus(prediction, &memory));
            }
        }

        Ok(candidates.into_vec())
    }
}

fn predict(memory: &BaseMemory, reason: &str, base: f64, signal: String) -> PredictedMemory {
    PredictedMemory::new(memory, PredictionStrategy::FileBased, reason, base, signal)
}
