use chrono::{Duration, Utc};
use cortex_core::memory::types::*;
use cortex_core::memory::{BaseMemory, Citation, Confidence, Importance, MemoryType, TypedContent};

/// Representative payload for each memory type.
pub fn sample_content(memory_type: MemoryType) -> TypedContent {
    match memory_type {
        MemoryType::Core => TypedContent::Core(CoreContent {
            project_name: "billing-service".to_string(),
            description: "Handles invoicing and payment reconciliation.".to_string(),
            metadata: serde_json::Value::Null,
        }),
        MemoryType::Tribal => TypedContent::Tribal(TribalContent {
            topic: "password hashing".to_string(),
            knowledge: "Always use bcrypt for password hashing, never MD5.".to_string(),
            severity: "high".to_string(),
            warnings: vec!["MD5 is cryptographically broken".to_string()],
            consequences: vec!["Credential leaks if MD5 is used".to_string()],
        }),
        MemoryType::Procedural => TypedContent::Procedural(ProceduralContent {
            title: "Cut a release".to_string(),
            steps: vec![
                ProceduralStep {
                    order: 1,
                    instruction: "Bump the version in Cargo.toml".to_string(),
                    completed: false,
                },
                ProceduralStep {
                    order: 2,
                    instruction: "Tag the commit and push the tag".to_string(),
                    completed: false,
                },
            ],
            prerequisites: vec!["Green CI".to_string()],
        }),
        MemoryType::Semantic => TypedContent::Semantic(SemanticContent {
            knowledge: "An invoice is immutable once issued; corrections are credit notes."
                .to_string(),
            source_episodes: vec![],
            consolidation_confidence: 0.9,
        }),
        MemoryType::Episodic => TypedContent::Episodic(EpisodicContent {
            interaction: "Debugged a flaky reconciliation test".to_string(),
            context: "The test depended on wall-clock time".to_string(),
            outcome: Some("Injected a clock".to_string()),
        }),
        MemoryType::PatternRationale => TypedContent::PatternRationale(PatternRationaleContent {
            pattern_name: "repository".to_string(),
            rationale: "Keeps SQL out of the domain layer so it can be tested in isolation."
                .to_string(),
            business_context: "Auditors require the domain rules to be reviewed separately."
                .to_string(),
            examples: vec!["InvoiceRepository::find_open()".to_string()],
        }),
        MemoryType::ConstraintOverride => {
            TypedContent::ConstraintOverride(ConstraintOverrideContent {
                constraint_name: "no-raw-sql".to_string(),
                override_reason: "Bulk reconciliation needs a hand-tuned query.".to_string(),
                approved_by: Some("platform team".to_string()),
                scope: "src/reconcile/bulk.rs".to_string(),
            })
        }
        MemoryType::DecisionContext => TypedContent::DecisionContext(DecisionContextContent {
            decision: "Use Postgres advisory locks for job scheduling".to_string(),
            context: "Only one scheduler may run a job at a time.".to_string(),
            adr_link: Some("docs/adr/0007-scheduler-locks.md".to_string()),
            trade_offs: vec!["Ties scheduling to Postgres".to_string()],
        }),
        MemoryType::CodeSmell => TypedContent::CodeSmell(CodeSmellContent {
            smell_name: "unwrap in request handlers".to_string(),
            description: "A panic in a handler takes down the worker.".to_string(),
            bad_example: "let user = repo.get(id).unwrap();".to_string(),
            good_example: "let user = repo.get(id)?;".to_string(),
            severity: "medium".to_string(),
        }),
    }
}

/// Fluent builder for test memories.
#[derive(Debug, Clone)]
pub struct MemoryBuilder {
    memory: BaseMemory,
}

impl MemoryBuilder {
    pub fn new(id: &str, memory_type: MemoryType) -> Self {
        let summary = format!("{memory_type} memory {id}");
        let mut memory = BaseMemory::new(sample_content(memory_type), summary);
        memory.id = id.to_string();
        memory.confidence = Confidence::new(0.8);
        Self { memory }
    }

    pub fn tribal(id: &str) -> Self {
        Self::new(id, MemoryType::Tribal)
    }

    pub fn content(mut self, content: TypedContent) -> Self {
        self.memory.content = content;
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.memory.summary = summary.to_string();
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.memory.confidence = Confidence::new(confidence);
        self
    }

    pub fn importance(mut self, importance: Importance) -> Self {
        self.memory.importance = importance;
        self
    }

    pub fn access_count(mut self, count: u64) -> Self {
        self.memory.access_count = count;
        self
    }

    /// Move `last_accessed` (and `created_at`, if later) `days` into the past.
    pub fn days_since_access(mut self, days: i64) -> Self {
        let at = Utc::now() - Duration::days(days);
        self.memory.last_accessed = at;
        if self.memory.created_at > at {
            self.memory.created_at = at;
        }
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.memory.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn files(mut self, files: &[&str]) -> Self {
        self.memory.linked_files = files.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn patterns(mut self, patterns: &[&str]) -> Self {
        self.memory.linked_patterns = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Attach `valid` valid and `invalid` invalid citations.
    pub fn citations(mut self, valid: usize, invalid: usize) -> Self {
        let make = |i: usize, ok: bool| Citation {
            file_path: format!("src/cited_{i}.rs"),
            line_start: 1,
            line_end: 10,
            valid: ok,
        };
        self.memory.citations = (0..valid)
            .map(|i| make(i, true))
            .chain((valid..valid + invalid).map(|i| make(i, false)))
            .collect();
        self
    }

    pub fn build(self) -> BaseMemory {
        self.memory
    }
}
