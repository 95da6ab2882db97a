use cortex_core::constants::{MAX_LEVEL1_TAGS, MAX_ONE_LINER_CHARS};
use cortex_core::memory::{BaseMemory, MemoryType, TypedContent};
use cortex_core::models::Level1Output;

use super::{level0, truncate_chars};

const MAX_TAG_CHARS: usize = 24;

/// Level 1: one-liner + top tags + confidence. ~50 tokens.
pub fn compress(memory: &BaseMemory) -> Level1Output {
    Level1Output {
        identity: level0::compress(memory),
        one_liner: one_liner(memory),
        tags: prioritized_tags(memory),
        confidence: memory.confidence.value(),
    }
}

/// The memory's summary when it is short enough, otherwise a line
/// synthesized from the typed payload. Never longer than 150 characters.
pub fn one_liner(memory: &BaseMemory) -> String {
    let summary = memory.summary.trim();
    if !summary.is_empty() && summary.chars().count() <= MAX_ONE_LINER_CHARS {
        return summary.to_string();
    }

    let synthesized = synthesize(&memory.content);
    let source = if synthesized.trim().is_empty() {
        summary
    } else {
        synthesized.trim()
    };
    truncate_chars(source, MAX_ONE_LINER_CHARS)
}

fn synthesize(content: &TypedContent) -> String {
    match content {
        TypedContent::Core(c) => labelled(&c.project_name, &c.description),
        TypedContent::Tribal(c) => labelled(&c.topic, &c.knowledge),
        TypedContent::Procedural(c) => c.title.clone(),
        TypedContent::Semantic(c) => c.knowledge.clone(),
        TypedContent::Episodic(c) => c.interaction.clone(),
        TypedContent::PatternRationale(c) => labelled(&c.pattern_name, &c.rationale),
        TypedContent::ConstraintOverride(c) => labelled(&c.constraint_name, &c.override_reason),
        TypedContent::DecisionContext(c) => c.decision.clone(),
        TypedContent::CodeSmell(c) => labelled(&c.smell_name, &c.description),
    }
}

fn labelled(label: &str, body: &str) -> String {
    match (label.trim(), body.trim()) {
        ("", body) => body.to_string(),
        (label, "") => label.to_string(),
        (label, body) => format!("{label}: {body}"),
    }
}

fn type_keywords(memory_type: MemoryType) -> &'static [&'static str] {
    match memory_type {
        MemoryType::Core => &["project", "core", "overview", "architecture"],
        MemoryType::Tribal => &["warning", "gotcha", "security", "critical", "team"],
        MemoryType::Procedural => &["how-to", "setup", "deploy", "build", "workflow"],
        MemoryType::Semantic => &["concept", "domain", "knowledge", "definition"],
        MemoryType::Episodic => &["session", "debug", "incident", "interaction"],
        MemoryType::PatternRationale => &["pattern", "architecture", "design", "convention"],
        MemoryType::ConstraintOverride => &["constraint", "override", "exception", "security"],
        MemoryType::DecisionContext => &["decision", "adr", "tradeoff", "architecture"],
        MemoryType::CodeSmell => &["smell", "anti-pattern", "bug", "performance", "security"],
    }
}

/// Up to three tags: type-relevant ones first, then the rest, each group in
/// original order. Long tags are cut to 24 characters.
pub fn prioritized_tags(memory: &BaseMemory) -> Vec<String> {
    let keywords = type_keywords(memory.memory_type());
    let (mut ordered, rest): (Vec<&String>, Vec<&String>) = memory.tags.iter().partition(|tag| {
        let lower = tag.to_lowercase();
        keywords.iter().any(|k| lower.contains(k))
    });
    ordered.extend(rest);
    ordered
        .into_iter()
        .take(MAX_LEVEL1_TAGS)
        .map(|tag| truncate_chars(tag, MAX_TAG_CHARS))
        .collect()
}
