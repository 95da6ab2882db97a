use cortex_core::memory::{BaseMemory, TypedContent};
use cortex_core::models::{ContextExcerpt, Level2Output};

use super::{level1, truncate_chars};

const EXCERPT_CHARS: usize = 200;
const MAX_EXCERPTS: usize = 3;
const MAX_FILES: usize = 3;

/// Level 2: Level 1 + examples and context. ~200 tokens.
pub fn compress(memory: &BaseMemory) -> Level2Output {
    Level2Output {
        brief: level1::compress(memory),
        examples: excerpts(memory),
        files: memory.linked_files.iter().take(MAX_FILES).cloned().collect(),
    }
}

/// At least one excerpt. Falls back to the summary or the payload body.
fn excerpts(memory: &BaseMemory) -> Vec<ContextExcerpt> {
    let mut raw: Vec<(&str, String)> = Vec::new();
    match &memory.content {
        TypedContent::Core(c) => raw.push(("description", c.description.clone())),
        TypedContent::Tribal(c) => {
            raw.push(("knowledge", c.knowledge.clone()));
            raw.extend(c.warnings.iter().map(|w| ("warning", w.clone())));
            raw.extend(c.consequences.iter().map(|w| ("consequence", w.clone())));
        }
        TypedContent::Procedural(c) => {
            let mut steps = c.steps.clone();
            steps.sort_by_key(|s| s.order);
            raw.extend(
                steps
                    .into_iter()
                    .map(|s| ("step", format!("{}. {}", s.order, s.instruction))),
            );
        }
        TypedContent::Semantic(c) => raw.push(("knowledge", c.knowledge.clone())),
        TypedContent::Episodic(c) => {
            raw.push(("context", c.context.clone()));
            if let Some(outcome) = &c.outcome {
                raw.push(("outcome", outcome.clone()));
            }
        }
        TypedContent::PatternRationale(c) => {
            raw.extend(c.examples.iter().map(|e| ("example", e.clone())));
            raw.push(("business_context", c.business_context.clone()));
        }
        TypedContent::ConstraintOverride(c) => {
            raw.push(("reason", c.override_reason.clone()));
            raw.push(("scope", c.scope.clone()));
        }
        TypedContent::DecisionContext(c) => {
            raw.push(("context", c.context.clone()));
            raw.extend(c.trade_offs.iter().map(|t| ("trade_off", t.clone())));
        }
        TypedContent::CodeSmell(c) => {
            raw.push(("bad", c.bad_example.clone()));
            raw.push(("good", c.good_example.clone()));
        }
    }

    let mut out: Vec<ContextExcerpt> = raw
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .take(MAX_EXCERPTS)
        .map(|(label, text)| ContextExcerpt {
            label: label.to_string(),
            text: truncate_chars(text.trim(), EXCERPT_CHARS),
        })
        .collect();

    if out.is_empty() {
        let fallback = if memory.summary.trim().is_empty() {
            memory.content.text()
        } else {
            memory.summary.clone()
        };
        out.push(ContextExcerpt {
            label: "summary".to_string(),
            text: truncate_chars(fallback.trim(), EXCERPT_CHARS),
        });
    }
    out
}
