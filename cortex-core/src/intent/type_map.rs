use super::Intent;
use crate::memory::MemoryType;
use crate::memory::MemoryType::*;

/// Fixed intent → memory type table.
pub fn relevant_types(intent: Intent) -> &'static [MemoryType] {
    match intent {
        Intent::AddFeature => &[PatternRationale, ConstraintOverride, Procedural, DecisionContext],
        Intent::FixBug => &[Tribal, CodeSmell, DecisionContext],
        Intent::Refactor => &[PatternRationale, CodeSmell, DecisionContext],
        Intent::SecurityAudit => &[ConstraintOverride, Tribal, CodeSmell],
        Intent::UnderstandCode => &[PatternRationale, DecisionContext, Tribal, Core],
        Intent::AddTest => &[PatternRationale, Procedural, CodeSmell],
        Intent::ReviewCode => &[CodeSmell, PatternRationale, Tribal],
        Intent::DeployMigrate => &[Procedural, ConstraintOverride, Tribal],
        Intent::Investigate => &[Episodic, Tribal, DecisionContext],
        Intent::Recall => &[Semantic, Tribal, Core],
        Intent::Learn => &[Semantic, Procedural, Episodic],
        Intent::Decide => &[DecisionContext, ConstraintOverride, Semantic],
    }
}
