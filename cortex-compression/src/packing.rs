use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Something to be packed: an id, its token cost and its priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackItem {
    pub id: String,
    pub tokens: usize,
    pub priority: f64,
}

impl PackItem {
    pub fn new(id: impl Into<String>, tokens: usize, priority: f64) -> Self {
        Self {
            id: id.into(),
            tokens,
            priority,
        }
    }
}

/// Ordering used to decide which items are offered to the budget first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingStrategy {
    /// Priority descending, then fewer tokens first.
    #[default]
    Balanced,
    /// Priority descending only; ties keep input order.
    PriorityFirst,
    /// Priority per token descending, then priority descending.
    Density,
}

impl PackingStrategy {
    pub fn compare(self, a: &PackItem, b: &PackItem) -> Ordering {
        match self {
            Self::Balanced => b
                .priority
                .total_cmp(&a.priority)
                .then_with(|| a.tokens.cmp(&b.tokens)),
            Self::PriorityFirst => b.priority.total_cmp(&a.priority),
            Self::Density => density(b)
                .total_cmp(&density(a))
                .then_with(|| b.priority.total_cmp(&a.priority)),
        }
    }
}

fn density(item: &PackItem) -> f64 {
    item.priority / item.tokens.max(1) as f64
}

/// Outcome of a packing run. Both lists are in offer order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackResult {
    pub packed: Vec<PackItem>,
    pub remaining: Vec<PackItem>,
    pub tokens_used: usize,
}

/// Greedily admit `items` into `budget` using a built-in strategy.
pub fn pack(items: Vec<PackItem>, budget: usize, strategy: PackingStrategy) -> PackResult {
    pack_with(items, budget, |a, b| strategy.compare(a, b))
}

/// Greedily admit `items` into `budget`, offering them in the order defined by `order`.
///
/// The sort is stable, so equal items keep their input order. An item is
/// admitted when it fits what is left; items larger than the whole budget
/// always end up in `remaining`.
pub fn pack_with<F>(mut items: Vec<PackItem>, budget: usize, order: F) -> PackResult
where
    F: Fn(&PackItem, &PackItem) -> Ordering,
{
    items.sort_by(|a, b| order(a, b));

    let mut result = PackResult::default();
    let mut left = budget;
    for item in items {
        if item.tokens <= left {
            left -= item.tokens;
            result.tokens_used += item.tokens;
            result.packed.push(item);
        } else {
            result.remaining.push(item);
        }
    }
    result
}
