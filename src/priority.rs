//! Category rotation queues: one focus is popped per generated page.
//!
//! Ordering is ascending by occurrence count with first-seen order breaking
//! ties. This is the long-standing feed order (least common category first,
//! after the lead) and downstream layouts rely on it; DESIGN.md tracks the
//! open product question about flipping it.

use std::collections::{HashMap, VecDeque};

use crate::item::ContentItem;

/// Distinct non-empty keys with counts, in first-seen order.
fn counts_in_order<'a, I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut out: Vec<(String, usize)> = Vec::new();
    for key in keys {
        if key.is_empty() {
            continue;
        }
        match index.get(key) {
            Some(&i) => out[i].1 += 1,
            None => {
                index.insert(key, out.len());
                out.push((key.to_string(), 1));
            }
        }
    }
    out
}

fn ascending_by_count(mut counts: Vec<(String, usize)>) -> VecDeque<String> {
    // stable: equal counts keep first-seen order
    counts.sort_by_key(|(_, n)| *n);
    counts.into_iter().map(|(k, _)| k).collect()
}

/// Lead category first, then the remaining article categories.
pub fn category_rotation(articles: &[ContentItem], lead: &str) -> VecDeque<String> {
    let counts = counts_in_order(
        articles
            .iter()
            .map(|a| a.category.as_str())
            .filter(|c| *c != lead),
    );
    let mut queue = ascending_by_count(counts);
    queue.push_front(lead.to_string());
    queue
}

/// Deal `offers_category` rotation, no leader.
pub fn deal_category_rotation(deals: &[ContentItem]) -> VecDeque<String> {
    ascending_by_count(counts_in_order(
        deals.iter().filter_map(|d| d.offers_category()),
    ))
}

/// The two per-page focus queues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rotation {
    pub categories: VecDeque<String>,
    pub deal_categories: VecDeque<String>,
}

impl Rotation {
    pub fn build(articles: &[ContentItem], deals: &[ContentItem], lead: &str) -> Self {
        Self {
            categories: category_rotation(articles, lead),
            deal_categories: deal_category_rotation(deals),
        }
    }

    /// Next `(category, deals_category)` focus; `None` once a queue runs dry.
    pub fn next_focus(&mut self) -> (Option<String>, Option<String>) {
        (self.categories.pop_front(), self.deal_categories.pop_front())
    }
}
