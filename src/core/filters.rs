use crate::models::{Experience, ExperienceId, Tag};
use std::collections::HashSet;

/// Comparison operator of a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
}

/// Right-hand side of a filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
}

/// A single `field <op> value` predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: String,
    pub op: Operator,
    pub value: FilterValue,
}

impl Clause {
    pub fn eq_text(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            op: Operator::Eq,
            value: FilterValue::Text(value.to_string()),
        }
    }

    pub fn is_true(field: &str) -> Self {
        Self {
            field: field.to_string(),
            op: Operator::Eq,
            value: FilterValue::Bool(true),
        }
    }
}

/// Disjunction of clauses
///
/// An empty filter matches nothing. Store clients must not translate it into
/// an unfiltered query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnyOf {
    clauses: Vec<Clause>,
}

impl AnyOf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause, ignoring exact duplicates
    pub fn push(&mut self, clause: Clause) {
        if !self.clauses.contains(&clause) {
            self.clauses.push(clause);
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Evaluate the filter against a row
    pub fn matches(&self, experience: &Experience) -> bool {
        self.clauses.iter().any(|clause| match (&clause.op, &clause.value) {
            (Operator::Eq, FilterValue::Bool(expected)) => {
                experience.has_trait(&clause.field) == *expected
            }
            (Operator::Eq, FilterValue::Text(expected)) => {
                let actual = match clause.field.as_str() {
                    "category" => experience.category.as_deref(),
                    "niche_category" => experience.niche_category.as_deref(),
                    "title" => Some(experience.title.as_str()),
                    other => experience.attributes.get(other).and_then(|v| v.as_str()),
                };
                actual == Some(expected.as_str())
            }
        })
    }
}

/// Build the candidate filter for a list of expanded tags
///
/// A tag naming a known trait becomes `trait = true`; any other tag becomes
/// `category = tag OR niche_category = tag`.
pub fn build_tag_filter(tags: &[Tag], traits: &[String]) -> AnyOf {
    let mut filter = AnyOf::new();
    for tag in tags {
        if traits.iter().any(|t| t == tag) {
            filter.push(Clause::is_true(tag));
        } else {
            filter.push(Clause::eq_text("category", tag));
            filter.push(Clause::eq_text("niche_category", tag));
        }
    }
    filter
}

/// Drop every row whose id has already been seen, keeping the first
/// occurrence of each remaining id
pub fn exclude_seen(rows: Vec<Experience>, seen: &HashSet<ExperienceId>) -> Vec<Experience> {
    let mut kept = HashSet::new();
    rows.into_iter()
        .filter(|row| !seen.contains(&row.id))
        .filter(|row| kept.insert(row.id.clone()))
        .collect()
}
