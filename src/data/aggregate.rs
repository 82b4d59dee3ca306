use std::collections::HashMap;

use serde::Serialize;

use super::model::{AgeGroup, Record};

/// Label shown for records without a gender/age descriptor.
pub const MISSING_DESCRIPTOR: &str = "Not recorded";

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnslaverCount {
    pub enslaver: String,
    /// Non-null `enslaved_name` values in the group.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorCount {
    /// `None` is the missing-descriptor category.
    pub descriptor: Option<String>,
    pub count: usize,
}

impl DescriptorCount {
    pub fn label(&self) -> &str {
        self.descriptor.as_deref().unwrap_or(MISSING_DESCRIPTOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeGroupCount {
    pub group: AgeGroup,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

/// Group by key in first-seen order, folding each row into its group's count.
fn tally<'a, K, F, C>(records: &[&'a Record], key: F, contributes: C) -> Vec<(K, usize)>
where
    K: std::hash::Hash + Eq + Clone,
    F: Fn(&'a Record) -> Option<K>,
    C: Fn(&'a Record) -> bool,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, usize)> = Vec::new();
    for &rec in records {
        let Some(k) = key(rec) else {
            continue;
        };
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, 0));
            groups.len() - 1
        });
        if contributes(rec) {
            groups[slot].1 += 1;
        }
    }
    groups
}

/// Named people per enslaver, largest first.
///
/// Rows without an enslaver are skipped. Ties keep first-seen order.
pub fn enslaver_counts(records: &[&Record]) -> Vec<EnslaverCount> {
    let mut groups = tally(
        records,
        |r| r.enslaver.clone(),
        |r| r.enslaved_name.is_some(),
    );
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
        .into_iter()
        .map(|(enslaver, count)| EnslaverCount { enslaver, count })
        .collect()
}

/// Rows per gender/age descriptor, largest first, with a category for
/// missing descriptors.
pub fn descriptor_counts(records: &[&Record]) -> Vec<DescriptorCount> {
    let mut groups = tally(
        records,
        |r| Some(r.enslaved_genagedesc.clone()),
        |_| true,
    );
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
        .into_iter()
        .map(|(descriptor, count)| DescriptorCount { descriptor, count })
        .collect()
}

/// Rows per age group in label order. Empty groups are omitted.
pub fn age_group_counts(records: &[&Record]) -> Vec<AgeGroupCount> {
    let mut counts = [0usize; AgeGroup::ALL.len()];
    for rec in records {
        counts[rec.age_group as usize] += 1;
    }
    AgeGroup::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(&group, count)| AgeGroupCount { group, count })
        .collect()
}
