//! In-memory catalog of dictation items across levels.

use crate::matching::AnswerChecker;
use crate::parser::LevelSet;
use crate::types::{
    DictationItem, DictationResult, LevelSummary, Rank, SubLevel, SubLevelSummary,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};

/// Questions drawn for a level exam.
pub const EXAM_QUESTION_COUNT: usize = 5;

/// Sub-level courses for the bundled levels.
pub fn default_sub_levels() -> Vec<SubLevel> {
    vec![
        SubLevel::new("level1a", "level1", "初級1", 1, 34),
        SubLevel::new("level1b", "level1", "初級2", 35, 67),
        SubLevel::new("level1c", "level1", "初級3", 68, 100),
        SubLevel::new("level2a", "level2", "中級1", 1, 30),
        SubLevel::new("level2b", "level2", "中級2", 31, 60),
        SubLevel::new("level3", "level3", "上級", 1, 40),
    ]
}

/// Ordered collection of dictation items, indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    levels: Vec<(String, String)>,
    items: Vec<DictationItem>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from parsed level sets, in the given order.
    pub fn from_levels(sets: impl IntoIterator<Item = LevelSet>) -> Self {
        let mut catalog = Self::new();
        for set in sets {
            catalog.add_level(set);
        }
        catalog
    }

    /// Append a level. Items whose ID is already present are skipped.
    pub fn add_level(&mut self, set: LevelSet) {
        let mut added = 0;
        for item in set.items {
            if self.by_id.contains_key(&item.id) {
                tracing::warn!(item = %item.id, "duplicate item id, skipping");
                continue;
            }
            self.by_id.insert(item.id.clone(), self.items.len());
            self.items.push(item);
            added += 1;
        }

        tracing::info!(level = %set.level, items = added, "loaded level");

        if !self.levels.iter().any(|(level, _)| *level == set.level) {
            self.levels.push((set.level, set.title));
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[DictationItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&DictationItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// Items of a level, optionally restricted to one set.
    pub fn level_items(&self, level: &str, set_index: Option<u32>) -> Vec<&DictationItem> {
        self.items
            .iter()
            .filter(|item| item.level == level)
            .filter(|item| set_index.map_or(true, |s| item.set_index == s))
            .collect()
    }

    /// Per-level counts, in load order.
    pub fn levels(&self) -> Vec<LevelSummary> {
        self.levels
            .iter()
            .map(|(level, title)| {
                let items = self.level_items(level, None);
                let sets: BTreeSet<u32> = items.iter().map(|item| item.set_index).collect();
                LevelSummary {
                    level: level.clone(),
                    title: title.clone(),
                    item_count: items.len(),
                    set_count: sets.len(),
                }
            })
            .collect()
    }

    /// Counts for each sub-level whose level is loaded, in definition order.
    pub fn sub_levels(&self, defs: &[SubLevel]) -> Vec<SubLevelSummary> {
        defs.iter()
            .filter(|def| self.levels.iter().any(|(level, _)| *level == def.level))
            .map(|def| {
                let items: Vec<&DictationItem> = self
                    .level_items(&def.level, None)
                    .into_iter()
                    .filter(|item| def.contains_set(item.set_index))
                    .collect();
                let sets: BTreeSet<u32> = items.iter().map(|item| item.set_index).collect();
                SubLevelSummary {
                    sub_level: def.clone(),
                    item_count: items.len(),
                    set_count: sets.len(),
                }
            })
            .collect()
    }

    /// Up to `count` distinct items of a level in random order.
    pub fn exam_items<R: Rng + ?Sized>(
        &self,
        level: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<&DictationItem> {
        let mut items = self.level_items(level, None);
        items.shuffle(rng);
        items.truncate(count);
        items
    }

    /// Check an answer for a catalog item using its answer text and blanks.
    pub fn check_item(
        &self,
        checker: &AnswerChecker,
        id: &str,
        user_answer: &str,
    ) -> Option<DictationResult> {
        let item = self.get(id)?;
        let result = checker.check(user_answer, &item.answer_text, &item.blanks);

        Some(DictationResult {
            item_id: item.id.clone(),
            user_answer: user_answer.to_string(),
            is_correct: result.is_correct,
            accuracy: result.accuracy,
            rank: Rank::from_accuracy(result.accuracy),
            segments: result.segments,
        })
    }
}
