//! Inverted keyword index and per-category relation sets.
//!
//! Items must be indexed in ingestion order: linking reads the keyword index
//! as it stands when each item arrives, so a different order produces a
//! different graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ItemId, ProcessedItem};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Item id {0} was already indexed")]
    DuplicateId(ItemId),
}

/// Which ids a category's relation set may pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphScope {
    /// Any id sharing a keyword, whatever its category.
    #[default]
    Global,
    /// Only ids indexed under the same category.
    Category,
}

/// keyword -> ids containing it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordIndex {
    entries: BTreeMap<String, BTreeSet<ItemId>>,
}

impl KeywordIndex {
    pub fn get(&self, keyword: &str) -> Option<&BTreeSet<ItemId>> {
        self.entries.get(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<ItemId>)> {
        self.entries.iter()
    }

    pub fn contains_id(&self, id: &ItemId) -> bool {
        self.entries.values().any(|ids| ids.contains(id))
    }
}

/// category -> ids related through a shared keyword
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeGraph {
    entries: BTreeMap<String, BTreeSet<ItemId>>,
}

impl KnowledgeGraph {
    pub fn get(&self, category: &str) -> Option<&BTreeSet<ItemId>> {
        self.entries.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<ItemId>)> {
        self.entries.iter()
    }
}

/// The persisted pair. Field order is the serialized order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeIndexes {
    pub keyword_index: KeywordIndex,
    pub knowledge_graph: KnowledgeGraph,
}

impl KnowledgeIndexes {
    /// Ids carrying `keyword`, in id order.
    pub fn items_for_keyword(&self, keyword: &str) -> Vec<&ItemId> {
        self.keyword_index
            .get(&keyword.to_lowercase())
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }

    /// Ids related within `category`, in id order.
    pub fn related_in(&self, category: &str) -> Vec<&ItemId> {
        self.knowledge_graph
            .get(category)
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct Indexer {
    scope: GraphScope,
    keywords: KeywordIndex,
    graph: KnowledgeGraph,
    category_of: HashMap<ItemId, String>,
}

impl Indexer {
    pub fn new(scope: GraphScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn scope(&self) -> GraphScope {
        self.scope
    }

    pub fn keyword_index(&self) -> &KeywordIndex {
        &self.keywords
    }

    pub fn knowledge_graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn indexed_count(&self) -> usize {
        self.category_of.len()
    }

    pub fn index(&mut self, item: &ProcessedItem) -> Result<(), IndexError> {
        if self.category_of.contains_key(&item.id) {
            return Err(IndexError::DuplicateId(item.id.clone()));
        }
        self.category_of.insert(item.id.clone(), item.category.clone());

        for keyword in &item.keywords {
            self.keywords
                .entries
                .entry(keyword.clone())
                .or_default()
                .insert(item.id.clone());
        }

        let mut related = BTreeSet::new();
        for keyword in &item.keywords {
            let Some(ids) = self.keywords.entries.get(keyword) else {
                continue;
            };
            for id in ids {
                if *id == item.id {
                    continue;
                }
                if self.scope == GraphScope::Category
                    && self.category_of.get(id) != Some(&item.category)
                {
                    continue;
                }
                related.insert(id.clone());
            }
        }

        // The new item is a member too once it relates to anything, so a
        // category's set is symmetric in who-links-whom.
        if !related.is_empty() {
            related.insert(item.id.clone());
        }

        self.graph
            .entries
            .entry(item.category.clone())
            .or_default()
            .extend(related);

        Ok(())
    }

    pub fn into_indexes(self) -> KnowledgeIndexes {
        KnowledgeIndexes {
            keyword_index: self.keywords,
            knowledge_graph: self.graph,
        }
    }
}
