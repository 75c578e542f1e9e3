//! The in-memory homonym index.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::info;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::parallel::WorkerPool;
use crate::phonetic::PhoneticNormalizer;

/// Words sharing one phonetic key, in dictionary order.
///
/// Every member of a group holds the same `Arc`.
pub type HomonymGroup = Arc<[String]>;

/// Mapping from dictionary word to its homonym group.
///
/// Lookups are case-insensitive; stored words keep their dictionary spelling.
/// When two words differ only by case, lookup returns the group of the
/// lowercase spelling if the dictionary has one, otherwise the group of the
/// first spelling in dictionary order.
#[derive(Debug, Clone, Default)]
pub struct HomonymIndex {
    /// Unique words in dictionary order, with the index of their group.
    entries: Vec<(String, usize)>,
    groups: Vec<HomonymGroup>,
    /// Lowercased word to group index.
    lookup: AHashMap<String, usize>,
}

impl HomonymIndex {
    /// Build an index from `words`, computing phonetic keys on `pool`.
    ///
    /// Groups list their members in the order of `words`, whatever the order
    /// in which keys were computed.
    pub fn build(
        words: &[String],
        normalizer: &PhoneticNormalizer,
        pool: &WorkerPool,
    ) -> Result<Self> {
        let keys = pool.map(words, |word| normalizer.normalize(word))?;

        let mut group_of_key: AHashMap<String, usize> = AHashMap::new();
        let mut members: Vec<Vec<String>> = Vec::new();
        let mut word_groups = Vec::with_capacity(words.len());

        for (word, key) in words.iter().zip(keys) {
            let group = *group_of_key.entry(key).or_insert_with(|| {
                members.push(Vec::new());
                members.len() - 1
            });
            members[group].push(word.clone());
            word_groups.push(group);
        }

        let groups: Vec<HomonymGroup> = members.into_iter().map(Arc::from).collect();

        let mut seen = AHashSet::new();
        let entries: Vec<(String, usize)> = words
            .iter()
            .zip(word_groups)
            .filter(|(word, _)| seen.insert(word.as_str()))
            .map(|(word, group)| (word.clone(), group))
            .collect();

        let index = Self::assemble(entries, groups);
        info!(
            "built homonym index: {} words in {} groups",
            index.len(),
            index.group_count()
        );
        Ok(index)
    }

    /// Create an index from `(word, group)` pairs, as stored in a cache
    /// document. Identical groups are shared.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut group_ids: AHashMap<Vec<String>, usize> = AHashMap::new();
        let mut groups: Vec<HomonymGroup> = Vec::new();
        let mut positions: AHashMap<String, usize> = AHashMap::new();
        let mut ordered: Vec<(String, usize)> = Vec::new();

        for (word, members) in entries {
            let group = match group_ids.get(&members) {
                Some(&group) => group,
                None => {
                    groups.push(Arc::from(members.clone()));
                    group_ids.insert(members, groups.len() - 1);
                    groups.len() - 1
                }
            };
            // A repeated key keeps its first position but takes the last group.
            match positions.get(&word) {
                Some(&position) => ordered[position].1 = group,
                None => {
                    positions.insert(word.clone(), ordered.len());
                    ordered.push((word, group));
                }
            }
        }

        Self::assemble(ordered, groups)
    }

    fn assemble(entries: Vec<(String, usize)>, groups: Vec<HomonymGroup>) -> Self {
        let mut lookup: AHashMap<String, usize> = AHashMap::with_capacity(entries.len());
        for (word, group) in &entries {
            let lowered = word.to_lowercase();
            let exact = *word == lowered;
            match lookup.get_mut(&lowered) {
                Some(existing) if exact => *existing = *group,
                Some(_) => {}
                None => {
                    lookup.insert(lowered, *group);
                }
            }
        }

        Self {
            entries,
            groups,
            lookup,
        }
    }

    /// Get the homonym group of `word`, compared lowercased.
    pub fn group(&self, word: &str) -> Option<&HomonymGroup> {
        self.lookup
            .get(&word.to_lowercase())
            .map(|&group| &self.groups[group])
    }

    /// Check if `word` is indexed (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains_key(&word.to_lowercase())
    }

    /// Iterate over `(word, group)` in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HomonymGroup)> {
        self.entries
            .iter()
            .map(|(word, group)| (word.as_str(), &self.groups[*group]))
    }

    /// Indexed words in dictionary order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }

    /// All groups, in order of first appearance.
    pub fn groups(&self) -> &[HomonymGroup] {
        &self.groups
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Write the index as a JSON object, indented by one space.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }
}

impl PartialEq for HomonymIndex {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((a, group_a), (b, group_b))| a == b && group_a == group_b)
    }
}

impl Serialize for HomonymIndex {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, group) in self.iter() {
            map.serialize_entry(word, &group[..])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HomonymIndex {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = HomonymIndex;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from word to its list of homonyms")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(HomonymIndex::from_entries(entries))
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}
