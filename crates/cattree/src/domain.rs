//! Domain types for pedigree records.
//!
//! This module contains the identifiers and records the ancestry graph is
//! built from. Records mirror the flat `(cat, mother, father)` rows a
//! pedigree source hands over.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Legacy "no parent" marker used by older pedigree exports.
pub const NO_PARENT_SENTINEL: &str = "-1";

/// Unique identifier for a cat
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CatId(pub String);

impl CatId {
    /// Create a new cat ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CatId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CatId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for CatId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Raw id as it may appear in exported data: a string or an integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for CatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::from(RawId::deserialize(deserializer)?);
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(serde::de::Error::custom("cat id cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Deserialize an optional parent reference.
///
/// `null`, `""`, `-1` and `"-1"` all mean the parent is unknown.
fn parent_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<CatId>, D::Error> {
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(String::from).and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == NO_PARENT_SENTINEL {
            None
        } else {
            Some(CatId::new(trimmed))
        }
    }))
}

/// Role a parent plays for its offspring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRole {
    /// Dam
    Mother,

    /// Sire
    Father,
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRole::Mother => write!(f, "mother"),
            ParentRole::Father => write!(f, "father"),
        }
    }
}

/// The recorded parents of one cat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parents {
    /// Recorded mother, if any
    pub mother: Option<CatId>,

    /// Recorded father, if any
    pub father: Option<CatId>,
}

impl Parents {
    /// Parents with no recorded links.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Get the parent for a role.
    pub fn get(&self, role: ParentRole) -> Option<&CatId> {
        match role {
            ParentRole::Mother => self.mother.as_ref(),
            ParentRole::Father => self.father.as_ref(),
        }
    }

    /// Whether both parents are recorded.
    pub fn is_complete(&self) -> bool {
        self.mother.is_some() && self.father.is_some()
    }

    /// Iterate the recorded parents, mother first.
    pub fn iter(&self) -> impl Iterator<Item = &CatId> {
        self.mother.iter().chain(self.father.iter())
    }
}

/// One row of pedigree data: a cat and its optional parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedigreeRecord {
    /// The cat this row describes
    #[serde(alias = "id")]
    pub cat_id: CatId,

    /// Mother of the cat, if known
    #[serde(default, alias = "mother", deserialize_with = "parent_ref")]
    pub mother_id: Option<CatId>,

    /// Father of the cat, if known
    #[serde(default, alias = "father", deserialize_with = "parent_ref")]
    pub father_id: Option<CatId>,
}

impl PedigreeRecord {
    /// Create a record with both parent links given explicitly.
    pub fn new(
        cat_id: impl Into<CatId>,
        mother_id: Option<CatId>,
        father_id: Option<CatId>,
    ) -> Self {
        Self {
            cat_id: cat_id.into(),
            mother_id,
            father_id,
        }
    }

    /// Create a record for a founder (no recorded parents).
    pub fn founder(cat_id: impl Into<CatId>) -> Self {
        Self::new(cat_id, None, None)
    }

    /// Create a record with both parents known.
    pub fn with_parents(
        cat_id: impl Into<CatId>,
        mother_id: impl Into<CatId>,
        father_id: impl Into<CatId>,
    ) -> Self {
        Self::new(cat_id, Some(mother_id.into()), Some(father_id.into()))
    }

    /// Parent link for a role.
    pub fn parent(&self, role: ParentRole) -> Option<&CatId> {
        match role {
            ParentRole::Mother => self.mother_id.as_ref(),
            ParentRole::Father => self.father_id.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_string_ids() {
        let record: PedigreeRecord =
            serde_json::from_str(r#"{"cat_id": "tom", "mother_id": "molly", "father_id": "felix"}"#)
                .unwrap();
        assert_eq!(record, PedigreeRecord::with_parents("tom", "molly", "felix"));
    }

    #[test]
    fn test_record_parses_integer_ids_and_sentinels() {
        let record: PedigreeRecord =
            serde_json::from_str(r#"{"id": 12, "mother": -1, "father": 7}"#).unwrap();
        assert_eq!(record.cat_id, CatId::new("12"));
        assert_eq!(record.mother_id, None);
        assert_eq!(record.father_id, Some(CatId::new("7")));
    }

    #[test]
    fn test_record_missing_and_blank_parents_are_unknown() {
        let record: PedigreeRecord =
            serde_json::from_str(r#"{"cat_id": "a", "mother_id": "  "}"#).unwrap();
        assert_eq!(record, PedigreeRecord::founder("a"));

        let record: PedigreeRecord =
            serde_json::from_str(r#"{"cat_id": "a", "mother_id": null, "father_id": "-1"}"#)
                .unwrap();
        assert_eq!(record, PedigreeRecord::founder("a"));
    }

    #[test]
    fn test_record_rejects_empty_cat_id() {
        let result = serde_json::from_str::<PedigreeRecord>(r#"{"cat_id": ""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parents_iter_is_mother_first() {
        let parents = Parents {
            mother: Some(CatId::new("m")),
            father: Some(CatId::new("f")),
        };
        let ids: Vec<&str> = parents.iter().map(CatId::as_str).collect();
        assert_eq!(ids, vec!["m", "f"]);
        assert!(parents.is_complete());
        assert!(!Parents::unknown().is_complete());
    }
}
