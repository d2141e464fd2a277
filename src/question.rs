//! Question and category types shared by the client and the view.
//!
//! # Data Model
//!
//! The server owns every question. This crate only ever holds a read-only
//! copy of one page of them, plus the category map that came with the last
//! unfiltered listing.
//!
//! ```text
//! GET /questions (JSON)
//!        │
//!        ▼
//!   api.rs (wire types)
//!        │
//!        ▼
//!   Question / CategoryMap (this module)
//!        │
//!        ▼
//!   App state → ui
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category id → display name.
///
/// JSON object keys arrive as numeric strings (`{"1": "Science"}`);
/// serde_json parses them into the integer key.
pub type CategoryMap = BTreeMap<u32, String>;

/// A single trivia question as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub answer: String,
    /// Category id (the server sends either `3` or `"3"`)
    #[serde(deserialize_with = "category_id::deserialize")]
    pub category: u32,
    pub difficulty: u8,
}

impl Question {
    /// Display name of this question's category, if the map knows it
    pub fn category_name<'a>(&self, categories: &'a CategoryMap) -> Option<&'a str> {
        categories.get(&self.category).map(String::as_str)
    }
}

/// Payload for `POST /questions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: u32,
    pub difficulty: u8,
}

/// Lowest and highest difficulty the server accepts
pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Lenient category-id deserializers: accept `3` and `"3"`
pub(crate) mod category_id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Text(String),
    }

    fn parse<E: serde::de::Error>(raw: Raw) -> Result<u32, E> {
        match raw {
            Raw::Num(n) => Ok(n),
            Raw::Text(s) => s.trim().parse().map_err(E::custom),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse(Raw::deserialize(deserializer)?)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(raw) => parse(raw).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_category() {
        let json = r#"{"id": 5, "question": "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?",
                       "answer": "Maya Angelou", "category": 4, "difficulty": 2}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, 5);
        assert_eq!(q.category, 4);
        assert_eq!(q.difficulty, 2);
    }

    #[test]
    fn test_parse_string_category() {
        let json = r#"{"id": 9, "question": "What boxer's original name is Cassius Clay?",
                       "answer": "Muhammad Ali", "category": "4", "difficulty": 1}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.category, 4);
    }

    #[test]
    fn test_parse_bad_category() {
        let json = r#"{"id": 1, "question": "q", "answer": "a", "category": "history", "difficulty": 1}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn test_category_map_string_keys() {
        let json = r#"{"1": "Science", "2": "Art", "6": "Sports"}"#;
        let map: CategoryMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.get(&1).map(String::as_str), Some("Science"));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 6]);
    }

    #[test]
    fn test_category_name() {
        let mut map = CategoryMap::new();
        map.insert(3, "Geography".to_string());
        let q = Question {
            id: 1,
            question: "q".to_string(),
            answer: "a".to_string(),
            category: 3,
            difficulty: 3,
        };
        assert_eq!(q.category_name(&map), Some("Geography"));
        assert_eq!(q.category_name(&CategoryMap::new()), None);
    }
}
