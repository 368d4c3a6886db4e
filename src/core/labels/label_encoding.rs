use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bijection between category names and dense class ids `0..C-1`.
///
/// Ids are handed out in the order names are first seen. Once the dataset is
/// built the encoding is only read, and it is the decode table for every
/// classifier output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoding {
    values: Vec<String>,
    label_to_index: HashMap<String, usize>,
}

impl LabelEncoding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut encoding = Self::new();
        for v in values {
            encoding.encode_or_insert(&v.into());
        }
        encoding
    }

    /// Returns the id of `label`, assigning the next free id on first encounter.
    pub fn encode_or_insert(&mut self, label: &str) -> usize {
        if let Some(&id) = self.label_to_index.get(label) {
            return id;
        }
        let id = self.values.len();
        self.values.push(label.to_string());
        self.label_to_index.insert(label.to_string(), id);
        id
    }

    pub fn encode(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(label).copied()
    }

    pub fn decode(&self, id: usize) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn enumerate_values(&self) -> impl Iterator<Item = (usize, &String)> {
        self.values.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_discovery_order() {
        let mut enc = LabelEncoding::new();
        assert_eq!(enc.encode_or_insert("square"), 0);
        assert_eq!(enc.encode_or_insert("circle"), 1);
        assert_eq!(enc.encode_or_insert("square"), 0);
        assert_eq!(enc.len(), 2);
    }

    #[test]
    fn decode_is_inverse_of_encode() {
        let enc = LabelEncoding::with_values(["cup", "fork", "knife"]);
        for (id, name) in enc.enumerate_values() {
            assert_eq!(enc.encode(name), Some(id));
            assert_eq!(enc.decode(id), Some(name.as_str()));
        }
        assert_eq!(enc.decode(3), None);
        assert_eq!(enc.encode("spoon"), None);
    }

    #[test]
    fn duplicate_values_collapse() {
        let enc = LabelEncoding::with_values(["a", "b", "a"]);
        assert_eq!(enc.len(), 2);
        assert!(!enc.is_empty());
    }
}
