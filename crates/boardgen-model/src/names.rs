//! Ordered name → value tables used by `pins` and `aliases`.
//!
//! Unlike a hash map, a [`NameTable`] keeps entries in document order and
//! never lets a repeated name overwrite the first one. TOML documents cannot
//! repeat a key, so repeats only reach [`NameTable::insert`] from tables
//! built in code or from more permissive deserializers.

use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as _, MapAccess, Visitor};

/// An ordered table of unique names mapped to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: Vec<(String, String)>,
}

impl NameTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns `false`, keeping the first value, if the
    /// name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, value.into()));
        true
    }

    /// Look up a value by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the table defines `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of unique entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

impl<'a> IntoIterator for &'a NameTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<'de> Deserialize<'de> for NameTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = NameTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NameTable, A::Error> {
                let mut table = NameTable::new();
                while let Some((name, value)) = map.next_entry::<String, String>()? {
                    if !table.insert(name.clone(), value) {
                        return Err(A::Error::custom(format!("duplicate name `{name}`")));
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut table = NameTable::new();
        table.insert("D5", "P1_08");
        table.insert("A0", "P0_04");
        table.insert("SCL", "P0_11");
        let names: Vec<_> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["D5", "A0", "SCL"]);
    }

    #[test]
    fn repeated_name_keeps_first() {
        let mut table = NameTable::new();
        assert!(table.insert("LED", "P1_15"));
        assert!(!table.insert("LED", "P1_10"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("LED"), Some("P1_15"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut table = NameTable::new();
        assert!(table.insert("led", "P1_15"));
        assert!(table.insert("LED", "P1_10"));
        assert_eq!(table.get("LED"), Some("P1_10"));
        assert_eq!(table.get("Led"), None);
    }

    #[test]
    fn deserializes_in_document_order() {
        #[derive(serde::Deserialize)]
        struct Doc {
            pins: NameTable,
        }
        let doc: Doc = toml::from_str(
            r#"
[pins]
TX = "P0_25"
RX = "P0_24"
A0 = "P0_04"
"#,
        )
        .unwrap();
        let names: Vec<_> = doc.pins.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["TX", "RX", "A0"]);
    }
}
