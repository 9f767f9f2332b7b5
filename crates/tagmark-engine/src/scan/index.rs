use crate::models::record::SpanRecord;

/// The ordered span-record store.
///
/// Append-only during a scan, fully replaceable on rebuild: owners call
/// [`Index::clear`] and re-index rather than mutating records in place.
/// Insertion order is scan order and is preserved through export.
#[derive(Debug, Default, Clone)]
pub struct Index {
    records: Vec<SpanRecord>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Adds one record, preserving scan order.
    pub fn append(&mut self, record: SpanRecord) {
        self.records.push(record);
    }

    /// A read view of the current ordered records.
    pub fn all(&self) -> &[SpanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The export representation: a JSON array of records in scan order.
    ///
    /// Attribute maps are ordered, so repeated rebuilds over an unchanged
    /// corpus serialize byte-identically.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::SpanKind;
    use pretty_assertions::assert_eq;

    fn record(file: &str, line: usize) -> SpanRecord {
        SpanRecord {
            file: file.to_string(),
            line,
            from: 0,
            to: 0,
            text: "t".to_string(),
            tags: vec!["a".to_string()],
            attrs: Default::default(),
            kind: SpanKind::Mark,
        }
    }

    #[test]
    fn append_preserves_order() {
        let mut index = Index::new();
        index.append(record("b.md", 1));
        index.append(record("a.md", 0));
        let files: Vec<_> = index.all().iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["b.md", "a.md"]);
    }

    #[test]
    fn clear_discards_everything() {
        let mut index = Index::new();
        index.append(record("a.md", 0));
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn to_json_is_an_ordered_array() {
        let mut index = Index::new();
        index.append(record("a.md", 0));
        index.append(record("a.md", 2));
        let json = index.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let lines: Vec<_> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["line"].as_u64().unwrap())
            .collect();
        assert_eq!(lines, vec![0, 2]);
    }
}
