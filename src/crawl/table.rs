// src/crawl/table.rs
// =============================================================================
// The result table: every row the crawl produces, in the order it produced
// them.
//
// One successful fetch adds two rows at once:
//
//   type    level  search          result_1    result_2   ...
//   result  1      cats            kittens     felines
//   query   1      /search?q=cats  /search?q=kittens  /search?q=felines
//
// The "result" row holds what the site displays, the "query" row holds the
// query paths for the same slots. Rows are only ever appended.
// =============================================================================

use serde::Serialize;

use crate::fetch::MAX_RELATED;

/// Which half of a fetch a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    /// Human-readable search terms
    Result,
    /// Query paths matching the terms of the Result row
    Query,
}

impl RecordType {
    /// The value written to the "type" column
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Result => "result",
            RecordType::Query => "query",
        }
    }
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Crawl depth the row was produced at (1 = seed)
    pub level: u32,
    /// The term (Result rows) or query path (Query rows) that was fetched
    pub search: String,
    /// Up to five related values; trailing slots are None
    pub related: [Option<String>; MAX_RELATED],
}

impl SearchRecord {
    /// The filled slots, in order
    pub fn related_values(&self) -> impl Iterator<Item = &str> {
        self.related.iter().flatten().map(String::as_str)
    }

    /// Which slots are filled
    pub fn occupancy(&self) -> [bool; MAX_RELATED] {
        let mut filled = [false; MAX_RELATED];
        for (slot, value) in filled.iter_mut().zip(&self.related) {
            *slot = value.is_some();
        }
        filled
    }
}

/// Append-only store of every SearchRecord of a crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: Vec<SearchRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the Result row and the Query row of one fetch.
    ///
    /// Names and queries are paired by position. Pairs beyond the fifth are
    /// dropped. Nothing is appended when there is no pair at all or when
    /// `level` is lower than the level of the last row; the return value
    /// tells whether rows were added.
    pub fn append_batch(
        &mut self,
        level: u32,
        origin: &str,
        origin_query: &str,
        names: &[String],
        queries: &[String],
    ) -> bool {
        let pairs = names.len().min(queries.len()).min(MAX_RELATED);
        if pairs == 0 {
            return false;
        }

        // levels never decrease
        if self.max_level().is_some_and(|last| level < last) {
            return false;
        }

        self.rows.push(SearchRecord {
            record_type: RecordType::Result,
            level,
            search: origin.to_string(),
            related: fill_slots(&names[..pairs]),
        });
        self.rows.push(SearchRecord {
            record_type: RecordType::Query,
            level,
            search: origin_query.to_string(),
            related: fill_slots(&queries[..pairs]),
        });

        true
    }

    /// Rows of the given type whose level matches `level`, in insertion order.
    pub fn select<P>(&self, record_type: RecordType, level: P) -> Vec<&SearchRecord>
    where
        P: Fn(u32) -> bool,
    {
        self.rows
            .iter()
            .filter(|row| row.record_type == record_type && level(row.level))
            .collect()
    }

    pub fn rows(&self) -> &[SearchRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Level of the most recently appended row
    pub fn max_level(&self) -> Option<u32> {
        self.rows.last().map(|row| row.level)
    }
}

fn fill_slots(values: &[String]) -> [Option<String>; MAX_RELATED] {
    let mut slots: [Option<String>; MAX_RELATED] = Default::default();
    for (slot, value) in slots.iter_mut().zip(values) {
        *slot = Some(value.clone());
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_append_batch_pairs_rows() {
        let mut table = ResultTable::new();
        let added = table.append_batch(
            1,
            "cats",
            "/search?q=cats",
            &strings(&["kittens", "felines"]),
            &strings(&["/q1", "/q2"]),
        );

        assert!(added);
        assert_eq!(table.len(), 2);

        let result = &table.rows()[0];
        assert_eq!(result.record_type, RecordType::Result);
        assert_eq!(result.search, "cats");
        assert_eq!(result.related_values().collect::<Vec<_>>(), vec!["kittens", "felines"]);

        let query = &table.rows()[1];
        assert_eq!(query.record_type, RecordType::Query);
        assert_eq!(query.search, "/search?q=cats");
        assert_eq!(query.related_values().collect::<Vec<_>>(), vec!["/q1", "/q2"]);

        assert_eq!(result.occupancy(), query.occupancy());
        assert_eq!(result.occupancy(), [true, true, false, false, false]);
    }

    #[test]
    fn test_empty_batch_adds_nothing() {
        let mut table = ResultTable::new();
        assert!(!table.append_batch(1, "cats", "/search?q=cats", &[], &[]));
        assert!(table.is_empty());
    }

    #[test]
    fn test_lower_level_batch_is_rejected() {
        let mut table = ResultTable::new();
        table.append_batch(2, "a", "/a", &strings(&["b"]), &strings(&["/b"]));

        let added = table.append_batch(1, "c", "/c", &strings(&["d"]), &strings(&["/d"]));

        assert!(!added);
        assert_eq!(table.len(), 2);
        assert_eq!(table.max_level(), Some(2));

        assert!(table.append_batch(2, "c", "/c", &strings(&["d"]), &strings(&["/d"])));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_batch_is_truncated_to_five() {
        let names = strings(&["a", "b", "c", "d", "e", "f", "g"]);
        let queries = strings(&["/a", "/b", "/c", "/d", "/e", "/f", "/g"]);

        let mut table = ResultTable::new();
        table.append_batch(1, "x", "/x", &names, &queries);

        assert_eq!(table.rows()[0].related_values().count(), 5);
        assert_eq!(table.rows()[1].related_values().last(), Some("/e"));
    }

    #[test]
    fn test_select_filters_by_type_and_level() {
        let mut table = ResultTable::new();
        table.append_batch(1, "a", "/a", &strings(&["b"]), &strings(&["/b"]));
        table.append_batch(2, "b", "/b", &strings(&["c"]), &strings(&["/c"]));
        table.append_batch(2, "c", "/c", &strings(&["d"]), &strings(&["/d"]));

        let level_two = table.select(RecordType::Result, |level| level == 2);
        let origins: Vec<_> = level_two.iter().map(|row| row.search.as_str()).collect();
        assert_eq!(origins, vec!["b", "c"]);

        let queries = table.select(RecordType::Query, |_| true);
        assert_eq!(queries.len(), 3);
        assert_eq!(table.max_level(), Some(2));
    }

    #[test]
    fn test_serializes_type_column() {
        let mut table = ResultTable::new();
        table.append_batch(1, "a", "/a", &strings(&["b"]), &strings(&["/b"]));

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["type"], "result");
        assert_eq!(json[1]["type"], "query");
        assert_eq!(json[0]["related"][1], serde_json::Value::Null);
    }
}
