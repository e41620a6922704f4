// src/export/csv.rs
// =============================================================================
// CSV writers for the result table.
//
// Each writer takes any std::io::Write, so the same code writes to a file in
// export_table() and to a Vec<u8> in the tests below.
// =============================================================================

use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

use crate::crawl::{RecordType, ResultTable, SearchRecord};
use crate::fetch::MAX_RELATED;

const RESULT_COLUMNS: [&str; MAX_RELATED] =
    ["result_1", "result_2", "result_3", "result_4", "result_5"];

/// Every row, with header `type,level,search,result_1..result_5`.
pub fn write_full<W: Write>(table: &ResultTable, writer: W) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().from_writer(writer);

    let mut header = vec!["type", "level", "search"];
    header.extend(RESULT_COLUMNS);
    csv.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![row.record_type.as_str().to_string(), row.level.to_string()];
        record.extend(search_and_related(row));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Result rows only, with header `level,search,result_1..result_5`.
pub fn write_results_only<W: Write>(table: &ResultTable, writer: W) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().from_writer(writer);

    let mut header = vec!["level", "search"];
    header.extend(RESULT_COLUMNS);
    csv.write_record(&header)?;

    for row in table.select(RecordType::Result, |_| true) {
        let mut record = vec![row.level.to_string()];
        record.extend(search_and_related(row));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Result rows as a Gephi edge list: `search;result_1;...;result_5`,
/// no header, every field quoted.
pub fn write_gephi<W: Write>(table: &ResultTable, writer: W) -> csv::Result<()> {
    let mut csv = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    for row in table.select(RecordType::Result, |_| true) {
        csv.write_record(search_and_related(row))?;
    }

    csv.flush()?;
    Ok(())
}

// The search column followed by the five slots, empty slots as ""
fn search_and_related(row: &SearchRecord) -> Vec<String> {
    std::iter::once(row.search.clone())
        .chain(row.related.iter().map(|slot| slot.clone().unwrap_or_default()))
        .collect()
}
