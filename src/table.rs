use std::collections::HashMap;

use anyhow::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::record::{Cell, CharacterRecord};

/// Records materialized into rows over the union of their fields.
///
/// Columns appear in first-seen order; missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<Cell>>>,
}

impl Table {
    pub fn from_records(records: &[CharacterRecord]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut sparse_rows = Vec::with_capacity(records.len());

        for record in records {
            let mut row = Vec::new();
            for (key, cell) in record.fields() {
                let position = *index.entry(key.clone()).or_insert_with(|| {
                    columns.push(key);
                    columns.len() - 1
                });
                row.push((position, cell));
            }
            sparse_rows.push(row);
        }

        let rows = sparse_rows
            .into_iter()
            .map(|sparse| {
                let mut row = vec![None; columns.len()];
                for (position, cell) in sparse {
                    row[position] = Some(cell);
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<Vec<Option<&Cell>>> {
        let position = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[position].as_ref()).collect())
    }

    /// JSON array with one object per row, keys in column order
    pub fn to_json(&self) -> Result<String> {
        let rows: Vec<RowView<'_>> = self
            .rows
            .iter()
            .map(|cells| RowView {
                columns: &self.columns,
                cells,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(vec![]);

        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(
                row.iter()
                    .map(|cell| cell.as_ref().map(Cell::display).unwrap_or_default()),
            )?;
        }

        Ok(String::from_utf8(writer.into_inner()?)?)
    }

    /// Shape line followed by the first `limit` rows
    pub fn to_text(&self, limit: usize) -> String {
        let mut output = format!("shape: ({}, {})\n", self.height(), self.width());

        for (i, row) in self.rows.iter().take(limit).enumerate() {
            output.push_str(&format!("\n[{}]\n", i));
            for (column, cell) in self.columns.iter().zip(row) {
                let value = cell
                    .as_ref()
                    .map(Cell::display)
                    .unwrap_or_else(|| "null".to_string());
                output.push_str(&format!("  {}: {}\n", column, value));
            }
        }

        if self.height() > limit {
            output.push_str(&format!("\n... and {} more\n", self.height() - limit));
        }

        output
    }
}

struct RowView<'a> {
    columns: &'a [String],
    cells: &'a [Option<Cell>],
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}
