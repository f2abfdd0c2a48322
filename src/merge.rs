#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No input was provided")]
    NoInput,
    #[error("A sort column of index or name '{name}' could not be found in the header")]
    MissingColumn { name: String },
    #[error("The schema changed between statements as seen in change in the head line: {previous} != {current}")]
    SchemaChange { previous: String, current: String },
}

#[derive(Clone, Debug)]
pub struct Options {
    /// The indices or names of the columns to sort the output by, most significant first.
    pub sort_columns: Vec<String>,
    /// Separators to recognize numbers in text cells, so values typed differently per statement still compare equal.
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            sort_columns: crate::DATE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

pub(crate) mod function {
    use crate::dates::sort_key;
    use crate::merge::{Error, Options};
    use crate::{parse_number, Cell, Row, Table};
    use std::collections::HashSet;

    /// Concatenate `tables` of the same shape, drop rows equal to one seen before and sort
    /// the remaining rows chronologically by the sort columns. Rows with equal keys keep their order.
    pub fn merge(
        tables: impl IntoIterator<Item = Table>,
        Options {
            sort_columns,
            thousands_separator,
            decimal_separator,
        }: &Options,
    ) -> Result<Table, Error> {
        let mut merged = None::<Table>;
        let mut seen = HashSet::<Row>::new();
        let mut num_duplicates = 0;

        for table in tables {
            if let Some(previous) = merged.as_ref().filter(|m| m.headers != table.headers) {
                return Err(Error::SchemaChange {
                    previous: previous.headers_line(';'),
                    current: table.headers_line(';'),
                });
            }
            let merged = merged.get_or_insert_with(|| Table::new(table.headers.clone()));
            for row in table.rows {
                let key = row
                    .iter()
                    .map(|cell| comparable(cell, *thousands_separator, *decimal_separator))
                    .collect();
                if !seen.insert(key) {
                    num_duplicates += 1;
                    continue;
                }
                merged.rows.push(row);
            }
        }
        let mut merged = merged.ok_or(Error::NoInput)?;

        let sort_indices = sort_columns
            .iter()
            .map(|name| {
                header_idx(name, &merged.headers)
                    .ok_or_else(|| Error::MissingColumn { name: name.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        merged.rows.sort_by_cached_key(|row| {
            sort_indices
                .iter()
                .map(|idx| sort_key(&row[*idx]))
                .collect::<Vec<_>>()
        });

        log::info!(
            "Merged {} rows, dropping {num_duplicates} duplicates",
            merged.rows.len()
        );
        Ok(merged)
    }

    /// A column is numeric in one statement but text in another if only the latter has a value like `05012024`,
    /// so text that reads as a number compares as that number.
    fn comparable(cell: &Cell, thousands_separator: char, decimal_separator: char) -> Cell {
        match cell {
            Cell::Text(text) => parse_number(text, thousands_separator, decimal_separator)
                .map(Cell::Number)
                .unwrap_or_else(|| cell.clone()),
            _ => cell.clone(),
        }
    }

    /// Return the position of `name_or_index` in `headers` or `None` if it wasn't found.
    /// If `name_or_index` is a number, it will be used as number and not as name.
    fn header_idx(name_or_index: &str, headers: &[String]) -> Option<usize> {
        if let Ok(index) = name_or_index.parse::<usize>() {
            headers.get(index).map(|_| index)
        } else {
            headers.iter().position(|name| name == name_or_index)
        }
    }
}
