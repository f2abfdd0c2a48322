#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("A date column named '{name}' could not be found in the header")]
    MissingColumn { name: String },
    #[error("Value '{value}' in column '{column}' of row {row} is not a date of the form DDMMYYYY")]
    DateFormat {
        column: String,
        row: usize,
        value: String,
        source: time::error::Parse,
    },
    #[error("Date could not be formatted for display")]
    Format(#[from] time::error::Format),
}

/// A chronologically comparable representation of a cell in a date column.
///
/// Empty cells sort first, then dates, and anything that isn't a date last, by its text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Empty,
    Date(time::Date),
    Text(String),
}

pub(crate) static COMPACT: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[day][month][year]");
pub(crate) static DISPLAY: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[day].[month].[year]");

/// Parse a date like `15012024`. Seven digits are taken to be a date whose leading zero was lost, as in `5012024`.
pub fn parse_compact(date: &str) -> Result<time::Date, time::error::Parse> {
    if date.len() == 7 && date.bytes().all(|b| b.is_ascii_digit()) {
        time::Date::parse(&format!("0{date}"), COMPACT)
    } else {
        time::Date::parse(date, COMPACT)
    }
}

/// Compute the key to sort `cell` by, understanding dates in their compact and their display form.
pub fn sort_key(cell: &crate::Cell) -> SortKey {
    if cell.is_empty() {
        return SortKey::Empty;
    }
    let text = cell.as_text();
    parse_compact(&text)
        .or_else(|_| time::Date::parse(&text, DISPLAY))
        .map(SortKey::Date)
        .unwrap_or_else(|_| SortKey::Text(text.into_owned()))
}

pub(crate) mod function {
    use crate::dates::{parse_compact, Error, DISPLAY};
    use crate::{Cell, Table};

    /// Rewrite all values in `columns` from `DDMMYYYY` to `DD.MM.YYYY`.
    ///
    /// Either all cells are rewritten or, on error, none.
    pub fn normalize(table: &mut Table, columns: &[&str]) -> Result<(), Error> {
        let mut rewrites = Vec::with_capacity(columns.len());
        for name in columns {
            let column = table.column(name).ok_or_else(|| Error::MissingColumn {
                name: name.to_string(),
            })?;
            let mut values = Vec::with_capacity(table.rows.len());
            for (row, cell) in table.column_cells(column).enumerate() {
                if cell.is_empty() {
                    values.push(Cell::Empty);
                    continue;
                }
                let value = cell.as_text();
                let date = parse_compact(&value).map_err(|err| Error::DateFormat {
                    column: name.to_string(),
                    row,
                    value: value.clone().into_owned(),
                    source: err,
                })?;
                values.push(Cell::Text(date.format(DISPLAY)?));
            }
            rewrites.push((column, values));
        }

        for (column, values) in rewrites {
            for (row, value) in table.rows.iter_mut().zip(values) {
                row[column] = value;
            }
        }
        log::info!("Normalized dates in columns {}", columns.join(", "));
        Ok(())
    }
}
