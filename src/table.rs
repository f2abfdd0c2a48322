//! The in-memory shape of a statement: a header line and rows of typed cells.

use std::borrow::Cow;

/// A single value of a statement row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// A value of a column in which all non-empty values of its statement were numbers.
    Number(rust_decimal::Decimal),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The cell as text, with numbers printed using `.` as decimal separator and no thousands separators.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Number(n) => Cow::Owned(n.to_string()),
            Cell::Text(t) => Cow::Borrowed(t),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.into())
        }
    }
}

pub type Row = Vec<Cell>;

/// A statement with its column names and rows, each row having exactly as many cells as there are `headers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    /// Return the index of the column called `name`, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Iterate the cells of the column at `index`.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    pub fn headers_line(&self, delimiter: char) -> String {
        self.headers.join(&*delimiter.encode_utf8(&mut [0; 4]))
    }
}
