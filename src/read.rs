use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read statement file at '{}'", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Statement could not be decoded as {encoding}")]
    Decode { encoding: &'static str },
    #[error("Cannot use '{0}' as delimiter")]
    InvalidDelimiter(char),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("The statement did not contain a header line")]
    EmptyInput,
    #[error("Row in line {line} had {fields} fields, but the header only names {columns} columns")]
    RowTooLong {
        line: u64,
        fields: usize,
        columns: usize,
    },
}

#[derive(Clone, Debug)]
pub struct Options {
    /// The encoding of the statement file.
    pub encoding: &'static encoding_rs::Encoding,
    pub delimiter: char,
    /// The beginning of the line that ends the free-text preamble, if the statement has one.
    pub preamble_marker: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            encoding: encoding_rs::WINDOWS_1250,
            delimiter: ';',
            preamble_marker: "gebuchte Ums".into(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

pub(crate) mod function {
    use crate::read::{Error, Options};
    use crate::{parse_number, Cell, Table};
    use std::path::Path;

    /// Read the statement at `path`.
    pub fn read(path: impl AsRef<Path>, options: &Options) -> Result<Table, Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| Error::Io {
            path: path.to_owned(),
            source: err,
        })?;
        log::debug!("Read {} bytes from '{}'", bytes.len(), path.display());
        read_from(&bytes, options)
    }

    /// Parse the encoded statement in `bytes`, skipping its preamble if there is one.
    pub fn read_from(
        bytes: &[u8],
        Options {
            encoding,
            delimiter,
            preamble_marker,
            thousands_separator,
            decimal_separator,
        }: &Options,
    ) -> Result<Table, Error> {
        let delimiter: u8 = (*delimiter)
            .try_into()
            .map_err(|_| Error::InvalidDelimiter(*delimiter))?;
        let text = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or(Error::Decode {
                encoding: encoding.name(),
            })?;
        let csv_text = match strip_preamble(&text, preamble_marker) {
            Some((skipped_lines, rest)) => {
                log::debug!("Skipped a preamble of {skipped_lines} lines");
                rest
            }
            None => &*text,
        };

        let mut csv = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_text.as_bytes());
        let mut headers: Vec<String> = csv.headers()?.iter().map(ToOwned::to_owned).collect();
        if headers.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut rows = Vec::<Vec<String>>::new();
        for record in csv.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(Error::RowTooLong {
                    line: record.position().map(|pos| pos.line()).unwrap_or_default(),
                    fields: record.len(),
                    columns: headers.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(ToOwned::to_owned).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        if has_phantom_last_column(&headers, &rows) {
            log::debug!("Dropping empty trailing column '{}'", headers[headers.len() - 1]);
            headers.pop();
            for row in &mut rows {
                row.pop();
            }
        }

        let numeric: Vec<bool> = (0..headers.len())
            .map(|idx| {
                let mut values = rows
                    .iter()
                    .map(|row| row[idx].as_str())
                    .filter(|value| !value.is_empty())
                    .peekable();
                values.peek().is_some()
                    && values.all(|value| {
                        parse_number(value, *thousands_separator, *decimal_separator).is_some()
                    })
            })
            .collect();

        let mut table = Table::new(headers);
        table.rows = rows
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(&numeric)
                    .map(|(value, is_numeric)| {
                        match parse_number(value, *thousands_separator, *decimal_separator) {
                            Some(number) if *is_numeric => Cell::Number(number),
                            _ => Cell::from(value.as_str()),
                        }
                    })
                    .collect()
            })
            .collect();
        log::info!(
            "Read statement with {} rows and {} columns",
            table.rows.len(),
            table.headers.len()
        );
        Ok(table)
    }

    /// Return the number of lines up to and including the marker line along with the text after it,
    /// or `None` if no line starts with `marker`.
    pub(crate) fn strip_preamble<'a>(text: &'a str, marker: &str) -> Option<(usize, &'a str)> {
        let mut offset = 0;
        for (idx, line) in text.split_inclusive('\n').enumerate() {
            offset += line.len();
            if line.trim().starts_with(marker) {
                return Some((idx + 1, &text[offset..]));
            }
        }
        None
    }

    /// A trailing separator in the export yields a last column without any value.
    /// Without rows to judge by, only an unnamed last column counts as such.
    fn has_phantom_last_column(headers: &[String], rows: &[Vec<String>]) -> bool {
        let Some(last) = headers.len().checked_sub(1).filter(|last| *last > 0) else {
            return false;
        };
        if rows.is_empty() {
            headers[last].trim().is_empty()
        } else {
            rows.iter().all(|row| row[last].is_empty())
        }
    }

}
