use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not write statement to '{}'", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write statement")]
    Output(#[source] std::io::Error),
    #[error("Cannot use '{0}' as delimiter")]
    InvalidDelimiter(char),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("Character '{character}' cannot be represented in {encoding}")]
    Unencodable {
        character: char,
        encoding: &'static str,
    },
}

#[derive(Clone, Debug)]
pub struct Options {
    /// The encoding of the written statement.
    pub encoding: &'static encoding_rs::Encoding,
    pub delimiter: char,
    pub decimal_separator: char,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            encoding: encoding_rs::WINDOWS_1250,
            delimiter: ';',
            decimal_separator: ',',
        }
    }
}

pub(crate) mod function {
    use crate::write::{Error, Options};
    use crate::{format_number, Cell, Table};
    use std::io::Write;
    use std::path::Path;

    /// Write `table` to `path`, replacing whatever is there only once the whole output is ready.
    pub fn write(table: &Table, path: impl AsRef<Path>, options: &Options) -> Result<(), Error> {
        let path = path.as_ref();
        let io_error = |err: std::io::Error| Error::Io {
            path: path.to_owned(),
            source: err,
        };
        let bytes = encode(table, options)?;
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // subject to the umask, like a plainly created file
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let mut file = builder.tempfile_in(dir).map_err(io_error)?;
        if let Ok(existing) = std::fs::metadata(path) {
            file.as_file()
                .set_permissions(existing.permissions())
                .map_err(io_error)?;
        }
        file.write_all(&bytes).map_err(io_error)?;
        file.persist(path).map_err(|err| io_error(err.error))?;
        log::info!("Wrote {} rows to '{}'", table.rows.len(), path.display());
        Ok(())
    }

    /// Write the encoded `table` to `out`.
    pub fn write_to(
        table: &Table,
        mut out: impl std::io::Write,
        options: &Options,
    ) -> Result<(), Error> {
        let bytes = encode(table, options)?;
        out.write_all(&bytes).map_err(Error::Output)
    }

    fn encode(
        table: &Table,
        Options {
            encoding,
            delimiter,
            decimal_separator,
        }: &Options,
    ) -> Result<Vec<u8>, Error> {
        let delimiter: u8 = (*delimiter)
            .try_into()
            .map_err(|_| Error::InvalidDelimiter(*delimiter))?;
        let mut buf = Vec::<u8>::new();
        {
            let mut out = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut buf);
            out.write_record(&table.headers)?;
            for row in &table.rows {
                out.write_record(row.iter().map(|cell| match cell {
                    Cell::Empty => String::new(),
                    Cell::Number(number) => format_number(number, *decimal_separator),
                    Cell::Text(text) => text.clone(),
                }))?;
            }
            out.flush().map_err(|err| Error::Csv(err.into()))?;
        }

        let text = String::from_utf8_lossy(&buf);
        let (bytes, _, had_errors) = encoding.encode(&text);
        if had_errors {
            let character = text
                .chars()
                .find(|c| encoding.encode(c.encode_utf8(&mut [0; 4])).2)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(Error::Unencodable {
                character,
                encoding: encoding.name(),
            });
        }
        Ok(bytes.into_owned())
    }
}
