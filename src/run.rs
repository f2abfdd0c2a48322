#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No input statement was provided")]
    MissingInput,
    #[error("No output file was provided")]
    MissingOutput,
    #[error("Failed to read statement A")]
    ReadA(#[source] crate::read::Error),
    #[error("Failed to read statement B")]
    ReadB(#[source] crate::read::Error),
    #[error(transparent)]
    Merge(#[from] crate::merge::Error),
    #[error(transparent)]
    NormalizeDates(#[from] crate::dates::Error),
    #[error(transparent)]
    Write(#[from] crate::write::Error),
}

/// The part of a run that failed, each with its own message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// One of the two statements wasn't chosen.
    SelectInput,
    SelectOutput,
    ReadA,
    ReadB,
    Merge,
    Write,
}

impl Stage {
    pub fn message(&self) -> &'static str {
        match self {
            Stage::SelectInput => "Bitte zwei Dateien auswählen",
            Stage::SelectOutput => "Bitte eine Ausgabedatei auswählen",
            Stage::ReadA => "Fehler beim Lesen der Datei A",
            Stage::ReadB => "Fehler beim Lesen der Datei B",
            Stage::Merge => "Fehler beim Zusammenführen der Dateien",
            Stage::Write => "Fehler beim Speichern der Ausgabe",
        }
    }
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::MissingInput => Stage::SelectInput,
            Error::MissingOutput => Stage::SelectOutput,
            Error::ReadA(_) => Stage::ReadA,
            Error::ReadB(_) => Stage::ReadB,
            Error::Merge(_) => Stage::Merge,
            // dates are rewritten while preparing the output
            Error::NormalizeDates(_) | Error::Write(_) => Stage::Write,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    pub read: crate::read::Options,
    pub merge: crate::merge::Options,
    /// The columns to rewrite from `DDMMYYYY` to `DD.MM.YYYY` after merging.
    pub date_columns: Vec<String>,
    pub write: crate::write::Options,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            read: Default::default(),
            merge: Default::default(),
            date_columns: crate::DATE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            write: Default::default(),
        }
    }
}

pub(crate) mod function {
    use crate::run::{Error, Options};
    use std::path::{Path, PathBuf};

    /// Merge the statements at `file_a` and `file_b` into `file_out` and return the path written to.
    pub fn run(
        file_a: impl AsRef<Path>,
        file_b: impl AsRef<Path>,
        file_out: impl AsRef<Path>,
        Options {
            read,
            merge,
            date_columns,
            write,
        }: &Options,
    ) -> Result<PathBuf, Error> {
        let file_a = non_empty(file_a.as_ref()).ok_or(Error::MissingInput)?;
        let file_b = non_empty(file_b.as_ref()).ok_or(Error::MissingInput)?;
        let file_out = non_empty(file_out.as_ref()).ok_or(Error::MissingOutput)?;

        let table_a = crate::read(&file_a, read).map_err(Error::ReadA)?;
        let table_b = crate::read(&file_b, read).map_err(Error::ReadB)?;
        let mut merged = crate::merge([table_a, table_b], merge)?;
        let date_columns: Vec<_> = date_columns.iter().map(String::as_str).collect();
        crate::normalize(&mut merged, &date_columns)?;
        crate::write(&merged, &file_out, write)?;
        Ok(file_out)
    }

    /// Paths typed by hand may carry surrounding whitespace, and all-whitespace counts as no path.
    fn non_empty(path: &Path) -> Option<PathBuf> {
        match path.to_str() {
            Some(path) => {
                let path = path.trim();
                (!path.is_empty()).then(|| PathBuf::from(path))
            }
            None => Some(path.to_owned()),
        }
    }
}
