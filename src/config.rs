//! Settings that may differ between exports, read from a RON file.
//!
//! ```ron
//! Config(
//!     encoding: "windows-1252",
//!     preamble_marker: "gebuchte Ums",
//!     sort_columns: ["Buchungsdatum", "Wertstellung"],
//!     date_columns: ["Buchungsdatum", "Wertstellung"],
//! )
//! ```
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open configuration file for reading")]
    Open(#[from] std::io::Error),
    #[error("Could not decode the configuration")]
    Decode(#[from] ron::de::SpannedError),
    #[error("'{0}' is not a known text encoding")]
    UnknownEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// The label of the encoding used to read and write statements, like `windows-1250`.
    pub encoding: String,
    pub preamble_marker: String,
    pub sort_columns: Vec<String>,
    pub date_columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let columns: Vec<String> = crate::DATE_COLUMNS.iter().map(|c| c.to_string()).collect();
        Config {
            encoding: encoding_rs::WINDOWS_1250.name().into(),
            preamble_marker: crate::read::Options::default().preamble_marker,
            sort_columns: columns.clone(),
            date_columns: columns,
        }
    }
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(ron::de::from_reader(std::fs::File::open(path)?)?)
    }

    /// Turn this configuration into the options of each stage of the pipeline.
    pub fn into_options(self) -> Result<crate::run::Options, Error> {
        let encoding = encoding_rs::Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or(Error::UnknownEncoding(self.encoding))?;
        Ok(crate::run::Options {
            read: crate::read::Options {
                encoding,
                preamble_marker: self.preamble_marker,
                ..Default::default()
            },
            merge: crate::merge::Options {
                sort_columns: self.sort_columns,
                ..Default::default()
            },
            date_columns: self.date_columns,
            write: crate::write::Options {
                encoding,
                ..Default::default()
            },
        })
    }
}
