#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod campaign;
pub mod cfg;
pub mod epoch;
pub mod export;
pub mod filter;
pub mod plot;
pub mod quality;
pub mod reader;
pub mod report;
pub mod schema;
pub mod series;
pub mod track;

use std::path::PathBuf;

use thiserror::Error;

use crate::track::Platform;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::campaign::Campaign;
    pub use crate::cfg::{Config, DateRange};
    pub use crate::epoch::{format_iso, parse_iso, NormalizedTime};
    pub use crate::filter::{Filter, MaskOperand, Masking, QualityMask, QualityPolicy, TimeWindow};
    pub use crate::quality::Quality;
    pub use crate::reader::Table;
    pub use crate::report::{Chart, Report};
    pub use crate::schema::{ColumnRef, FixSchema};
    pub use crate::track::{Fix, Platform, Track};
    pub use crate::Error;
    // pub re-export
    pub use hifitime::{Duration, Epoch};
}

/// Errors raised by any stage of the pipeline.
/// Processing stops on the first one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("loader: file not found \"{0}\"")]
    MissingFile(PathBuf),
    #[error("loader: failed to parse \"{path}\"")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("extractor ({platform}): {source}")]
    Schema {
        platform: Platform,
        #[source]
        source: schema::Error,
    },
    #[error("time normalizer ({platform}): row #{row}: {source}")]
    TimeParse {
        platform: Platform,
        row: usize,
        #[source]
        source: epoch::ParsingError,
    },
    #[error("filter ({platform}): {what} requested from an empty selection")]
    EmptySelection {
        platform: Platform,
        what: &'static str,
    },
    #[error("configuration: {0}")]
    Config(#[from] cfg::Error),
    #[error("i/o error")]
    Io(#[from] std::io::Error),
    #[error("csv export error")]
    Csv(#[from] csv::Error),
}
