//! Column layout of Argos exports.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("table has no data row")]
    NoRows,
    #[error("table has {found} columns, \"{field}\" needs column #{index}")]
    MissingColumn {
        field: &'static str,
        index: usize,
        found: usize,
    },
    #[error("no \"{name}\" column found for \"{field}\"")]
    UnknownHeader { field: &'static str, name: String },
    #[error("row #{row}: failed to parse {field} from \"{content}\"")]
    InvalidCoordinate {
        row: usize,
        field: &'static str,
        content: String,
    },
    #[error("row #{row}: {source}")]
    InvalidQuality {
        row: usize,
        #[source]
        source: crate::quality::Error,
    },
}

/// Locates one field within a table, either by position or by header name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero based column index
    Index(usize),
    /// Header name, compared after trimming
    Name(String),
}

impl ColumnRef {
    fn resolve(&self, field: &'static str, headers: &[String]) -> Result<usize, Error> {
        match self {
            Self::Index(index) => {
                if *index < headers.len() {
                    Ok(*index)
                } else {
                    Err(Error::MissingColumn {
                        field,
                        index: *index,
                        found: headers.len(),
                    })
                }
            },
            Self::Name(name) => headers
                .iter()
                .position(|h| h.trim() == name.trim())
                .ok_or_else(|| Error::UnknownHeader {
                    field,
                    name: name.to_string(),
                }),
        }
    }
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// [FixSchema] describes where each field of a fix is stored.
/// Default layout matches Argos CSV exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixSchema {
    #[serde(default = "default_tag_id")]
    pub tag_id: ColumnRef,
    #[serde(default = "default_message_time")]
    pub message_time: ColumnRef,
    #[serde(default = "default_location_time")]
    pub location_time: ColumnRef,
    #[serde(default = "default_longitude")]
    pub longitude: ColumnRef,
    #[serde(default = "default_latitude")]
    pub latitude: ColumnRef,
    #[serde(default = "default_quality")]
    pub quality: ColumnRef,
}

fn default_tag_id() -> ColumnRef {
    ColumnRef::Index(0)
}

fn default_message_time() -> ColumnRef {
    ColumnRef::Index(2)
}

fn default_location_time() -> ColumnRef {
    ColumnRef::Index(3)
}

fn default_longitude() -> ColumnRef {
    ColumnRef::Index(4)
}

fn default_latitude() -> ColumnRef {
    ColumnRef::Index(5)
}

fn default_quality() -> ColumnRef {
    ColumnRef::Index(6)
}

impl Default for FixSchema {
    fn default() -> Self {
        Self {
            tag_id: default_tag_id(),
            message_time: default_message_time(),
            location_time: default_location_time(),
            longitude: default_longitude(),
            latitude: default_latitude(),
            quality: default_quality(),
        }
    }
}

/// [FixSchema] resolved against one table header
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedSchema {
    pub tag_id: usize,
    pub message_time: usize,
    pub location_time: usize,
    pub longitude: usize,
    pub latitude: usize,
    pub quality: usize,
}

impl FixSchema {
    /// Resolves all column references against this header.
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedSchema, Error> {
        Ok(ResolvedSchema {
            tag_id: self.tag_id.resolve("tag id", headers)?,
            message_time: self.message_time.resolve("message time", headers)?,
            location_time: self.location_time.resolve("location time", headers)?,
            longitude: self.longitude.resolve("longitude", headers)?,
            latitude: self.latitude.resolve("latitude", headers)?,
            quality: self.quality.resolve("quality", headers)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    fn headers(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("col{}", i)).collect()
    }
    #[test]
    fn default_layout() {
        let resolved = FixSchema::default().resolve(&headers(7)).unwrap();
        assert_eq!(resolved.tag_id, 0);
        assert_eq!(resolved.message_time, 2);
        assert_eq!(resolved.location_time, 3);
        assert_eq!(resolved.longitude, 4);
        assert_eq!(resolved.latitude, 5);
        assert_eq!(resolved.quality, 6);
    }
    #[test]
    fn too_few_columns() {
        let err = FixSchema::default().resolve(&headers(6)).unwrap_err();
        assert_eq!(
            err,
            Error::MissingColumn {
                field: "quality",
                index: 6,
                found: 6,
            }
        );
    }
    #[test]
    fn named_columns() {
        let headers = vec![
            "Platform ID No.".to_string(),
            "Loc. quality".to_string(),
            "Latitude".to_string(),
            "Longitude".to_string(),
            "Loc. date".to_string(),
            "Msg Date".to_string(),
        ];
        let schema = FixSchema {
            tag_id: "Platform ID No.".into(),
            message_time: "Msg Date".into(),
            location_time: "Loc. date".into(),
            longitude: "Longitude".into(),
            latitude: "Latitude".into(),
            quality: "Loc. quality".into(),
        };
        let resolved = schema.resolve(&headers).unwrap();
        assert_eq!(resolved.quality, 1);
        assert_eq!(resolved.location_time, 4);

        let schema = FixSchema {
            quality: "Quality".into(),
            ..schema
        };
        assert!(matches!(
            schema.resolve(&headers),
            Err(Error::UnknownHeader { field: "quality", .. })
        ));
    }
    #[test]
    fn json_description() {
        let schema: FixSchema =
            serde_json::from_str(r#"{ "quality": "Loc. quality", "longitude": 7 }"#).unwrap();
        assert_eq!(schema.quality, ColumnRef::Name("Loc. quality".to_string()));
        assert_eq!(schema.longitude, ColumnRef::Index(7));
        assert_eq!(schema.tag_id, ColumnRef::Index(0));
    }
}
