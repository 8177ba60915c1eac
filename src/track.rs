//! Fixes and tracks
use std::path::Path;

use hifitime::Epoch;
use itertools::{Itertools, MinMaxResult};
use log::debug;

use crate::{
    epoch::{normalize, NormalizedTime},
    quality::Quality,
    reader::Table,
    schema::{Error as SchemaError, FixSchema},
    series, Error,
};

/// Tracked device
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Mobile underwater platform
    Glider,
    /// Surface vessel
    Ship,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Glider => f.write_str("Glider"),
            Self::Ship => f.write_str("Ship"),
        }
    }
}

/// One Argos fix
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    /// Tag identifier, as found on this row
    pub tag_id: String,
    /// Message time, kept as found in the file
    pub message_time: String,
    /// Location time, kept as found in the file
    pub location_time: String,
    /// Normalized location time
    pub time: NormalizedTime,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Location class
    pub quality: Quality,
}

impl Fix {
    /// Calendar value of this fix
    pub fn epoch(&self) -> Epoch {
        self.time.epoch
    }
    /// UNIX seconds of this fix
    pub fn epoch_seconds(&self) -> f64 {
        self.time.epoch_seconds
    }
}

/// [Track] gathers all fixes of one [Platform], oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Tracked device
    pub platform: Platform,
    /// Argos tag identifier
    pub tag_id: String,
    /// Fixes, in chronological order
    pub fixes: Vec<Fix>,
}

impl Track {
    /// Builds a [Track] from a loaded [Table].
    /// Argos exports list the most recent fix first: rows are reversed
    /// so the resulting track is in chronological order.
    pub fn from_table(
        platform: Platform,
        table: &Table,
        schema: &FixSchema,
    ) -> Result<Self, Error> {
        let schema_err = |source: SchemaError| Error::Schema { platform, source };

        let columns = schema.resolve(&table.headers).map_err(schema_err)?;
        if table.is_empty() {
            return Err(schema_err(SchemaError::NoRows));
        }

        let times = normalize(table.column(columns.location_time)).map_err(|(index, e)| {
            Error::TimeParse {
                platform,
                row: index + 1,
                source: e,
            }
        })?;

        let mut fixes = Vec::with_capacity(table.rows.len());

        for (index, (row, time)) in table.rows.iter().zip(times).enumerate() {
            let row_num = index + 1;
            let field = |i: usize| row.get(i).unwrap_or("");

            let longitude = field(columns.longitude).parse::<f64>().map_err(|_| {
                schema_err(SchemaError::InvalidCoordinate {
                    row: row_num,
                    field: "longitude",
                    content: field(columns.longitude).to_string(),
                })
            })?;

            let latitude = field(columns.latitude).parse::<f64>().map_err(|_| {
                schema_err(SchemaError::InvalidCoordinate {
                    row: row_num,
                    field: "latitude",
                    content: field(columns.latitude).to_string(),
                })
            })?;

            let quality = field(columns.quality).parse::<Quality>().map_err(|e| {
                schema_err(SchemaError::InvalidQuality {
                    row: row_num,
                    source: e,
                })
            })?;

            fixes.push(Fix {
                tag_id: field(columns.tag_id).to_string(),
                message_time: field(columns.message_time).to_string(),
                location_time: field(columns.location_time).to_string(),
                time,
                longitude,
                latitude,
                quality,
            });
        }

        let tag_id = fixes[0].tag_id.clone();

        let mut track = Self {
            platform,
            tag_id,
            fixes,
        };

        track.reverse();

        debug!(
            "{} (tag: {}): {} fixes extracted",
            platform,
            track.tag_id,
            track.len()
        );

        Ok(track)
    }

    /// Loads a [Track] from an Argos export file
    pub fn from_path<P: AsRef<Path>>(
        platform: Platform,
        path: P,
        schema: &FixSchema,
    ) -> Result<Self, Error> {
        let table = Table::from_path(path)?;
        Self::from_table(platform, &table, schema)
    }

    /// Reverses fix order
    pub fn reverse(&mut self) {
        self.fixes.reverse();
    }

    /// Number of fixes
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// True if this track has no fix (for example, once masked)
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Returns the most recent fix.
    /// Errors with [Error::EmptySelection] if this track is empty.
    pub fn most_recent(&self) -> Result<&Fix, Error> {
        self.fixes.last().ok_or(Error::EmptySelection {
            platform: self.platform,
            what: "most recent fix",
        })
    }

    /// Iterates over calendar values
    pub fn epochs(&self) -> impl Iterator<Item = Epoch> + '_ {
        self.fixes.iter().map(|f| f.epoch())
    }

    /// Iterates over UNIX seconds
    pub fn epoch_seconds(&self) -> impl Iterator<Item = f64> + '_ {
        self.fixes.iter().map(|f| f.epoch_seconds())
    }

    /// Iterates over longitudes
    pub fn longitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.fixes.iter().map(|f| f.longitude)
    }

    /// Iterates over latitudes
    pub fn latitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.fixes.iter().map(|f| f.latitude)
    }

    /// Iterates over qualities
    pub fn qualities(&self) -> impl Iterator<Item = Quality> + '_ {
        self.fixes.iter().map(|f| f.quality)
    }

    /// Minutes elapsed since previous fix, 0 for the first one.
    pub fn intervals(&self) -> Vec<f64> {
        series::intervals_minutes(&self.epoch_seconds().collect::<Vec<_>>())
    }

    /// Returns ((lon_min, lon_max), (lat_min, lat_max)), if not empty.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let lon = match self.longitudes().minmax_by(|a, b| a.total_cmp(b)) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let lat = match self.latitudes().minmax_by(|a, b| a.total_cmp(b)) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        Some((lon, lat))
    }

    /// Returns (first, last) epochs, if not empty.
    pub fn time_span(&self) -> Option<(Epoch, Epoch)> {
        let first = self.fixes.first()?;
        let last = self.fixes.last()?;
        Some((first.epoch(), last.epoch()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::Error as SchemaError;

    const HEADER: &str = "Platform ID No.;Prg No.;Msg Date;Loc. date;Longitude;Latitude;Loc. quality\n";

    fn table(rows: &[&str]) -> Table {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        Table::from_reader(content.as_bytes()).unwrap()
    }

    #[test]
    fn extraction_is_chronological() {
        let table = table(&[
            "238565;1234;2024-02-12 10:00:00;2024-02-12 09:58:00;-20.30;60.10;1",
            "238565;1234;2024-02-11 10:00:00;2024-02-11 09:58:00;-20.20;60.00;2",
            "238565;1234;2024-02-10 10:00:00;2024-02-10 09:58:00;-20.10;59.90;3",
        ]);
        let track = Track::from_table(Platform::Glider, &table, &FixSchema::default()).unwrap();
        assert_eq!(track.tag_id, "238565");
        assert_eq!(track.len(), 3);

        let seconds = track.epoch_seconds().collect::<Vec<_>>();
        assert!(seconds.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(track.fixes[0].location_time, "2024-02-10 09:58:00");
        assert_eq!(track.fixes[0].message_time, "2024-02-10 10:00:00");
        assert_eq!(track.fixes[0].longitude, -20.10);
        assert_eq!(track.fixes[0].latitude, 59.90);
        assert_eq!(track.fixes[0].quality.ordinal(), 3);
        assert_eq!(track.most_recent().unwrap().quality.ordinal(), 1);
    }

    #[test]
    fn double_reversal() {
        let table = table(&[
            "238565;1234;2024-02-12;2024-02-12;-20.30;60.10;1",
            "238565;1234;2024-02-11;2024-02-11;-20.20;60.00;2",
        ]);
        let track = Track::from_table(Platform::Ship, &table, &FixSchema::default()).unwrap();
        let mut twice = track.clone();
        twice.reverse();
        twice.reverse();
        assert_eq!(twice, track);
    }

    #[test]
    fn empty_table() {
        let table = table(&[]);
        match Track::from_table(Platform::Ship, &table, &FixSchema::default()) {
            Err(Error::Schema {
                platform: Platform::Ship,
                source: SchemaError::NoRows,
            }) => {},
            other => panic!("expecting schema error, got {:?}", other),
        }
    }

    #[test]
    fn too_few_columns() {
        let table = Table::from_reader("a;b;c;d;e;f\n1;2;3;2024-02-10;5;6\n".as_bytes()).unwrap();
        assert!(matches!(
            Track::from_table(Platform::Glider, &table, &FixSchema::default()),
            Err(Error::Schema {
                source: SchemaError::MissingColumn { .. },
                ..
            })
        ));
    }

    #[test]
    fn faulty_location_time() {
        let table = table(&[
            "238565;1234;2024-02-12;2024-02-12;-20.30;60.10;1",
            "238565;1234;2024-02-11;;-20.20;60.00;A",
        ]);
        match Track::from_table(Platform::Glider, &table, &FixSchema::default()) {
            Err(Error::TimeParse { row, .. }) => assert_eq!(row, 2),
            other => panic!("expecting time parsing error, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_quality() {
        let table = table(&["238565;1234;2024-02-12;2024-02-12;-20.30;60.10;B"]);
        assert!(matches!(
            Track::from_table(Platform::Glider, &table, &FixSchema::default()),
            Err(Error::Schema {
                source: SchemaError::InvalidQuality { row: 1, .. },
                ..
            })
        ));
    }

    #[test]
    fn faulty_coordinates() {
        let table = table(&["238565;1234;2024-02-12;2024-02-12;west;60.10;1"]);
        assert!(matches!(
            Track::from_table(Platform::Glider, &table, &FixSchema::default()),
            Err(Error::Schema {
                source: SchemaError::InvalidCoordinate {
                    field: "longitude",
                    ..
                },
                ..
            })
        ));
    }

    #[test]
    fn bounds_and_span() {
        let table = table(&[
            "1;1;2024-02-12;2024-02-12;-20.30;60.10;1",
            "1;1;2024-02-11;2024-02-11;-20.10;60.40;2",
            "1;1;2024-02-10;2024-02-10;-20.20;60.00;3",
        ]);
        let track = Track::from_table(Platform::Glider, &table, &FixSchema::default()).unwrap();
        let ((lon_min, lon_max), (lat_min, lat_max)) = track.bounds().unwrap();
        assert_eq!((lon_min, lon_max), (-20.30, -20.10));
        assert_eq!((lat_min, lat_max), (60.00, 60.40));

        let (first, last) = track.time_span().unwrap();
        assert!(first < last);
        assert_eq!(track.intervals(), vec![0.0, 1440.0, 1440.0]);
    }
}
