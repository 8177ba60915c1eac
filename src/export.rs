//! CSV export of normalized tracks
use std::{
    io::Write,
    path::{Path, PathBuf},
};

use csv::Writer;
use log::info;

use crate::{campaign::Campaign, epoch::format_iso, track::Track, Error};

const HEADER: [&str; 6] = [
    "Epoch",
    "Epoch [s]",
    "Longitude",
    "Latitude",
    "Quality",
    "Interval [min]",
];

/// Writes normalized [Track] into any [Write]able, chronologically.
pub fn write_track<W: Write>(track: &Track, w: W) -> Result<(), Error> {
    let mut w = Writer::from_writer(w);
    w.write_record(HEADER)?;
    for (fix, dt) in track.fixes.iter().zip(track.intervals()) {
        w.write_record(&[
            format_iso(fix.epoch()),
            format!("{:.3}", fix.epoch_seconds()),
            fix.longitude.to_string(),
            fix.latitude.to_string(),
            fix.quality.to_string(),
            format!("{:.3}", dt),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Writes normalized [Track] to given file
pub fn write_track_csv<P: AsRef<Path>>(track: &Track, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    let fd = std::fs::File::create(path)?;
    write_track(track, fd)?;
    info!("{} fixes exported: \"{}\"", track.platform, path.display());
    Ok(())
}

/// Exports both tracks of a [Campaign], reduced to the time frame of interest,
/// into given folder. Returns the generated files (glider first).
pub fn write_windowed_csv<P: AsRef<Path>>(
    campaign: &Campaign,
    folder: P,
) -> Result<Vec<PathBuf>, Error> {
    let (glider, ship) = campaign.windowed()?;
    let (start, end) = (&campaign.cfg.window.start, &campaign.cfg.window.end);
    let mut generated = Vec::with_capacity(2);
    for track in [glider, ship] {
        let filename = format!("{} pings between {} and {}.csv", track.platform, start, end)
            .replace(':', "-");
        let path = folder.as_ref().join(filename);
        write_track_csv(&track, &path)?;
        generated.push(path);
    }
    Ok(generated)
}
