use std::path::{Path, PathBuf};

use argos_pings::{
    prelude::*,
    schema::Error as SchemaError,
};

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_resources")
        .join("ARGOS")
        .join(name)
}

fn ordinals(track: &Track) -> Vec<u8> {
    track.qualities().map(|q| q.ordinal()).collect()
}

#[test]
fn glider_extraction() {
    let track = Track::from_path(
        Platform::Glider,
        resource("glider.csv"),
        &FixSchema::default(),
    )
    .unwrap();

    assert_eq!(track.platform, Platform::Glider);
    assert_eq!(track.tag_id, "238565");
    assert_eq!(track.len(), 5);
    assert_eq!(ordinals(&track), vec![0, 1, 2, 3, 1]);

    let first = &track.fixes[0];
    assert_eq!(first.location_time, "2024-02-10 09:03:20");
    assert_eq!(first.message_time, "2024-02-10 09:05:58");
    assert_eq!(first.longitude, -20.1022);
    assert_eq!(first.latitude, 59.9410);
    assert_eq!(format_iso(first.epoch()), "2024-02-10 09:03:20");

    let most_recent = track.most_recent().unwrap();
    assert_eq!(most_recent.location_time, "2024-02-20 06:38:50");

    let seconds = track.epoch_seconds().collect::<Vec<_>>();
    assert!(seconds.windows(2).all(|w| w[0] < w[1]));

    let intervals = track.intervals();
    assert_eq!(intervals.len(), 5);
    assert_eq!(intervals[0], 0.0);
    for (i, dt) in intervals.iter().enumerate().skip(1) {
        assert!((dt - (seconds[i] - seconds[i - 1]) / 60.0).abs() < 1.0E-9);
    }
}

#[test]
fn named_columns() {
    let schema: FixSchema = serde_json::from_str(
        r#"{
            "tag_id": "Platform ID No.",
            "location_time": "Loc. date",
            "quality": "Loc. quality"
        }"#,
    )
    .unwrap();
    let by_name = Track::from_path(Platform::Ship, resource("ship.csv"), &schema).unwrap();
    let by_index =
        Track::from_path(Platform::Ship, resource("ship.csv"), &FixSchema::default()).unwrap();
    assert_eq!(by_name, by_index);
}

#[test]
fn end_to_end_selection() {
    let cfg = Config::default()
        .with_quality_threshold(2)
        .with_window("2024-02-13", "2024-02-18");

    let campaign =
        Campaign::from_paths(resource("glider.csv"), resource("ship.csv"), cfg).unwrap();
    campaign.summary().unwrap();

    let (glider, ship) = campaign.windowed().unwrap();
    assert_eq!(glider.len(), 2);
    assert_eq!(ordinals(&glider), vec![2, 3]);
    assert_eq!(ship.len(), 4);

    let window = campaign.cfg.time_window().unwrap();
    for fix in campaign.glider.fixes.iter() {
        let t = fix.epoch_seconds();
        let inside = window.start.to_unix_seconds() <= t && t <= window.end.to_unix_seconds();
        assert_eq!(glider.fixes.contains(fix), inside);
    }

    let crit = campaign.cfg.threshold().unwrap();

    let (high, low) = glider.partition(QualityPolicy::Ordinal, crit);
    assert_eq!(ordinals(&high), vec![2]);
    assert_eq!(ordinals(&low), vec![3]);

    let (high, low) = glider.partition(QualityPolicy::LocationPanel, crit);
    assert_eq!(ordinals(&high), vec![2, 3]);
    assert!(low.is_empty());

    assert_eq!(
        glider.most_recent().unwrap().location_time,
        "2024-02-17 21:01:05"
    );
}

#[test]
fn empty_window() {
    let cfg = Config::default().with_window("2025-01-01", "2025-01-02");
    let campaign =
        Campaign::from_paths(resource("glider.csv"), resource("ship.csv"), cfg).unwrap();
    let (glider, ship) = campaign.windowed().unwrap();
    assert!(glider.is_empty());
    assert!(ship.is_empty());
    match glider.most_recent() {
        Err(Error::EmptySelection { platform, .. }) => assert_eq!(platform, Platform::Glider),
        other => panic!("expecting empty selection, got {:?}", other),
    }
}

#[test]
fn invalid_settings_are_reported_first() {
    let cfg = Config::default().with_quality_threshold(4);
    assert!(matches!(
        Campaign::from_paths(resource("missing.csv"), resource("ship.csv"), cfg),
        Err(Error::Config(_))
    ));
}

#[test]
fn missing_file() {
    match Track::from_path(
        Platform::Glider,
        resource("missing.csv"),
        &FixSchema::default(),
    ) {
        Err(Error::MissingFile(path)) => assert!(path.ends_with("missing.csv")),
        other => panic!("expecting missing file, got {:?}", other),
    }
}

#[test]
fn ragged_rows() {
    assert!(matches!(
        Track::from_path(
            Platform::Ship,
            resource("ship_ragged.csv"),
            &FixSchema::default()
        ),
        Err(Error::Parse { .. })
    ));
}

#[test]
fn unsupported_quality_code() {
    match Track::from_path(
        Platform::Glider,
        resource("glider_unsupported_quality.csv"),
        &FixSchema::default(),
    ) {
        Err(Error::Schema {
            platform: Platform::Glider,
            source: SchemaError::InvalidQuality { row, .. },
        }) => assert_eq!(row, 2),
        other => panic!("expecting schema error, got {:?}", other),
    }
}
