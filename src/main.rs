//! Command line tool to analyze Argos tag pings of a glider
//! and its support ship. Refer to README for command line arguments.

mod cli;

use cli::{Cli, Workspace};

use argos_pings::{
    export::write_windowed_csv,
    prelude::{Campaign, Config, Error, Report},
};

use env_logger::{Builder, Target};
use log::{info, LevelFilter};

pub fn main() -> Result<(), Error> {
    let cli = Cli::new();

    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false);
    if cli.quiet() {
        builder.filter_level(LevelFilter::Error);
    }
    builder.init();

    let cfg = match cli.config_path() {
        Some(path) => {
            info!("loading configuration \"{}\"", path.display());
            Config::from_path(path)?
        },
        None => Config::default(),
    };
    let cfg = cli.apply(cfg);
    cfg.validate()?;

    let campaign = Campaign::from_paths(cli.glider(), cli.ship(), cfg)?;
    campaign.summary()?;

    let workspace = Workspace::new(cli.workspace_path())?;

    if cli.csv() {
        write_windowed_csv(&campaign, &workspace.root)?;
    }

    Report::new(&campaign, &workspace.root).generate()?;
    Ok(())
}
