use std::path::PathBuf;

use clap::{error::ErrorKind, value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};

use argos_pings::prelude::{Config, QualityPolicy};

mod workspace;
pub use workspace::Workspace;

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }

    /// Builds self from a custom list of arguments
    #[cfg(test)]
    pub fn from_args<I: IntoIterator<Item = &'static str>>(args: I) -> Result<Self, clap::Error> {
        Ok(Self {
            matches: Self::command().try_get_matches_from(args)?,
        })
    }

    fn command() -> Command {
        Command::new("argos-pings")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Argos tag ping analysis")
            .long_about("argos-pings compares the Argos fixes of a glider
and of its support ship. It renders ping timing, ping quality,
glider locations and time between pings as HTML charts.")
            .arg_required_else_help(true)
            .color(ColorChoice::Always)
            .next_help_heading("Context")
            .arg(Arg::new("glider")
                .short('g')
                .long("glider")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Glider Argos export (semicolon separated, most recent fix first)"))
            .arg(Arg::new("ship")
                .short('s')
                .long("ship")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Ship Argos export (semicolon separated, most recent fix first)"))
            .arg(Arg::new("cfg")
                .short('c')
                .long("cfg")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Session configuration (JSON). See --help for more information.")
                .long_help("Every field is optional, for example:
{
    \"quality_threshold\": 2,
    \"location_policy\": \"LocationPanel\",
    \"window\": { \"start\": \"2024-02-13\", \"end\": \"2024-02-25\" },
    \"interval_window\": { \"start\": \"2024-02-15\", \"end\": \"2024-02-25\" },
    \"interval_range_minutes\": [-2.0, 100.0],
    \"margin_deg\": 0.05
}
Command line options are preferred over this file."))
            .next_help_heading("Filter")
            .arg(Arg::new("crit")
                .long("crit")
                .value_name("QUALITY")
                .value_parser(value_parser!(u8))
                .help("Quality threshold, from 0 (best fixes only) to 3 (include okay fixes)"))
            .arg(Arg::new("start")
                .long("start")
                .value_name("DATE")
                .help("Start of the time frame of interest (inclusive), for example 2024-02-13"))
            .arg(Arg::new("end")
                .long("end")
                .value_name("DATE")
                .help("End of the time frame of interest (inclusive), for example 2024-02-25 12:00:00"))
            .arg(Arg::new("policy")
                .long("policy")
                .value_name("POLICY")
                .value_parser(value_parser!(QualityPolicy))
                .help("High/low quality split of the location panels: \"ordinal\" or \"location-panel\""))
            .next_help_heading("Session")
            .arg(Arg::new("workspace")
                .short('w')
                .long("workspace")
                .value_name("FOLDER")
                .value_parser(value_parser!(PathBuf))
                .help("Define custom workspace location. See --help for more information.")
                .long_help("Workspace is where charts (and CSV exports) are generated.
The $ARGOS_WORKSPACE variable is automatically picked up and always preferred.
When no workspace is defined, we simply create a local folder."))
            .arg(Arg::new("csv")
                .long("csv")
                .action(ArgAction::SetTrue)
                .help("Export normalized tracks as CSV, within the time frame of interest"))
            .arg(Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only report errors"))
    }

    /// Required file argument. Exits with usage on absence.
    fn required_path(&self, id: &str) -> &PathBuf {
        match self.matches.get_one::<PathBuf>(id) {
            Some(path) => path,
            None => Self::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    format!("--{} FILE is required", id),
                )
                .exit(),
        }
    }

    pub fn glider(&self) -> &PathBuf {
        self.required_path("glider")
    }

    pub fn ship(&self) -> &PathBuf {
        self.required_path("ship")
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("cfg")
    }

    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }

    pub fn csv(&self) -> bool {
        self.matches.get_flag("csv")
    }

    /// Workspace root: $ARGOS_WORKSPACE, -w or local folder
    pub fn workspace_path(&self) -> PathBuf {
        if let Ok(workspace) = std::env::var("ARGOS_WORKSPACE") {
            PathBuf::from(workspace)
        } else if let Some(workspace) = self.matches.get_one::<PathBuf>("workspace") {
            workspace.clone()
        } else {
            PathBuf::from("WORKSPACE")
        }
    }

    /// Applies command line options on top of given [Config]
    pub fn apply(&self, cfg: Config) -> Config {
        let mut cfg = cfg;
        if let Some(crit) = self.matches.get_one::<u8>("crit") {
            cfg = cfg.with_quality_threshold(*crit);
        }
        if let Some(policy) = self.matches.get_one::<QualityPolicy>("policy") {
            cfg = cfg.with_location_policy(*policy);
        }
        let start = self.matches.get_one::<String>("start");
        let end = self.matches.get_one::<String>("end");
        if start.is_some() || end.is_some() {
            let start = start.cloned().unwrap_or(cfg.window.start.clone());
            let end = end.cloned().unwrap_or(cfg.window.end.clone());
            cfg = cfg.with_window(&start, &end);
        }
        cfg
    }
}
