use std::env;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::Error;
use clap::{values_t, App, AppSettings, Arg};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};

use truthtree::config::{TableauConfig, TableauConfigUpdate};
use truthtree::{Tableau, Verdict};

const DEMO_INPUT: &str = "A -> (B | C), A, ~B, C -> D, ~D";

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("TRUTHTREE_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn banner() {
    info!("This is truthtree {}", env!("TRUTHTREE_VERSION"));
    info!(
        "  {} build - {}",
        env!("TRUTHTREE_PROFILE"),
        env!("TRUTHTREE_RUSTC_VERSION")
    );
}

fn main_with_err() -> Result<i32, Error> {
    let matches = App::new("truthtree")
        .version(env!("TRUTHTREE_VERSION"))
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("[INPUT] 'Comma separated list of formulas (runs a demo if omitted)'")
        .arg_from_usage("[config-file] --config=[FILE] 'Read parameters from configuration file'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help(
                    "Specify a single config option, see 'truthtree -C help' for a list of \
                     options.",
                )
                .multiple(true)
                .number_of_values(1),
        )
        .arg_from_usage("--no-tree 'Do not print the expanded tree'")
        .get_matches();

    let config_options = values_t!(matches, "config-option", String).unwrap_or_default();

    if config_options.iter().any(|option| option == "help") {
        print!("{}", TableauConfig::help());
        return Ok(0);
    }

    init_logging();
    banner();

    let mut config_update = TableauConfigUpdate::new();

    if let Some(config_path) = matches.value_of("config-file") {
        let mut config_contents = String::new();
        fs::File::open(config_path)?.read_to_string(&mut config_contents)?;

        config_update.merge(toml::from_str(&config_contents)?);
    }

    for config_option in config_options {
        config_update.merge(toml::from_str(&config_option)?);
    }

    let input = match matches.value_of("INPUT") {
        Some(input) => input,
        None => {
            info!("No input provided; running demo: {}", DEMO_INPUT);
            DEMO_INPUT
        }
    };

    let mut tableau = Tableau::parse(input)?;
    tableau.config(&config_update)?;

    info!("Parsed {} formulas", tableau.root().formulas().len());

    let verdict = tableau.expand_all();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    if !matches.is_present("no-tree") {
        tableau.write_tree(&mut stdout)?;
    }

    match verdict {
        Verdict::Open => {
            writeln!(stdout, "s SATISFIABLE")?;
            write!(stdout, "v")?;
            for literal in tableau.model().unwrap_or_default() {
                write!(stdout, " {}", literal)?;
            }
            writeln!(stdout)?;
            Ok(10)
        }
        Verdict::Closed => {
            writeln!(stdout, "s UNSATISFIABLE")?;
            Ok(20)
        }
        Verdict::Unknown => {
            writeln!(stdout, "s UNKNOWN")?;
            Ok(0)
        }
    }
}
