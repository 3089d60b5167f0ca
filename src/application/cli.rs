#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;
use std::str::FromStr;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Equipment;
use crate::domain::models::ExperienceLevel;
use crate::domain::models::WorkoutGoal;
use crate::domain::models::WorkoutRequest;
use crate::domain::models::DEFAULT_DURATION_MINUTES;
use crate::domain::models::DURATION_MINUTES_RANGE;
use crate::domain::services::help_text;

/// What the process should run once the command line has been handled.
#[derive(Debug, PartialEq)]
pub enum Mode {
    Chat,
    Bmi {
        weight_kg: f64,
        height_cm: f64,
    },
    Workout {
        request: WorkoutRequest,
        output: Option<path::PathBuf>,
    },
    Exit,
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start an interactive coaching chat. This is the default when no command is given.");
}

fn subcommand_bmi() -> Command {
    return Command::new("bmi")
        .about("Calculates your BMI and asks your coach for a recommendation.")
        .arg(
            Arg::new("weight")
                .short('w')
                .long("weight")
                .help("Body weight in kilograms, between 20 and 300.")
                .num_args(1)
                .default_value("70")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("height")
                .short('H')
                .long("height")
                .help("Height in centimeters, between 100 and 250.")
                .num_args(1)
                .default_value("170")
                .value_parser(value_parser!(f64)),
        );
}

fn subcommand_workout() -> Command {
    return Command::new("workout")
        .about("Generates a workout plan for your goal, level, and equipment.")
        .arg(
            Arg::new("goal")
                .short('g')
                .long("goal")
                .help("Your primary goal.")
                .num_args(1)
                .default_value(WorkoutGoal::VARIANTS[0])
                .value_parser(PossibleValuesParser::new(WorkoutGoal::VARIANTS)),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .help("Your fitness level.")
                .num_args(1)
                .default_value(ExperienceLevel::VARIANTS[0])
                .value_parser(PossibleValuesParser::new(ExperienceLevel::VARIANTS)),
        )
        .arg(
            Arg::new("equipment")
                .short('e')
                .long("equipment")
                .help("Available equipment. Repeat the flag or separate values with commas.")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_parser(PossibleValuesParser::new(Equipment::VARIANTS)),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .help("Workout duration in minutes, between 15 and 120.")
                .num_args(1)
                .default_value(DEFAULT_DURATION_MINUTES.to_string())
                .value_parser(
                    value_parser!(u32)
                        .range(*DURATION_MINUTES_RANGE.start() as i64..=*DURATION_MINUTES_RANGE.end() as i64),
                ),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory to save the plan to as workout_plan.txt.")
                .num_args(1)
                .value_parser(value_parser!(path::PathBuf)),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("fitcoach")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_bmi())
        .subcommand(subcommand_workout())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("FITCOACH_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("FITCOACH_GEMINI_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Gemini API key used for every request. Get one from Google AI Studio.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("FITCOACH_GEMINI_URL")
                .num_args(1)
                .help(format!("Gemini API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .short('m')
                .long(ConfigKey::Model.to_string())
                .env("FITCOACH_MODEL")
                .num_args(1)
                .help(format!("The Gemini model used for chat, BMI recommendations, and workout plans. [default: {}]", Config::default(ConfigKey::Model)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("FITCOACH_USERNAME")
                .num_args(1)
                .help("Your name displayed next to your questions. [default: $USER]")
                .global(true),
        );
}

fn workout_mode(matches: &ArgMatches) -> Result<Mode> {
    let parse_one = |name: &str| -> Result<String> {
        match matches.get_one::<String>(name) {
            Some(val) => return Ok(val.to_string()),
            None => bail!(format!("Missing value for --{name}")),
        }
    };

    let goal = WorkoutGoal::from_str(&parse_one("goal")?)?;
    let level = ExperienceLevel::from_str(&parse_one("level")?)?;
    let equipment = match matches.get_many::<String>("equipment") {
        Some(values) => values
            .map(|val| return Equipment::from_str(val))
            .collect::<Result<Vec<Equipment>, _>>()?,
        None => vec![],
    };
    let duration = matches
        .get_one::<u32>("duration")
        .copied()
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    return Ok(Mode::Workout {
        request: WorkoutRequest::new(goal, level, equipment, duration)?,
        output: matches.get_one::<path::PathBuf>("output").cloned(),
    });
}

fn bmi_mode(matches: &ArgMatches) -> Result<Mode> {
    let weight_kg = match matches.get_one::<f64>("weight") {
        Some(val) => *val,
        None => bail!("Missing value for --weight"),
    };
    let height_cm = match matches.get_one::<f64>("height") {
        Some(val) => *val,
        None => bail!("Missing value for --height"),
    };

    return Ok(Mode::Bmi {
        weight_kg,
        height_cm,
    });
}

pub async fn dispatch(matches: ArgMatches) -> Result<Mode> {
    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("bmi", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return bmi_mode(subcmd_matches);
        }
        Some(("workout", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return workout_mode(subcmd_matches);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(Mode::Exit);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(Mode::Exit);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(Mode::Exit);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(Mode::Exit);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(Mode::Exit);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(Mode::Exit);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(Mode::Chat);
}

pub async fn parse() -> Result<Mode> {
    return dispatch(build().get_matches()).await;
}
