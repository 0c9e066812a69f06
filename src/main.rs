use chrono::Local;
use clap::{
    crate_description, crate_version, App, AppSettings, Arg, ArgGroup, ArgMatches, SubCommand,
};
use jotter::cadence::Cadence;
use jotter::config::Config;
use jotter::publish::DEFAULT_ADDR;
use jotter::{entry, publish, scaffold};
use log::error;
use std::error::Error;
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(&app().get_matches()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn app() -> App<'static, 'static> {
    App::new("jotter")
        .version(crate_version!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("project")
                .long("project")
                .short("p")
                .takes_value(true)
                .help(
                    "The project directory (default: the current directory or the \
                     nearest parent holding config.yaml)",
                ),
        )
        .subcommand(
            SubCommand::with_name("new")
                .about("Creates a new journal project")
                .arg(
                    Arg::with_name("day")
                        .long("day")
                        .short("d")
                        .help("One entry per day"),
                )
                .arg(
                    Arg::with_name("week")
                        .long("week")
                        .short("w")
                        .help("One entry per week (default)"),
                )
                .arg(
                    Arg::with_name("month")
                        .long("month")
                        .short("m")
                        .help("One entry per month"),
                )
                .group(ArgGroup::with_name("cadence").args(&["day", "week", "month"]))
                .arg(
                    Arg::with_name("dir")
                        .required(true)
                        .help("The directory to create the project in"),
                ),
        )
        .subcommand(
            SubCommand::with_name("post")
                .about("Creates the entry for today")
                .arg(
                    Arg::with_name("template")
                        .long("template")
                        .short("t")
                        .takes_value(true)
                        .help("The content template to copy (default: content.md.tmpl)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("serve")
                .alias("test")
                .about("Builds the journal into a temporary directory and serves it")
                .arg(
                    Arg::with_name("addr")
                        .long("addr")
                        .takes_value(true)
                        .default_value(DEFAULT_ADDR)
                        .help("The address to listen on"),
                ),
        )
        .subcommand(
            SubCommand::with_name("publish")
                .alias("pub")
                .about("Builds the journal into the publish directory"),
        )
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    match matches.subcommand() {
        ("new", Some(sub)) => {
            let cadence = if sub.is_present("day") {
                Cadence::Daily
            } else if sub.is_present("month") {
                Cadence::Monthly
            } else {
                Cadence::Weekly
            };
            // `dir` is required
            let dir = sub.value_of("dir").unwrap_or_default();
            scaffold::create(&PathBuf::from(dir), cadence)?;
        }
        ("post", Some(sub)) => {
            let config = load_config(matches)?;
            entry::create(&config, Local::now().date_naive(), sub.value_of("template"))?;
        }
        ("serve", Some(sub)) => {
            let config = load_config(matches)?;
            publish::serve(&config, sub.value_of("addr").unwrap_or(DEFAULT_ADDR))?;
        }
        ("publish", Some(_)) => {
            let config = load_config(matches)?;
            publish::publish(&config)?;
        }
        (name, _) => return Err(format!("unknown command `{}`", name).into()),
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<Config, Box<dyn Error>> {
    let dir = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    Ok(Config::from_directory(&dir)?)
}
