#[macro_use] extern crate clap;
#[macro_use] extern crate log;

use deploycat::*;
use clap::{Arg, App, AppSettings, SubCommand, ArgMatches};
use std::path::PathBuf;
use std::process;

fn print_error_debug(e: &Error) {
    // unwind the error chain
    for e in e.iter().skip(1) {
        warn!("caused by: {}", e);
    }
}

fn main() {
    let app = App::new("deploycat")
        .version(crate_version!())
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about("Validate kubernetes deployments before they are applied")
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("Increase verbosity"))
        .arg(Arg::with_name("debug")
            .short("d")
            .long("debug")
            .global(true)
            .help("Adds line numbers to log statements"))
        .arg(Arg::with_name("config")
            .short("c")
            .long("config")
            .takes_value(true)
            .global(true)
            .help("Policy config file (defaults to $DEPLOYCAT_CONFIG, ./deploycat.yml, ~/.deploycat.yml)"))

        .subcommand(SubCommand::with_name("validate")
            .arg(Arg::with_name("paths")
                .required(true)
                .multiple(true)
                .help("Manifest files or directories to validate"))
            .arg(Arg::with_name("strict")
                .long("strict")
                .help("Abort on the first document that fails to parse"))
            .arg(Arg::with_name("json")
                .long("json")
                .help("Print the validation reports as json"))
            .about("Parse and validate deployment manifests"))

        .subcommand(SubCommand::with_name("show")
            .arg(Arg::with_name("path")
                .required(true)
                .help("Manifest file to show"))
            .arg(Arg::with_name("json")
                .long("json")
                .help("Output json rather than yaml"))
            .about("Show the normalised deployments in a manifest"))

        .subcommand(SubCommand::with_name("resources")
            .arg(Arg::with_name("paths")
                .required(true)
                .multiple(true)
                .help("Manifest files or directories to sum"))
            .about("Reduce requested and limited resources across deployments"))

        .subcommand(SubCommand::with_name("config")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .about("Run interactions on the policy config")
            .subcommand(SubCommand::with_name("show")
                .about("Show the resolved config"))
            .subcommand(SubCommand::with_name("verify")
                .about("Verify the resolved config")));

    // arg parse
    let args = app.get_matches();
    let name = args.subcommand_name().unwrap_or("deploycat").to_string();
    let _ = run(&args).map_err(|e| {
        error!("{} error: {}", name, e);
        print_error_debug(&e);
        process::exit(1);
    });
    process::exit(0);
}

fn run(args: &ArgMatches) -> Result<()> {
    // always show INFO messages (+1)
    loggerv::Logger::new()
        .verbosity(args.occurrences_of("verbose") + 1)
        .module_path(true)
        .line_numbers(args.is_present("debug"))
        .init()
        .map_err(|e| format!("failed to initialise logging: {}", e))?;

    // Ignore SIGPIPE errors to avoid having to use let _ = write! everywhere
    // See https://github.com/rust-lang/rust/issues/46016
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    dispatch_commands(args)
}

fn paths(args: &ArgMatches, name: &str) -> Vec<PathBuf> {
    args.values_of(name)
        .map(|vs| vs.map(PathBuf::from).collect())
        .unwrap_or_default()
}

/// Dispatch clap arguments to deploycat handlers
fn dispatch_commands(args: &ArgMatches) -> Result<()> {
    if let Some(a) = args.subcommand_matches("validate") {
        let conf = config::resolve(a.value_of("config"))?;
        return validate::manifests(paths(a, "paths"), &conf, a.is_present("strict"), a.is_present("json"));
    }
    else if let Some(a) = args.subcommand_matches("show") {
        let pth = a.value_of("path").map(PathBuf::from).unwrap_or_default();
        return show::deployments(pth, a.is_present("json"));
    }
    else if let Some(a) = args.subcommand_matches("resources") {
        return get::resources(paths(a, "paths"));
    }
    else if let Some(a) = args.subcommand_matches("config") {
        let conf = config::resolve(a.value_of("config"))?;
        if a.subcommand_matches("show").is_some() {
            return config::show(&conf);
        }
        else if a.subcommand_matches("verify").is_some() {
            return config::verify(&conf);
        }
    }
    unreachable!("Subcommand valid, but not implemented")
}
