#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod modules;

include_modules!();

use crate::model::{Catalog, ResolverConfig};
use crate::processing::parser::channel_name::normalize;
use crate::processing::processor::pipeline::{exec_resolution, prepare_catalog};
use crate::utils::{get_config_file_path, init_logger, read_catalog, read_config, resolve_env_var, write_json};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "channel-resolver")]
#[command(version)]
#[command(about = "Resolves channel identities across catalogs", long_about = None)]
struct Args {
    /// The config file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// The source catalog (json or csv)
    #[arg(short = 's', long = "source")]
    source_file: Option<String>,

    /// The candidate catalog (json or csv)
    #[arg(short = 't', long = "target")]
    target_file: Option<String>,

    /// The report file, stdout if omitted
    #[arg(short = 'o', long = "output")]
    output_file: Option<String>,

    /// log level
    #[arg(short = 'l', long = "log-level", default_missing_value = "info")]
    log_level: Option<String>,

    /// Print the parsed identity of a single channel name
    #[arg(short = None, long = "normalize")]
    normalize: Option<String>,
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args = Args::parse();

    let config_file = get_config_file_path(args.config_file.as_deref());
    init_logger(args.log_level.as_ref(), config_file.as_deref());

    if let Some(name) = args.normalize.as_deref() {
        write_json(None, &normalize(name)).unwrap_or_else(|err| exit!("{}", err));
        return;
    }

    info!("Version: {VERSION}");
    let config = read_config(config_file.as_deref()).unwrap_or_else(|err| exit!("{}", err));

    let (Some(source_file), Some(target_file)) = (args.source_file.as_deref(), args.target_file.as_deref()) else {
        exit!("Source and target catalog are required, see --help");
    };
    let source_path = PathBuf::from(resolve_env_var(source_file));
    let target_path = PathBuf::from(resolve_env_var(target_file));
    let output_path = args.output_file.as_deref().map(|file| PathBuf::from(resolve_env_var(file)));
    print_info(&config, config_file.as_deref(), &source_path, &target_path);

    let source = load_catalog(&source_path);
    let target = load_catalog(&target_path);
    let report = exec_resolution(&config.matching, source, target);
    write_json(output_path.as_deref(), &report).unwrap_or_else(|err| exit!("{}", err));
}

fn catalog_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map_or_else(|| path.display().to_string(), ToString::to_string)
}

fn load_catalog(path: &Path) -> Catalog {
    let records = read_catalog(path).unwrap_or_else(|err| exit!("Can't read catalog {}: {}", path.display(), err));
    prepare_catalog(&catalog_label(path), records).unwrap_or_else(|err| exit!("Can't prepare catalog {}: {}", path.display(), err))
}

fn print_info(config: &ResolverConfig, config_file: Option<&Path>, source_file: &Path, target_file: &Path) {
    info!("Current time: {}", chrono::offset::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("Config file: {}", config_file.map_or_else(|| "not used".to_string(), |p| p.display().to_string()));
    info!("Source file: {}", source_file.display());
    info!("Target file: {}", target_file.display());
    let matching = &config.matching;
    info!("Name weight: {}, accept threshold: {}, report threshold: {}, missing country: {}",
        matching.name_weight, matching.accept_threshold, matching.report_threshold, matching.missing_country);
}
