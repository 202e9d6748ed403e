use crate::model::{LogLevelConfig, ResolverConfig};
use crate::utils::{file_reader, open_file, path_exists};
use log::{error, info};
use shared::error::{ResolverError, ResolverErrorKind};
use shared::model::ResolverConfigDto;
use shared::utils::{CONFIG_FILE, CONSTANTS};
use shared::{handle_resolver_error_result, info_err_res};
use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads a config file and replaces `${env:VAR}` placeholders.
pub fn read_config_text(config_file: &Path) -> Result<String, std::io::Error> {
    let mut content = String::new();
    file_reader(open_file(config_file)?).read_to_string(&mut content)?;
    Ok(resolve_env_var(&content))
}

/// The explicitly given config file, or `config.yml` in the working
/// directory when it exists.
pub fn get_config_file_path(config_file: Option<&str>) -> Option<PathBuf> {
    match config_file {
        Some(file) => Some(PathBuf::from(resolve_env_var(file))),
        None => {
            let default_path = PathBuf::from(CONFIG_FILE);
            if path_exists(&default_path) { Some(default_path) } else { None }
        }
    }
}

pub fn read_log_level_config(config_file: &Path) -> Option<LogLevelConfig> {
    let content = read_config_text(config_file).ok()?;
    serde_yaml::from_str::<LogLevelConfig>(&content)
        .map_err(|err| error!("Failed to parse log config file: {err}"))
        .ok()
}

pub fn parse_config(content: &str) -> Result<ResolverConfigDto, ResolverError> {
    let mut dto: ResolverConfigDto = handle_resolver_error_result!(ResolverErrorKind::Info, serde_yaml::from_str(content));
    dto.prepare()?;
    Ok(dto)
}

/// Loads the configuration; without a config file the defaults apply.
pub fn read_config(config_file: Option<&Path>) -> Result<ResolverConfig, ResolverError> {
    match config_file {
        None => {
            info!("No config file, using defaults");
            Ok(ResolverConfig::default())
        }
        Some(path) => match read_config_text(path) {
            Ok(content) => match parse_config(&content) {
                Ok(dto) => Ok(ResolverConfig::from(dto)),
                Err(err) => info_err_res!("Can't read the config file {}: {err}", path.display()),
            },
            Err(err) => info_err_res!("Can't read the config file {}: {err}", path.display()),
        },
    }
}

pub fn resolve_env_var(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    CONSTANTS.re_env_var.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|e| {
            error!("Could not resolve env var '{var_name}': {e}");
            format!("${{env:{var_name}}}")
        })
    }).to_string()
}
