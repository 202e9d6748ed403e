use crate::utils::read_log_level_config;
use env_logger::{Builder, Target};
use log::{info, LevelFilter};
use shared::utils::ENV_LOG_LEVEL;
use std::path::Path;

fn get_log_level(log_level: &str) -> LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Applies `level` or `module=level,level` to the builder and returns the
/// effective filters for the startup message.
fn apply_log_level(log_builder: &mut Builder, log_level: &str) -> Vec<String> {
    let mut log_levels = vec![];
    if log_level.contains('=') {
        for pair in log_level.split(',') {
            if pair.contains('=') {
                let mut kv_iter = pair.split('=').map(str::trim);
                if let (Some(module), Some(level)) = (kv_iter.next(), kv_iter.next()) {
                    let level = get_log_level(level);
                    log_levels.push(format!("{module}={level}"));
                    log_builder.filter_module(module, level);
                }
            } else {
                let level = get_log_level(pair);
                log_levels.push(level.to_string());
                log_builder.filter_level(level);
            }
        }
    } else {
        let level = get_log_level(log_level);
        log_builder.filter_level(level);
        log_levels.push(level.to_string());
    }
    log_levels
}

/// Sets up the logger on stderr; stdout carries the JSON output.
pub fn init_logger(user_log_level: Option<&String>, config_file: Option<&Path>) {
    let env_log_level = std::env::var(ENV_LOG_LEVEL).ok();

    let mut log_builder = Builder::from_default_env();
    log_builder.target(Target::Stderr);

    // priority  CLI-Argument, Env-Var, Config, Default
    let log_level = user_log_level
        .map(std::string::ToString::to_string) // cli-argument
        .or(env_log_level) // env
        .or_else(|| {               // config
            config_file
                .and_then(read_log_level_config)
                .and_then(|cfg| cfg.log.and_then(|l| l.log_level))
        })
        .unwrap_or_else(|| "info".to_string()); // Default

    let log_levels = apply_log_level(&mut log_builder, &log_level);
    log_builder.init();
    info!("Log Level {}", &log_levels.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_level() {
        assert_eq!(get_log_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(get_log_level(" warn "), LevelFilter::Warn);
        assert_eq!(get_log_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_module_levels() {
        let mut builder = Builder::new();
        let levels = apply_log_level(&mut builder, "channel_resolver::processing=trace,warn");
        assert_eq!(levels, vec!["channel_resolver::processing=TRACE".to_string(), "WARN".to_string()]);
    }
}
