use shared::model::LogConfigDto;
use crate::model::macros;
// Read on its own at startup, before the full config, to set up the logger.

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct LogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct LogLevelConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
}

macros::from_impl!(LogConfig);
impl From<&LogConfigDto> for LogConfig {
    fn from(dto: &LogConfigDto) -> Self {
        Self {
            log_level: dto.log_level.clone(),
        }
    }
}
