use crate::error::ResolverError;
use crate::model::{LogConfigDto, MatchConfigDto};

/// Root of the YAML configuration file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfigDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfigDto>,
    #[serde(default)]
    pub matching: MatchConfigDto,
}

impl ResolverConfigDto {
    pub fn prepare(&mut self) -> Result<(), ResolverError> {
        if let Some(log) = self.log.as_mut() {
            log.clean();
            if log.is_empty() {
                self.log = None;
            }
        }
        self.matching.prepare()
    }
}
