use shared::model::ResolverConfigDto;
use crate::model::{macros, LogConfig, MatchConfig};

#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    pub log: Option<LogConfig>,
    pub matching: MatchConfig,
}

macros::from_impl!(ResolverConfig);
impl From<&ResolverConfigDto> for ResolverConfig {
    fn from(dto: &ResolverConfigDto) -> Self {
        Self {
            log: dto.log.as_ref().map(LogConfig::from),
            matching: MatchConfig::from(&dto.matching),
        }
    }
}
