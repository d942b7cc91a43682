use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::TimelineEngineConfig;

pub const ENGINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: TimelineEngineConfig,
}

impl TimelineEngineConfig {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineEngineConfigJsonContractV1 {
            schema_version: ENGINE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or the versioned envelope. The
    /// parsed config is validated before it is returned.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        let config = match serde_json::from_str::<TimelineEngineConfigJsonContractV1>(input) {
            Ok(payload) => {
                if payload.schema_version != ENGINE_CONFIG_JSON_SCHEMA_V1 {
                    return Err(TimelineError::InvalidData(format!(
                        "unsupported config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
            Err(_) => serde_json::from_str::<TimelineEngineConfig>(input).map_err(|e| {
                TimelineError::InvalidData(format!("failed to parse config json payload: {e}"))
            })?,
        };
        config.validate()?;
        Ok(config)
    }
}
