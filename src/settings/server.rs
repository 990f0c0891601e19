use serde::Deserialize;
use std::env;
use std::str::FromStr;
use hyper::http::uri::Authority;
use super::SettingsError;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    /// HTTP 포트 (기본값: 80)
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// 필터링된 요청을 전달할 업스트림 주소 (`host:port`)
    #[serde(default = "default_upstream")]
    pub upstream: String,
}

fn default_http_port() -> u16 { 80 }
fn default_upstream() -> String { "127.0.0.1:8080".to_string() }

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            http_port: parse_env_var("PROXY_HTTP_PORT", default_http_port)?,
            upstream: parse_env_var("PROXY_UPSTREAM", default_upstream)?,
        };
        
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.http_port == 0 {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "PROXY_HTTP_PORT".to_string(),
                value: self.http_port.to_string(),
                reason: "포트는 0이 될 수 없습니다".to_string(),
            });
        }

        // 업스트림은 스킴 없이 authority 형식이어야 함
        let upstream = self.upstream.trim();
        if upstream.is_empty()
            || upstream.contains("://")
            || upstream.contains('/')
            || Authority::from_str(upstream).is_err()
        {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "PROXY_UPSTREAM".to_string(),
                value: self.upstream.clone(),
                reason: "업스트림은 host:port 형식이어야 합니다".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            upstream: default_upstream(),
        }
    }
}
