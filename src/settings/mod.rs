use std::{collections::HashMap, env, path::Path};
use serde::Deserialize;
use tracing::info;
use crate::middleware::MiddlewareConfig;

mod server;
pub mod logging;
mod error;

pub use server::ServerSettings;
pub use logging::{LogFormat, LogOutput, LogSettings};
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;
pub use server::parse_env_var;

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_FILE_ENV: &str = "PROXY_CONFIG_FILE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 서버 설정
    #[serde(default)]
    pub server: ServerSettings,
    
    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,
    
    /// 미들웨어 설정
    #[serde(default)]
    pub middleware: HashMap<String, MiddlewareConfig>,
}

impl Settings {
    /// `PROXY_CONFIG_FILE` 이 있으면 파일에서, 없으면 환경 변수에서 설정을 로드합니다.
    pub async fn load() -> Result<Self> {
        if let Ok(config_path) = env::var(CONFIG_FILE_ENV) {
            Self::from_file(&config_path).await
        } else {
            Self::from_env().await
        }
    }

    /// 확장자에 따라 TOML 또는 JSON 설정 파일을 읽습니다.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();

        let content = tokio::fs::read_to_string(path).await.map_err(|e| SettingsError::FileError {
            path: path_str.clone(),
            error: e,
        })?;

        let settings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| SettingsError::JsonError { source: e })?,
            _ => return Err(SettingsError::UnsupportedFormat { path: path_str }),
        };

        settings.validate()?;
        info!(path = %path_str, middlewares = settings.middleware.len(), "설정 파일 로드 완료");
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SettingsError::ParseError { source: e })
    }

    pub async fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            middleware: HashMap::new(),
        };

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    /// 
    /// 미들웨어의 정규식 검증은 `MiddlewareManager::new` 에서 수행합니다.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;

        for (name, middleware) in &self.middleware {
            if middleware.enabled && name.trim().is_empty() {
                return Err(SettingsError::InvalidConfig(
                    "미들웨어 이름은 비어 있을 수 없습니다".to_string()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::MiddlewareType;

    #[test]
    fn test_settings_from_toml() {
        let settings = Settings::from_toml_str(r#"
            [server]
            http_port = 9000
            upstream = "backend:8080"

            [logging]
            format = "json"

            [middleware.block-internal]
            middleware_type = "header-block"
            order = 1

            [middleware.block-internal.settings]
            requestHeaders = [{ header = "^X-", env = "Evil" }]
            responseHeaders = [{ header = "^Internal-" }]
        "#).unwrap();

        assert_eq!(settings.server.http_port, 9000);
        assert_eq!(settings.server.upstream, "backend:8080");
        assert_eq!(settings.logging.format, LogFormat::Json);

        let middleware = &settings.middleware["block-internal"];
        assert_eq!(middleware.middleware_type, MiddlewareType::HeaderBlock);
        assert_eq!(middleware.order, 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_upstream_with_scheme_is_rejected() {
        let settings = Settings::from_toml_str(r#"
            [server]
            upstream = "http://backend:8080"
        "#).unwrap();

        assert!(settings.validate().is_err());
    }
}
