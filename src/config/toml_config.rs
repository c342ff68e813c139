use crate::adapters::{JsonFenceFile, JsonlAttendanceLog, LocalPhotoStore};
use crate::utils::error::{PunchError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub fences: FencesConfig,
    pub attendance: AttendanceConfig,
    pub photos: Option<PhotosConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FencesConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceConfig {
    pub log_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosConfig {
    pub upload_dir: Option<String>,
    pub url_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PunchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PunchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PunchError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("service.name", &self.service.name)?;

        let fences_path = validation::validate_required_field("fences.path", &self.fences.path)?;
        validation::validate_path("fences.path", fences_path)?;

        let log_path =
            validation::validate_required_field("attendance.log_path", &self.attendance.log_path)?;
        validation::validate_path("attendance.log_path", log_path)?;

        validation::validate_path("photos.upload_dir", self.upload_dir())?;
        validation::validate_url_prefix("photos.url_prefix", self.photo_url_prefix())?;
        validation::validate_one_of("logging.level", self.log_level(), &LOG_LEVELS)?;

        Ok(())
    }

    pub fn fences_path(&self) -> &str {
        self.fences.path.as_deref().unwrap_or_default()
    }

    pub fn attendance_log_path(&self) -> &str {
        self.attendance.log_path.as_deref().unwrap_or_default()
    }

    pub fn upload_dir(&self) -> &str {
        self.photos
            .as_ref()
            .and_then(|p| p.upload_dir.as_deref())
            .unwrap_or("uploads/selfies")
    }

    pub fn photo_url_prefix(&self) -> &str {
        self.photos
            .as_ref()
            .and_then(|p| p.url_prefix.as_deref())
            .unwrap_or("/uploads/selfies")
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn fence_source(&self) -> JsonFenceFile {
        JsonFenceFile::new(self.fences_path())
    }

    pub fn attendance_store(&self) -> JsonlAttendanceLog {
        JsonlAttendanceLog::new(self.attendance_log_path())
    }

    pub fn photo_store(&self) -> LocalPhotoStore {
        LocalPhotoStore::new(self.upload_dir(), self.photo_url_prefix())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
