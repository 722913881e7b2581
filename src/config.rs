use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::LangDiffError;
use crate::DEFAULT_TARGET_LANG;

const CONFIG_DIR_NAME: &str = "mc_lang_diff";
const CONFIG_FILE_NAME: &str = "config.json";

/// 图形界面的持久化配置
///
/// 只有前端读写，批处理逻辑通过参数接收这些值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 上次使用的输入目录
    pub input_dir: Option<PathBuf>,
    /// 上次使用的目标语言
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            language: DEFAULT_TARGET_LANG.to_string(),
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径：`<系统配置目录>/mc_lang_diff/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 从指定文件加载，文件不存在时返回默认配置
    pub fn load_from(path: &Path) -> Result<Self, LangDiffError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    /// 从默认位置加载，读取失败时记录警告并使用默认配置
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("读取配置文件 {} 失败，使用默认配置: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// 写入指定文件，自动创建父目录
    pub fn save_to(&self, path: &Path) -> Result<(), LangDiffError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
