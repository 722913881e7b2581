use thiserror::Error;
use std::path::{Path, PathBuf};

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum LangDiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("语言文件 {entry} 解析失败: {source}")]
    InvalidLangFile {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("语言文件 {entry} 不是 JSON 对象")]
    NotAnObject { entry: String },

    #[error("无法从路径推导模组名: {0:?}")]
    InvalidArchivePath(PathBuf),

    #[error("输入路径不是目录: {0:?}")]
    NotADirectory(PathBuf),
}

/// 从归档路径推导模组标识（去掉扩展名的文件名）
///
/// `mods/create-1.20.1.jar` -> `create-1.20.1`
pub fn mod_id_from_path(archive_path: &Path) -> Result<String, LangDiffError> {
    archive_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| LangDiffError::InvalidArchivePath(archive_path.to_path_buf()))
}

/// 判断文件名是否为待处理的归档（区分大小写的 `.jar` 后缀）
pub fn is_archive_name(file_name: &str) -> bool {
    file_name.ends_with(&format!(".{}", crate::ARCHIVE_EXTENSION))
}
