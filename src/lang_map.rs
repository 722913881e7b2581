//! 本地化映射（语言文件）
//!
//! Minecraft 的 `assets/<modid>/lang/*.json` 是一个扁平 JSON 对象：键为翻译键，
//! 值通常为字符串。这里不限制值的类型，原样透传。

use serde_json::{Map, Value};

use crate::utils::LangDiffError;

/// 本地化映射，保持源文件中的键顺序
pub type LangMap = Map<String, Value>;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 解析语言文件的原始字节
///
/// # 参数
/// * `entry` - 归档内的条目路径（仅用于错误信息）
/// * `bytes` - 原始字节，允许带 UTF-8 BOM
///
/// # 返回
/// 顶层必须是 JSON 对象，否则返回 `NotAnObject`
pub fn parse_lang_map(entry: &str, bytes: &[u8]) -> Result<LangMap, LangDiffError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let value: Value = serde_json::from_slice(bytes).map_err(|source| LangDiffError::InvalidLangFile {
        entry: entry.to_string(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LangDiffError::NotAnObject {
            entry: entry.to_string(),
        }),
    }
}

/// 序列化为带缩进的 JSON（UTF-8，非 ASCII 字符不转义）
pub fn to_pretty_json(map: &LangMap) -> Result<String, LangDiffError> {
    Ok(serde_json::to_string_pretty(map)?)
}
