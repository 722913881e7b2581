//! 模组归档（jar）访问模块
//!
//! jar 就是 zip。这里只负责列出条目、定位语言文件、读取条目原始字节，
//! 不解析 JSON 内容。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::utils::LangDiffError;
use crate::BASE_LANG;

/// 读取条目时预分配的上限，归档头中的解压大小不可信
const MAX_PREALLOC: u64 = 1 << 20;

/// 归档中定位到的语言文件条目
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangEntries {
    /// 以 `en_us.json` 结尾的条目
    pub english: Option<String>,
    /// 以 `<目标语言>.json` 结尾的条目
    pub target: Option<String>,
}

/// 按列出顺序扫描条目名，定位英文文件和目标语言文件
///
/// - 多个条目匹配同一后缀时，保留最后一个
/// - 匹配 `en_us.json` 的条目只作为英文文件，不再参与目标语言匹配
/// - 目录条目（以 `/` 结尾）不会匹配
pub fn locate_lang_entries<'a, I>(names: I, target_lang: &str) -> LangEntries
where
    I: IntoIterator<Item = &'a str>,
{
    let english_suffix = format!("{}.json", BASE_LANG);
    let target_suffix = format!("{}.json", target_lang);

    let mut entries = LangEntries::default();
    for name in names {
        if name.ends_with(&english_suffix) {
            entries.english = Some(name.to_string());
        } else if name.ends_with(&target_suffix) {
            entries.target = Some(name.to_string());
        }
    }
    entries
}

/// jar 归档访问器
pub struct ModArchive {
    archive: ZipArchive<File>,
}

impl ModArchive {
    /// 打开一个 jar/zip 归档
    ///
    /// 文件不存在、不是合法 zip 时返回 `Io` 或 `Zip` 错误
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LangDiffError> {
        let file = File::open(path.as_ref())?;
        let archive = ZipArchive::new(file)?;
        Ok(Self { archive })
    }

    /// 条目数量（包含目录条目）
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// 按中央目录顺序返回所有文件条目名（跳过目录）
    ///
    /// 只读取条目头，加密或压缩方式不受支持的条目不影响列出
    pub fn entry_names(&mut self) -> Result<Vec<String>, LangDiffError> {
        let mut names = Vec::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            let file = self.archive.by_index_raw(i)?;
            if file.is_dir() {
                continue;
            }
            names.push(file.name().to_string());
        }
        Ok(names)
    }

    /// 定位英文文件和目标语言文件
    pub fn locate(&mut self, target_lang: &str) -> Result<LangEntries, LangDiffError> {
        let names = self.entry_names()?;
        Ok(locate_lang_entries(names.iter().map(String::as_str), target_lang))
    }

    /// 读取指定条目的原始字节（已解压）
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, LangDiffError> {
        let mut file = self.archive.by_name(name)?;
        let mut buffer = Vec::with_capacity(prealloc_size(file.size()));
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// 预分配大小，超过上限的部分交给 `read_to_end` 按需增长
fn prealloc_size(declared: u64) -> usize {
    declared.min(MAX_PREALLOC) as usize
}
