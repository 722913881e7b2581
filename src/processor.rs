use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::ModArchive;
use crate::differ::missing_keys;
use crate::events::EventSink;
use crate::lang_map::{parse_lang_map, to_pretty_json};
use crate::utils::{mod_id_from_path, LangDiffError};
use crate::{BASE_LANG, DIFF_FILE_NAME};

/// 单个模组的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModOutcome {
    /// 归档中没有 `en_us.json`，输出目录已删除
    Skipped,
    /// 只有英文文件，目标语言文件缺失
    EnglishOnly { keys: usize },
    /// 目标语言已覆盖全部键，输出目录已删除
    FullyTranslated { keys: usize },
    /// 写出了 `diff.json`
    Diffed { missing: usize, total: usize },
    /// 处理失败（错误已记录），输出目录保持失败时的状态
    Failed(String),
}

impl ModOutcome {
    /// 处理后是否留下了输出目录
    pub fn leaves_output(&self) -> bool {
        matches!(self, ModOutcome::EnglishOnly { .. } | ModOutcome::Diffed { .. })
    }
}

/// 模组处理器
///
/// 负责一个 jar：提取英文和目标语言文件到 `<输出目录>/<模组名>/`，
/// 计算缺失键并写出 `diff.json`。不会修改归档本身。
#[derive(Debug, Clone)]
pub struct ModProcessor {
    output_root: PathBuf,
    target_lang: String,
}

impl ModProcessor {
    pub fn new(output_root: impl Into<PathBuf>, target_lang: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// 处理一个归档
    ///
    /// 所有错误都在这里被记录并转换为 `ModOutcome::Failed`，不会传给调用方。
    pub fn process(&self, archive_path: &Path, sink: &dyn EventSink) -> ModOutcome {
        let archive_name = archive_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| archive_path.display().to_string());

        match self.try_process(archive_path, &archive_name, sink) {
            Ok(outcome) => outcome,
            Err(e) => {
                sink.error(
                    Some(&archive_name),
                    format!("处理 {} 时出错: {}", archive_path.display(), e),
                );
                ModOutcome::Failed(e.to_string())
            }
        }
    }

    fn try_process(
        &self,
        archive_path: &Path,
        archive_name: &str,
        sink: &dyn EventSink,
    ) -> Result<ModOutcome, LangDiffError> {
        let mod_id = mod_id_from_path(archive_path)?;
        let mod_dir = self.output_root.join(&mod_id);

        // 先创建输出目录，确认无需输出时再删除
        fs::create_dir_all(&mod_dir)?;
        sink.info(Some(archive_name), format!("正在处理模组: {}", mod_id));

        let mut archive = ModArchive::open(archive_path)?;
        sink.debug(Some(archive_name), format!("归档包含 {} 个条目", archive.len()));
        let entries = archive.locate(&self.target_lang)?;

        let Some(english_entry) = entries.english else {
            sink.warn(
                Some(archive_name),
                format!("{} 中未找到 {}.json，跳过该模组", archive_name, BASE_LANG),
            );
            fs::remove_dir_all(&mod_dir)?;
            return Ok(ModOutcome::Skipped);
        };

        sink.info(Some(archive_name), format!("提取 {}", english_entry));
        let english_bytes = archive.read_entry(&english_entry)?;
        fs::write(mod_dir.join(format!("{}.json", BASE_LANG)), &english_bytes)?;
        let base = parse_lang_map(&english_entry, &english_bytes)?;

        let Some(target_entry) = entries.target else {
            sink.warn(
                Some(archive_name),
                format!(
                    "{} 中未找到 {}.json，仅提取了 {}.json",
                    archive_name, self.target_lang, BASE_LANG
                ),
            );
            sink.info(Some(archive_name), format!("模组 {} 处理完成", mod_id));
            return Ok(ModOutcome::EnglishOnly { keys: base.len() });
        };

        sink.info(Some(archive_name), format!("提取 {}", target_entry));
        let target_bytes = archive.read_entry(&target_entry)?;
        fs::write(mod_dir.join(format!("{}.json", self.target_lang)), &target_bytes)?;
        let target = parse_lang_map(&target_entry, &target_bytes)?;

        let diff = missing_keys(&base, &target);
        let outcome = if diff.is_empty() {
            sink.info(
                Some(archive_name),
                "所有键均已翻译，删除该模组的输出目录".to_string(),
            );
            fs::remove_dir_all(&mod_dir)?;
            ModOutcome::FullyTranslated { keys: base.len() }
        } else {
            sink.info(
                Some(archive_name),
                format!("发现 {} 个缺失的翻译，写入 {}", diff.len(), DIFF_FILE_NAME),
            );
            fs::write(mod_dir.join(DIFF_FILE_NAME), to_pretty_json(&diff)?)?;
            ModOutcome::Diffed {
                missing: diff.len(),
                total: base.len(),
            }
        };

        sink.info(Some(archive_name), format!("模组 {} 处理完成", mod_id));
        Ok(outcome)
    }
}
