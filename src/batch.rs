use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::events::EventSink;
use crate::processor::{ModOutcome, ModProcessor};
use crate::utils::{is_archive_name, LangDiffError};

/// 批处理进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    /// 完成比例，范围 0.0..=1.0
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f32 / self.total as f32
    }

    /// 例如 `3/10`
    pub fn label(&self) -> String {
        format!("{}/{}", self.completed, self.total)
    }
}

/// 批处理统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub archives: usize,
    pub diffed: usize,
    pub missing_keys: usize,
    pub fully_translated: usize,
    pub english_only: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &ModOutcome) {
        match outcome {
            ModOutcome::Skipped => self.skipped += 1,
            ModOutcome::EnglishOnly { .. } => self.english_only += 1,
            ModOutcome::FullyTranslated { .. } => self.fully_translated += 1,
            ModOutcome::Diffed { missing, .. } => {
                self.diffed += 1;
                self.missing_keys += missing;
            }
            ModOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== 处理统计 ===")?;
        writeln!(f, "归档数量: {}", self.archives)?;
        writeln!(f, "生成差异文件: {} (缺失键共 {} 个)", self.diffed, self.missing_keys)?;
        writeln!(f, "已完整翻译: {}", self.fully_translated)?;
        writeln!(f, "缺少目标语言文件: {}", self.english_only)?;
        writeln!(f, "缺少英文文件: {}", self.skipped)?;
        write!(f, "处理失败: {}", self.failed)
    }
}

/// 列出目录下（不递归）所有 `.jar` 文件，按文件名排序
pub fn find_archives(input_dir: &Path) -> Result<Vec<PathBuf>, LangDiffError> {
    let mut archives = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if is_archive_name(&entry.file_name().to_string_lossy()) {
            archives.push(entry.path());
        }
    }
    archives.sort();
    Ok(archives)
}

/// 批处理器
///
/// 顺序处理输入目录下的每个 jar。单个归档的失败不会中断批处理。
#[derive(Debug, Clone)]
pub struct BatchRunner {
    processor: ModProcessor,
}

impl BatchRunner {
    pub fn new(output_root: impl Into<PathBuf>, target_lang: impl Into<String>) -> Self {
        Self {
            processor: ModProcessor::new(output_root, target_lang),
        }
    }

    pub fn processor(&self) -> &ModProcessor {
        &self.processor
    }

    /// 运行批处理
    ///
    /// # 参数
    /// * `input_dir` - 存放 jar 的目录
    /// * `sink` - 事件接收者
    /// * `on_progress` - 每处理完一个归档回调一次
    ///
    /// # 返回
    /// 输入路径不是目录时返回 `NotADirectory`，不做任何处理
    pub fn run(
        &self,
        input_dir: &Path,
        sink: &dyn EventSink,
        mut on_progress: Option<&mut dyn FnMut(BatchProgress)>,
    ) -> Result<BatchSummary, LangDiffError> {
        if !input_dir.is_dir() {
            sink.error(None, format!("输入路径 {} 不是目录", input_dir.display()));
            return Err(LangDiffError::NotADirectory(input_dir.to_path_buf()));
        }

        sink.info(None, format!("正在扫描 {} 中的 jar 文件", input_dir.display()));
        sink.info(None, format!("目标语言: {}", self.processor.target_lang()));

        let archives = find_archives(input_dir)?;
        let mut summary = BatchSummary {
            archives: archives.len(),
            ..Default::default()
        };

        if archives.is_empty() {
            sink.warn(None, format!("{} 中没有找到 jar 文件", input_dir.display()));
            return Ok(summary);
        }

        sink.info(None, format!("找到 {} 个 jar 文件，开始处理...", archives.len()));

        let total = archives.len();
        for (index, archive) in archives.iter().enumerate() {
            let outcome = self.processor.process(archive, sink);
            summary.record(&outcome);

            if let Some(callback) = on_progress.as_mut() {
                callback(BatchProgress {
                    completed: index + 1,
                    total,
                });
            }
        }

        sink.info(None, "全部处理完成".to_string());
        Ok(summary)
    }
}
