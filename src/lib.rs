pub mod utils;
pub mod lang_map;
pub mod differ;
pub mod archive;
pub mod events;
pub mod processor;
pub mod batch;
pub mod languages;
pub mod config;

#[cfg(feature = "gui")]
pub mod gui;

// 重新导出主要结构
pub use utils::{mod_id_from_path, LangDiffError};
pub use lang_map::{parse_lang_map, to_pretty_json, LangMap};
pub use differ::missing_keys;
pub use archive::{locate_lang_entries, LangEntries, ModArchive};
pub use events::{ChannelSink, EventLevel, EventSink, RecordingSink, ScanEvent, TracingSink};
pub use processor::{ModOutcome, ModProcessor};
pub use batch::{find_archives, BatchProgress, BatchRunner, BatchSummary};
pub use languages::{is_supported_language, language_name, SUPPORTED_LANGUAGES};
pub use config::AppConfig;

// 常量定义
pub const ARCHIVE_EXTENSION: &str = "jar";
pub const BASE_LANG: &str = "en_us";
pub const DEFAULT_TARGET_LANG: &str = "ru_ru";
pub const DIFF_FILE_NAME: &str = "diff.json";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
