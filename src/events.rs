//! 处理事件输出层
//!
//! 核心逻辑不直接打印日志，而是把事件交给注入的 `EventSink`。
//! 命令行使用 `TracingSink`，图形界面使用 `ChannelSink` 把事件送回 UI 线程。

use std::fmt;
use std::sync::mpsc::Sender;
use std::sync::Mutex;

use chrono::{DateTime, Local};

/// 事件级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventLevel::Debug => "DEBUG",
            EventLevel::Info => "INFO",
            EventLevel::Warn => "WARN",
            EventLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// 一条处理事件
#[derive(Debug, Clone)]
pub struct ScanEvent {
    pub level: EventLevel,
    pub message: String,
    /// 相关归档的文件名，批处理级别的事件为 `None`
    pub archive: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl ScanEvent {
    pub fn new(level: EventLevel, archive: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            archive: archive.map(str::to_string),
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// 事件接收 trait
///
/// # 职责
/// - 接收核心逻辑产生的事件并决定如何呈现
/// - 不得 panic，不得向调用方返回错误
pub trait EventSink {
    fn emit(&self, event: ScanEvent);

    fn debug(&self, archive: Option<&str>, message: String) {
        self.emit(ScanEvent::new(EventLevel::Debug, archive, message));
    }

    fn info(&self, archive: Option<&str>, message: String) {
        self.emit(ScanEvent::new(EventLevel::Info, archive, message));
    }

    fn warn(&self, archive: Option<&str>, message: String) {
        self.emit(ScanEvent::new(EventLevel::Warn, archive, message));
    }

    fn error(&self, archive: Option<&str>, message: String) {
        self.emit(ScanEvent::new(EventLevel::Error, archive, message));
    }
}

/// 转发到 `tracing` 的默认实现
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    fn forward(event: &ScanEvent) {
        let archive = event.archive.as_deref().unwrap_or("-");
        match event.level {
            EventLevel::Debug => tracing::debug!(archive = %archive, "{}", event.message),
            EventLevel::Info => tracing::info!(archive = %archive, "{}", event.message),
            EventLevel::Warn => tracing::warn!(archive = %archive, "{}", event.message),
            EventLevel::Error => tracing::error!(archive = %archive, "{}", event.message),
        }
    }
}

impl EventSink for TracingSink {
    fn emit(&self, event: ScanEvent) {
        Self::forward(&event);
    }
}

/// 通过 mpsc 通道转发事件
///
/// 接收端可以是任何能从 `ScanEvent` 转换的消息类型，
/// 例如图形界面的工作线程消息枚举。接收端已关闭时静默丢弃。
pub struct ChannelSink<T> {
    tx: Sender<T>,
    forward_to_tracing: bool,
}

impl<T: From<ScanEvent>> ChannelSink<T> {
    pub fn new(tx: Sender<T>) -> Self {
        Self {
            tx,
            forward_to_tracing: false,
        }
    }

    /// 同时把事件写入 `tracing`（控制台）
    pub fn with_tracing(mut self) -> Self {
        self.forward_to_tracing = true;
        self
    }
}

impl<T: From<ScanEvent>> EventSink for ChannelSink<T> {
    fn emit(&self, event: ScanEvent) {
        if self.forward_to_tracing {
            TracingSink::forward(&event);
        }
        let _ = self.tx.send(T::from(event));
    }
}

/// 在内存中记录所有事件
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ScanEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出目前记录的全部事件
    pub fn events(&self) -> Vec<ScanEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 指定级别的事件数量
    pub fn count(&self, level: EventLevel) -> usize {
        self.events().iter().filter(|e| e.level == level).count()
    }

    /// 是否存在指定级别且消息包含 `needle` 的事件
    pub fn contains(&self, level: EventLevel, needle: &str) -> bool {
        self.events()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ScanEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
