//! 图形界面
//!
//! 批处理在后台线程运行，日志、进度和结果通过 mpsc 通道送回 UI 线程，
//! 由 `update` 在每一帧开始时取出。UI 状态只在 UI 线程修改。

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use eframe::egui;

use crate::batch::{BatchProgress, BatchRunner, BatchSummary};
use crate::config::AppConfig;
use crate::events::{ChannelSink, ScanEvent};
use crate::languages::{language_name, SUPPORTED_LANGUAGES};

/// 日志面板最多保留的行数
const MAX_LOG_LINES: usize = 2000;

/// 工作线程发往 UI 线程的消息
pub enum WorkerMessage {
    Event(ScanEvent),
    Progress(BatchProgress),
    Finished(Result<BatchSummary, String>),
}

impl From<ScanEvent> for WorkerMessage {
    fn from(event: ScanEvent) -> Self {
        WorkerMessage::Event(event)
    }
}

/// 启动图形界面（阻塞直到窗口关闭）
pub fn launch(config: AppConfig, config_path: Option<PathBuf>, output_dir: PathBuf) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 540.0])
            .with_min_inner_size([520.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Minecraft 模组翻译检查",
        options,
        Box::new(move |_cc| Box::new(LangDiffApp::new(config, config_path, output_dir))),
    )
    .map_err(|e| anyhow!("启动图形界面失败: {}", e))
}

pub struct LangDiffApp {
    config: AppConfig,
    config_path: Option<PathBuf>,
    output_dir: PathBuf,
    input_dir: String,
    /// 输入框编辑过但还没保存
    input_dirty: bool,
    logs: Vec<String>,
    progress: Option<BatchProgress>,
    worker_rx: Option<Receiver<WorkerMessage>>,
    /// 模态提示框内容
    dialog: Option<String>,
}

impl LangDiffApp {
    pub fn new(config: AppConfig, config_path: Option<PathBuf>, output_dir: PathBuf) -> Self {
        let input_dir = config
            .input_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        Self {
            config,
            config_path,
            output_dir,
            input_dir,
            input_dirty: false,
            logs: Vec::new(),
            progress: None,
            worker_rx: None,
            dialog: None,
        }
    }

    fn is_running(&self) -> bool {
        self.worker_rx.is_some()
    }

    fn add_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOG_LINES {
            let overflow = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(..overflow);
        }
    }

    /// 保存配置（语言变化、输入目录变化、关闭窗口时调用）
    fn persist_config(&mut self) {
        let trimmed = self.input_dir.trim();
        self.config.input_dir = if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        };

        let Some(path) = self.config_path.clone() else {
            return;
        };
        if let Err(e) = self.config.save_to(&path) {
            self.add_log(format!("保存配置失败: {}", e));
        }
    }

    /// 输入框逐帧编辑，失去焦点时才保存
    ///
    /// `changed` 只在发生编辑的那一帧为真，失去焦点的那一帧通常为假
    fn track_input_edit(&mut self, changed: bool, lost_focus: bool) {
        if changed {
            self.input_dirty = true;
        }
        if lost_focus && self.input_dirty {
            self.input_dirty = false;
            self.persist_config();
        }
    }

    /// 取出工作线程发来的所有消息
    fn drain_worker_messages(&mut self) {
        let Some(rx) = self.worker_rx.take() else {
            return;
        };

        let mut finished = false;
        while let Ok(message) = rx.try_recv() {
            match message {
                WorkerMessage::Event(event) => self.add_log(event.to_string()),
                WorkerMessage::Progress(progress) => self.progress = Some(progress),
                WorkerMessage::Finished(result) => {
                    match result {
                        Ok(summary) => {
                            for line in summary.to_string().lines() {
                                self.add_log(line.to_string());
                            }
                        }
                        Err(e) => self.add_log(format!("批处理失败: {}", e)),
                    }
                    finished = true;
                }
            }
        }

        if !finished {
            self.worker_rx = Some(rx);
        }
    }

    fn start_batch(&mut self, ctx: &egui::Context) {
        if self.is_running() {
            return;
        }

        let input_dir = PathBuf::from(self.input_dir.trim());
        if self.input_dir.trim().is_empty() || !input_dir.is_dir() {
            self.dialog = Some(format!("输入目录不存在或不是目录:\n{}", self.input_dir));
            return;
        }

        self.persist_config();
        self.progress = None;

        let (tx, rx) = channel();
        self.worker_rx = Some(rx);

        let runner = BatchRunner::new(self.output_dir.clone(), self.config.language.clone());
        let ctx = ctx.clone();
        thread::spawn(move || {
            let sink = ChannelSink::new(tx.clone()).with_tracing();
            let progress_tx = tx.clone();
            let progress_ctx = ctx.clone();
            let mut on_progress = move |progress: BatchProgress| {
                let _ = progress_tx.send(WorkerMessage::Progress(progress));
                progress_ctx.request_repaint();
            };

            let result = runner
                .run(&input_dir, &sink, Some(&mut on_progress))
                .map_err(|e| e.to_string());
            let _ = tx.send(WorkerMessage::Finished(result));
            ctx.request_repaint();
        });
    }

    fn open_output_dir(&mut self) {
        if !self.output_dir.is_dir() {
            self.dialog = Some(format!("输出目录不存在:\n{}", self.output_dir.display()));
            return;
        }
        if let Err(e) = open_in_file_manager(&self.output_dir) {
            self.add_log(format!("打开输出目录失败: {}", e));
        }
    }

    fn render_inputs(&mut self, ui: &mut egui::Ui) {
        let running = self.is_running();

        ui.horizontal(|ui| {
            ui.label("输入目录:");
            let response = ui.add_enabled(
                !running,
                egui::TextEdit::singleline(&mut self.input_dir).desired_width(420.0),
            );
            self.track_input_edit(response.changed(), response.lost_focus());
            if ui.add_enabled(!running, egui::Button::new("浏览…")).clicked() {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    self.input_dir = dir.display().to_string();
                    self.persist_config();
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("目标语言:");
            let current = self.config.language.clone();
            let selected_text = match language_name(&current) {
                Some(name) => format!("{} ({})", current, name),
                None => current.clone(),
            };

            let mut changed = false;
            ui.add_enabled_ui(!running, |ui| {
                egui::ComboBox::from_id_source("target_language")
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for &(code, name) in SUPPORTED_LANGUAGES {
                            let label = format!("{} ({})", code, name);
                            if ui
                                .selectable_value(&mut self.config.language, code.to_string(), label)
                                .changed()
                            {
                                changed = true;
                            }
                        }
                    });
            });
            if changed {
                self.persist_config();
            }
        });

        ui.horizontal(|ui| {
            ui.label(format!("输出目录: {}", self.output_dir.display()));
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let running = self.is_running();

        ui.horizontal(|ui| {
            let start_label = if running { "处理中…" } else { "开始处理" };
            if ui.add_enabled(!running, egui::Button::new(start_label)).clicked() {
                self.start_batch(ctx);
            }
            if ui.button("打开输出目录").clicked() {
                self.open_output_dir();
            }
            if ui.add_enabled(!self.logs.is_empty(), egui::Button::new("清空日志")).clicked() {
                self.logs.clear();
            }
        });

        let (fraction, text) = match self.progress {
            Some(p) => (p.fraction(), format!("{} ({:.0}%)", p.label(), p.fraction() * 100.0)),
            None if running => (0.0, "扫描中…".to_string()),
            None => (0.0, String::new()),
        };
        ui.add(egui::ProgressBar::new(fraction).text(text).animate(running));
    }

    fn render_logs(&mut self, ui: &mut egui::Ui) {
        ui.label("日志");
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.logs {
                    ui.monospace(line);
                }
            });
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.dialog.clone() else {
            return;
        };

        egui::Window::new("提示")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("确定").clicked() {
                    self.dialog = None;
                }
            });
    }
}

impl eframe::App for LangDiffApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_worker_messages();

        if self.is_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let modal_open = self.dialog.is_some();
            ui.add_enabled_ui(!modal_open, |ui| {
                self.render_inputs(ui);
                ui.separator();
                self.render_actions(ui, ctx);
                ui.separator();
                self.render_logs(ui);
            });
        });

        self.render_dialog(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.persist_config();
    }
}

/// 用系统文件管理器打开目录
fn open_in_file_manager(path: &Path) -> std::io::Result<()> {
    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    Command::new(program).arg(path).spawn()?;
    Ok(())
}
