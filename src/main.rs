#![windows_subsystem = "windows"]
//! Grid Collector - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod export;
mod input;
mod session;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use tracing::info;
use ui::components::{icon_label, progress_bar, progress_text};
use utils::{get_data_dir, grid_icon_rgba, short_path};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "grid-collector.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grid_collector=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Grid Collector starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let (rgba, width, height) = grid_icon_rgba(64);
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(520.0, 680.0)))
        .with_min_inner_size([440.0, 600.0])
        .with_title(APP_TITLE)
        .with_icon(std::sync::Arc::new(egui::IconData { rgba, width, height }));

    let needs_center = win_pos.is_none();
    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Dialogs open at frame start block grid and label input for the whole frame
        self.input_blocked = self.modal_open();

        self.render_alert_modal(ctx);
        self.render_settings_modal(ctx);
        self.render_status_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(APP_TITLE).size(theme::FONT_TITLE).strong());
                    ui.add_space(theme::SPACING_MD);

                    if ui
                        .add(theme::button(icon_label(egui_phosphor::regular::HASH, "Count Samples")))
                        .clicked()
                    {
                        self.show_sample_count();
                    }
                    ui.add_space(theme::SPACING_LG);

                    self.render_canvas(ui);
                    ui.add_space(theme::SPACING_XL);

                    self.render_label_row(ui);
                    ui.add_space(theme::SPACING_LG);

                    let count = self.session.sample_count();
                    let target = self.session.target_count();
                    ui.label(
                        egui::RichText::new(progress_text(count, target))
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.add_space(theme::SPACING_SM);
                    progress_bar(ui, count, target, 240.0);
                });
            });

        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(samples = self.session.sample_count(), "Application shutting down");
        self.shutdown();
    }
}

impl App {
    /// Label input and Save button, centered under the grid
    fn render_label_row(&mut self, ui: &mut egui::Ui) {
        let row_width = theme::LABEL_INPUT_WIDTH + 100.0;
        ui.allocate_ui_with_layout(
            egui::vec2(row_width, 30.0),
            egui::Layout::left_to_right(egui::Align::Center),
            |ui| {
                let label_id = ui.make_persistent_id("label_input");
                let response = ui.add(
                    egui::TextEdit::singleline(self.session.label_text_mut())
                        .id(label_id)
                        .hint_text("Enter label")
                        .desired_width(theme::LABEL_INPUT_WIDTH),
                );
                if response.changed() {
                    // Number field: keep only what a numeric input accepts
                    let text = self.session.label_text();
                    let numeric: String = text
                        .chars()
                        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
                        .collect();
                    if numeric != text {
                        self.session.set_label(numeric);
                    }
                }
                if self.focus_label && !self.input_blocked() {
                    self.focus_label = false;
                    response.request_focus();
                }

                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add(theme::button_accent(icon_label(egui_phosphor::regular::FLOPPY_DISK, "Save")))
                    .clicked();
                if (submitted || clicked) && !self.input_blocked() {
                    self.save_current_sample();
                }
            },
        );
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(12, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let status = match &self.last_export {
                        Some((path, at)) => format!(
                            "Last export {} → {}",
                            at.format("%H:%M:%S"),
                            short_path(path, 2)
                        ),
                        None => format!("Exports to {}", short_path(&self.export_dir, 2)),
                    };
                    ui.label(egui::RichText::new(status).size(theme::FONT_SMALL).color(theme::TEXT_DIM));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let enabled = !self.modal_open();
                        if ui
                            .add_enabled(enabled, egui::Button::new(egui_phosphor::regular::GEAR).frame(false))
                            .on_hover_text("Settings")
                            .clicked()
                        {
                            self.show_settings = true;
                        }
                        if ui
                            .add_enabled(enabled, egui::Button::new(egui_phosphor::regular::FOLDER_OPEN).frame(false))
                            .on_hover_text("Open export folder")
                            .clicked()
                        {
                            self.open_export_folder();
                        }
                        if ui
                            .add_enabled(enabled, egui::Button::new(egui_phosphor::regular::EXPORT).frame(false))
                            .on_hover_text("Export now...")
                            .clicked()
                        {
                            self.export_with_dialog();
                        }
                    });
                });
            });
    }
}
