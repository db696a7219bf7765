use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::PredicateArgs;
use crate::config::Config;
use crate::controller::Controller;
use crate::deck::SlideRecord;
use crate::input::{self, Command};
use crate::navigator::Navigator;
use crate::theme::Theme;
use crate::toc::{DEFAULT_NARROW_WIDTH, TocPanel};
use crate::view::{DeckView, ViewSync};

const TRANSITION_DURATION: f32 = 0.3;
const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;
const TOC_WIDTH: f32 = 300.0;

/// Startup choices made on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub windowed: bool,
    /// 1-indexed.
    pub start_slide: Option<usize>,
    pub start_filtered: bool,
    pub toc_open: bool,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// The display surfaces. Holds the last projected view and remembers when
/// the highlighted TOC entry moved so it can be scrolled into view.
struct Surfaces {
    view: DeckView,
    scroll_toc: bool,
    toast: Option<Toast>,
}

impl ViewSync for Surfaces {
    fn sync(&mut self, view: &DeckView) {
        if view.current_index != self.view.current_index {
            self.scroll_toc = true;
        }
        if view.filter_marked != self.view.filter_marked {
            let message = if view.filter_marked {
                format!("Essential slides ({})", view.counter.total)
            } else {
                "All slides".to_string()
            };
            self.toast = Some(Toast::new(message));
        }
        self.view = view.clone();
    }
}

struct DeckApp {
    controller: Controller,
    surfaces: Surfaces,
    theme: Theme,
}

impl DeckApp {
    fn new(controller: Controller, theme: Theme) -> Self {
        let view = controller.view();
        Self {
            controller,
            surfaces: Surfaces {
                view,
                scroll_toc: true,
                toast: None,
            },
            theme,
        }
    }

    fn dispatch_all(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.controller.dispatch(command, &mut self.surfaces);
        }
    }

    fn draw_toc(&mut self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        let scroll_toc = std::mem::take(&mut self.surfaces.scroll_toc);
        let theme = &self.theme;
        let view = &self.surfaces.view;

        egui::SidePanel::left("keydeck_toc")
            .resizable(false)
            .exact_width(TOC_WIDTH)
            .frame(
                egui::Frame::new()
                    .fill(theme.chrome_background)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Contents")
                            .size(theme.chrome_size + 3.0)
                            .color(theme.heading_color)
                            .strong(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("\u{2715}").on_hover_text("Close (Esc)").clicked() {
                            commands.push(Command::CloseToc);
                        }
                        if ui
                            .selectable_label(view.filter_marked, "\u{1F511} Essential")
                            .on_hover_text("Show essential slides only (E)")
                            .clicked()
                        {
                            commands.push(Command::ToggleFilter);
                        }
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for entry in &view.toc {
                            let mut text = egui::RichText::new(format!(
                                "{}. {}",
                                entry.number, entry.title
                            ))
                            .size(theme.chrome_size);
                            if view.filter_marked && entry.essential {
                                text = text.color(theme.essential).strong();
                            } else if view.filter_marked {
                                text = text.color(Theme::with_opacity(theme.foreground, 0.5));
                            } else {
                                text = text.color(theme.foreground);
                            }

                            let response = ui.selectable_label(entry.active, text);
                            if entry.active && scroll_toc {
                                response.scroll_to_me(None);
                            }
                            if response.clicked() {
                                commands.push(Command::GoTo(entry.index));
                            }
                        }
                    });
            });
    }

    fn draw_controls(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        let theme = &self.theme;
        let view = &self.surfaces.view;
        let toc_open = self.controller.toc().is_open();

        egui::TopBottomPanel::bottom("keydeck_controls")
            .frame(
                egui::Frame::new()
                    .fill(theme.chrome_background)
                    .inner_margin(8.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if !toc_open
                        && ui
                            .button("\u{2630}")
                            .on_hover_text("Table of contents (T)")
                            .clicked()
                    {
                        commands.push(Command::OpenToc);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(view.next_enabled, egui::Button::new("\u{25B6}"))
                            .clicked()
                        {
                            commands.push(Command::Next);
                        }
                        ui.label(
                            egui::RichText::new(view.counter.to_string())
                                .size(theme.chrome_size)
                                .color(theme.foreground)
                                .monospace(),
                        );
                        if ui
                            .add_enabled(view.prev_enabled, egui::Button::new("\u{25C0}"))
                            .clicked()
                        {
                            commands.push(Command::Prev);
                        }
                    });
                });
            });
    }

    fn draw_slides(&self, ctx: &egui::Context) {
        let bg = self.theme.background;
        let slides = self.controller.navigator().deck().slides();
        let placements = &self.surfaces.view.placements;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter().with_clip_rect(rect);
                let mut animating = false;

                for (slide, placement) in slides.iter().zip(placements) {
                    let target = placement.offset();
                    let offset = ctx.animate_value_with_time(
                        egui::Id::new(("keydeck_slide", &slide.id)),
                        target,
                        TRANSITION_DURATION,
                    );
                    if offset != target {
                        animating = true;
                    }
                    if offset.abs() >= 1.0 {
                        continue;
                    }
                    let slide_rect = rect.translate(egui::vec2(offset * rect.width(), 0.0));
                    draw_slide(&painter, slide, &self.theme, slide_rect);
                }

                if animating {
                    ctx.request_repaint();
                }

                if let Some(toast) = &self.surfaces.toast {
                    draw_toast(&painter, toast, &self.theme, rect);
                }
            });
    }
}

fn draw_slide(painter: &egui::Painter, slide: &SlideRecord, theme: &Theme, rect: egui::Rect) {
    let padding = 60.0;
    let content_rect = rect.shrink(padding);

    let heading_galley = painter.layout(
        slide.title.clone(),
        egui::FontId::proportional(theme.heading_size),
        theme.heading_color,
        content_rect.width(),
    );
    let heading_height = heading_galley.rect.height();
    let heading_pos = content_rect.left_top() + egui::vec2(0.0, 40.0);
    painter.galley(heading_pos, heading_galley, theme.heading_color);

    let body_top = heading_pos.y + heading_height + 30.0;
    let body_galley = painter.layout(
        slide.body.clone(),
        egui::FontId::proportional(theme.body_size),
        theme.foreground,
        content_rect.width(),
    );
    painter.galley(
        egui::pos2(content_rect.left(), body_top),
        body_galley,
        theme.foreground,
    );
}

fn draw_toast(painter: &egui::Painter, toast: &Toast, theme: &Theme, rect: egui::Rect) {
    let opacity = toast.opacity();
    let color = Theme::with_opacity(theme.foreground, opacity);
    let galley = painter.layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(theme.chrome_size + 3.0),
        color,
    );
    let pad = egui::vec2(16.0, 10.0);
    let size = galley.rect.size() + pad * 2.0;
    let min = egui::pos2(rect.center().x - size.x / 2.0, rect.bottom() - size.y - 24.0);
    let bubble = egui::Rect::from_min_size(min, size);
    painter.rect_filled(
        bubble,
        8.0,
        Theme::with_opacity(theme.chrome_background, opacity * 0.9),
    );
    painter.galley(bubble.min + pad, galley, color);
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller
            .set_viewport_width(ctx.available_rect().width());

        // Viewport commands go out after the input closure; sending inside it deadlocks.
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut toggle_theme = false;
        let mut commands = ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            if i.key_pressed(egui::Key::D) {
                toggle_theme = true;
            }
            input::collect_commands(i)
        });
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        if toggle_theme {
            self.theme = self.theme.toggled();
            self.surfaces.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
        }

        if self.surfaces.toast.as_ref().is_some_and(Toast::is_expired) {
            self.surfaces.toast = None;
        }

        if self.controller.toc().is_open() {
            self.draw_toc(ctx, &mut commands);
        }
        self.draw_controls(ctx, &mut commands);
        self.draw_slides(ctx);

        if !commands.is_empty() {
            self.dispatch_all(commands);
            ctx.request_repaint();
        }
        if self.surfaces.toast.is_some() {
            ctx.request_repaint();
        }
    }
}

pub fn run(file: PathBuf, predicate: &PredicateArgs, options: LaunchOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let defaults = config.defaults();
    let deck = crate::commands::load_deck(&file, predicate, &config)?;

    let title = deck.title.clone().unwrap_or_else(|| {
        format!(
            "keydeck \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let mut navigator = Navigator::new(deck);
    if let Some(slide) = options.start_slide {
        let index = slide.saturating_sub(1).min(navigator.len() - 1);
        navigator.go_to(index);
    }
    if options.start_filtered || defaults.start_filtered.unwrap_or(false) {
        navigator.toggle_filter();
    }

    let mut toc = TocPanel::new(defaults.narrow_width.unwrap_or(DEFAULT_NARROW_WIDTH));
    if options.toc_open {
        toc.open();
    }

    let controller = Controller::new(navigator, toc);
    let theme = Theme::from_name(defaults.theme.as_deref().unwrap_or("light"));

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(DeckApp::new(controller, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
