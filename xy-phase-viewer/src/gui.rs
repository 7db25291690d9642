//! egui UI: sliders, reset / pause / rotate controls, and the arrow canvas.
//!
//! All widget handlers only set flags on the `Simulation`; the single
//! `sim.frame(now)` call per update is where the grids change.

use eframe::egui;
use log::warn;
use xy_phase_sim::prelude::*;

// ─── Colors ──────────────────────────────────────────────────────────────────

const FOREST_GREEN: egui::Color32 = egui::Color32::from_rgb(86, 166, 96);
const WARN_RED: egui::Color32 = egui::Color32::from_rgb(217, 77, 77);
const DIM: egui::Color32 = egui::Color32::from_rgb(160, 160, 150);
const GOLD_EG: egui::Color32 = egui::Color32::from_rgb(212, 175, 55);
const HEADING_CLR: egui::Color32 = egui::Color32::from_rgb(220, 218, 210);
const LABEL_CLR: egui::Color32 = egui::Color32::from_rgb(230, 228, 218);
const CANVAS_BG: egui::Color32 = egui::Color32::from_rgb(14, 18, 14);
const MONO_ARROW: egui::Color32 = egui::Color32::from_rgb(200, 214, 200);

const ARROW_WIDTH: f32 = 1.4;

// ─── Visuals ─────────────────────────────────────────────────────────────────

fn forest_visuals() -> egui::Visuals {
    let mut vis = egui::Visuals::dark();
    vis.panel_fill = egui::Color32::from_rgb(24, 30, 24);
    vis.window_fill = egui::Color32::from_rgb(28, 34, 28);
    vis.extreme_bg_color = egui::Color32::from_rgb(20, 24, 20);
    vis.faint_bg_color = egui::Color32::from_rgb(34, 44, 34);
    vis.widgets.inactive.bg_fill = egui::Color32::from_rgb(50, 65, 50);
    vis.widgets.hovered.bg_fill = egui::Color32::from_rgb(65, 90, 65);
    vis.widgets.active.bg_fill = FOREST_GREEN;
    vis.override_text_color = Some(LABEL_CLR);
    vis
}

fn dim_label(ui: &mut egui::Ui, text: &str) {
    ui.colored_label(DIM, text);
}

fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(3.0, 16.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 1.0, GOLD_EG);
        ui.add_space(4.0);
        ui.colored_label(HEADING_CLR, egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

// ─── Arrow canvas ────────────────────────────────────────────────────────────

fn arrow_color(hue: Option<f64>) -> egui::Color32 {
    match hue {
        Some(h) => egui::ecolor::Hsva::new((h / 360.0) as f32, 1.0, 1.0, 1.0).into(),
        None => MONO_ARROW,
    }
}

fn to_screen(origin: egui::Pos2, p: (f64, f64)) -> egui::Pos2 {
    origin + egui::vec2(p.0 as f32, p.1 as f32)
}

/// Shaft plus two barbs per site, from the display grid only.
fn draw_field(painter: &egui::Painter, rect: egui::Rect, sim: &Simulation) {
    painter.rect_filled(rect, 0.0, CANVAS_BG);
    for arrow in sim.arrows() {
        let stroke = egui::Stroke::new(ARROW_WIDTH, arrow_color(arrow.hue));
        let tip = to_screen(rect.min, arrow.tip);
        painter.line_segment([to_screen(rect.min, arrow.tail), tip], stroke);
        for barb in arrow.barbs {
            painter.line_segment([tip, to_screen(rect.min, barb)], stroke);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  App state
// ═══════════════════════════════════════════════════════════════════════════════

pub struct XyPhaseApp {
    sim: Simulation,
    // Slider mirrors
    speed: u32,
    temperature: f64,
    // UI flags
    paused: bool,
    show_about: bool,
    painting: bool,
    last_canvas: Option<egui::Vec2>,
    resize_error: Option<String>,
}

impl XyPhaseApp {
    pub fn new(cc: &eframe::CreationContext<'_>, sim: Simulation) -> Self {
        cc.egui_ctx.set_visuals(forest_visuals());

        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(egui::TextStyle::Heading, egui::FontId::proportional(17.0));
        style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(14.0));
        style.text_styles.insert(egui::TextStyle::Small, egui::FontId::proportional(12.0));
        style.text_styles.insert(egui::TextStyle::Button, egui::FontId::proportional(14.0));
        cc.egui_ctx.set_style(style);

        Self {
            speed: sim.params().speed(),
            temperature: sim.params().temperature(),
            sim,
            paused: false,
            show_about: false,
            painting: false,
            last_canvas: None,
            resize_error: None,
        }
    }

    /// Keep the simulation's pause state in line with the user toggle and
    /// the About window, which also holds the loop.
    fn sync_pause(&mut self, now_ms: f64) {
        let hold = self.paused || self.show_about;
        if hold && !self.sim.is_paused() {
            self.sim.pause();
        } else if !hold && self.sim.is_paused() {
            self.sim.resume(now_ms);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.colored_label(GOLD_EG, egui::RichText::new("PARAXIOM").strong().size(14.0));
            ui.colored_label(DIM, egui::RichText::new("Technologies").size(12.0));
        });
        ui.add_space(2.0);
        ui.colored_label(GOLD_EG, egui::RichText::new("XY PHASE LATTICE").strong().size(13.0));
        dim_label(ui, "U(1) field on a torus \u{00b7} drag to paint");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let (label, color) = if self.paused {
                ("RESUME", FOREST_GREEN)
            } else {
                ("PAUSE", GOLD_EG)
            };
            if ui
                .add(egui::Button::new(egui::RichText::new(label).strong().color(color)))
                .clicked()
            {
                self.paused = !self.paused;
            }
            if ui.button("RESET").clicked() {
                self.sim.reset();
            }
            ui.colored_label(
                egui::Color32::from_rgb(110, 110, 105),
                egui::RichText::new("(Space / R)").size(11.0),
            );
        });

        section_heading(ui, "DYNAMICS");

        ui.label("Speed");
        dim_label(ui, "Physics tick every (11 \u{2212} speed) frames.");
        if ui.add(egui::Slider::new(&mut self.speed, 1..=10)).changed() {
            self.sim.set_speed(self.speed);
        }

        ui.add_space(2.0);
        ui.label("Temperature");
        dim_label(ui, "Thermal kick amplitude; also sharpens display tracking.");
        if ui.add(egui::Slider::new(&mut self.temperature, 0.0..=1.0)).changed() {
            if let Err(e) = self.sim.set_temperature(self.temperature) {
                warn!("{e}");
            }
        }

        section_heading(ui, "GLOBAL U(1) ROTATION");
        dim_label(ui, "Hold to rotate every phase by the same angle.");
        dim_label(ui, "Relative alignment, and so the pattern, is unchanged.");
        ui.add_space(4.0);
        let rotate = ui.add(
            egui::Button::new(egui::RichText::new("HOLD TO ROTATE").strong())
                .sense(egui::Sense::click_and_drag())
                .min_size(egui::vec2(180.0, 28.0)),
        );
        // Released, dragged off the button, or window unfocused: stop at once.
        let focused = ui.ctx().input(|i| i.focused);
        if rotate.is_pointer_button_down_on() && rotate.contains_pointer() && focused {
            self.sim.start_rotation();
        } else {
            self.sim.stop_rotation();
        }

        section_heading(ui, "LATTICE");
        let shape = self.sim.shape();
        ui.label(format!(
            "{} \u{00d7} {} sites  \u{00b7}  cell {:.0}px",
            shape.width(),
            shape.height(),
            self.sim.cell_size()
        ));
        ui.label(format!("Physics ticks: {}", self.sim.ticks()));
        let state = if self.sim.is_paused() {
            ("paused", WARN_RED)
        } else if self.sim.is_rotating() {
            ("rotating", GOLD_EG)
        } else {
            ("relaxing", FOREST_GREEN)
        };
        ui.horizontal(|ui| {
            ui.label("State:");
            ui.colored_label(state.1, state.0);
        });
        if let Some(err) = &self.resize_error {
            ui.colored_label(WARN_RED, err);
        }

        ui.add_space(6.0);
        ui.separator();
        if ui.button("About\u{2026}").clicked() {
            self.show_about = true;
        }
    }

    /// Track canvas size and the press/drag/release of the primary button.
    fn canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let size = response.rect.size();
        if self.last_canvas != Some(size) {
            self.last_canvas = Some(size);
            let viewport = Viewport {
                width: size.x as f64,
                height: size.y as f64,
                cell_size: self.sim.cell_size(),
            };
            self.resize_error = self.sim.resize(viewport).err().map(|e| e.to_string());
        }

        if response.is_pointer_button_down_on() {
            if let Some(pos) = ctx.input(|i| i.pointer.interact_pos()) {
                let local = pos - response.rect.min;
                let (x, y) = (local.x as f64, local.y as f64);
                if self.painting {
                    self.sim.pointer_move(x, y);
                } else {
                    self.painting = true;
                    self.sim.pointer_down(x, y);
                }
            }
        } else if self.painting {
            self.painting = false;
            self.sim.pointer_up();
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Frame update
// ═══════════════════════════════════════════════════════════════════════════════

impl eframe::App for XyPhaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;

        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.paused = !self.paused;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.sim.reset();
        }
        if !ctx.input(|i| i.focused) {
            self.sim.stop_rotation();
            if self.painting {
                self.painting = false;
                self.sim.pointer_leave();
            }
        }

        egui::SidePanel::left("controls")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| self.controls(ui));

        let mut about_open = self.show_about;
        egui::Window::new("About")
            .open(&mut about_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Each arrow is one lattice site's phase angle.");
                dim_label(ui, "Every tick a site turns 20% toward the vector mean of its four");
                dim_label(ui, "neighbours, then takes a random kick scaled by temperature.");
                dim_label(ui, "Edges wrap: the lattice is a torus.");
                ui.add_space(4.0);
                dim_label(ui, "The simulation is paused while this window is open.");
            });
        self.show_about = about_open;
        self.sync_pause(now_ms);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(CANVAS_BG))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                self.canvas_input(ctx, &response);

                self.sim.frame(now_ms);
                draw_field(&painter, response.rect, &self.sim);

                if self.sim.is_paused() {
                    painter.text(
                        response.rect.center_top() + egui::vec2(0.0, 12.0),
                        egui::Align2::CENTER_TOP,
                        "PAUSED",
                        egui::FontId::monospace(14.0),
                        WARN_RED,
                    );
                }
            });

        ctx.request_repaint();
    }
}
