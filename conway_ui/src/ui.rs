// ui.rs - Canvas, controls and pointer handling for the Life window

use conway::Phase;
use conway::patterns::PATTERNS;
use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};
use tracing::warn;

use crate::LifeApp;

/// Share of cells alive after "Random"
const RANDOM_DENSITY: f64 = 0.33;

const CELL_COLOR: Color32 = Color32::BLACK;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Ticks that arrived since the last frame
        self.pump();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui);
            ui.separator();
            self.sliders(ui);
            ui.separator();
            self.canvas(ui);
            ui.separator();

            let grid = self.controller.grid();
            let cells = grid.width() * grid.height();
            let live_cells = grid.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / cells as f32) * 100.0));
                ui.label(match self.controller.phase() {
                    Phase::Editing => "Click cells to toggle them",
                    Phase::Running => "Running",
                    Phase::Stopped => "Stopped",
                });
            });
        });
    }
}

impl LifeApp {
    fn controls(&mut self, ui: &mut egui::Ui) {
        let running = self.controller.is_running();

        ui.horizontal(|ui| {
            let button_text = if running { "⏹ Stop" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                let schedule = if running { self.controller.stop() } else { self.controller.start() };
                self.ticker.apply(schedule);
            }

            if ui.button("🗑 Clear").clicked() {
                let schedule = self.controller.clear();
                self.ticker.apply(schedule);
            }

            if ui.add_enabled(!running, egui::Button::new("🎲 Random")).clicked() {
                self.controller.randomize(rand::random(), RANDOM_DENSITY);
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.add_enabled(!running, egui::Button::new("Apply Pattern")).clicked() {
                if let Err(err) = self.controller.load_pattern(PATTERNS[self.selected_pattern].name) {
                    warn!(%err, "pattern not applied");
                }
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.controller.shown_generation()));
        });
    }

    fn sliders(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut period_ms = self.controller.period().as_millis() as u64;
            let speed = egui::Slider::new(&mut period_ms, 10..=1000).text("Speed").suffix(" ms");
            if ui.add(speed).changed() {
                match self.controller.set_period_ms(period_ms) {
                    Ok(schedule) => self.ticker.apply(schedule),
                    Err(err) => warn!(%err, "period not changed"),
                }
            }

            ui.separator();

            let mut limit = self.controller.generation_limit();
            if ui.add(egui::Slider::new(&mut limit, 1..=1000).text("Generations")).changed() {
                self.controller.set_generation_limit(limit);
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let cell = self.controller.cell_size() as f32;
        let (width, height) = (self.controller.grid().width(), self.controller.grid().height());
        let size = Vec2::new(width as f32 * cell, height as f32 * cell);

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let origin = response.rect.min;

        // Pointer handling; edits only land while not running
        if let Some(pos) = response.hover_pos() {
            let local = pos - origin;
            self.controller.hover(local.x, local.y);
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - origin;
                if let Err(err) = self.controller.edit(local.x, local.y) {
                    warn!(%err, "cell not toggled");
                }
            }
        }

        painter.rect_filled(response.rect, 0.0, Color32::WHITE);

        // Grid lines at 20% opacity
        let line = Stroke::new(1.0, Color32::from_black_alpha(51));
        for i in 0..=width {
            let x = origin.x + i as f32 * cell;
            painter.line_segment([Pos2::new(x, origin.y), Pos2::new(x, origin.y + size.y)], line);
        }
        for j in 0..=height {
            let y = origin.y + j as f32 * cell;
            painter.line_segment([Pos2::new(origin.x, y), Pos2::new(origin.x + size.x, y)], line);
        }

        let cell_rect = |x: usize, y: usize| {
            Rect::from_min_size(
                origin + Vec2::new(x as f32 * cell + 1.0, y as f32 * cell + 1.0),
                Vec2::splat((cell - 2.0).max(1.0)),
            )
        };

        for (x, y) in self.controller.grid().live_cells() {
            painter.rect_filled(cell_rect(x, y), 0.0, CELL_COLOR);
        }

        // Placement preview at 40% opacity
        if response.hovered() {
            let (x, y) = self.controller.hovered();
            painter.rect_filled(cell_rect(x, y), 0.0, Color32::from_black_alpha(102));
        }
    }
}
