// ui.rs - egui view over a shared session
// Renders engine state and forwards pointer/button input; no simulation logic here.

use egui::{Color32, Pos2, Rect, Vec2};
use life_engine::config::{MAX_TICK_MS, MIN_TICK_MS, TICK_STEP_MS};
use life_engine::{Driver, GRID_HEIGHT, GRID_WIDTH, Grid, PATTERNS, Session, SharedSession, StasisRecord};

const CELL_SIZE: f32 = 16.0;
const SPACING: f32 = 1.0;
const PITCH: f32 = CELL_SIZE + SPACING;

/// Copy of the session state taken once per frame.
struct View {
    grid: Grid,
    generation: u64,
    population: usize,
    running: bool,
    wrap_edges: bool,
    period_ms: u64,
    frame_rate: u64,
    stasis: StasisRecord,
    drawing: bool,
}

impl View {
    fn capture(s: &Session) -> Self {
        Self {
            grid: *s.grid(),
            generation: s.generation(),
            population: s.population(),
            running: s.is_running(),
            wrap_edges: s.wrap_edges(),
            period_ms: s.tick_period().as_millis(),
            frame_rate: s.frame_rate(),
            stasis: s.stasis(),
            drawing: s.is_drawing(),
        }
    }

    fn status(&self) -> &'static str {
        if self.stasis.detected() {
            "Stable pattern"
        } else if self.running {
            "Running"
        } else {
            "Paused"
        }
    }

    fn hint(&self) -> &'static str {
        if self.stasis.detected() {
            "Auto-paused: stable pattern detected"
        } else if self.running {
            "Simulation running"
        } else {
            "Click & drag to draw, or right-click to drop the selected pattern"
        }
    }
}

pub struct LifeApp {
    session: SharedSession,
    selected_pattern: usize,
    last_cell: Option<(usize, usize)>,
    live_color: Color32,
    dead_color: Color32,
    // Dropped before the runtime it runs on.
    _driver: Driver,
    _runtime: tokio::runtime::Runtime,
}

impl LifeApp {
    pub fn new(session: SharedSession, driver: Driver, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            session,
            selected_pattern: 0,
            last_cell: None,
            live_color: Color32::from_rgb(59, 130, 246),
            dead_color: Color32::WHITE,
            _driver: driver,
            _runtime: runtime,
        }
    }

    fn apply<T>(&self, op: impl FnOnce(&mut Session) -> life_engine::Result<T>) {
        if let Err(err) = self.session.update(op) {
            log::debug!("Input ignored: {err}");
        }
    }

    fn controls(&self, ui: &mut egui::Ui, view: &View) {
        ui.horizontal(|ui| {
            let button_text = if view.running { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.session.update(Session::toggle_running);
            }

            if ui.button("⏹ Reset").clicked() {
                self.session.update(Session::reset);
            }

            if ui.add_enabled(!view.running, egui::Button::new("🎲 Random")).clicked() {
                self.apply(Session::randomize);
            }

            ui.separator();

            let mut wrap = view.wrap_edges;
            if ui
                .add_enabled(!view.running, egui::Checkbox::new(&mut wrap, "Wrap edges"))
                .changed()
            {
                self.apply(|s| s.set_wrap_edges(wrap));
            }

            ui.separator();

            ui.label("Speed:");
            let mut period = view.period_ms;
            let slider = egui::Slider::new(&mut period, MIN_TICK_MS..=MAX_TICK_MS)
                .step_by(TICK_STEP_MS as f64)
                .suffix(" ms");
            if ui.add(slider).changed() {
                self.apply(|s| s.set_tick_millis(period));
            }
            ui.label(format!("{} fps", view.frame_rate));
        });
    }

    fn pattern_picker(&mut self, ui: &mut egui::Ui, view: &View) {
        ui.horizontal(|ui| {
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        let label = format!("{} ({}×{})", pattern.name, pattern.width, pattern.height);
                        ui.selectable_value(&mut self.selected_pattern, i, label);
                    }
                });

            if ui.add_enabled(!view.running, egui::Button::new("Load centered")).clicked() {
                let pattern = &PATTERNS[self.selected_pattern];
                self.apply(|s| s.load_pattern(pattern));
            }
        });
        if view.running {
            ui.colored_label(Color32::from_rgb(217, 119, 6), "Pause the simulation to use patterns");
        }
    }

    fn board(&mut self, ui: &mut egui::Ui, view: &View) {
        let total_size = Vec2::new(
            PITCH * GRID_WIDTH as f32 - SPACING,
            PITCH * GRID_HEIGHT as f32 - SPACING,
        );
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 2.0, Color32::from_gray(210));
        for (row, cells) in view.grid.rows().iter().enumerate() {
            for (col, &alive) in cells.iter().enumerate() {
                let min = origin + Vec2::new(col as f32 * PITCH, row as f32 * PITCH);
                let rect = Rect::from_min_size(min, Vec2::splat(CELL_SIZE));
                let color = if alive { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 2.0, color);
            }
        }

        let (pressed, down, pointer) = ui.input(|i| {
            (i.pointer.primary_pressed(), i.pointer.primary_down(), i.pointer.latest_pos())
        });
        let hovered = pointer
            .filter(|pos| response.rect.contains(*pos))
            .map(|pos| cell_at(origin, pos));

        if !view.running {
            if pressed {
                if let Some((row, col)) = hovered {
                    self.apply(|s| s.press(row, col));
                    self.last_cell = Some((row, col));
                }
            } else if down && view.drawing {
                if let Some(cell) = hovered.filter(|&cell| self.last_cell != Some(cell)) {
                    self.apply(|s| s.enter(cell.0, cell.1));
                    self.last_cell = Some(cell);
                }
            }
        }

        // Pointer-up anywhere, or leaving the board, ends the stroke.
        if view.drawing && stroke_ends(down, hovered) {
            self.session.update(Session::release);
            self.last_cell = None;
        }

        if response.secondary_clicked() {
            if let Some((row, col)) = hovered {
                let pattern = &PATTERNS[self.selected_pattern];
                self.apply(|s| s.drop_pattern(pattern, row as isize, col as isize));
            }
        }
    }

    fn stats(&self, ui: &mut egui::Ui, view: &View) {
        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", view.generation));
            ui.separator();
            ui.label(format!("Population: {}", view.population));
            if let Some(generation) = view.stasis.generation() {
                ui.separator();
                ui.label(format!("Stasis at gen {generation}"));
            }
            ui.separator();
            ui.label(format!("Status: {}", view.status()));
        });

        ui.separator();
        ui.label("• Live cell with 2-3 neighbors survives");
        ui.label("• Dead cell with exactly 3 neighbors becomes alive");
        ui.label("• All other cells die or stay dead");
    }
}

fn stroke_ends(down: bool, hovered: Option<(usize, usize)>) -> bool {
    !down || hovered.is_none()
}

fn cell_at(origin: Pos2, pos: Pos2) -> (usize, usize) {
    let offset = pos - origin;
    let row = ((offset.y / PITCH) as usize).min(GRID_HEIGHT - 1);
    let col = ((offset.x / PITCH) as usize).min(GRID_WIDTH - 1);
    (row, col)
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.session.read(View::capture);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.pattern_picker(ui, &view);
            ui.separator();
            ui.label(view.hint());
            self.board(ui, &view);
            ui.separator();
            self.controls(ui, &view);
            ui.separator();
            self.stats(ui, &view);
        });

        // Keep polling while the driver advances the grid
        if view.running {
            ctx.request_repaint();
        }
    }
}
