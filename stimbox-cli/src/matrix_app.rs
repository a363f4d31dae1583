//! Interactive viewer for the tone matrix sequencer.

use eframe::egui;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use stimbox_core::{
    savestate, FrameClock, Grid, HeatRenderer, Instrument, RecordingInstrument, TileSprite,
};

const GRID_SIZE: usize = 16;
/// Logical canvas the renderer works in; the on-screen rect is scaled to it.
const CANVAS_SIZE: f32 = 640.0;
/// Seconds the playhead spends on one column.
const NOTE_SECS: f64 = 0.25;
/// One frame unit of particle time per 16.67 ms, i.e. 60 fps.
const FRAME_UNIT_MS: f32 = 16.67;

const INSTRUMENT_NAMES: [&str; 2] = ["lead", "bass"];

pub struct MatrixApp {
    grid: Grid,
    instruments: Vec<Rc<RefCell<RecordingInstrument>>>,
    renderer: HeatRenderer,
    clock: FrameClock,
    started: Instant,
    /// Arm state the current press gesture applies, decided by the first
    /// tile it touches. `None` between gestures.
    drag_arming: Option<bool>,
}

impl MatrixApp {
    pub fn new(load: Option<&str>) -> Self {
        let instruments: Vec<Rc<RefCell<RecordingInstrument>>> = (0..INSTRUMENT_NAMES.len())
            .map(|_| Rc::new(RefCell::new(RecordingInstrument::new())))
            .collect();
        let boxed: Vec<Box<dyn Instrument>> = instruments
            .iter()
            .map(|i| Box::new(Rc::clone(i)) as Box<dyn Instrument>)
            .collect();
        let mut grid = Grid::new(GRID_SIZE, GRID_SIZE, boxed);

        if let Some(state) = load {
            if let Err(e) = savestate::deserialize(&mut grid, state) {
                log::warn!("could not restore savestate: {e}");
            }
        }

        let mut clock = FrameClock::new(FRAME_UNIT_MS);
        clock.start();
        Self {
            grid,
            instruments,
            renderer: HeatRenderer::new(GRID_SIZE, GRID_SIZE, CANVAS_SIZE, CANVAS_SIZE),
            clock,
            started: Instant::now(),
            drag_arming: None,
        }
    }

    fn apply_press(&mut self, logical: Vec2) {
        let Some((x, y)) = self.renderer.pixel_to_tile(logical) else {
            return;
        };
        let arm = *self
            .drag_arming
            .get_or_insert_with(|| !self.grid.armed(x, y));
        if let Err(e) = self.grid.set_armed(x, y, arm) {
            log::warn!("could not arm tile ({x}, {y}): {e}");
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("matrix_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    if let Err(e) = self.grid.clear_all() {
                        log::warn!("could not clear grid: {e}");
                    }
                }
                ui.separator();
                let mut current = self.grid.current_instrument();
                for (index, name) in INSTRUMENT_NAMES.iter().enumerate() {
                    ui.radio_value(&mut current, index, *name);
                }
                if current != self.grid.current_instrument() {
                    self.grid.set_active_instrument(current);
                }
                ui.separator();
                let state = savestate::serialize(&self.grid);
                if ui.button("Copy savestate").clicked() {
                    ui.output_mut(|o| o.copied_text = state.clone());
                }
                ui.monospace(if state.is_empty() {
                    "(empty)"
                } else {
                    state.as_str()
                });
            });
        });
    }
}

impl eframe::App for MatrixApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keep every instrument's transport in lockstep
        let elapsed = self.started.elapsed().as_secs_f64();
        let column = (elapsed / NOTE_SECS) as usize % GRID_SIZE;
        for instrument in &self.instruments {
            instrument.borrow_mut().set_playhead(Some(column));
        }

        self.top_panel(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let side = ui.available_width().min(ui.available_height());
                let rect = egui::Rect::from_min_size(
                    ui.max_rect().min,
                    egui::vec2(side, side),
                );
                let scale = CANVAS_SIZE / side;

                let pointer = ui.input(|i| i.pointer.clone());
                let logical = pointer.hover_pos().filter(|p| rect.contains(*p)).map(|p| {
                    Vec2::new((p.x - rect.left()) * scale, (p.y - rect.top()) * scale)
                });
                if pointer.primary_down() {
                    if let Some(pos) = logical {
                        self.apply_press(pos);
                    }
                } else {
                    self.drag_arming = None;
                }

                let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
                let dt = self.clock.tick(now_ms).unwrap_or(0.0);
                let visuals = self.renderer.update(&self.grid, dt, logical);

                let painter = ui.painter();
                let cell = side / GRID_SIZE as f32;
                let gap = cell * 0.08;
                for (index, visual) in visuals.iter().enumerate() {
                    let (x, y) = self.grid.index_to_coord(index);
                    let min = egui::pos2(
                        rect.left() + x as f32 * cell + gap,
                        rect.top() + y as f32 * cell + gap,
                    );
                    let tile = egui::Rect::from_min_size(
                        min,
                        egui::vec2(cell - 2.0 * gap, cell - 2.0 * gap),
                    );
                    let level = (visual.alpha.clamp(0.0, 1.0) * 255.0) as u8;
                    let color = match visual.sprite {
                        TileSprite::Playing => egui::Color32::WHITE,
                        _ => egui::Color32::from_rgba_unmultiplied(0x99, 0x66, 0xff, level),
                    };
                    painter.rect_filled(tile, cell * 0.12, color);
                }

                for p in self.renderer.pool().live() {
                    painter.circle_filled(
                        egui::pos2(
                            rect.left() + p.pos.x / scale,
                            rect.top() + p.pos.y / scale,
                        ),
                        1.5,
                        egui::Color32::from_white_alpha(180),
                    );
                }
            });
        ctx.request_repaint();
    }
}
