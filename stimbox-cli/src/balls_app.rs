//! Interactive viewer for the repulsion balls engine.

use eframe::egui;
use glam::Vec2;
use std::time::Instant;
use stimbox_core::{
    EngineConfig, FrameClock, PointerEvent, PointerTracker, RepulsionEngine, Viewport,
};

const BALL_COLOR: egui::Color32 = egui::Color32::from_rgb(0x99, 0x66, 0xff);

pub struct BallsApp {
    engine: RepulsionEngine,
    clock: FrameClock,
    tracker: PointerTracker,
    viewport: Viewport,
    started: Instant,
}

impl BallsApp {
    pub fn new(config: EngineConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => RepulsionEngine::seeded(config, seed),
            None => RepulsionEngine::new(config),
        };
        let mut clock = FrameClock::new(config.timescale);
        clock.start();
        Self {
            engine,
            clock,
            tracker: PointerTracker::new(),
            viewport: Viewport::hidden(),
            started: Instant::now(),
        }
    }

    fn feed_pointer(&mut self, ui: &egui::Ui, rect: egui::Rect) {
        let events: Vec<egui::Event> = ui.input(|i| i.events.clone());
        let mut saw_touch = false;
        for event in &events {
            if let egui::Event::Touch { id, phase, pos, .. } = event {
                saw_touch = true;
                let pos = Vec2::new(pos.x, pos.y);
                let ev = match phase {
                    egui::TouchPhase::Start => PointerEvent::TouchStart { id: id.0, pos },
                    egui::TouchPhase::Move => PointerEvent::TouchMove { id: id.0, pos },
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                        PointerEvent::TouchEnd { id: id.0 }
                    }
                };
                self.tracker.handle(ev, &self.viewport);
            }
        }
        if saw_touch {
            return;
        }
        match ui.input(|i| i.pointer.hover_pos()) {
            Some(pos) if rect.contains(pos) => {
                let local = Vec2::new(pos.x - rect.left(), pos.y - rect.top());
                self.tracker
                    .handle(PointerEvent::MouseMove(local), &self.viewport);
            }
            _ => self.tracker.handle(PointerEvent::MouseOut, &self.viewport),
        }
    }
}

impl eframe::App for BallsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let viewport =
                    Viewport::new(rect.top(), rect.left(), rect.width(), rect.height());
                if viewport != self.viewport {
                    self.viewport = viewport;
                    self.engine.set_bounds(viewport);
                }

                self.feed_pointer(ui, rect);
                self.engine
                    .set_cursor(self.tracker.position(), self.tracker.on_screen());

                let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
                if let Some(dt) = self.clock.tick(now_ms) {
                    self.engine.tick(dt);
                }

                let painter = ui.painter();
                for body in self.engine.bodies() {
                    painter.circle_filled(
                        egui::pos2(rect.left() + body.pos.x, rect.top() + body.pos.y),
                        body.radius,
                        BALL_COLOR,
                    );
                }
            });
        ctx.request_repaint();
    }
}
