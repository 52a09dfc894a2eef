//! Interactive nucleus viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns one simulated nucleus and the
//! [`Stage`] that plays the scene for it, and implements [`eframe::App`] to
//! draw the particles, animate ejected decay products and trigger decays.

use eframe::App;
use glam::Vec2;
use nucleus_core::{
    config::Config,
    decay::BetaMode,
    ejection::{Ejecta, Ejection},
    ids::RandomIds,
    nucleus::Nucleus,
    nuclide::Nuclide,
    particle::{Particle, ParticleKind},
    scene::Scene,
};
use rand::rngs::ThreadRng;
use std::time::Duration;

/// An ejection in flight, with the stage time it was launched at.
struct Flight {
    ejection: Ejection,
    started: f64,
}

impl Flight {
    fn elapsed(&self, now: f64) -> Duration {
        Duration::from_secs_f64((now - self.started).max(0.0))
    }
}

/// The viewer's side of the simulation: keeps decay products in flight.
///
/// Particle visuals are drawn straight from the nucleus every frame, so add
/// and remove notifications only need logging.
#[derive(Default)]
struct Stage {
    now: f64,
    flights: Vec<Flight>,
}

impl Stage {
    /// Steps ejected clusters and drops flights that have finished.
    fn advance(&mut self) {
        let mut flights = std::mem::take(&mut self.flights);
        for flight in &mut flights {
            flight.ejection.step(self);
        }
        let now = self.now;
        flights.retain(|f| {
            let alive = f.ejection.sample(f.elapsed(now)).is_some();
            if !alive {
                log::debug!("ejection of {} finished", f.ejection.ejecta.id());
            }
            alive
        });
        // Anything ejected while stepping goes after the existing flights.
        flights.append(&mut self.flights);
        self.flights = flights;
    }
}

impl Scene for Stage {
    fn cluster_attached(&mut self, cluster: &str, parent: Option<&str>, _origin: Vec2) {
        log::debug!("cluster {cluster} attached under {parent:?}");
    }

    fn particle_removed(&mut self, cluster: &str, particle: &Particle) {
        log::debug!("{} {} left {cluster}", particle.kind(), particle.id());
    }

    fn eject(&mut self, ejection: Ejection) {
        self.flights.push(Flight {
            ejection,
            started: self.now,
        });
    }
}

/// Main application state for the interactive viewer.
///
/// ### Fields
/// - `nucleus` - The cluster being simulated.
/// - `stage` - Scene implementation holding in-flight ejections.
/// - `cfg` - Tuning applied to the nucleus and anything it ejects.
/// - `nuclide` - Composition used by the next reset.
///
/// - `ids` / `rng` - Id and randomness sources for decays and resets.
///
/// - `running` - Whether the simulation auto-advances every frame.
/// - `zoom` - Screen pixels per simulation unit.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `status` - Outcome of the last decay, shown in the status bar.
pub struct Viewer {
    nucleus: Nucleus,
    stage: Stage,
    cfg: Config,
    nuclide: Nuclide,

    ids: RandomIds,
    rng: ThreadRng,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    status: String,
}

impl Viewer {
    /// Creates a viewer simulating carbon-14.
    pub fn new() -> Self {
        let cfg = Config::default();
        let nuclide = Nuclide::CARBON_14;
        let mut ids = RandomIds::new();
        let mut rng = rand::rng();
        let mut stage = Stage::default();
        let mut nucleus = Nucleus::from_nuclide(nuclide, cfg, &mut ids, &mut rng);
        nucleus.append_to(&mut stage, None);

        Self {
            nucleus,
            stage,
            cfg,
            nuclide,
            ids,
            rng,
            running: true,
            zoom: 30.0,
            pan: egui::vec2(0.0, 0.0),
            status: String::new(),
        }
    }

    /// Rebuilds the nucleus from `self.nuclide` and drops every flight.
    fn reset(&mut self) {
        self.stage.flights.clear();
        self.nucleus = Nucleus::from_nuclide(self.nuclide, self.cfg, &mut self.ids, &mut self.rng);
        self.nucleus.append_to(&mut self.stage, None);
        self.status = format!("reset to {}", self.nuclide);
    }

    /// Advances the nucleus and every flight by one tick.
    fn step_once(&mut self) {
        self.nucleus.tick(&mut self.stage);
        self.stage.advance();
    }

    fn alpha_decay(&mut self) {
        let result = self
            .nucleus
            .alpha_decay(&mut self.stage, &mut self.ids, &mut self.rng)
            .map(|_| ());
        self.report("alpha", result);
    }

    fn beta_decay(&mut self, mode: BetaMode) {
        let result = self
            .nucleus
            .beta_decay(mode, &mut self.stage, &mut self.ids, &mut self.rng)
            .map(|_| ());
        self.report(&format!("beta{}", mode.symbol()), result);
    }

    fn report(&mut self, what: &str, result: Result<(), nucleus_core::error::DecayError>) {
        self.status = match result {
            Ok(()) => format!("{what} decay: now {}", self.current()),
            Err(e) => e.to_string(),
        };
    }

    /// Nuclide the simulated cluster currently represents.
    fn current(&self) -> Nuclide {
        Nuclide::new(
            self.nucleus.count(ParticleKind::Proton) as u32,
            self.nucleus.count(ParticleKind::Neutron) as u32,
        )
    }

    /// Daughters of the next alpha and beta decay, `-` where impossible.
    fn decay_preview(&self) -> String {
        let label = |n: Option<Nuclide>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
        let current = self.current();
        format!(
            "α → {}  β → {}",
            label(current.after_alpha()),
            label(current.after_beta())
        )
    }

    /// Pushes `self.cfg` into the nucleus and reheats its layout.
    fn apply_config(&mut self) {
        if let Err(e) = self.nucleus.set_attr("gravity", &self.cfg.gravity.to_string()) {
            self.status = e.to_string();
        }
        self.nucleus.set_config(self.cfg);
        self.nucleus.restart();
    }

    /// Offset that centers the nucleus' layout region on the world origin.
    fn frame_offset(&self) -> Vec2 {
        -self.nucleus.force().center()
    }

    /// Converts a world-space position to screen-space (y up).
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    fn draw_particle(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        particle: &Particle,
        world: Vec2,
        opacity: f32,
    ) {
        let style = particle.style();
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
        let fill = egui::Color32::from_rgba_unmultiplied(style.fill[0], style.fill[1], style.fill[2], alpha);
        let stroke_color =
            egui::Color32::from_rgba_unmultiplied(style.stroke[0], style.stroke[1], style.stroke[2], alpha);
        painter.circle(
            self.world_to_screen(world, rect),
            (particle.radius() * self.zoom).max(1.5),
            fill,
            egui::Stroke::new(style.stroke_width * self.zoom, stroke_color),
        );
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`]; returns `true` if changed.
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Builds the top panel (run controls, decays, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }
                if ui.button("Step").clicked() {
                    self.step_once();
                }
                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                if ui.button("α decay").clicked() {
                    self.alpha_decay();
                }
                for symbol in ["-", "+"] {
                    if ui.button(format!("β{symbol} decay")).clicked() {
                        self.beta_decay(BetaMode::from_symbol(symbol));
                    }
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 2.0..=100.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (composition, layout temperature, flights).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let c = self.nucleus.composition();
                    ui.label(format!("in flight = {}", self.stage.flights.len()));
                    ui.label(format!("alpha = {:.4}", self.nucleus.force().alpha()));
                    ui.label(format!("size = {:.1}", self.nucleus.size_aggregate()));
                    ui.separator();
                    ui.label(self.decay_preview());
                    ui.label(format!(
                        "{}: p = {}  n = {}  ({} particles)",
                        self.current(),
                        c.protons,
                        c.neutrons,
                        c.total()
                    ));
                    if let Ok(id) = self.nucleus.attr("id") {
                        ui.label(id.to_string());
                    }
                });
            });
        });
    }

    /// Builds the right-hand panel with the nuclide picker and layout tuning.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Nuclide");
                ui.horizontal(|ui| {
                    ui.label("protons:");
                    ui.add(egui::DragValue::new(&mut self.nuclide.protons).range(0..=120));
                });
                ui.horizontal(|ui| {
                    ui.label("neutrons:");
                    ui.add(egui::DragValue::new(&mut self.nuclide.neutrons).range(0..=180));
                });
                ui.label(self.nuclide.to_string());
                if ui.button("Build").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.heading("Layout");
                let mut changed = false;
                changed |= Self::labeled_drag_f32(ui, "gravity:", &mut self.cfg.gravity, 0.0..=5.0, 0.05);
                changed |= Self::labeled_drag_f32(ui, "charge:", &mut self.cfg.charge, -5.0..=0.0, 0.01);
                changed |= Self::labeled_drag_f32(ui, "friction:", &mut self.cfg.friction, 0.0..=1.0, 0.01);
                changed |= Self::labeled_drag_f32(
                    ui,
                    "collision alpha:",
                    &mut self.cfg.collision_alpha,
                    0.01..=1.0,
                    0.01,
                );
                if changed {
                    self.apply_config();
                }

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                    self.apply_config();
                }
            });
    }

    /// Builds the central panel where the nucleus and its ejecta are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if response.dragged() {
                self.pan += response.drag_delta();
            }

            let offset = self.frame_offset();
            for p in self.nucleus.particles() {
                self.draw_particle(&painter, rect, p, offset + p.pos, 1.0);
            }
            if self.nucleus.registry().is_empty() {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "empty nucleus",
                    egui::FontId::proportional(16.0),
                    egui::Color32::GRAY,
                );
            }

            for flight in &self.stage.flights {
                let Some(frame) = flight.ejection.sample(flight.elapsed(self.stage.now)) else {
                    continue;
                };
                match &flight.ejection.ejecta {
                    Ejecta::Cluster(cluster) => {
                        for p in cluster.particles() {
                            let world = offset + cluster.origin() + frame.translation + p.pos;
                            self.draw_particle(&painter, rect, p, world, frame.opacity);
                        }
                    }
                    Ejecta::Particle(p) => {
                        self.draw_particle(&painter, rect, p, offset + p.pos + frame.translation, frame.opacity);
                    }
                }
            }

            if let Some(cursor) = response.hover_pos() {
                let world = self.screen_to_world(cursor, rect) - offset;
                painter.text(
                    rect.left_top() + egui::vec2(8.0, 8.0),
                    egui::Align2::LEFT_TOP,
                    format!("({:.2}, {:.2})", world.x, world.y),
                    egui::FontId::monospace(12.0),
                    egui::Color32::GRAY,
                );
            }

            if self.running || !self.stage.flights.is_empty() {
                ctx.request_repaint();
            }
        });
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Viewer {
    /// eframe callback: advances the simulation one tick when running, then
    /// builds all panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.stage.now = ctx.input(|i| i.time);
        if self.running {
            self.step_once();
        } else {
            self.stage.advance();
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
