//! Interactive bouncing-circles viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation, the scene it
//! publishes into, and the camera that frames the arena, and implements
//! [`eframe::App`] to draw and control them through an egui UI.

use crate::{fps::FrameRateMeter, scene::Scene};
use circles_core::{
    Bounds, BoundsProvider, Config, InstanceId, PerspectiveCamera, Simulation, SpawnParams,
};
use eframe::App;
use glam::Vec2;

/// Upper end of the population slider.
const MAX_SLIDER_COUNT: i64 = 5000;

/// Main application state for the interactive viewer.
///
/// The per-frame update is:
/// 1. Handle UI interactions; parameter changes go straight to the simulation.
/// 2. Match the camera aspect to the drawing area.
/// 3. If `running` is `true`, call [`Viewer::step_once`] with the frame time.
/// 4. Draw every published instance.
///
/// ### Fields
/// - `sim` - The simulation core.
/// - `scene` - Visual layer the simulation publishes positions into.
/// - `camera` - Bounds provider framing the arena.
///
/// - `running` - Whether the simulation advances every frame.
/// - `count` - Population requested through the slider.
/// - `highlight_collisions` - Outline bodies that collided in the last step.
/// - `last_collided` - Scene slots of the bodies that collided last step.
/// - `hover_world` - World position under the cursor, from the previous frame.
///
/// - `fps` - Frame-rate meter and its last reading.
pub struct Viewer {
    sim: Simulation<InstanceId>,
    scene: Scene,
    camera: PerspectiveCamera,

    running: bool,
    count: i64,
    highlight_collisions: bool,
    last_collided: Vec<usize>,
    hover_world: Option<Vec2>,

    fps: FrameRateMeter,
    fps_reading: Option<f32>,
}

impl Viewer {
    /// Creates a viewer for the given configuration.
    ///
    /// No bodies exist until the first step; the pool fills to
    /// `cfg.target_count` then.
    pub fn new(cfg: &Config) -> Self {
        let count = i64::try_from(cfg.target_count)
            .unwrap_or(MAX_SLIDER_COUNT)
            .min(MAX_SLIDER_COUNT);
        let mut sim = Simulation::from_config(cfg);
        sim.set_target_count(count);

        Self {
            sim,
            scene: Scene::new(),
            camera: PerspectiveCamera::new(&cfg.camera, 16.0 / 9.0),
            running: true,
            count,
            highlight_collisions: false,
            last_collided: Vec::new(),
            hover_world: None,
            fps: FrameRateMeter::default(),
            fps_reading: None,
        }
    }

    /// Advances the simulation by `dt` seconds and records which scene
    /// slots were involved in collisions.
    fn step_once(&mut self, dt: f32) {
        let report = self.sim.step(dt, &self.camera, &mut self.scene);

        let bodies = self.sim.bodies();
        self.last_collided.clear();
        self.last_collided.extend(
            report
                .collisions
                .iter()
                .flat_map(|&(i, j)| [i, j])
                .map(|i| bodies[i].handle.index()),
        );
    }

    /// Maps a world position inside `bounds` onto `rect`, y up.
    fn world_to_screen(p: Vec2, bounds: &Bounds, rect: egui::Rect) -> egui::Pos2 {
        let t = (p - bounds.min) / bounds.size();
        egui::pos2(
            rect.left() + t.x * rect.width(),
            rect.bottom() - t.y * rect.height(),
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(p: egui::Pos2, bounds: &Bounds, rect: egui::Rect) -> Vec2 {
        let t = Vec2::new(
            (p.x - rect.left()) / rect.width(),
            (rect.bottom() - p.y) / rect.height(),
        );
        bounds.min + t * bounds.size()
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
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

    /// Builds the top panel (run controls, population, collisions).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                    self.sim.set_enabled(self.running);
                }

                if ui.button("Step").clicked() {
                    self.sim.set_enabled(true);
                    self.step_once(1.0 / 60.0);
                    self.sim.set_enabled(self.running);
                }

                ui.separator();
                if ui
                    .add(egui::Slider::new(&mut self.count, 0..=MAX_SLIDER_COUNT).text("Count"))
                    .changed()
                {
                    self.sim.set_target_count(self.count);
                }

                let mut collisions = self.sim.collisions_enabled();
                if ui.checkbox(&mut collisions, "Intercollisions").changed() {
                    self.sim.set_collisions_enabled(collisions);
                }
                ui.checkbox(&mut self.highlight_collisions, "Highlight hits");
            });
        });
    }

    /// Builds the bottom status bar (population, frame rate, collisions).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match self.fps_reading {
                    Some(fps) => ui.label(format!("FPS: {fps:.0}")),
                    None => ui.label("FPS: -"),
                };
                ui.label(format!("Count: {}", self.sim.population()));
                ui.separator();
                ui.label(format!("hits last step = {}", self.last_collided.len() / 2));
                if let Some(p) = self.hover_world {
                    ui.label(format!("cursor = ({:.2}, {:.2})", p.x, p.y));
                }
            });
        });
    }

    /// Builds the right-hand panel for spawn parameters and the camera.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Spawning");
                ui.label("Applies to newly born circles.");

                let mut p = self.sim.parameters();
                let mut changed = false;
                changed |= Self::labeled_drag_f32(
                    ui,
                    "min_radius:",
                    &mut p.min_radius,
                    0.01..=10.0,
                    0.01,
                );
                changed |= Self::labeled_drag_f32(
                    ui,
                    "max_radius:",
                    &mut p.max_radius,
                    0.01..=10.0,
                    0.01,
                );
                changed |= Self::labeled_drag_f32(
                    ui,
                    "min_speed:",
                    &mut p.min_speed,
                    0.0..=100.0,
                    0.1,
                );
                changed |= Self::labeled_drag_f32(
                    ui,
                    "max_speed:",
                    &mut p.max_speed,
                    0.0..=100.0,
                    0.1,
                );

                ui.separator();
                ui.label("Motion");
                changed |= Self::labeled_drag_f32(
                    ui,
                    "velocity_multiplier:",
                    &mut p.velocity_multiplier,
                    0.0..=20.0,
                    0.05,
                );
                if changed {
                    self.sim.set_parameters(p);
                }

                ui.separator();
                ui.label("Camera");
                let mut distance = self.camera.distance();
                let range = self.camera.distance_range();
                if ui
                    .add(egui::Slider::new(&mut distance, range).text("distance"))
                    .changed()
                {
                    self.camera.set_distance(distance);
                }

                ui.separator();
                if ui.button("Reset spawn params").clicked() {
                    self.sim.set_parameters(SpawnParams::default());
                }
            });
    }

    /// Builds the central panel where the arena is stepped and drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if rect.width() > 0.0 && rect.height() > 0.0 {
                self.camera.set_aspect(rect.width() / rect.height());
            }

            if self.running {
                let dt = ctx.input(|i| i.stable_dt);
                self.step_once(dt);
                ctx.request_repaint();
            }

            let bounds = self.camera.bounds();
            let scale = rect.width() / bounds.size().x;

            for (slot, inst, color) in self.scene.iter() {
                let p = Self::world_to_screen(inst.pos, &bounds, rect);
                let r = (0.5 * inst.diameter * scale).max(1.0);
                painter.circle_filled(p, r, color);

                if self.highlight_collisions && self.last_collided.contains(&slot) {
                    painter.circle_stroke(p, r, egui::Stroke::new(1.5, egui::Color32::WHITE));
                }
            }

            self.hover_world = response
                .hover_pos()
                .map(|p| Self::screen_to_world(p, &bounds, rect));
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(fps) = self.fps.tick(ctx.input(|i| i.unstable_dt)) {
            self.fps_reading = Some(fps);
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
