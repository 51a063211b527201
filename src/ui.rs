use egui::{Color32, Context, CornerRadius, RichText};
use glam::Vec3;

use crate::controller::{FrameLoop, FrameStats, JumpPhase};
use crate::model::{Dimensions, PhysicsPreset};
use crate::view::{Paint, Renderer, SpriteLayout};

/// Holds the most recent sprite layout until the egui pass paints it
#[derive(Debug, Default)]
pub struct EguiScene {
    layout: Option<SpriteLayout>,
}

impl EguiScene {
    pub fn layout(&self) -> Option<&SpriteLayout> {
        self.layout.as_ref()
    }
}

impl Renderer for EguiScene {
    fn render(&mut self, transform: Vec3, dimensions: Dimensions) {
        self.layout = Some(SpriteLayout::new(transform, dimensions));
    }
}

/// Read-only data shown in the debug window
pub struct HudInfo<'a> {
    pub frame_loop: &'a FrameLoop,
    pub stats: FrameStats,
    pub preset: PhysicsPreset,
    pub dt: f32,
}

/// Build the complete UI and return egui output
pub fn build_ui(
    egui_ctx: &Context,
    raw_input: egui::RawInput,
    scene: &EguiScene,
    hud: &HudInfo,
) -> egui::FullOutput {
    egui_ctx.run(raw_input, |ctx| {
        draw_scene(ctx, scene);
        draw_debug_window(ctx, hud);
    })
}

fn color(paint: Paint) -> Color32 {
    let [r, g, b] = paint.rgb();
    Color32::from_rgb(r, g, b)
}

fn draw_scene(ctx: &Context, scene: &EguiScene) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(Color32::WHITE))
        .show(ctx, |ui| {
            let Some(layout) = scene.layout() else {
                return;
            };
            let origin = ui.max_rect().min;
            let painter = ui.painter();
            for (rect, paint) in layout.layers() {
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(rect.x, rect.y),
                    egui::vec2(rect.w, rect.h),
                );
                painter.rect_filled(rect, CornerRadius::ZERO, color(paint));
            }
        });
}

fn draw_debug_window(ctx: &Context, hud: &HudInfo) {
    let entity = hud.frame_loop.entity();
    let stepper = hud.frame_loop.stepper();
    let p = entity.transform;
    let v = entity.velocity;

    egui::Window::new("Debug")
        .default_pos([560.0, 8.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!("FPS: {:.0}", if hud.dt > 0.0 { 1.0 / hud.dt } else { 0.0 }))
                    .small(),
            );
            ui.label(RichText::new(format!("Preset: {}", hud.preset.name())).small());
            ui.label(RichText::new(format!("Pos: x: {:.0} y: {:.0} z: {:.1}", p.x, p.y, p.z)).small());
            ui.label(RichText::new(format!("Vel: x: {:.0} y: {:.0} z: {:.0}", v.x, v.y, v.z)).small());
            ui.label(RichText::new(format!("Phase: {:?}", JumpPhase::of(entity))).small());
            ui.label(
                RichText::new(format!(
                    "Jumps: {}  thrust: {:.2}s  cooldown: {:.0}ms",
                    entity.jump.jump_count, entity.jump.jump_time, entity.jump.jump_cooldown
                ))
                .small(),
            );
            ui.label(
                RichText::new(format!(
                    "Ticks: {} this frame, {} total",
                    hud.stats.ticks,
                    stepper.total_ticks()
                ))
                .small(),
            );
            ui.separator();
            ui.label(RichText::new("Controls:").small());
            ui.label(RichText::new("WASD / Arrows - Move").small());
            ui.label(RichText::new("Space - Jump (hold for height, again to double jump)").small());
            ui.label(RichText::new("Shift - Run").small());
            ui.label(RichText::new("E - Glide").small());
        });
}
