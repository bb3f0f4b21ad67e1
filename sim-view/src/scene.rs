//! The viewer's visual layer: instance positions plus a random hue each.

use circles_core::{Instance, InstanceBuffer, InstanceId, VisualLayer};
use egui::Color32;
use egui::ecolor::Hsva;
use glam::Vec2;
use rand::Rng;

/// Instance storage that also assigns every new circle a fully saturated
/// random colour.
pub struct Scene {
    instances: InstanceBuffer,
    colors: Vec<Color32>,
    rng: rand::rngs::ThreadRng,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            instances: InstanceBuffer::new(),
            colors: Vec::new(),
            rng: rand::rng(),
        }
    }

    /// Live instances with their slot index and colour.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Instance, Color32)> + '_ {
        self.instances
            .iter()
            .map(|(slot, inst)| (slot, inst, self.colors[slot]))
    }

    pub fn live(&self) -> usize {
        self.instances.live()
    }
}

impl VisualLayer for Scene {
    type Handle = InstanceId;

    fn create(&mut self, pos: Vec2, diameter: f32) -> InstanceId {
        let id = self.instances.create(pos, diameter);
        let hue: f32 = self.rng.random();
        let color = Color32::from(Hsva::new(hue, 1.0, 1.0, 1.0));

        if id.index() >= self.colors.len() {
            self.colors.resize(id.index() + 1, Color32::WHITE);
        }
        self.colors[id.index()] = color;
        id
    }

    fn release(&mut self, handle: InstanceId) {
        self.instances.release(handle);
    }

    fn position(&self, handle: &InstanceId) -> Vec2 {
        self.instances.position(handle)
    }

    fn set_position(&mut self, handle: &InstanceId, pos: Vec2) {
        self.instances.set_position(handle, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_instance_gets_an_opaque_color() {
        let mut scene = Scene::new();
        let a = scene.create(Vec2::ZERO, 1.0);
        let _b = scene.create(Vec2::ONE, 2.0);
        scene.release(a);
        let _c = scene.create(Vec2::new(3.0, 0.0), 1.0);

        assert_eq!(scene.live(), 2);
        for (_, _, color) in scene.iter() {
            assert_eq!(color.a(), 255);
        }
    }
}
