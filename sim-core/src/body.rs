use glam::Vec2;

/// One simulated circle.
///
/// `radius` and `mass` are fixed at birth. The `handle` belongs to the
/// visual layer that created it; the simulation only passes it back.
#[derive(Debug)]
pub struct Body<H> {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub handle: H,
}

impl<H> Body<H> {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, handle: H) -> Self {
        Self {
            pos,
            vel,
            radius,
            mass: mass_for_radius(radius),
            handle,
        }
    }

    #[inline]
    pub fn diameter(&self) -> f32 {
        2.0 * self.radius
    }
}

/// Mass of a circle of the given radius: the squared diameter.
#[inline]
pub fn mass_for_radius(radius: f32) -> f32 {
    let diameter = 2.0 * radius;
    diameter * diameter
}
