//! Per-tick simulation phases.
//!
//! A tick runs these in order, after the pool has been resized:
//! 1. [`integrate_phase`]: read each body's position back from the visual
//!    layer and advance it along its velocity.
//! 2. [`collision_phase`]: optionally push overlapping pairs apart and
//!    exchange momentum along the contact normal.
//! 3. [`boundary_phase`]: clamp bodies into the arena and reflect the
//!    velocity on every axis that was crossed.
//! 4. [`publish_phase`]: write final positions back to the visual layer.

use crate::{body::Body, bounds::Bounds, types::BodyIndex, visual::VisualLayer};
use glam::Vec2;

/// Advances every body by `dt * velocity_multiplier * vel`.
///
/// The starting point is the position the visual layer reports for the
/// body's handle, not the body's own `pos`, so anything that moved the
/// renderable between ticks is respected.
pub fn integrate_phase<H, V: VisualLayer<Handle = H>>(
    bodies: &mut [Body<H>],
    visuals: &V,
    dt: f32,
    velocity_multiplier: f32,
) {
    let scale = dt * velocity_multiplier;
    for b in bodies.iter_mut() {
        b.pos = visuals.position(&b.handle) + scale * b.vel;
    }
}

/// Returns `true` if the two circles overlap.
#[inline]
pub fn overlaps<H>(a: &Body<H>, b: &Body<H>) -> bool {
    let threshold = a.radius + b.radius;
    (a.pos - b.pos).length_squared() < threshold * threshold
}

/// Resolves one overlapping pair in place.
///
/// Each body is displaced along the contact normal by half the overlap,
/// weighted by the other body's share of the total mass, and the relative
/// velocity along the normal is reflected with the same weights.
///
/// ### Returns
/// `false` if the centers coincide; no normal exists and nothing changes.
pub fn resolve_pair<H>(a: &mut Body<H>, b: &mut Body<H>) -> bool {
    let delta = a.pos - b.pos;
    let Some(normal) = delta.try_normalize() else {
        return false;
    };

    let half_overlap = (a.radius + b.radius - delta.length()) * 0.5;

    let mass_sum = a.mass + b.mass;
    let influence_a = a.mass / mass_sum;
    let influence_b = b.mass / mass_sum;

    a.pos += half_overlap * influence_b * normal;
    b.pos -= half_overlap * influence_a * normal;

    let along_normal = (a.vel - b.vel).dot(normal) * normal;
    a.vel -= 2.0 * influence_b * along_normal;
    b.vel += 2.0 * influence_a * along_normal;

    true
}

/// Single-pass pairwise collision resolution.
///
/// For each body `i` in pool order, bodies `j > i` are scanned in ascending
/// order and only the first overlapping one is resolved; scanning then moves
/// on to `i + 1`. A body can still be resolved again as the `j` of a later
/// pair. Dense clusters may therefore keep some overlap after a tick.
///
/// ### Returns
/// The resolved `(i, j)` pairs in resolution order.
pub fn collision_phase<H>(bodies: &mut [Body<H>]) -> Vec<(BodyIndex, BodyIndex)> {
    let mut resolved = Vec::new();
    let n = bodies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);

            if !overlaps(a, b) {
                continue;
            }
            if resolve_pair(a, b) {
                resolved.push((i, j));
            }
            break;
        }
    }
    resolved
}

/// Clamps `v` into `[lo, hi]`, preferring `lo` when the interval is inverted.
#[inline]
fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Keeps every body inside `bounds` and bounces it off the walls it crossed.
///
/// Axes are handled independently, so a corner hit flips both velocity
/// components.
pub fn boundary_phase<H>(bodies: &mut [Body<H>], bounds: &Bounds) {
    for b in bodies.iter_mut() {
        let (lo, hi) = bounds.shrunk_by(b.radius);
        let p = b.pos;

        b.pos = Vec2::new(clamp_axis(p.x, lo.x, hi.x), clamp_axis(p.y, lo.y, hi.y));

        if p.x < lo.x || p.x > hi.x {
            b.vel.x = -b.vel.x;
        }
        if p.y < lo.y || p.y > hi.y {
            b.vel.y = -b.vel.y;
        }
    }
}

/// Writes each body's final position to its renderable.
pub fn publish_phase<H, V: VisualLayer<Handle = H>>(bodies: &[Body<H>], visuals: &mut V) {
    for b in bodies {
        visuals.set_position(&b.handle, b.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::{InstanceBuffer, InstanceId};

    fn body(pos: Vec2, vel: Vec2, radius: f32) -> Body<()> {
        Body::new(pos, vel, radius, ())
    }

    fn registered(
        visuals: &mut InstanceBuffer,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
    ) -> Body<InstanceId> {
        let handle = visuals.create(pos, 2.0 * radius);
        Body::new(pos, vel, radius, handle)
    }

    #[test]
    fn integrate_phase_starts_from_visual_position() {
        let mut visuals = InstanceBuffer::new();
        let mut bodies = vec![registered(
            &mut visuals,
            Vec2::ZERO,
            Vec2::new(1.0, -2.0),
            0.5,
        )];

        // Someone moved the renderable since the last publish.
        visuals.move_to(&bodies[0].handle, Vec2::new(3.0, 3.0));

        integrate_phase(&mut bodies, &visuals, 0.5, 2.0);

        assert_eq!(bodies[0].pos, Vec2::new(4.0, 1.0));
    }

    #[test]
    fn equal_masses_swap_normal_velocities() {
        let mut a = body(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 1.0);
        let mut b = body(Vec2::new(1.5, 0.0), Vec2::new(-1.0, 0.0), 1.0);

        assert!(overlaps(&a, &b));
        assert!(resolve_pair(&mut a, &mut b));

        assert_eq!(a.vel, Vec2::new(-1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));

        // Half of the 0.5 overlap is split evenly between the two bodies.
        assert_eq!(a.pos, Vec2::new(-0.125, 0.0));
        assert_eq!(b.pos, Vec2::new(1.625, 0.0));
    }

    #[test]
    fn tangential_velocity_is_untouched() {
        let mut a = body(Vec2::new(0.0, 0.0), Vec2::new(1.0, 3.0), 1.0);
        let mut b = body(Vec2::new(1.0, 0.0), Vec2::new(0.0, -2.0), 1.0);

        resolve_pair(&mut a, &mut b);

        assert_eq!(a.vel.y, 3.0);
        assert_eq!(b.vel.y, -2.0);
        assert_eq!(a.vel.x, 0.0);
        assert_eq!(b.vel.x, 1.0);
    }

    #[test]
    fn heavier_body_moves_less() {
        let mut light = body(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.5);
        let mut heavy = body(Vec2::new(1.0, 0.0), Vec2::ZERO, 1.5);

        resolve_pair(&mut light, &mut heavy);

        let light_shift = light.pos.x.abs();
        let heavy_shift = (heavy.pos.x - 1.0).abs();
        assert!(light_shift > heavy_shift);
        assert!(light.pos.x < 0.0 && heavy.pos.x > 1.0);
    }

    #[test]
    fn momentum_is_conserved_for_unequal_masses() {
        let mut a = body(Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0), 0.6);
        let mut b = body(Vec2::new(1.0, 0.5), Vec2::new(-1.0, 0.0), 1.1);
        let before = a.mass * a.vel + b.mass * b.vel;

        resolve_pair(&mut a, &mut b);

        let after = a.mass * a.vel + b.mass * b.vel;
        assert!((before - after).length() < 1e-4);
    }

    #[test]
    fn coincident_bodies_are_left_alone() {
        let mut a = body(Vec2::new(2.0, 2.0), Vec2::new(1.0, 0.0), 1.0);
        let mut b = body(Vec2::new(2.0, 2.0), Vec2::new(0.0, 1.0), 1.0);

        assert!(overlaps(&a, &b));
        assert!(!resolve_pair(&mut a, &mut b));

        assert_eq!(a.pos, Vec2::new(2.0, 2.0));
        assert_eq!(b.vel, Vec2::new(0.0, 1.0));
        assert!(a.pos.is_finite() && b.pos.is_finite());
    }

    #[test]
    fn collision_phase_resolves_only_first_partner_per_outer_index() {
        // Body 0 overlaps both 1 and 2; only (0, 1) may be resolved for i = 0.
        // Bodies 1 and 2 do not touch each other.
        let mut bodies = vec![
            body(Vec2::new(0.0, 0.0), Vec2::ZERO, 1.0),
            body(Vec2::new(1.5, 0.0), Vec2::ZERO, 1.0),
            body(Vec2::new(-1.5, 0.0), Vec2::ZERO, 1.0),
        ];

        let pairs = collision_phase(&mut bodies);

        assert_eq!(pairs, vec![(0, 1)]);
        assert_eq!(bodies[2].pos, Vec2::new(-1.5, 0.0));
    }

    #[test]
    fn collision_phase_can_revisit_body_as_second_index() {
        // 0 touches 2 only, 1 touches 2 only: body 2 is resolved twice.
        let mut bodies = vec![
            body(Vec2::new(-1.8, 0.0), Vec2::ZERO, 1.0),
            body(Vec2::new(1.8, 0.0), Vec2::ZERO, 1.0),
            body(Vec2::new(0.0, 0.0), Vec2::ZERO, 1.0),
        ];

        let pairs = collision_phase(&mut bodies);

        assert_eq!(pairs, vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn collision_phase_ignores_separated_bodies() {
        let mut bodies = vec![
            body(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 1.0),
            body(Vec2::new(2.0, 0.0), Vec2::new(-1.0, 0.0), 1.0),
        ];

        // Touching exactly is not a collision.
        assert!(collision_phase(&mut bodies).is_empty());
        assert_eq!(bodies[0].vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn boundary_phase_clamps_and_reflects_crossed_axis() {
        let bounds = Bounds::centered(Vec2::splat(5.0));
        let mut bodies = vec![body(Vec2::new(4.5, 0.0), Vec2::new(3.0, 2.0), 1.0)];

        boundary_phase(&mut bodies, &bounds);

        assert_eq!(bodies[0].pos, Vec2::new(4.0, 0.0));
        assert_eq!(bodies[0].vel, Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn boundary_phase_corner_flips_both_axes() {
        let bounds = Bounds::centered(Vec2::splat(5.0));
        let mut bodies = vec![body(Vec2::new(-6.0, 7.0), Vec2::new(-1.0, 1.0), 0.5)];

        boundary_phase(&mut bodies, &bounds);

        assert_eq!(bodies[0].pos, Vec2::new(-4.5, 4.5));
        assert_eq!(bodies[0].vel, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn boundary_phase_keeps_velocity_on_the_edge() {
        let bounds = Bounds::centered(Vec2::splat(5.0));
        let mut bodies = vec![body(Vec2::new(4.0, -4.0), Vec2::new(1.0, -1.0), 1.0)];

        boundary_phase(&mut bodies, &bounds);

        assert_eq!(bodies[0].pos, Vec2::new(4.0, -4.0));
        assert_eq!(bodies[0].vel, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn publish_phase_writes_positions() {
        let mut visuals = InstanceBuffer::new();
        let mut bodies = vec![registered(&mut visuals, Vec2::ZERO, Vec2::ZERO, 1.0)];
        bodies[0].pos = Vec2::new(-2.0, 1.0);

        publish_phase(&bodies, &mut visuals);

        assert_eq!(visuals.position(&bodies[0].handle), Vec2::new(-2.0, 1.0));
    }
}
