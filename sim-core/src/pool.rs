//! Ordered, resizable collection of live bodies.

use crate::{body::Body, bounds::Bounds, config::SpawnParams, visual::VisualLayer};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Bodies in birth order.
///
/// Growth appends at the tail and shrinking removes from the tail, so
/// surviving bodies keep their relative order and indices.
#[derive(Debug)]
pub struct BodyPool<H> {
    pub bodies: Vec<Body<H>>,
}

/// Births and deaths caused by one [`BodyPool::resize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub spawned: usize,
    pub released: usize,
}

impl<H> Default for BodyPool<H> {
    fn default() -> Self {
        Self { bodies: Vec::new() }
    }
}

impl<H> BodyPool<H> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Grows or shrinks the pool until it holds exactly `target` bodies.
    ///
    /// New bodies are sampled from `params` inside `bounds` and get a fresh
    /// handle from `visuals`. Removed bodies release their handle, newest
    /// first. Equal sizes are a no-op.
    pub fn resize<V, R>(
        &mut self,
        target: usize,
        params: &SpawnParams,
        bounds: &Bounds,
        visuals: &mut V,
        rng: &mut R,
    ) -> ResizeOutcome
    where
        V: VisualLayer<Handle = H>,
        R: Rng,
    {
        let len = self.bodies.len();
        if target > len {
            self.grow(target - len, params, bounds, visuals, rng);
            ResizeOutcome {
                spawned: target - len,
                released: 0,
            }
        } else if target < len {
            self.shrink(len - target, visuals);
            ResizeOutcome {
                spawned: 0,
                released: len - target,
            }
        } else {
            ResizeOutcome::default()
        }
    }

    fn grow<V, R>(
        &mut self,
        count: usize,
        params: &SpawnParams,
        bounds: &Bounds,
        visuals: &mut V,
        rng: &mut R,
    ) where
        V: VisualLayer<Handle = H>,
        R: Rng,
    {
        self.bodies.reserve(count);
        for _ in 0..count {
            let body = spawn_body(params, bounds, visuals, rng);
            self.bodies.push(body);
        }
        tracing::debug!(count, population = self.bodies.len(), "grew body pool");
    }

    fn shrink<V>(&mut self, count: usize, visuals: &mut V)
    where
        V: VisualLayer<Handle = H>,
    {
        for _ in 0..count {
            if let Some(body) = self.bodies.pop() {
                visuals.release(body.handle);
            }
        }
        tracing::debug!(count, population = self.bodies.len(), "shrank body pool");
    }

    /// Releases every body's handle and empties the pool.
    pub fn clear<V>(&mut self, visuals: &mut V)
    where
        V: VisualLayer<Handle = H>,
    {
        let count = self.bodies.len();
        self.shrink(count, visuals);
    }
}

/// Samples one new body inside `bounds` and registers its renderable.
pub fn spawn_body<H, V, R>(
    params: &SpawnParams,
    bounds: &Bounds,
    visuals: &mut V,
    rng: &mut R,
) -> Body<H>
where
    V: VisualLayer<Handle = H>,
    R: Rng,
{
    let radius = uniform(rng, params.min_radius, params.max_radius);
    let (lo, hi) = bounds.shrunk_by(radius);
    let pos = Vec2::new(uniform(rng, lo.x, hi.x), uniform(rng, lo.y, hi.y));

    let direction = Vec2::from_angle(rng.random_range(0.0..TAU));
    let speed = uniform(rng, params.min_speed, params.max_speed);

    let handle = visuals.create(pos, 2.0 * radius);
    Body::new(pos, direction * speed, radius, handle)
}

/// Uniform sample from the closed interval spanned by `a` and `b`, in
/// either order.
#[inline]
pub(crate) fn uniform<R: Rng>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        return lo;
    }
    rng.random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::InstanceBuffer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn arena() -> Bounds {
        Bounds::centered(Vec2::new(20.0, 10.0))
    }

    fn grown(n: usize) -> (BodyPool<crate::visual::InstanceId>, InstanceBuffer, ChaCha8Rng) {
        let mut pool = BodyPool::new();
        let mut visuals = InstanceBuffer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        pool.resize(n, &SpawnParams::default(), &arena(), &mut visuals, &mut rng);
        (pool, visuals, rng)
    }

    #[test]
    fn grow_creates_one_handle_per_body() {
        let (pool, visuals, _) = grown(25);
        assert_eq!(pool.len(), 25);
        assert_eq!(visuals.live(), 25);
        assert_eq!(visuals.created(), 25);
    }

    #[test]
    fn spawned_bodies_respect_parameters() {
        let params = SpawnParams {
            min_radius: 0.5,
            max_radius: 1.0,
            min_speed: 2.0,
            max_speed: 3.0,
            velocity_multiplier: 1.0,
        };
        let mut pool = BodyPool::new();
        let mut visuals = InstanceBuffer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        pool.resize(200, &params, &arena(), &mut visuals, &mut rng);

        for b in &pool.bodies {
            assert!((0.5..=1.0).contains(&b.radius));
            let speed = b.vel.length();
            assert!(speed >= 2.0 - 1e-4 && speed <= 3.0 + 1e-4, "speed {speed}");
            assert_eq!(b.mass, (2.0 * b.radius) * (2.0 * b.radius));

            let (lo, hi) = arena().shrunk_by(b.radius);
            assert!(b.pos.cmpge(lo).all() && b.pos.cmple(hi).all());

            let inst = visuals.get(&b.handle).unwrap();
            assert_eq!(inst.pos, b.pos);
            assert_eq!(inst.diameter, 2.0 * b.radius);
        }
    }

    #[test]
    fn shrink_removes_the_newest_bodies() {
        let (mut pool, mut visuals, mut rng) = grown(10);
        let survivors: Vec<usize> = pool.bodies[..7].iter().map(|b| b.handle.index()).collect();
        let doomed: Vec<usize> = pool.bodies[7..].iter().map(|b| b.handle.index()).collect();

        let outcome = pool.resize(7, &SpawnParams::default(), &arena(), &mut visuals, &mut rng);

        assert_eq!(outcome, ResizeOutcome { spawned: 0, released: 3 });
        let kept: Vec<usize> = pool.bodies.iter().map(|b| b.handle.index()).collect();
        assert_eq!(kept, survivors);
        assert_eq!(visuals.live(), 7);
        for slot in doomed {
            assert!(visuals.iter().all(|(i, _)| i != slot));
        }
    }

    #[test]
    fn equal_target_is_a_no_op() {
        let (mut pool, mut visuals, mut rng) = grown(5);
        let outcome = pool.resize(5, &SpawnParams::default(), &arena(), &mut visuals, &mut rng);

        assert_eq!(outcome, ResizeOutcome::default());
        assert_eq!(visuals.created(), 5);
        assert_eq!(visuals.released(), 0);
    }

    #[test]
    fn resize_to_zero_releases_everything() {
        let (mut pool, mut visuals, mut rng) = grown(4);
        pool.resize(0, &SpawnParams::default(), &arena(), &mut visuals, &mut rng);
        assert!(pool.is_empty());
        assert_eq!(visuals.live(), 0);
        assert_eq!(visuals.released(), 4);
    }

    #[test]
    fn clear_releases_all_handles() {
        let (mut pool, mut visuals, _) = grown(6);
        pool.clear(&mut visuals);
        assert!(pool.is_empty());
        assert_eq!(visuals.released(), 6);
    }

    #[test]
    fn uniform_accepts_reversed_and_empty_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let v = uniform(&mut rng, 3.0, 1.0);
            assert!((1.0..=3.0).contains(&v));
        }
        assert_eq!(uniform(&mut rng, 2.0, 2.0), 2.0);
    }

    #[test]
    fn narrow_arena_does_not_panic() {
        let mut pool = BodyPool::new();
        let mut visuals = InstanceBuffer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let tiny = Bounds::centered(Vec2::new(0.1, 0.1));
        pool.resize(3, &SpawnParams::default(), &tiny, &mut visuals, &mut rng);
        assert_eq!(pool.len(), 3);
    }
}
