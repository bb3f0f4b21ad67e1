//! The per-tick orchestrator.

use crate::{
    body::Body,
    bounds::BoundsProvider,
    config::{Config, SpawnParams},
    phases,
    pool::BodyPool,
    types::TickReport,
    visual::VisualLayer,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Owns the body pool and the parameters that drive it.
///
/// The host calls [`Simulation::step`] once per frame with the elapsed time,
/// the current bounds provider, and the visual layer that owns the bodies'
/// renderables. Parameter setters take effect on the next step.
///
/// `H` is the visual handle type and `R` the random source used for births.
#[derive(Debug)]
pub struct Simulation<H, R = ChaCha8Rng> {
    pool: BodyPool<H>,
    target_count: usize,
    collisions_enabled: bool,
    spawn: SpawnParams,
    enabled: bool,
    rng: R,
}

impl<H> Simulation<H, ChaCha8Rng> {
    /// Builds a simulation seeded from `cfg.seed`, or from a random seed
    /// when none is configured.
    pub fn from_config(cfg: &Config) -> Self {
        let seed = cfg.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "seeding body generator");
        Self::new(cfg, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<H, R: Rng> Simulation<H, R> {
    pub fn new(cfg: &Config, rng: R) -> Self {
        Self {
            pool: BodyPool::new(),
            target_count: cfg.target_count,
            collisions_enabled: cfg.collisions_enabled,
            spawn: cfg.spawn.normalized(),
            enabled: true,
            rng,
        }
    }

    /// Requests a population size. Negative values mean zero.
    pub fn set_target_count(&mut self, count: i64) {
        self.target_count = usize::try_from(count.max(0)).unwrap_or(usize::MAX);
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        if self.collisions_enabled != enabled {
            tracing::debug!(enabled, "toggled body collisions");
        }
        self.collisions_enabled = enabled;
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions_enabled
    }

    /// Replaces the spawn parameters. Existing bodies keep their radius and
    /// speed; the velocity multiplier applies from the next step.
    pub fn set_parameters(&mut self, params: SpawnParams) {
        self.spawn = params.normalized();
        tracing::debug!(spawn = ?self.spawn, "updated spawn parameters");
    }

    pub fn parameters(&self) -> SpawnParams {
        self.spawn
    }

    /// Pauses or resumes ticking. State is kept while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current number of live bodies.
    pub fn population(&self) -> usize {
        self.pool.len()
    }

    pub fn bodies(&self) -> &[Body<H>] {
        &self.pool.bodies
    }

    /// Mutable access for hosts that steer bodies directly.
    ///
    /// Velocity edits stick. Position edits are overwritten on the next step
    /// by the visual layer's readback; move the renderable instead.
    pub fn bodies_mut(&mut self) -> &mut [Body<H>] {
        &mut self.pool.bodies
    }

    /// Releases every body, e.g. before dropping the visual layer.
    pub fn clear<V>(&mut self, visuals: &mut V)
    where
        V: VisualLayer<Handle = H>,
    {
        self.pool.clear(visuals);
    }

    /// Runs one full tick: resize, integrate, collide, bound, publish.
    ///
    /// Does nothing while the simulation is disabled.
    pub fn step<V, B>(&mut self, dt: f32, bounds: &B, visuals: &mut V) -> TickReport
    where
        V: VisualLayer<Handle = H>,
        B: BoundsProvider + ?Sized,
    {
        if !self.enabled {
            return TickReport::default();
        }

        let outcome = if self.pool.len() == self.target_count {
            Default::default()
        } else {
            let arena = bounds.bounds();
            self.pool.resize(
                self.target_count,
                &self.spawn,
                &arena,
                visuals,
                &mut self.rng,
            )
        };

        let arena = bounds.bounds();
        let bodies = self.pool.bodies.as_mut_slice();

        phases::integrate_phase(bodies, &*visuals, dt, self.spawn.velocity_multiplier);

        let collisions = if self.collisions_enabled {
            phases::collision_phase(bodies)
        } else {
            Vec::new()
        };

        phases::boundary_phase(bodies, &arena);
        phases::publish_phase(&*bodies, visuals);

        tracing::trace!(
            dt,
            population = bodies.len(),
            collisions = collisions.len(),
            "tick"
        );

        TickReport {
            spawned: outcome.spawned,
            released: outcome.released,
            collisions,
        }
    }
}
