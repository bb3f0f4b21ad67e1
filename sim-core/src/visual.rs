//! Boundary between the simulation and whatever draws it.
//!
//! The simulation never touches rendering state directly. It asks a
//! [`VisualLayer`] for a handle when a body is born, reads the handle's
//! position back at the start of each tick, writes the final position at the
//! end, and releases the handle when the body dies.

use glam::Vec2;

/// Capability interface for externally owned renderables.
pub trait VisualLayer {
    type Handle;

    /// Creates a renderable at `pos` scaled to `diameter`.
    fn create(&mut self, pos: Vec2, diameter: f32) -> Self::Handle;

    /// Destroys a renderable. The handle is consumed.
    fn release(&mut self, handle: Self::Handle);

    /// Position the renderable currently reports.
    fn position(&self, handle: &Self::Handle) -> Vec2;

    fn set_position(&mut self, handle: &Self::Handle, pos: Vec2);
}

/// Handle into an [`InstanceBuffer`].
///
/// Deliberately not `Clone`: each handle is owned by exactly one body.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(usize);

impl InstanceId {
    /// Slot index inside the owning buffer.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub pos: Vec2,
    pub diameter: f32,
}

/// In-memory visual layer that stores one [`Instance`] per live handle.
///
/// Released slots are reused by later `create` calls.
#[derive(Debug, Default)]
pub struct InstanceBuffer {
    slots: Vec<Option<Instance>>,
    free: Vec<usize>,
    created: u64,
    released: u64,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &InstanceId) -> Option<&Instance> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Overwrites an instance's position from outside the simulation, as a
    /// renderer or editor would.
    pub fn move_to(&mut self, id: &InstanceId, pos: Vec2) {
        if let Some(Some(inst)) = self.slots.get_mut(id.0) {
            inst.pos = pos;
        }
    }

    /// Iterates live instances together with their slot index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Instance)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|inst| (i, inst)))
    }

    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total number of `create` calls so far.
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Total number of `release` calls so far.
    pub fn released(&self) -> u64 {
        self.released
    }

    pub fn clear(&mut self) {
        self.released += self.live() as u64;
        self.slots.clear();
        self.free.clear();
    }
}

impl VisualLayer for InstanceBuffer {
    type Handle = InstanceId;

    fn create(&mut self, pos: Vec2, diameter: f32) -> InstanceId {
        let inst = Some(Instance { pos, diameter });
        self.created += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = inst;
                InstanceId(slot)
            }
            None => {
                self.slots.push(inst);
                InstanceId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, handle: InstanceId) {
        if let Some(slot) = self.slots.get_mut(handle.0)
            && slot.take().is_some()
        {
            self.free.push(handle.0);
            self.released += 1;
        }
    }

    fn position(&self, handle: &InstanceId) -> Vec2 {
        self.get(handle).map_or(Vec2::ZERO, |inst| inst.pos)
    }

    fn set_position(&mut self, handle: &InstanceId, pos: Vec2) {
        self.move_to(handle, pos);
    }
}
