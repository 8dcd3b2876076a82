//! Component trait and type tags

use std::any::Any;

use crate::scene::GameObject;

/// Discriminator for the behavioral slot a component occupies
///
/// A game object holds at most one component per tag. Tags are ordered, and
/// component maps iterate in tag order, so lifecycle fan-out is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentTag {
    /// Spatial placement
    Transform,
    /// View/projection provider
    Camera,
    /// Drawable surface
    Graphics,
    /// Gameplay behavior
    Script,
    /// Sound emitter
    Audio,
    /// Collision and dynamics
    Physics,
    /// Application-defined slot
    Custom(u16),
}

/// A typed behavior unit attached to exactly one game object
///
/// Lifecycle hooks run in a fixed order for each owner:
/// [`on_create`](Component::on_create) for every component, then
/// [`on_init`](Component::on_init) for every component, then
/// [`on_update`](Component::on_update) once per frame, then
/// [`on_destroy`](Component::on_destroy) exactly once at teardown.
///
/// `on_create` must not touch sibling components - siblings may not exist
/// yet. `on_init` may: by the time any `on_init` runs, every sibling on the
/// same object has completed `on_create`. Cross-component wiring therefore
/// belongs in `on_init`, never in `on_create`.
///
/// Hooks receive the owning [`GameObject`] by mutable reference. The hooked
/// component is detached from the owner's map for the duration of the call,
/// so the owner is freely borrowable inside the hook.
pub trait Component: Any {
    /// The behavioral slot this component occupies on its owner
    fn tag(&self) -> ComponentTag;

    /// First bring-up phase; self-contained setup only
    fn on_create(&mut self, owner: &mut GameObject) {
        let _ = owner;
    }

    /// Second bring-up phase; sibling components are safe to read
    fn on_init(&mut self, owner: &mut GameObject) {
        let _ = owner;
    }

    /// Per-frame tick while the owner is part of the updated tree
    fn on_update(&mut self, owner: &mut GameObject, delta_time: f32) {
        let _ = (owner, delta_time);
    }

    /// Release anything this component acquired itself
    ///
    /// The owning game object releases the component's memory; this hook is
    /// for the component's own acquisitions.
    fn on_destroy(&mut self) {}

    /// Upcast for typed downcasting via [`GameObject::component`]
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed downcasting via [`GameObject::component_mut`]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
