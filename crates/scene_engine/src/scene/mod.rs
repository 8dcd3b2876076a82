//! Scene module - game-object tree and component lifecycle
//!
//! Following Game Engine Architecture Chapter 16.2 - Runtime Object Model
//! Architectures (object-centric variant).
//!
//! The scene module provides:
//! 1. [`GameObject`] - a named node in the scene tree that exclusively owns
//!    its components and child objects
//! 2. [`Component`] - a typed behavior unit with a strict two-phase
//!    create/init bring-up, per-frame update and ordered teardown
//! 3. [`Scene`] and [`SceneManager`] - the tree roots and the registry that
//!    resolves a game object's weak scene reference

mod component;
mod game_object;
#[allow(clippy::module_inception)]
mod scene;

pub use component::{Component, ComponentTag};
pub use game_object::{GameObject, GameObjectId, IdAllocator, SceneError};
pub use scene::{Scene, SceneHandle, SceneManager};
