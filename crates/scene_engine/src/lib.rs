//! # Scene Engine
//!
//! The object lifecycle and ownership core of a small real-time engine:
//! a hierarchical scene graph of game objects, typed pluggable components
//! with a two-phase lifecycle, and exclusive-ownership resource groups.
//!
//! ## Features
//!
//! - **Scene Graph**: Named game-object tree with path lookup and
//!   scene-membership propagation
//! - **Component Lifecycle**: Strict create-then-init bring-up, per-frame
//!   update, ordered teardown
//! - **Resource Groups**: Keyed, exclusively-owned engine resources
//!   (meshes, textures, ...) loaded once and shared by reference
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut ids = IdAllocator::new();
//! let mut scenes = SceneManager::new();
//! let scene = scenes.create_scene("level", &mut ids);
//!
//! let mut player = GameObject::named("player", &mut ids);
//! player.spawn_child("weapon", &mut ids).unwrap();
//!
//! let scene = scenes.scene_mut(scene).unwrap();
//! scene.attach(player).unwrap();
//! scene.init();
//! scene.update(1.0 / 60.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod scene;
pub mod resources;

mod config;

pub use config::{ConfigError, EngineConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Color, Vec2, Vec3},
        scene::{
            Component, ComponentTag, GameObject, GameObjectId, IdAllocator, Scene, SceneError,
            SceneHandle, SceneManager,
        },
        resources::{
            GraphicsDevice, Mesh, MeshResourceGroup, Resource, ResourceError, ResourceGroup,
        },
        ConfigError, EngineConfig,
    };
}
