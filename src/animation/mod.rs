// Animation module
// Lifecycle of flying text entries plus keyframe evaluation for drawing

pub mod interpolation;
pub mod registry;
pub mod sampler;
pub mod types;

pub use interpolation::frame_at;
pub use registry::AnimationRegistry;
pub use sampler::{RandomSampler, SpawnSampler};
pub use types::*;
