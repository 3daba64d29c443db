pub(crate) mod engine;
pub(crate) mod position;

pub use engine::{PlayMode, PlaybackEngine};
pub use position::{FrameCount, TimePos};
