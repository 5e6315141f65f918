//! Kinema Animation - keyframe tracks and timeline playback
//!
//! Each scene object gets one track per transform axis. A `PlaybackClock`
//! advances timeline time by a fixed step; `TrackSystem::apply` resolves
//! every track at that time and writes the results through the store.

pub mod clock;
pub mod easing;
pub mod sampler;
pub mod timeline;
pub mod track;
pub mod tracks;

pub use clock::{PlaybackClock, DEFAULT_DURATION};
pub use easing::Easing;
pub use sampler::resolve;
pub use timeline::TimelineScale;
pub use track::{AnimationTrack, Keyframe, TRACK_PALETTE};
pub use tracks::{KeyframeEdit, TrackSystem};
