//! Pure keyframe evaluation

use crate::track::AnimationTrack;

/// Resolve a track's value at `time`.
///
/// The active keyframe is the last one with `time <= t`; with none there is
/// no value. The value eases from the active keyframe toward the first
/// keyframe after `t`, snaps to it when the span is zero, and holds past the
/// final keyframe.
pub fn resolve(track: &AnimationTrack, time: f64) -> Option<f64> {
    let keyframes = &track.keyframes;

    // First keyframe strictly after `time`; the active one sits just before it
    let next_idx = keyframes.partition_point(|kf| kf.time <= time);
    if next_idx == 0 {
        return None;
    }
    let active = &keyframes[next_idx - 1];

    let Some(next) = keyframes.get(next_idx) else {
        return Some(active.value);
    };

    let span = next.time - active.time;
    if span <= 0.0 {
        return Some(next.value);
    }

    let progress = ((time - active.time) / span).clamp(0.0, 1.0);
    let eased = active.easing.apply(progress);
    Some(lerp(active.value, next.value, eased))
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::track::{Keyframe, TRACK_PALETTE};
    use kinema_core::PropertyPath;

    fn make_track(keyframes: &[(f64, f64, Easing)]) -> AnimationTrack {
        let mut track = AnimationTrack::new("o1".into(), PropertyPath::POSITION_X, TRACK_PALETTE[0]);
        for (i, &(time, value, easing)) in keyframes.iter().enumerate() {
            track.insert_keyframe(Keyframe {
                id: format!("k{i}"),
                time,
                value,
                easing,
            });
        }
        track
    }

    #[test]
    fn resolve_empty_track_is_none() {
        let track = make_track(&[]);
        assert_eq!(resolve(&track, 1.0), None);
    }

    #[test]
    fn resolve_before_first_keyframe_is_none() {
        let track = make_track(&[(1.0, 5.0, Easing::Linear)]);
        assert_eq!(resolve(&track, 0.5), None);
    }

    #[test]
    fn resolve_linear_midpoint() {
        let track = make_track(&[(0.0, 0.0, Easing::Linear), (2.0, 10.0, Easing::EaseInOut)]);
        assert_eq!(resolve(&track, 1.0), Some(5.0));
    }

    #[test]
    fn resolve_uses_active_keyframe_easing() {
        let track = make_track(&[(0.0, 0.0, Easing::EaseIn), (2.0, 10.0, Easing::Linear)]);
        let v = resolve(&track, 1.0).unwrap();
        assert!((v - 2.5).abs() < 1e-12);
    }

    #[test]
    fn resolve_holds_after_last_keyframe() {
        let track = make_track(&[(0.0, 1.0, Easing::Linear), (1.0, 4.0, Easing::Linear)]);
        assert_eq!(resolve(&track, 25.0), Some(4.0));
    }

    #[test]
    fn resolve_exact_at_every_keyframe_time() {
        let track = make_track(&[
            (0.0, 3.0, Easing::Bounce),
            (0.7, -1.5, Easing::EaseOut),
            (1.3, 8.25, Easing::EaseInOut),
            (4.0, 0.1, Easing::EaseIn),
        ]);
        for kf in &track.keyframes {
            assert_eq!(resolve(&track, kf.time), Some(kf.value));
        }
    }

    #[test]
    fn resolve_tied_times_take_the_later_keyframe() {
        // Two keyframes at t=1: the second one (insertion order) is active
        let track = make_track(&[
            (0.0, 0.0, Easing::Linear),
            (1.0, 4.0, Easing::Linear),
            (1.0, 6.0, Easing::Linear),
            (2.0, 8.0, Easing::Linear),
        ]);
        assert_eq!(resolve(&track, 1.0), Some(6.0));
        assert_eq!(resolve(&track, 1.5), Some(7.0));
        // Approaching the tie from below eases toward the first of the pair
        assert_eq!(resolve(&track, 0.5), Some(2.0));
    }
}
