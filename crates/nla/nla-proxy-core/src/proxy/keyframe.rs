use serde::{Deserialize, Serialize};

use crate::host::{FCurve, Keyframe};

/// One `(frame, value)` sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyframePointSnapshot {
    pub frame: f32,
    pub value: f32,
}

impl KeyframePointSnapshot {
    pub fn capture(point: &Keyframe) -> Self {
        Self {
            frame: point.frame(),
            value: point.value(),
        }
    }

    /// Insert this sample as a new key on `fcurve`.
    pub fn paste_onto(&self, fcurve: &mut FCurve) {
        fcurve.insert_keyframe(self.frame, self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_then_paste() {
        let snap = KeyframePointSnapshot::capture(&Keyframe::new(12.0, -0.5));
        assert_eq!(snap, KeyframePointSnapshot { frame: 12.0, value: -0.5 });
        let mut fc = FCurve::new("location", 2);
        snap.paste_onto(&mut fc);
        assert_eq!(fc.keyframe_points(), &[Keyframe::new(12.0, -0.5)]);
    }
}
