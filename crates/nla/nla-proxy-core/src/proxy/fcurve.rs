use log::debug;
use serde::{Deserialize, Serialize};

use crate::fields::{copied, FCurveField, FCURVE_FIELDS};
use crate::host::{ColorMode, CurveExtrapolation, FCurve};
use crate::proxy::keyframe::KeyframePointSnapshot;

/// Copy of one curve: its channel identity, display/behaviour flags and keys.
///
/// The channel identity (`data_path`, `array_index`) is what restoring uses to
/// find the matching curve on the new strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FCurveSnapshot {
    pub data_path: String,
    pub array_index: i32,
    pub color: [f32; 3],
    pub color_mode: ColorMode,
    pub extrapolation: CurveExtrapolation,
    pub group: Option<String>,
    pub hide: bool,
    pub lock: bool,
    pub mute: bool,
    pub select: bool,
    pub keyframe_points: Vec<KeyframePointSnapshot>,
}

impl FCurveSnapshot {
    pub fn capture(fcurve: &FCurve) -> Self {
        Self {
            data_path: fcurve.data_path().to_string(),
            array_index: fcurve.array_index(),
            color: fcurve.color(),
            color_mode: fcurve.color_mode(),
            extrapolation: fcurve.extrapolation(),
            group: fcurve.group().map(str::to_string),
            hide: fcurve.hide(),
            lock: fcurve.lock(),
            mute: fcurve.mute(),
            select: fcurve.select(),
            keyframe_points: fcurve
                .keyframe_points()
                .iter()
                .map(KeyframePointSnapshot::capture)
                .collect(),
        }
    }

    /// True when `fcurve` is the channel this snapshot was taken from.
    pub fn identifies(&self, fcurve: &FCurve) -> bool {
        fcurve.data_path() == self.data_path && fcurve.array_index() == self.array_index
    }

    /// Apply flags and replay keys onto `target`. A missing target is skipped.
    /// Existing keys on the target are kept.
    pub fn paste_onto(&self, target: Option<&mut FCurve>) {
        let Some(fcurve) = target else {
            debug!(
                "fcurve '{}'[{}] not found on target; skipping",
                self.data_path, self.array_index
            );
            return;
        };
        for field in copied(FCURVE_FIELDS) {
            self.apply(field, fcurve);
        }
        for point in &self.keyframe_points {
            point.paste_onto(fcurve);
        }
    }

    fn apply(&self, field: FCurveField, fcurve: &mut FCurve) {
        match field {
            FCurveField::ArrayIndex => fcurve.set_array_index(self.array_index),
            FCurveField::Color => fcurve.set_color(self.color),
            FCurveField::ColorMode => fcurve.set_color_mode(self.color_mode),
            FCurveField::Extrapolation => fcurve.set_extrapolation(self.extrapolation),
            FCurveField::Group => fcurve.set_group(self.group.clone()),
            FCurveField::Hide => fcurve.set_hide(self.hide),
            FCurveField::Lock => fcurve.set_lock(self.lock),
            FCurveField::Mute => fcurve.set_mute(self.mute),
            FCurveField::Select => fcurve.set_select(self.select),
            FCurveField::DataPath
            | FCurveField::Driver
            | FCurveField::IsEmpty
            | FCurveField::IsValid
            | FCurveField::KeyframePoints
            | FCurveField::Modifiers
            | FCurveField::SampledPoints => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> FCurve {
        let mut fc = FCurve::new("influence", 0);
        fc.set_color([0.2, 0.4, 0.6]);
        fc.set_color_mode(ColorMode::Custom);
        fc.set_extrapolation(CurveExtrapolation::Linear);
        fc.set_group(Some("Strip".into()));
        fc.set_lock(true);
        fc.set_mute(true);
        fc.insert_keyframe(0.0, 0.0);
        fc.insert_keyframe(10.0, 1.0);
        fc.insert_keyframe(20.0, 0.25);
        fc
    }

    #[test]
    fn paste_restores_flags_and_keys() {
        let snap = FCurveSnapshot::capture(&source());
        let mut target = FCurve::new("influence", 0);
        snap.paste_onto(Some(&mut target));
        assert_eq!(target, source());
    }

    #[test]
    fn paste_keeps_existing_keys() {
        let snap = FCurveSnapshot::capture(&source());
        let mut target = FCurve::new("influence", 0);
        target.insert_keyframe(5.0, 0.5);
        snap.paste_onto(Some(&mut target));
        assert_eq!(target.keyframe_points().len(), 4);
    }

    #[test]
    fn missing_target_is_skipped() {
        FCurveSnapshot::capture(&source()).paste_onto(None);
    }
}
