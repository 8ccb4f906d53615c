use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::fields::{copied, StripField, STRIP_FIELDS};
use crate::host::{ActionId, ActionLibrary, BlendType, Extrapolation, NlaStrip, NlaTrack};
use crate::proxy::fcurve::FCurveSnapshot;

/// Copy of one strip's timing/blend parameters and its own curves.
///
/// `action` is a shared reference: the action lives in the document and must
/// still exist when the strip is restored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripSnapshot {
    pub action: Option<ActionId>,
    pub name: String,
    pub active: bool,
    pub frame_start: f32,
    pub frame_end: f32,
    pub action_frame_start: f32,
    pub action_frame_end: f32,
    pub blend_in: f32,
    pub blend_out: f32,
    pub blend_type: BlendType,
    pub extrapolation: Extrapolation,
    pub influence: f32,
    pub use_animated_influence: bool,
    pub strip_time: f32,
    pub use_animated_time: bool,
    pub use_animated_time_cyclic: bool,
    pub use_auto_blend: bool,
    pub use_reverse: bool,
    pub use_sync_length: bool,
    pub mute: bool,
    pub repeat: f32,
    pub scale: f32,
    pub select: bool,
    pub fcurves: Vec<FCurveSnapshot>,
}

impl StripSnapshot {
    pub fn capture(strip: &NlaStrip) -> Self {
        if strip.action().is_none() {
            warn!("strip '{}' has no action; it will not be restored", strip.name());
        }
        Self {
            action: strip.action(),
            name: strip.name().to_string(),
            active: strip.active(),
            frame_start: strip.frame_start(),
            frame_end: strip.frame_end(),
            action_frame_start: strip.action_frame_start(),
            action_frame_end: strip.action_frame_end(),
            blend_in: strip.blend_in(),
            blend_out: strip.blend_out(),
            blend_type: strip.blend_type(),
            extrapolation: strip.extrapolation(),
            influence: strip.influence(),
            use_animated_influence: strip.use_animated_influence(),
            strip_time: strip.strip_time(),
            use_animated_time: strip.use_animated_time(),
            use_animated_time_cyclic: strip.use_animated_time_cyclic(),
            use_auto_blend: strip.use_auto_blend(),
            use_reverse: strip.use_reverse(),
            use_sync_length: strip.use_sync_length(),
            mute: strip.mute(),
            repeat: strip.repeat(),
            scale: strip.scale(),
            select: strip.select(),
            fcurves: strip.fcurves().iter().map(FCurveSnapshot::capture).collect(),
        }
    }

    /// Rebuild this strip on `track`.
    ///
    /// Returns `Ok(None)` when the snapshot has no action (the strip is
    /// skipped). The host constructor takes an integer start frame, so a
    /// fractional `frame_start` is truncated.
    pub fn restore<'t>(
        &self,
        track: &'t mut NlaTrack,
        actions: &ActionLibrary,
    ) -> Result<Option<&'t mut NlaStrip>, HostError> {
        let Some(action_id) = self.action else {
            debug!("skipping strip '{}': no action", self.name);
            return Ok(None);
        };
        let action = actions.require(action_id)?;
        let strip = track.new_strip(&self.name, self.frame_start as i32, action_id, action)?;
        self.paste_onto(strip);
        Ok(Some(strip))
    }

    /// Apply the copied fields, then the curves, onto an existing strip.
    ///
    /// Curves the host adds while the `use_animated_*` toggles are applied
    /// come with a seed key; those are emptied before the captured keys are
    /// replayed. Curves already on the strip keep their keys. The strip's
    /// curves end up in capture order.
    pub fn paste_onto(&self, strip: &mut NlaStrip) {
        let seeded_from = strip.fcurves().len();
        for field in copied(STRIP_FIELDS) {
            self.apply(field, strip);
        }
        for fcurve in &self.fcurves {
            let found = strip.fcurves().iter().position(|fc| fcurve.identifies(fc));
            let target = match found {
                Some(index) => {
                    let target = &mut strip.fcurves_mut()[index];
                    if index >= seeded_from {
                        target.clear_keyframes();
                    }
                    Some(target)
                }
                None => None,
            };
            fcurve.paste_onto(target);
        }
        strip.fcurves_mut().sort_by_key(|fc| {
            self.fcurves
                .iter()
                .position(|snap| snap.identifies(fc))
                .unwrap_or(usize::MAX)
        });
    }

    fn apply(&self, field: StripField, strip: &mut NlaStrip) {
        match field {
            StripField::ActionFrameEnd => strip.set_action_frame_end(self.action_frame_end),
            StripField::ActionFrameStart => strip.set_action_frame_start(self.action_frame_start),
            StripField::BlendIn => strip.set_blend_in(self.blend_in),
            StripField::BlendOut => strip.set_blend_out(self.blend_out),
            StripField::BlendType => strip.set_blend_type(self.blend_type),
            StripField::Extrapolation => strip.set_extrapolation(self.extrapolation),
            StripField::FrameEnd => strip.set_frame_end(self.frame_end),
            StripField::Influence => strip.set_influence(self.influence),
            StripField::UseAnimatedInfluence => {
                strip.set_use_animated_influence(self.use_animated_influence)
            }
            StripField::StripTime => strip.set_strip_time(self.strip_time),
            StripField::UseAnimatedTime => strip.set_use_animated_time(self.use_animated_time),
            StripField::UseAnimatedTimeCyclic => {
                strip.set_use_animated_time_cyclic(self.use_animated_time_cyclic)
            }
            StripField::UseAutoBlend => strip.set_use_auto_blend(self.use_auto_blend),
            StripField::UseReverse => strip.set_use_reverse(self.use_reverse),
            StripField::UseSyncLength => strip.set_use_sync_length(self.use_sync_length),
            StripField::Mute => strip.set_mute(self.mute),
            StripField::Repeat => strip.set_repeat(self.repeat),
            StripField::Scale => strip.set_scale(self.scale),
            StripField::Select => strip.set_select(self.select),
            StripField::Action
            | StripField::Active
            | StripField::FCurves
            | StripField::FrameStart
            | StripField::Modifiers
            | StripField::Name
            | StripField::Strips => {}
        }
    }
}
