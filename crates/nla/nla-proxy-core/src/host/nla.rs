//! NLA tracks and strips as the host stores them.
//!
//! Strips own their F-curves, but only the host creates them: switching on
//! `use_animated_influence` / `use_animated_time` adds the `influence` /
//! `strip_time` curve with a key at the strip start.

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::action::{Action, ActionId};
use crate::host::fcurve::FCurve;

pub const INFLUENCE_PATH: &str = "influence";
pub const STRIP_TIME_PATH: &str = "strip_time";

/// How a strip (or the current action) combines with the result below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendType {
    #[default]
    Replace,
    Combine,
    Add,
    Subtract,
    Multiply,
}

/// What a strip (or the current action) does outside its frame range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Extrapolation {
    Nothing,
    #[default]
    Hold,
    HoldForward,
}

fn one() -> f32 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NlaStrip {
    name: String,
    #[serde(default)]
    action: Option<ActionId>,
    #[serde(default)]
    active: bool,
    frame_start: f32,
    frame_end: f32,
    #[serde(default)]
    action_frame_start: f32,
    #[serde(default)]
    action_frame_end: f32,
    #[serde(default)]
    blend_in: f32,
    #[serde(default)]
    blend_out: f32,
    #[serde(default)]
    blend_type: BlendType,
    #[serde(default)]
    extrapolation: Extrapolation,
    #[serde(default = "one")]
    influence: f32,
    #[serde(default)]
    use_animated_influence: bool,
    #[serde(default)]
    use_animated_time: bool,
    #[serde(default)]
    use_animated_time_cyclic: bool,
    #[serde(default)]
    use_auto_blend: bool,
    #[serde(default)]
    use_reverse: bool,
    #[serde(default)]
    use_sync_length: bool,
    #[serde(default)]
    mute: bool,
    #[serde(default = "one")]
    repeat: f32,
    #[serde(default = "one")]
    scale: f32,
    #[serde(default)]
    select: bool,
    #[serde(default)]
    strip_time: f32,
    #[serde(default)]
    fcurves: Vec<FCurve>,
}

impl NlaStrip {
    fn new(name: &str, start: i32, action_id: ActionId, action: &Action) -> Self {
        let [a_start, a_end] = action.frame_range();
        let start = start as f32;
        Self {
            name: name.to_string(),
            action: Some(action_id),
            active: false,
            frame_start: start,
            frame_end: start + (a_end - a_start),
            action_frame_start: a_start,
            action_frame_end: a_end,
            blend_in: 0.0,
            blend_out: 0.0,
            blend_type: BlendType::Replace,
            extrapolation: Extrapolation::Hold,
            influence: 1.0,
            use_animated_influence: false,
            use_animated_time: false,
            use_animated_time_cyclic: false,
            use_auto_blend: false,
            use_reverse: false,
            use_sync_length: false,
            mute: false,
            repeat: 1.0,
            scale: 1.0,
            select: false,
            strip_time: 0.0,
            fcurves: Vec::new(),
        }
    }

    fn overlaps(&self, start: f32, end: f32) -> bool {
        start < self.frame_end && self.frame_start < end
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> Option<ActionId> {
        self.action
    }

    /// Host-managed; at most one active strip per track.
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn frame_start(&self) -> f32 {
        self.frame_start
    }

    pub fn frame_end(&self) -> f32 {
        self.frame_end
    }

    pub fn set_frame_end(&mut self, end: f32) {
        self.frame_end = end.max(self.frame_start);
    }

    pub fn action_frame_start(&self) -> f32 {
        self.action_frame_start
    }

    pub fn set_action_frame_start(&mut self, frame: f32) {
        self.action_frame_start = frame;
    }

    pub fn action_frame_end(&self) -> f32 {
        self.action_frame_end
    }

    pub fn set_action_frame_end(&mut self, frame: f32) {
        self.action_frame_end = frame;
    }

    pub fn blend_in(&self) -> f32 {
        self.blend_in
    }

    pub fn set_blend_in(&mut self, frames: f32) {
        self.blend_in = frames.max(0.0);
    }

    pub fn blend_out(&self) -> f32 {
        self.blend_out
    }

    pub fn set_blend_out(&mut self, frames: f32) {
        self.blend_out = frames.max(0.0);
    }

    pub fn blend_type(&self) -> BlendType {
        self.blend_type
    }

    pub fn set_blend_type(&mut self, blend_type: BlendType) {
        self.blend_type = blend_type;
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    pub fn set_extrapolation(&mut self, extrapolation: Extrapolation) {
        self.extrapolation = extrapolation;
    }

    pub fn influence(&self) -> f32 {
        self.influence
    }

    pub fn set_influence(&mut self, influence: f32) {
        self.influence = influence.clamp(0.0, 1.0);
    }

    pub fn use_animated_influence(&self) -> bool {
        self.use_animated_influence
    }

    pub fn set_use_animated_influence(&mut self, on: bool) {
        self.use_animated_influence = on;
        if on {
            let (start, value) = (self.frame_start, self.influence);
            self.ensure_fcurve(INFLUENCE_PATH, start, value);
        }
    }

    pub fn use_animated_time(&self) -> bool {
        self.use_animated_time
    }

    pub fn set_use_animated_time(&mut self, on: bool) {
        self.use_animated_time = on;
        if on {
            let (start, value) = (self.frame_start, self.strip_time);
            self.ensure_fcurve(STRIP_TIME_PATH, start, value);
        }
    }

    pub fn use_animated_time_cyclic(&self) -> bool {
        self.use_animated_time_cyclic
    }

    pub fn set_use_animated_time_cyclic(&mut self, on: bool) {
        self.use_animated_time_cyclic = on;
    }

    pub fn use_auto_blend(&self) -> bool {
        self.use_auto_blend
    }

    pub fn set_use_auto_blend(&mut self, on: bool) {
        self.use_auto_blend = on;
    }

    pub fn use_reverse(&self) -> bool {
        self.use_reverse
    }

    pub fn set_use_reverse(&mut self, on: bool) {
        self.use_reverse = on;
    }

    pub fn use_sync_length(&self) -> bool {
        self.use_sync_length
    }

    pub fn set_use_sync_length(&mut self, on: bool) {
        self.use_sync_length = on;
    }

    pub fn mute(&self) -> bool {
        self.mute
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }

    pub fn repeat(&self) -> f32 {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: f32) {
        self.repeat = repeat.clamp(0.01, 1000.0);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(0.0001, 1000.0);
    }

    pub fn select(&self) -> bool {
        self.select
    }

    pub fn set_select(&mut self, select: bool) {
        self.select = select;
    }

    pub fn strip_time(&self) -> f32 {
        self.strip_time
    }

    pub fn set_strip_time(&mut self, time: f32) {
        self.strip_time = time;
    }

    pub fn fcurves(&self) -> &[FCurve] {
        &self.fcurves
    }

    /// Curves can be edited and reordered; adding or removing one stays with
    /// the host.
    pub fn fcurves_mut(&mut self) -> &mut [FCurve] {
        &mut self.fcurves
    }

    /// Locate a strip curve by channel identity.
    pub fn find_fcurve_mut(&mut self, data_path: &str, array_index: i32) -> Option<&mut FCurve> {
        self.fcurves
            .iter_mut()
            .find(|fc| fc.data_path() == data_path && fc.array_index() == array_index)
    }

    fn ensure_fcurve(&mut self, data_path: &str, frame: f32, value: f32) {
        if self.fcurves.iter().any(|fc| fc.data_path() == data_path) {
            return;
        }
        let mut fc = FCurve::new(data_path, 0);
        fc.set_select(true);
        fc.insert_keyframe(frame, value);
        self.fcurves.push(fc);
    }
}

/// Strips of one track, kept sorted by start frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NlaStrips {
    items: Vec<NlaStrip>,
}

impl NlaStrips {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NlaStrip> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&NlaStrip> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut NlaStrip> {
        self.items.get_mut(index)
    }
}

impl<'a> IntoIterator for &'a NlaStrips {
    type Item = &'a NlaStrip;
    type IntoIter = std::slice::Iter<'a, NlaStrip>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NlaTrack {
    name: String,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    is_solo: bool,
    #[serde(default)]
    lock: bool,
    #[serde(default)]
    mute: bool,
    #[serde(default)]
    select: bool,
    #[serde(default)]
    strips: NlaStrips,
}

impl NlaTrack {
    pub(crate) fn new() -> Self {
        Self {
            name: "NlaTrack".to_string(),
            active: false,
            is_solo: false,
            lock: false,
            mute: false,
            select: false,
            strips: NlaStrips::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Host-managed; at most one active track per animation record.
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn is_solo(&self) -> bool {
        self.is_solo
    }

    pub fn set_is_solo(&mut self, solo: bool) {
        self.is_solo = solo;
    }

    pub fn lock(&self) -> bool {
        self.lock
    }

    pub fn set_lock(&mut self, lock: bool) {
        self.lock = lock;
    }

    pub fn mute(&self) -> bool {
        self.mute
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }

    pub fn select(&self) -> bool {
        self.select
    }

    pub fn set_select(&mut self, select: bool) {
        self.select = select;
    }

    pub fn strips(&self) -> &NlaStrips {
        &self.strips
    }

    pub fn strips_mut(&mut self) -> &mut NlaStrips {
        &mut self.strips
    }

    /// Create a strip bound to `action`, starting on an integer frame.
    /// Its length comes from the action's frame range; it must fit between
    /// the strips already on the track.
    pub fn new_strip(
        &mut self,
        name: &str,
        start: i32,
        action_id: ActionId,
        action: &Action,
    ) -> Result<&mut NlaStrip, HostError> {
        let strip = NlaStrip::new(name, start, action_id, action);
        if self
            .strips
            .items
            .iter()
            .any(|s| s.overlaps(strip.frame_start, strip.frame_end))
        {
            return Err(HostError::NoSpaceForStrip {
                track: self.name.clone(),
                frame_start: start,
            });
        }
        let idx = self
            .strips
            .items
            .partition_point(|s| s.frame_start <= strip.frame_start);
        self.strips.items.insert(idx, strip);
        Ok(&mut self.strips.items[idx])
    }
}

/// Track stack of one animation record, bottom first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NlaTracks {
    items: Vec<NlaTrack>,
}

impl NlaTracks {
    /// Append a new, empty track on top of the stack.
    pub fn new_track(&mut self) -> &mut NlaTrack {
        self.items.push(NlaTrack::new());
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn remove(&mut self, index: usize) -> Option<NlaTrack> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NlaTrack> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&NlaTrack> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut NlaTrack> {
        self.items.get_mut(index)
    }
}

impl<'a> IntoIterator for &'a NlaTracks {
    type Item = &'a NlaTrack;
    type IntoIter = std::slice::Iter<'a, NlaTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> Action {
        let mut action = Action::new("Walk");
        action.manual_frame_range = Some([1.0, 21.0]);
        action
    }

    #[test]
    fn new_strip_takes_action_length() {
        let mut track = NlaTrack::new();
        let strip = track.new_strip("Walk", 10, ActionId(0), &walk()).unwrap();
        assert_eq!(strip.frame_start(), 10.0);
        assert_eq!(strip.frame_end(), 30.0);
        assert_eq!(strip.action_frame_start(), 1.0);
        assert_eq!(strip.action_frame_end(), 21.0);
        assert_eq!(strip.action(), Some(ActionId(0)));
    }

    #[test]
    fn overlapping_strip_is_rejected() {
        let mut track = NlaTrack::new();
        track.new_strip("A", 0, ActionId(0), &walk()).unwrap();
        let err = track.new_strip("B", 5, ActionId(0), &walk()).unwrap_err();
        assert_eq!(
            err,
            HostError::NoSpaceForStrip {
                track: "NlaTrack".into(),
                frame_start: 5
            }
        );
    }

    #[test]
    fn strips_stay_sorted() {
        let mut track = NlaTrack::new();
        track.new_strip("late", 100, ActionId(0), &walk()).unwrap();
        track.new_strip("early", 0, ActionId(0), &walk()).unwrap();
        let names: Vec<&str> = track.strips().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn animated_influence_creates_keyed_curve() {
        let mut track = NlaTrack::new();
        let strip = track.new_strip("A", 4, ActionId(0), &walk()).unwrap();
        strip.set_influence(0.5);
        strip.set_use_animated_influence(true);
        let fc = strip.find_fcurve_mut(INFLUENCE_PATH, 0).unwrap();
        assert_eq!(fc.keyframe_points().len(), 1);
        assert_eq!(fc.keyframe_points()[0].co, [4.0, 0.5]);
        // toggling again does not add a second curve
        strip.set_use_animated_influence(true);
        assert_eq!(strip.fcurves().len(), 1);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut tracks = NlaTracks::default();
        tracks.new_track();
        assert!(tracks.remove(3).is_none());
        assert!(tracks.remove(0).is_some());
        assert!(tracks.is_empty());
    }
}
