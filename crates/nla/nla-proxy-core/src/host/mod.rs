//! In-process model of the host document the proxies read from and write to.
//!
//! Read access goes through [`Document::object`]. Mutable access to an object
//! goes through [`Document::edit`], which refuses to hand out an
//! [`EditScope`] while the document is in tweak mode; structural edits
//! (tracks, strips, the current action) are therefore only reachable with
//! tweak mode off.

pub mod action;
pub mod fcurve;
pub mod nla;

use serde::{Deserialize, Serialize};

use crate::error::HostError;

pub use action::{Action, ActionId, ActionLibrary};
pub use fcurve::{ColorMode, CurveExtrapolation, FCurve, Keyframe};
pub use nla::{BlendType, Extrapolation, NlaStrip, NlaStrips, NlaTrack, NlaTracks};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

fn one() -> f32 {
    1.0
}

/// An object's animation record: current action, how it blends over the NLA
/// stack, and the NLA track stack itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimData {
    #[serde(default)]
    pub action: Option<ActionId>,
    #[serde(default)]
    pub action_extrapolation: Extrapolation,
    #[serde(default)]
    pub action_blend_type: BlendType,
    #[serde(default = "one")]
    pub action_influence: f32,
    #[serde(default)]
    pub nla_tracks: NlaTracks,
}

impl AnimData {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for AnimData {
    fn default() -> Self {
        Self {
            action: None,
            action_extrapolation: Extrapolation::Hold,
            action_blend_type: BlendType::Replace,
            action_influence: 1.0,
            nla_tracks: NlaTracks::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(default)]
    animation_data: Option<AnimData>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animation_data: None,
        }
    }

    pub fn animation_data(&self) -> Option<&AnimData> {
        self.animation_data.as_ref()
    }

    pub fn animation_data_mut(&mut self) -> Option<&mut AnimData> {
        self.animation_data.as_mut()
    }

    /// Create the animation record if missing and return it.
    pub fn animation_data_create(&mut self) -> &mut AnimData {
        self.animation_data.get_or_insert_with(AnimData::new)
    }

    pub fn animation_data_clear(&mut self) {
        self.animation_data = None;
    }
}

/// The "basics" collaborator: query and toggle tweak mode.
pub trait TweakModeHost {
    fn is_tweak_mode(&self) -> bool;
    fn enter_tweak_mode(&mut self);
    fn exit_tweak_mode(&mut self);
}

/// Mutable view of one object plus the actions it may bind.
/// Only obtainable while tweak mode is off.
#[derive(Debug)]
pub struct EditScope<'a> {
    pub object: &'a mut Object,
    pub actions: &'a ActionLibrary,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    objects: Vec<Option<Object>>,
    #[serde(default)]
    actions: ActionLibrary,
    #[serde(default)]
    tweak_mode: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from its JSON form (used by scene fixtures).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(Some(object));
        ObjectId((self.objects.len() - 1) as u32)
    }

    /// Delete an object; its id stays dangling.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Object> {
        self.objects.get_mut(id.0 as usize).and_then(Option::take)
    }

    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|o| o.as_ref().is_some_and(|o| o.name == name))
            .map(|i| ObjectId(i as u32))
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn object(&self, id: ObjectId) -> Result<&Object, HostError> {
        self.get_object(id).ok_or(HostError::ObjectNotFound(id))
    }

    pub fn actions(&self) -> &ActionLibrary {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionLibrary {
        &mut self.actions
    }

    pub fn add_action(&mut self, action: Action) -> ActionId {
        self.actions.insert(action)
    }

    /// Open an object for editing.
    pub fn edit(&mut self, id: ObjectId) -> Result<EditScope<'_>, HostError> {
        if self.tweak_mode {
            return Err(HostError::TweakModeActive);
        }
        let object = self
            .objects
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(HostError::ObjectNotFound(id))?;
        Ok(EditScope {
            object,
            actions: &self.actions,
        })
    }
}

impl TweakModeHost for Document {
    fn is_tweak_mode(&self) -> bool {
        self.tweak_mode
    }

    fn enter_tweak_mode(&mut self) {
        self.tweak_mode = true;
    }

    fn exit_tweak_mode(&mut self) {
        self.tweak_mode = false;
    }
}
