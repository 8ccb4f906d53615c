//! Actions: independently owned bundles of curves, referenced (never owned)
//! by animation records and strips.

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::fcurve::FCurve;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub fcurves: Vec<FCurve>,
    /// Explicit range; when absent the keyed range of the curves is used.
    #[serde(default)]
    pub manual_frame_range: Option<[f32; 2]>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fcurves: Vec::new(),
            manual_frame_range: None,
        }
    }

    /// Frame range a new strip bound to this action spans.
    /// An action without keys spans a single frame starting at 0.
    pub fn frame_range(&self) -> [f32; 2] {
        if let Some(range) = self.manual_frame_range {
            return range;
        }
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for k in self.fcurves.iter().flat_map(|fc| fc.keyframe_points()) {
            lo = lo.min(k.frame());
            hi = hi.max(k.frame());
        }
        if lo > hi {
            return [0.0, 1.0];
        }
        if hi - lo < 1.0 {
            hi = lo + 1.0;
        }
        [lo, hi]
    }
}

/// Document-wide action storage. Ids are dense indices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLibrary {
    items: Vec<Action>,
}

impl ActionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, action: Action) -> ActionId {
        self.items.push(action);
        ActionId((self.items.len() - 1) as u32)
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.items.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.items.get_mut(id.0 as usize)
    }

    /// Lookup that treats a dangling id as a host fault.
    pub fn require(&self, id: ActionId) -> Result<&Action, HostError> {
        self.get(id).ok_or(HostError::ActionNotFound(id))
    }

    pub fn find(&self, name: &str) -> Option<ActionId> {
        self.items
            .iter()
            .position(|a| a.name == name)
            .map(|i| ActionId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_range_follows_keys() {
        let mut action = Action::new("Walk");
        let mut fc = FCurve::new("location", 0);
        fc.insert_keyframe(4.0, 0.0);
        fc.insert_keyframe(24.0, 1.0);
        action.fcurves.push(fc);
        assert_eq!(action.frame_range(), [4.0, 24.0]);
    }

    #[test]
    fn empty_action_spans_one_frame() {
        assert_eq!(Action::new("Empty").frame_range(), [0.0, 1.0]);
    }

    #[test]
    fn ids_are_dense() {
        let mut lib = ActionLibrary::new();
        let a = lib.insert(Action::new("A"));
        let b = lib.insert(Action::new("B"));
        assert_eq!((a, b), (ActionId(0), ActionId(1)));
        assert_eq!(lib.find("B"), Some(b));
        assert_eq!(lib.require(ActionId(7)), Err(HostError::ActionNotFound(ActionId(7))));
    }
}
