//! Manager configuration.

use serde::{Deserialize, Serialize};

use crate::host::{BlendType, Extrapolation};

/// Defaults used by [`AnimationManager`](crate::manager::AnimationManager).
///
/// The `default_*` values are what gets written back onto an object when
/// nothing was saved from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Rebuild the NLA track stack when restoring.
    pub copy_nla: bool,
    pub default_extrapolation: Extrapolation,
    pub default_blend_type: BlendType,
    pub default_influence: f32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            copy_nla: false,
            default_extrapolation: Extrapolation::Hold,
            default_blend_type: BlendType::Replace,
            default_influence: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ManagerConfig = serde_json::from_str(r#"{ "copy_nla": true }"#).unwrap();
        assert!(cfg.copy_nla);
        assert_eq!(cfg.default_blend_type, BlendType::Replace);
        assert_eq!(cfg.default_influence, 1.0);
    }
}
