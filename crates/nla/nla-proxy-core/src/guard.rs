//! Scoped exit of tweak mode.

use std::ops::{Deref, DerefMut};

use log::debug;

use crate::host::TweakModeHost;

/// Forces tweak mode off for its lifetime and puts it back on drop, on every
/// exit path.
#[derive(Debug)]
pub struct TweakModeGuard<'a, H: TweakModeHost> {
    host: &'a mut H,
    was_active: bool,
}

impl<'a, H: TweakModeHost> TweakModeGuard<'a, H> {
    pub fn exit(host: &'a mut H) -> Self {
        let was_active = host.is_tweak_mode();
        if was_active {
            debug!("leaving tweak mode");
            host.exit_tweak_mode();
        }
        Self { host, was_active }
    }

    /// Whether tweak mode was on when the guard was taken.
    pub fn was_active(&self) -> bool {
        self.was_active
    }
}

impl<H: TweakModeHost> Deref for TweakModeGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        &*self.host
    }
}

impl<H: TweakModeHost> DerefMut for TweakModeGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut *self.host
    }
}

impl<H: TweakModeHost> Drop for TweakModeGuard<'_, H> {
    fn drop(&mut self) {
        if self.was_active {
            debug!("re-entering tweak mode");
            self.host.enter_tweak_mode();
        }
    }
}
