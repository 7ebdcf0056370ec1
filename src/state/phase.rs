// Open/close phases of a portal, gated by animation timers.
//
// Each open and each close request issues a new token. Timer callbacks
// hand their token back, and a token from an earlier phase is ignored, so
// a late timer can never revive or close a portal it no longer belongs to.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PortalPhase {
    #[default]
    Closed,
    /// Mounted, fading in.
    Entering,
    /// Fully shown and interactive.
    Open,
    /// Fading out; the close callback has not fired yet.
    Exiting,
}

impl PortalPhase {
    pub fn is_mounted(self) -> bool {
        self != PortalPhase::Closed
    }

    /// Opaque and accepting pointer input.
    pub fn is_shown(self) -> bool {
        self == PortalPhase::Open
    }

    pub fn class_name(self) -> &'static str {
        if self.is_shown() { "enter" } else { "exit" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecycleToken(u64);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortalLifecycle {
    phase: PortalPhase,
    generation: u64,
}

impl PortalLifecycle {
    pub fn phase(&self) -> PortalPhase {
        self.phase
    }

    /// Start (or restart) the enter animation. Invalidates any pending timer.
    pub fn open(&mut self) -> LifecycleToken {
        self.phase = PortalPhase::Entering;
        self.next_token()
    }

    pub fn complete_enter(&mut self, token: LifecycleToken) -> bool {
        if self.is_current(token) && self.phase == PortalPhase::Entering {
            self.phase = PortalPhase::Open;
            true
        } else {
            false
        }
    }

    /// Begin the exit animation. `None` if the portal is already closing or closed.
    pub fn request_close(&mut self) -> Option<LifecycleToken> {
        match self.phase {
            PortalPhase::Entering | PortalPhase::Open => {
                self.phase = PortalPhase::Exiting;
                Some(self.next_token())
            }
            PortalPhase::Exiting | PortalPhase::Closed => None,
        }
    }

    /// Finish closing. Only then may the host run its close callback.
    pub fn complete_close(&mut self, token: LifecycleToken) -> bool {
        if self.is_current(token) && self.phase == PortalPhase::Exiting {
            self.phase = PortalPhase::Closed;
            true
        } else {
            false
        }
    }

    /// Drop straight to `Closed`, e.g. when the host unmounts the portal.
    /// Outstanding tokens become stale.
    pub fn force_close(&mut self) {
        self.phase = PortalPhase::Closed;
        self.next_token();
    }

    fn next_token(&mut self) -> LifecycleToken {
        self.generation = self.generation.wrapping_add(1);
        LifecycleToken(self.generation)
    }

    fn is_current(&self, token: LifecycleToken) -> bool {
        token.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut lc = PortalLifecycle::default();
        assert_eq!(lc.phase(), PortalPhase::Closed);
        let t = lc.open();
        assert_eq!(lc.phase(), PortalPhase::Entering);
        assert!(lc.complete_enter(t));
        assert!(lc.phase().is_shown());
        let c = lc.request_close().unwrap();
        assert_eq!(lc.phase(), PortalPhase::Exiting);
        assert!(lc.phase().is_mounted());
        assert!(lc.complete_close(c));
        assert_eq!(lc.phase(), PortalPhase::Closed);
    }

    #[test]
    fn test_close_flips_phase_immediately_but_completes_later() {
        let mut lc = PortalLifecycle::default();
        let t = lc.open();
        lc.complete_enter(t);
        let c = lc.request_close().unwrap();
        assert_eq!(lc.phase().class_name(), "exit");
        // nothing closes until the timer hands the token back
        assert_eq!(lc.phase(), PortalPhase::Exiting);
        assert!(lc.request_close().is_none());
        assert!(lc.complete_close(c));
    }

    #[test]
    fn test_stale_enter_timer_cannot_revive_closing_portal() {
        let mut lc = PortalLifecycle::default();
        let enter = lc.open();
        let close = lc.request_close().unwrap();
        assert!(!lc.complete_enter(enter));
        assert_eq!(lc.phase(), PortalPhase::Exiting);
        assert!(lc.complete_close(close));
        assert!(!lc.complete_enter(enter));
        assert_eq!(lc.phase(), PortalPhase::Closed);
    }

    #[test]
    fn test_force_close_invalidates_tokens() {
        let mut lc = PortalLifecycle::default();
        let enter = lc.open();
        lc.force_close();
        assert_eq!(lc.phase(), PortalPhase::Closed);
        let reopened = lc.open();
        assert!(!lc.complete_enter(enter));
        assert!(lc.complete_enter(reopened));
    }

    #[test]
    fn test_reopen_invalidates_pending_close() {
        let mut lc = PortalLifecycle::default();
        let t = lc.open();
        lc.complete_enter(t);
        let close = lc.request_close().unwrap();
        let reopen = lc.open();
        assert!(!lc.complete_close(close));
        assert_eq!(lc.phase(), PortalPhase::Entering);
        assert!(lc.complete_enter(reopen));
    }
}
