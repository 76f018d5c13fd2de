//! Frame scheduling: one explicit owner for the "is the loop running" flag.
//!
//! Bevy calls the frame system once per `Update`; this resource decides
//! whether that call does any work.  Hiding the window stops the loop,
//! showing it resumes; nothing in flight is ever aborted because a frame is
//! a single synchronous system run.

use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    disabled: bool,
    frames_run: u64,
}

impl FrameScheduler {
    /// Begin scheduling frames.  No-op once disabled.
    pub fn start(&mut self) {
        if !self.disabled {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Permanently stop: used when the field must stay inert.
    pub fn disable(&mut self) {
        self.disabled = true;
        self.running = false;
    }

    /// Visibility callback: visible resumes, hidden pauses.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn record_frame(&mut self) {
        self.frames_run += 1;
    }

    /// Frames actually stepped since startup.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}

/// Run condition for the frame system.
pub fn scheduler_running(scheduler: Res<FrameScheduler>) -> bool {
    scheduler.is_running()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped() {
        let scheduler = FrameScheduler::default();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.frames_run(), 0);
    }

    #[test]
    fn visibility_toggles_running() {
        let mut scheduler = FrameScheduler::default();
        scheduler.start();
        scheduler.set_visible(false);
        assert!(!scheduler.is_running());
        scheduler.set_visible(true);
        assert!(scheduler.is_running());
    }

    #[test]
    fn disabled_scheduler_ignores_visibility() {
        let mut scheduler = FrameScheduler::default();
        scheduler.disable();
        scheduler.set_visible(true);
        scheduler.start();
        assert!(!scheduler.is_running());
        assert!(scheduler.is_disabled());
    }
}
