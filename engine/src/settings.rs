use std::sync::atomic::{AtomicBool, Ordering};

/// Feature switches shared by the state machine and the auto-pick engine.
///
/// Flags are read on every event, so a change takes effect on the next one.
#[derive(Debug)]
pub struct EngineSettings {
    auto_confirm: AtomicBool,
    auto_pick: AtomicBool,
    auto_analysis: AtomicBool,
    save_history: AtomicBool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::new(true, true, true, false)
    }
}

impl EngineSettings {
    pub fn new(auto_confirm: bool, auto_pick: bool, auto_analysis: bool, save_history: bool) -> Self {
        Self {
            auto_confirm: AtomicBool::new(auto_confirm),
            auto_pick: AtomicBool::new(auto_pick),
            auto_analysis: AtomicBool::new(auto_analysis),
            save_history: AtomicBool::new(save_history),
        }
    }

    pub fn auto_confirm(&self) -> bool {
        self.auto_confirm.load(Ordering::Relaxed)
    }

    pub fn set_auto_confirm(&self, enabled: bool) {
        self.auto_confirm.store(enabled, Ordering::Relaxed);
    }

    pub fn auto_pick(&self) -> bool {
        self.auto_pick.load(Ordering::Relaxed)
    }

    pub fn set_auto_pick(&self, enabled: bool) {
        self.auto_pick.store(enabled, Ordering::Relaxed);
    }

    pub fn auto_analysis(&self) -> bool {
        self.auto_analysis.load(Ordering::Relaxed)
    }

    pub fn set_auto_analysis(&self, enabled: bool) {
        self.auto_analysis.store(enabled, Ordering::Relaxed);
    }

    pub fn save_history(&self) -> bool {
        self.save_history.load(Ordering::Relaxed)
    }

    pub fn set_save_history(&self, enabled: bool) {
        self.save_history.store(enabled, Ordering::Relaxed);
    }
}
