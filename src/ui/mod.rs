pub mod progress;

use crate::transmission::{Phase, RunObserver};
use progress::{ProgressManager, templates};

pub fn print_banner() {
    println!("ooktx");
}

/// Drives indicatif bars from the sequencer's phase/repeat callbacks.
pub struct RunProgress {
    manager: ProgressManager,
    repeats: u32,
}

impl RunProgress {
    pub fn new(repeats: u32) -> Self {
        Self {
            manager: ProgressManager::new(),
            repeats,
        }
    }
}

impl RunObserver for RunProgress {
    fn phase_changed(&mut self, phase: Phase) {
        match phase {
            Phase::WarmingUp => {
                let _ = self.manager.create_bar(
                    "warmup",
                    1,
                    templates::WARMUP,
                    "warming up transmitter",
                );
            }
            Phase::Transmitting => {
                let _ = self.manager.inc("warmup", 1);
                let _ = self.manager.finish("warmup", "warm-up done");
                if self.repeats > 0 {
                    let _ = self.manager.create_bar(
                        "transmit",
                        self.repeats as u64,
                        templates::TRANSMIT,
                        "transmitting payload",
                    );
                }
            }
            Phase::Done => {
                let _ = self.manager.finish("transmit", "all repeats sent");
                self.manager.finish_all();
            }
            Phase::Failed => {
                self.manager.finish_all();
            }
            Phase::Idle | Phase::Configured => {}
        }
    }

    fn repeat_done(&mut self, _repeat: u32, _total: u32) {
        let _ = self.manager.inc("transmit", 1);
    }
}
