// src/tools/pomodoro.rs
//! Work/break cycle of a pomodoro timer, driven one second at a time.
//! The wall clock and notifications belong to the caller.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::utils::format_clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Short,
    Long,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Work => write!(f, "Work"),
            Phase::Short => write!(f, "Short Break"),
            Phase::Long => write!(f, "Long Break"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroSettings {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub intervals: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            intervals: 4,
        }
    }
}

impl PomodoroSettings {
    /// Length of a phase in seconds; never shorter than one minute.
    pub fn seconds_for(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::Short => self.short_break_minutes,
            Phase::Long => self.long_break_minutes,
        };
        minutes.max(1).saturating_mul(60)
    }

    fn work_sessions_until_long(&self) -> u32 {
        self.intervals.max(1)
    }
}

/// Reported when a phase runs out and the next one begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub finished: Phase,
    pub next: Phase,
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    phase: Phase,
    remaining: u32,
    completed_work: u32,
    running: bool,
}

impl PomodoroTimer {
    pub fn new(settings: PomodoroSettings) -> Self {
        let remaining = settings.seconds_for(Phase::Work);
        Self {
            settings,
            phase: Phase::Work,
            remaining,
            completed_work: 0,
            running: false,
        }
    }

    /// Start the current phase (or `phase`) from its full length.
    pub fn start(&mut self, phase: Option<Phase>) {
        if let Some(phase) = phase {
            self.phase = phase;
        }
        self.remaining = self.settings.seconds_for(self.phase);
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.pause();
        self.remaining = self.settings.seconds_for(self.phase);
    }

    // Advance one second
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        let finished = self.phase;
        let next = match finished {
            Phase::Work => {
                self.completed_work += 1;
                if self.completed_work % self.settings.work_sessions_until_long() == 0 {
                    Phase::Long
                } else {
                    Phase::Short
                }
            }
            Phase::Short | Phase::Long => Phase::Work,
        };

        self.start(Some(next));
        Some(Transition { finished, next })
    }

    // Run the current phase to its end
    fn complete_phase(&mut self) -> Option<Transition> {
        self.remaining = 1;
        self.tick()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn completed_work(&self) -> u32 {
        self.completed_work
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }

    pub fn label(&self) -> String {
        self.phase.to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedPhase {
    pub phase: Phase,
    pub label: String,
    pub seconds: u32,
    pub starts_at: u32,
}

// The next `count` phases starting from a fresh work session
pub fn schedule(settings: &PomodoroSettings, count: usize) -> Vec<PlannedPhase> {
    let mut timer = PomodoroTimer::new(settings.clone());
    timer.start(None);

    let mut plan = Vec::with_capacity(count);
    let mut elapsed = 0u32;
    for _ in 0..count {
        let phase = timer.phase();
        let seconds = settings.seconds_for(phase);
        plan.push(PlannedPhase {
            phase,
            label: phase.to_string(),
            seconds,
            starts_at: elapsed,
        });
        elapsed = elapsed.saturating_add(seconds);
        timer.complete_phase();
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> PomodoroSettings {
        PomodoroSettings {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 2,
            intervals: 2,
        }
    }

    #[test]
    fn durations_have_a_one_minute_floor() {
        let settings = PomodoroSettings {
            work_minutes: 0,
            ..PomodoroSettings::default()
        };
        assert_eq!(settings.seconds_for(Phase::Work), 60);
        assert_eq!(settings.seconds_for(Phase::Long), 15 * 60);
    }

    #[test]
    fn paused_timer_does_not_advance() {
        let mut timer = PomodoroTimer::new(quick());
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 60);
        assert_eq!(timer.display(), "01:00");
    }

    #[test]
    fn work_rolls_into_a_short_break() {
        let mut timer = PomodoroTimer::new(quick());
        timer.start(None);
        for _ in 0..59 {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(timer.display(), "00:01");
        assert_eq!(
            timer.tick(),
            Some(Transition {
                finished: Phase::Work,
                next: Phase::Short
            })
        );
        assert_eq!(timer.label(), "Short Break");
        assert_eq!(timer.remaining(), 60);
        assert!(timer.is_running());
    }

    #[test]
    fn every_nth_work_session_earns_a_long_break() {
        let phases: Vec<Phase> = schedule(&quick(), 6).into_iter().map(|p| p.phase).collect();
        assert_eq!(
            phases,
            vec![Phase::Work, Phase::Short, Phase::Work, Phase::Long, Phase::Work, Phase::Short]
        );
    }

    #[test]
    fn schedule_accumulates_start_times() {
        let plan = schedule(&quick(), 4);
        let starts: Vec<u32> = plan.iter().map(|p| p.starts_at).collect();
        assert_eq!(starts, vec![0, 60, 120, 180]);
        assert_eq!(plan[3].seconds, 120);
    }

    #[test]
    fn reset_restores_the_full_phase_and_pauses() {
        let mut timer = PomodoroTimer::new(quick());
        timer.start(Some(Phase::Long));
        timer.tick();
        timer.reset();
        assert_eq!(timer.remaining(), 120);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_work(), 0);
    }
}
