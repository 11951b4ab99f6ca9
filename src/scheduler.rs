//! Cooperative task scheduler.
//!
//! One elapsed-tick counter per task.  Every tick all counters advance;
//! each task whose counter has reached its period is reported due (once)
//! and its counter resets.  The caller runs the due tasks in the order
//! returned, which is always the fixed priority order below.
//!
//! ```text
//!        tick
//!          │
//!          ▼
//!  ┌──────────────┬───────┬───────┬────────────┬───────────┬────────┐
//!  │ slot         │ Input │ Motor │ Oscillator │ Animation │ Output │
//!  │ period       │  10   │   1   │     1      │    250    │   1    │
//!  │ elapsed += 1 │   …   │   …   │     …      │     …     │   …    │
//!  └──────────────┴───────┴───────┴────────────┴───────────┴────────┘
//!          │  elapsed >= period → due, elapsed = 0
//!          ▼
//!     DueTasks (priority order)
//! ```

use heapless::Vec;

use crate::config::TaskPeriods;

/// Number of scheduled tasks.
pub const TASK_COUNT: usize = 5;

/// Scheduled tasks, declared in execution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskId {
    Input = 0,
    Motor = 1,
    Oscillator = 2,
    Animation = 3,
    Output = 4,
}

impl TaskId {
    /// All tasks in execution order.
    pub const ALL: [TaskId; TASK_COUNT] = [
        TaskId::Input,
        TaskId::Motor,
        TaskId::Oscillator,
        TaskId::Animation,
        TaskId::Output,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Motor => "motor",
            Self::Oscillator => "oscillator",
            Self::Animation => "animation",
            Self::Output => "output",
        }
    }
}

/// Tasks that fell due on one tick, in execution order.
pub type DueTasks = Vec<TaskId, TASK_COUNT>;

/// Internal bookkeeping for one task.
#[derive(Debug, Clone, Copy)]
struct TaskSlot {
    id: TaskId,
    period: u32,
    elapsed: u32,
}

/// The scheduler engine.
///
/// Decoupled from the FSMs: it only reports which tasks are due, so it
/// can be tested without any state machine attached.
pub struct Scheduler {
    slots: [TaskSlot; TASK_COUNT],
    ticks: u64,
}

impl Scheduler {
    /// Build the scheduler from validated periods (all non-zero).
    pub fn new(periods: &TaskPeriods) -> Self {
        let period_of = |id| match id {
            TaskId::Input => periods.input,
            TaskId::Motor => periods.motor,
            TaskId::Oscillator => periods.oscillator,
            TaskId::Animation => periods.animation,
            TaskId::Output => periods.output,
        };
        Self {
            slots: TaskId::ALL.map(|id| TaskSlot {
                id,
                period: period_of(id),
                elapsed: 0,
            }),
            ticks: 0,
        }
    }

    /// Advance one tick and collect the due tasks.
    pub fn tick(&mut self) -> DueTasks {
        self.ticks += 1;

        for slot in &mut self.slots {
            slot.elapsed = slot.elapsed.saturating_add(1);
        }

        let mut due = DueTasks::new();
        for slot in &mut self.slots {
            if slot.elapsed >= slot.period {
                slot.elapsed = 0;
                // Capacity equals the slot count; a task is pushed at most once.
                let _ = due.push(slot.id);
            }
        }
        due
    }

    /// Ticks elapsed since the given task last ran.
    pub fn elapsed(&self, id: TaskId) -> u32 {
        self.slots[id as usize].elapsed
    }

    /// Period of the given task, in ticks.
    pub fn period(&self, id: TaskId) -> u32 {
        self.slots[id as usize].period
    }

    /// Total ticks processed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
