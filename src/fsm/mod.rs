//! Finite state machine engine.
//!
//! Each machine is one `step(state, view) -> Step` function: the
//! transition for the current state followed by the action of the state
//! it lands in, evaluated atomically within a tick.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Fsm<M>                                                       │
//! │  ┌─────────┐   step(state, view)   ┌──────────────────────┐   │
//! │  │ state   │ ────────────────────▶ │ M: StateMachine      │   │
//! │  │ steps   │ ◀──────────────────── │  transition + action │   │
//! │  └─────────┘   Step { next, effect}└──────────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The view is the machine's slice of the
//! [`StatusRegisters`](registers::StatusRegisters): `&mut` for the fields
//! it owns, `&` for everything else.  Effects that reach outside the
//! registers (display redraws, the output write) are returned, not
//! performed, so every machine is a pure function of its inputs.

pub mod animation;
pub mod input;
pub mod motor;
pub mod oscillator;
pub mod output;
pub mod registers;

use core::fmt::Debug;

use log::trace;

use crate::display::FanFrame;
use crate::display::status_line::StatusField;
use output::OutputWord;

// ---------------------------------------------------------------------------
// Step result
// ---------------------------------------------------------------------------

/// Side effect requested by a state action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Redraw one field of the status line.
    StatusText(StatusField),
    /// Draw the given animation frame on the bitmap display.
    Redraw(FanFrame),
    /// Write the composite word to the output port.
    WriteOutput(OutputWord),
}

/// Outcome of one FSM step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<S> {
    pub next: S,
    pub effect: Option<Effect>,
}

impl<S> Step<S> {
    /// Land in `next` with no external effect.
    pub fn to(next: S) -> Self {
        Self { next, effect: None }
    }

    /// Land in `next` and request `effect`.
    pub fn with(next: S, effect: Effect) -> Self {
        Self {
            next,
            effect: Some(effect),
        }
    }
}

// ---------------------------------------------------------------------------
// Machine definition
// ---------------------------------------------------------------------------

/// A state machine driven by the [`Fsm`] engine.
pub trait StateMachine {
    /// State enum.  `Start` is the initial state of every machine.
    type State: Copy + Eq + Debug;
    /// The register slice this machine reads and writes.
    type View<'a>;

    /// Short name used in trace output.
    const NAME: &'static str;
    /// Initial state.
    const INITIAL: Self::State;

    /// Evaluate the transition out of `state`, then the action of the
    /// state it lands in.
    fn step(&self, state: Self::State, view: Self::View<'_>) -> Step<Self::State>;
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Holds one machine and its current state.
pub struct Fsm<M: StateMachine> {
    machine: M,
    state: M::State,
    /// Steps executed (wraps at u64::MAX).
    steps: u64,
}

impl<M: StateMachine> Fsm<M> {
    pub fn new(machine: M) -> Self {
        Self {
            machine,
            state: M::INITIAL,
            steps: 0,
        }
    }

    /// Run one step and return the effect to apply, if any.
    pub fn step(&mut self, view: M::View<'_>) -> Option<Effect> {
        self.steps = self.steps.wrapping_add(1);
        let Step { next, effect } = self.machine.step(self.state, view);

        if next != self.state {
            trace!("{}: {:?} -> {:?}", M::NAME, self.state, next);
            self.state = next;
        }
        effect
    }

    /// The current state.
    pub fn state(&self) -> M::State {
        self.state
    }

    /// Total steps executed.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
