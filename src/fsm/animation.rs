//! Display Animation: spins the fan bitmap while the fan is powered.
//!
//! `START ─▶ DWELL ⇄ OUTPUT`, with `OUTPUT` held for as long as power is on.
//! Every `OUTPUT` step flips the frame and asks for a redraw.

use super::registers::AnimationView;
use super::{Effect, StateMachine, Step};
use crate::display::FanFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Start,
    Dwell,
    Output,
}

#[derive(Debug, Default)]
pub struct DisplayAnimation;

impl StateMachine for DisplayAnimation {
    type State = AnimationState;
    type View<'a> = AnimationView<'a>;

    const NAME: &'static str = "animation";
    const INITIAL: AnimationState = AnimationState::Start;

    fn step(&self, state: AnimationState, view: AnimationView<'_>) -> Step<AnimationState> {
        let AnimationView { mode, frame } = view;

        let next = match state {
            AnimationState::Start => AnimationState::Dwell,
            AnimationState::Dwell | AnimationState::Output if mode.power => AnimationState::Output,
            AnimationState::Dwell | AnimationState::Output => AnimationState::Dwell,
        };

        if next == AnimationState::Output {
            frame.index ^= 1;
            return Step::with(next, Effect::Redraw(FanFrame::from_index(frame.index)));
        }
        Step::to(next)
    }
}
