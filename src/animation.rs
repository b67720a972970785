//! Frame sequencing for animations
//!
//! An animation is a slice of [`AnimationFrame`]s, each drawn with
//! [`Display::draw_frame`] and held for its delay. Playback blocks the calling
//! thread: the next thing to happen after a delay is always another bus
//! transfer, so there is nothing to overlap it with.
//!
//! Stopping is cooperative. The [`StopSignal`] is polled before every frame
//! and never during one, because abandoning a memory write halfway would
//! leave the controller's write cursor mid-window.
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::sync::atomic::{AtomicBool, Ordering};
//! use st7789v::{AnimationFrame, AnimationScheduler, Frame, LoopPolicy};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use st7789v::{Builder, Dimensions, Display, Interface};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let interface = Interface::new(MockSpi, MockPin, MockPin);
//! # let dims = match Dimensions::new(240, 240) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut display = Display::new(interface, config);
//! # let _ = display.init(&mut delay);
//! # let (first, second) = ([0u8; 12], [255u8; 12]);
//! # let (Ok(a), Ok(b)) = (Frame::from_rgb(2, 2, &first), Frame::from_rgb(2, 2, &second)) else {
//! #     return;
//! # };
//! let frames = [
//!     AnimationFrame::new(a, 100),
//!     AnimationFrame::new(b, 100),
//! ];
//! let stop = AtomicBool::new(false);
//! let scheduler = AnimationScheduler::new(&frames, LoopPolicy::Repeat);
//! let _ = scheduler.play(&mut display, &mut delay, &mut || stop.load(Ordering::Relaxed));
//! ```

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::display::Display;
use crate::error::Error;
use crate::frame::Frame;
use crate::interface::DisplayInterface;

/// What happens after the last frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopPolicy {
    /// Play the sequence once, then return
    #[default]
    Once,
    /// Start over from the first frame until stopped
    Repeat,
}

/// One step of an animation: a frame and how long it stays on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationFrame<'a> {
    /// Frame to draw
    pub frame: Frame<'a>,
    /// Time to hold the frame before the next one, in milliseconds
    pub delay_ms: u32,
}

impl<'a> AnimationFrame<'a> {
    /// Pair a frame with its hold time
    pub fn new(frame: Frame<'a>, delay_ms: u32) -> Self {
        Self { frame, delay_ms }
    }
}

/// External request to stop playback
///
/// Polled between frames. Closures returning `bool` implement it, so an
/// `AtomicBool` set from an interrupt handler works as
/// `|| flag.load(Ordering::Relaxed)`.
pub trait StopSignal {
    /// Return true to stop before the next frame
    fn should_stop(&mut self) -> bool;
}

impl<F> StopSignal for F
where
    F: FnMut() -> bool,
{
    fn should_stop(&mut self) -> bool {
        self()
    }
}

/// Stop signal that never fires
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// How playback ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// `Once` policy reached the end of the sequence
    Completed {
        /// Frames drawn
        frames_drawn: usize,
    },
    /// The stop signal fired between frames
    Stopped {
        /// Frames drawn before stopping
        frames_drawn: usize,
    },
}

/// Plays a frame sequence on a display
#[derive(Clone, Copy, Debug)]
pub struct AnimationScheduler<'s, 'a> {
    sequence: &'s [AnimationFrame<'a>],
    policy: LoopPolicy,
}

impl<'s, 'a> AnimationScheduler<'s, 'a> {
    /// Create a scheduler over a sequence
    pub fn new(sequence: &'s [AnimationFrame<'a>], policy: LoopPolicy) -> Self {
        Self { sequence, policy }
    }

    /// Loop policy
    pub fn policy(&self) -> LoopPolicy {
        self.policy
    }

    /// Frames in one pass of the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the sequence has no frames
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Draw each frame and hold it for its delay
    ///
    /// Returns once the sequence ends under [`LoopPolicy::Once`], or as soon
    /// as `stop` fires before a frame. An empty sequence returns immediately.
    /// The display stays owned by the caller either way.
    ///
    /// # Errors
    ///
    /// Any [`Display::draw_frame`] error ends playback immediately.
    pub fn play<I, D, S>(
        &self,
        display: &mut Display<I>,
        delay: &mut D,
        stop: &mut S,
    ) -> Result<AnimationOutcome, Error<I>>
    where
        I: DisplayInterface,
        D: DelayNs,
        S: StopSignal + ?Sized,
    {
        let mut frames_drawn = 0usize;
        if self.sequence.is_empty() {
            return Ok(AnimationOutcome::Completed { frames_drawn });
        }
        debug!(
            "playing {} frame animation ({:?})",
            self.sequence.len(),
            self.policy
        );

        loop {
            for step in self.sequence {
                if stop.should_stop() {
                    debug!("animation stopped after {} frames", frames_drawn);
                    return Ok(AnimationOutcome::Stopped { frames_drawn });
                }
                display.draw_frame(&step.frame)?;
                frames_drawn = frames_drawn.saturating_add(1);
                delay.delay_ms(step.delay_ms);
            }

            if self.policy == LoopPolicy::Once {
                return Ok(AnimationOutcome::Completed { frames_drawn });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RAMWR;
    use crate::display::tests::{MockDelay, MockInterface, initialized_display, test_config};
    use crate::display::PowerState;
    use alloc::vec::Vec;
    use core::cell::Cell;

    static BLACK: [u8; 12] = [0; 12];
    static WHITE: [u8; 12] = [255; 12];

    fn two_frames<'a>(delay_ms: u32) -> [AnimationFrame<'a>; 2] {
        [
            AnimationFrame::new(Frame::from_rgb(2, 2, &BLACK).unwrap(), delay_ms),
            AnimationFrame::new(Frame::from_rgb(2, 2, &WHITE).unwrap(), delay_ms),
        ]
    }

    /// Pixel payload of every RAMWR, in order
    fn drawn_frames(display: &Display<MockInterface>) -> Vec<Vec<u8>> {
        display
            .interface()
            .command_data()
            .into_iter()
            .filter(|(cmd, _)| *cmd == RAMWR)
            .map(|(_, data)| data)
            .collect()
    }

    #[test]
    fn test_once_draws_each_frame_then_returns() {
        let mut display = initialized_display(240, 240);
        let mut delay = MockDelay::default();
        let frames = two_frames(100);
        let scheduler = AnimationScheduler::new(&frames, LoopPolicy::Once);

        let outcome = scheduler
            .play(&mut display, &mut delay, &mut NeverStop)
            .unwrap();

        assert_eq!(outcome, AnimationOutcome::Completed { frames_drawn: 2 });
        assert_eq!(drawn_frames(&display), [alloc::vec![0x00; 8], alloc::vec![0xFF; 8]]);
        assert_eq!(delay.delays_ms, [100, 100]);
    }

    #[test]
    fn test_repeat_loops_until_stopped() {
        let mut display = initialized_display(240, 240);
        let mut delay = MockDelay::default();
        let frames = two_frames(40);
        let scheduler = AnimationScheduler::new(&frames, LoopPolicy::Repeat);

        // Stop after five frames have been drawn
        let polls = Cell::new(0);
        let mut stop = || {
            polls.set(polls.get() + 1);
            polls.get() > 5
        };
        let outcome = scheduler.play(&mut display, &mut delay, &mut stop).unwrap();

        assert_eq!(outcome, AnimationOutcome::Stopped { frames_drawn: 5 });
        let drawn = drawn_frames(&display);
        assert_eq!(drawn.len(), 5);
        assert_eq!(drawn[0], drawn[2]);
        assert_eq!(drawn[1], drawn[3]);
        assert_eq!(drawn[4], drawn[0]);
        assert_eq!(delay.delays_ms, [40; 5]);
    }

    #[test]
    fn test_stop_before_first_frame_draws_nothing() {
        let mut display = initialized_display(240, 240);
        let mut delay = MockDelay::default();
        let frames = two_frames(100);
        let scheduler = AnimationScheduler::new(&frames, LoopPolicy::Repeat);

        let outcome = scheduler
            .play(&mut display, &mut delay, &mut || true)
            .unwrap();

        assert_eq!(outcome, AnimationOutcome::Stopped { frames_drawn: 0 });
        assert!(display.interface().events.is_empty());
        assert!(delay.delays_ms.is_empty());
    }

    #[test]
    fn test_empty_sequence_completes_immediately() {
        let mut display = initialized_display(240, 240);
        let mut delay = MockDelay::default();
        let scheduler = AnimationScheduler::new(&[], LoopPolicy::Repeat);
        assert!(scheduler.is_empty());

        let outcome = scheduler
            .play(&mut display, &mut delay, &mut NeverStop)
            .unwrap();
        assert_eq!(outcome, AnimationOutcome::Completed { frames_drawn: 0 });
    }

    #[test]
    fn test_draw_error_ends_playback() {
        let mut display = Display::new(MockInterface::new(), test_config(240, 240));
        let mut delay = MockDelay::default();
        let frames = two_frames(100);
        let scheduler = AnimationScheduler::new(&frames, LoopPolicy::Repeat);

        let result = scheduler.play(&mut display, &mut delay, &mut NeverStop);
        assert!(matches!(
            result,
            Err(Error::NotInitialized {
                state: PowerState::Unpowered
            })
        ));
        assert!(delay.delays_ms.is_empty());
    }

    #[test]
    fn test_zero_delay_frames() {
        let mut display = initialized_display(240, 240);
        let mut delay = MockDelay::default();
        let frames = two_frames(0);
        let scheduler = AnimationScheduler::new(&frames, LoopPolicy::Once);
        scheduler
            .play(&mut display, &mut delay, &mut NeverStop)
            .unwrap();
        assert_eq!(delay.delays_ms, [0, 0]);
    }
}
