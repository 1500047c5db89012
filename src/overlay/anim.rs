//! Enter/leave transitions for overlay panels.
//!
//! A transition is a linear progress over a fixed duration, measured from an
//! [`Instant`] captured when it starts. Completion is a deadline observed on
//! tick rather than an external signal, so a leave transition always
//! finishes within its own duration and teardown can never get stuck waiting
//! for a notification that never arrives.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default duration of an enter or leave transition
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(160);

/// How a panel animates in and out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Animation {
    /// Dim in/out in place
    #[default]
    Fade,
    /// Slide up from the bottom edge
    SlideUp,
    /// Slide down from the top edge
    SlideDown,
    /// Grow/shrink around the panel center
    Scale,
    /// No transition; show and hide are instantaneous
    None,
}

/// Which direction a transition runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Leave,
}

/// Geometry adjustments the renderer applies for the current frame.
///
/// `slide` is a fraction of the panel height: positive pushes the panel
/// toward the bottom edge, negative toward the top. `shrink` collapses the
/// panel around its center. `dim` draws the panel with dimmed styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub slide: f32,
    pub shrink: f32,
    pub dim: bool,
}

impl Effect {
    /// Effect of a fully settled panel
    pub const NONE: Effect = Effect {
        slide: 0.0,
        shrink: 0.0,
        dim: false,
    };
}

/// A running enter or leave transition
#[derive(Debug, Clone)]
pub struct Transition {
    animation: Animation,
    phase: Phase,
    started: Instant,
    duration: Duration,
}

impl Transition {
    pub fn new(animation: Animation, phase: Phase, duration: Duration) -> Self {
        Self {
            animation,
            phase,
            started: Instant::now(),
            duration,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Linear progress in `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() || self.animation == Animation::None {
            return 1.0;
        }
        let elapsed = self.started.elapsed().as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Whether the deadline has passed
    pub fn is_complete(&self) -> bool {
        self.animation == Animation::None || self.started.elapsed() >= self.duration
    }

    /// How much of the panel is revealed right now (1.0 = fully settled)
    fn reveal(&self) -> f32 {
        match self.phase {
            Phase::Enter => self.progress(),
            Phase::Leave => 1.0 - self.progress(),
        }
    }

    /// The geometry effect to apply when rendering this frame
    pub fn effect(&self) -> Effect {
        let hidden = 1.0 - self.reveal();
        match self.animation {
            Animation::None => Effect::NONE,
            Animation::Fade => Effect {
                slide: 0.0,
                shrink: 0.0,
                dim: hidden > 0.0,
            },
            Animation::SlideUp => Effect {
                slide: hidden,
                shrink: 0.0,
                dim: false,
            },
            Animation::SlideDown => Effect {
                slide: -hidden,
                shrink: 0.0,
                dim: false,
            },
            Animation::Scale => Effect {
                slide: 0.0,
                shrink: hidden,
                dim: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_animation_is_complete_immediately() {
        let tr = Transition::new(Animation::None, Phase::Leave, DEFAULT_TRANSITION);
        assert!(tr.is_complete());
        assert_eq!(tr.effect(), Effect::NONE);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let tr = Transition::new(Animation::Fade, Phase::Enter, Duration::ZERO);
        assert!(tr.is_complete());
        assert_eq!(tr.progress(), 1.0);
    }

    #[test]
    fn test_enter_starts_hidden() {
        let tr = Transition::new(Animation::SlideUp, Phase::Enter, Duration::from_secs(60));
        // Brand new enter transition: panel nearly fully offset downward.
        assert!(tr.effect().slide > 0.9);
        assert!(!tr.is_complete());
    }

    #[test]
    fn test_leave_starts_revealed() {
        let tr = Transition::new(Animation::Scale, Phase::Leave, Duration::from_secs(60));
        assert!(tr.effect().shrink < 0.1);
    }

    #[test]
    fn test_leave_deadline_elapses() {
        let tr = Transition::new(Animation::Fade, Phase::Leave, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(tr.is_complete());
        assert_eq!(tr.progress(), 1.0);
    }
}
