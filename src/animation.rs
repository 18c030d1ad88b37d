use std::time::Duration;

/// Common surface of the text effects, as seen by the host loop.
///
/// Hosts call [`TextAnimation::advance`] whenever time moves on and display
/// whatever [`TextAnimation::output`] returns. [`TextAnimation::teardown`]
/// must be called once an instance is no longer shown.
pub trait TextAnimation {
    /// Latest rendered snapshot.
    fn output(&self) -> &str;

    /// When the next tick is due, or `None` if nothing is scheduled.
    fn next_deadline(&self) -> Option<Duration>;

    /// Runs every tick due at or before `now`, in order.
    /// Returns true if at least one tick ran.
    fn advance(&mut self, now: Duration) -> bool;

    /// Cancels the pending tick. Nothing mutates the output afterwards.
    fn teardown(&mut self);

    fn is_animating(&self) -> bool {
        self.next_deadline().is_some()
    }
}

/// Earliest deadline across a set of animations.
pub fn earliest_deadline<'a, I>(animations: I) -> Option<Duration>
where
    I: IntoIterator<Item = &'a dyn TextAnimation>,
{
    animations
        .into_iter()
        .filter_map(|a| a.next_deadline())
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filler::FixedFiller;
    use crate::scramble::{ScrambleConfig, ScrambleReveal};
    use crate::typewriter::{Typewriter, TypewriterTimings};

    #[test]
    fn earliest_deadline_picks_soonest_pending() {
        let mut reveal =
            ScrambleReveal::with_filler("abc", ScrambleConfig::default(), FixedFiller('#')).unwrap();
        let mut typewriter = Typewriter::new(["abc"], TypewriterTimings::default()).unwrap();
        reveal.start(Duration::ZERO);
        typewriter.start(Duration::ZERO);

        let both: [&dyn TextAnimation; 2] = [&reveal, &typewriter];
        assert_eq!(earliest_deadline(both), Some(Duration::from_millis(12)));

        reveal.teardown();
        let both: [&dyn TextAnimation; 2] = [&reveal, &typewriter];
        assert_eq!(earliest_deadline(both), Some(Duration::from_millis(100)));

        typewriter.teardown();
        let both: [&dyn TextAnimation; 2] = [&reveal, &typewriter];
        assert_eq!(earliest_deadline(both), None);
        assert!(!typewriter.is_animating());
    }
}
