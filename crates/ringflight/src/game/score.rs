use crate::api::sinks::DisplaySink;

/// The session's score counter. Every change is pushed to the display.
#[derive(Debug, Clone, Default)]
pub struct ScoreLedger {
    value: u32,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Add one point and return the new total.
    pub fn increment(&mut self, display: &mut impl DisplaySink) -> u32 {
        self.value = self.value.saturating_add(1);
        display.show_score(self.value);
        self.value
    }

    /// Push the current total again (final score on death).
    pub fn publish(&self, display: &mut impl DisplaySink) {
        display.show_score(self.value);
    }

    /// Back to zero. Only a session being initialized calls this.
    pub(crate) fn reset(&mut self, display: &mut impl DisplaySink) {
        self.value = 0;
        display.show_score(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::FrameContext;
    use crate::api::types::GameEvent;

    #[test]
    fn increment_publishes_new_total() {
        let mut ctx = FrameContext::new();
        let mut score = ScoreLedger::new();
        assert_eq!(score.increment(&mut ctx), 1);
        assert_eq!(score.increment(&mut ctx), 2);
        assert_eq!(score.value(), 2);
        assert_eq!(ctx.events.last(), Some(&GameEvent::new(GameEvent::SCORE, 2.0)));
    }

    #[test]
    fn reset_publishes_zero() {
        let mut ctx = FrameContext::new();
        let mut score = ScoreLedger::new();
        score.increment(&mut ctx);
        score.reset(&mut ctx);
        assert_eq!(score.value(), 0);
        assert_eq!(ctx.events.last(), Some(&GameEvent::new(GameEvent::SCORE, 0.0)));
    }
}
