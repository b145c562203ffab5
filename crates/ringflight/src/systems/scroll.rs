/// A horizontally looping backdrop strip (sky art, ground).
/// The host draws two copies side by side, shifted left by `offset`.
#[derive(Debug, Clone)]
pub struct ScrollLayer {
    width: f32,
    period: f32,
    offset: f32,
}

impl ScrollLayer {
    /// `period` is the number of seconds to scroll one full `width`.
    pub fn new(width: f32, period: f32) -> Self {
        Self {
            width,
            period,
            offset: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.width > 0.0 && self.period > 0.0 {
            self.offset = (self.offset + dt * self.width / self.period).rem_euclid(self.width);
        }
        self.offset
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_period_wraps_to_start() {
        let mut layer = ScrollLayer::new(1000.0, 8.0);
        assert_eq!(layer.advance(4.0), 500.0);
        let wrapped = layer.advance(4.0);
        assert!(wrapped < 1e-3 || (1000.0 - wrapped) < 1e-3, "offset={wrapped}");
    }

    #[test]
    fn offset_stays_in_width() {
        let mut layer = ScrollLayer::new(640.0, 20.0);
        for _ in 0..5000 {
            let o = layer.advance(1.0 / 60.0);
            assert!((0.0..640.0).contains(&o));
        }
    }
}
