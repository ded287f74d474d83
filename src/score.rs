/// Running score: the sum of every merged tile value since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score(u64);

impl Score {
    pub fn new() -> Self { Score(0) }

    /// Start from a previously saved total.
    pub fn restored(total: u64) -> Self { Score(total) }

    #[inline]
    pub fn value(self) -> u64 { self.0 }

    /// Add the points from a merge. The score never decreases.
    pub fn add(&mut self, points: u64) {
        self.0 = self.0.saturating_add(points);
    }

    pub fn reset(&mut self) { self.0 = 0; }
}
