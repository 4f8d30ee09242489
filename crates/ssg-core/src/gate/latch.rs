//! Two-stage storage element shared by the gate units.

/// A value and its sampled copy.
///
/// `d` is the combinational side, recomputed during one phase; `q` is the
/// copy taken on the other phase. Keeping both apart reproduces the
/// half-cycle propagation delay between adjacent logic stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch<T> {
    /// Combinational input
    pub d: T,
    /// Sampled output
    pub q: T,
}

impl<T: Copy> Latch<T> {
    /// Copy the input side to the output side.
    #[inline]
    pub fn sample(&mut self) {
        self.q = self.d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_copies_input() {
        let mut latch = Latch { d: 5u8, q: 0 };
        assert_eq!(latch.q, 0);
        latch.sample();
        assert_eq!(latch.q, 5);
        latch.d = 9;
        assert_eq!(latch.q, 5);
    }
}
