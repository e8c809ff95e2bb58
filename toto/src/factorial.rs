pub trait Factorial {
    fn get(&self, n: u8) -> u128;
}

/// The largest `n` for which `n!` fits in a `u128`.
pub const MAX_N: u8 = 34;

/// Factorials of `0..=MAX_N`, computed once.
pub struct Lookup {
    entries: [u128; MAX_N as usize + 1],
}
impl Factorial for Lookup {
    #[inline]
    fn get(&self, n: u8) -> u128 {
        assert!(n <= MAX_N, "{n}! overflows");
        self.entries[n as usize]
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut entries = [1u128; MAX_N as usize + 1];
        for n in 2..entries.len() {
            entries[n] = n as u128 * entries[n - 1];
        }
        Self { entries }
    }
}
