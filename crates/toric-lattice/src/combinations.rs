//! Lazy enumeration of fixed-size subsets.

/// Iterator over all `k`-element sub-sequences of a slice.
///
/// Subsets keep the relative order of the input and come out in
/// lexicographic order of their chosen indices, first index slowest.
/// Cloning the iterator before it is consumed gives an independent
/// restart of the same sequence.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    First,
    Running,
    Done,
}

/// All `k`-element subsets of `items`.
///
/// `k == 0` yields a single empty subset. `k > items.len()` yields nothing.
pub fn combinations<T>(k: usize, items: &[T]) -> Combinations<'_, T> {
    let state = if k > items.len() {
        State::Done
    } else {
        State::First
    };
    Combinations {
        items,
        indices: (0..k).collect(),
        state,
    }
}

impl<T> Combinations<'_, T> {
    /// Move `indices` to the next subset. Returns false when exhausted.
    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let k = self.indices.len();
        // Rightmost position that can still move right.
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[pos] += 1;
        for i in pos + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }

    /// Indices of the subset most recently yielded.
    pub fn current_indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => return None,
            State::First => self.state = State::Running,
            State::Running => {
                if !self.advance() {
                    self.state = State::Done;
                    return None;
                }
            }
        }
        Some(self.indices.iter().map(|&i| &self.items[i]).collect())
    }
}

/// `n` choose `k`, saturating at `u128::MAX`.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by i + 1.
        result = match result.checked_mul((n - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    result
}
