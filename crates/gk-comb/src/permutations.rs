/// Distinct orderings of a multiset, in lexicographic order.
///
/// Repeated values never produce repeated orderings.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Option<Vec<usize>>,
}

impl Permutations {
    /// Enumerates the distinct orderings of `multiset`.
    pub fn new(multiset: &[usize]) -> Self {
        let mut first = multiset.to_vec();
        first.sort_unstable();
        Self {
            current: Some(first),
        }
    }
}

fn next_permutation(values: &mut [usize]) -> bool {
    let n = values.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && values[i - 1] >= values[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while values[j] <= values[i - 1] {
        j -= 1;
    }
    values.swap(i - 1, j);
    values[i..].reverse();
    true
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let mut following = current.clone();
        if next_permutation(&mut following) {
            self.current = Some(following);
        }
        Some(current)
    }
}
