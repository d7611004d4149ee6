/// All `dims`-tuples of nonnegative integers summing to exactly `total`.
///
/// Starts at `[total, 0, ..., 0]` and ends at `[0, ..., 0, total]`.
#[derive(Debug, Clone)]
pub struct LatticePoints {
    current: Option<Vec<usize>>,
}

impl LatticePoints {
    /// Enumerates the lattice points of the simplex slice `|q| = total`.
    pub fn new(dims: usize, total: usize) -> Self {
        let current = match dims {
            0 if total == 0 => Some(Vec::new()),
            0 => None,
            _ => {
                let mut first = vec![0; dims];
                first[0] = total;
                Some(first)
            }
        };
        Self { current }
    }
}

fn advance(q: &mut [usize]) -> bool {
    let d = q.len();
    if d < 2 {
        return false;
    }
    let Some(i) = (0..d - 1).rev().find(|&i| q[i] > 0) else {
        return false;
    };
    let last = q[d - 1];
    q[d - 1] = 0;
    q[i] -= 1;
    q[i + 1] = last + 1;
    true
}

impl Iterator for LatticePoints {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let mut following = current.clone();
        if advance(&mut following) {
            self.current = Some(following);
        }
        Some(current)
    }
}
