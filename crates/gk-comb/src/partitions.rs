/// Partitions of `total` into exactly `parts` nonnegative, non-increasing parts.
///
/// Emitted in reverse lexicographic order starting from `[total, 0, ..., 0]`.
#[derive(Debug, Clone)]
pub struct Partitions {
    current: Option<Vec<usize>>,
}

impl Partitions {
    /// Enumerates the `parts`-part partitions of `total`.
    pub fn new(parts: usize, total: usize) -> Self {
        let current = match parts {
            0 if total == 0 => Some(Vec::new()),
            0 => None,
            _ => {
                let mut first = vec![0; parts];
                first[0] = total;
                Some(first)
            }
        };
        Self { current }
    }
}

fn advance(p: &mut [usize]) -> bool {
    let d = p.len();
    let mut tail: usize = 0;
    for i in (0..d.saturating_sub(1)).rev() {
        tail += p[i + 1];
        if p[i] == 0 {
            continue;
        }
        let cap = p[i] - 1;
        let mut remaining = tail + 1;
        if remaining > cap * (d - 1 - i) {
            continue;
        }
        p[i] = cap;
        for slot in p.iter_mut().skip(i + 1) {
            let take = remaining.min(cap);
            *slot = take;
            remaining -= take;
        }
        return true;
    }
    false
}

impl Iterator for Partitions {
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
