//! N-ary cartesian product over list lengths.
//!
//! Yields every index combination for a sequence of dimension sizes, last
//! dimension varying fastest. Arity is whatever the caller passes in.

/// Iterator over all index tuples for the given dimension sizes
#[derive(Debug, Clone)]
pub struct CartesianProduct {
    sizes: Vec<usize>,
    current: Vec<usize>,
    remaining: usize,
}

impl CartesianProduct {
    pub fn new(sizes: Vec<usize>) -> Self {
        let remaining = sizes.iter().product();
        CartesianProduct {
            current: vec![0; sizes.len()],
            sizes,
            remaining,
        }
    }

    /// Total number of combinations (zero if any dimension is empty)
    pub fn total(&self) -> usize {
        self.sizes.iter().product()
    }

    /// Step the odometer; last dimension rolls first
    fn advance(&mut self) {
        for (index, size) in self.current.iter_mut().zip(&self.sizes).rev() {
            *index += 1;
            if *index < *size {
                return;
            }
            *index = 0;
        }
    }
}

impl Iterator for CartesianProduct {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.current.clone();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CartesianProduct {}
