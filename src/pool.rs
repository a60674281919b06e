//! # Pool
//! Owned working set that items are drawn from without replacement.
//!
//! Every extraction during assembly goes through [`Pool::take_matching`], so
//! an item can leave the pool at most once and duplicates across the feed are
//! impossible by construction.

#[derive(Debug, Clone, PartialEq)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Pool<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> Pool<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn find<P>(&self, pred: P) -> Option<&T>
    where
        P: FnMut(&&T) -> bool,
    {
        self.items.iter().find(pred)
    }

    /// Remove and return up to `limit` items matching `pred`, scanning in pool
    /// order. Taken items keep their relative order, and so do the ones left
    /// behind. The pool is rebuilt in a single pass.
    pub fn take_matching<P>(&mut self, mut pred: P, limit: usize) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        if limit == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let mut taken = Vec::with_capacity(limit.min(self.items.len()));
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if taken.len() < limit && pred(&item) {
                taken.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        taken
    }

    /// Remove up to `n` items from the front regardless of content.
    pub fn take_front(&mut self, n: usize) -> Vec<T> {
        let n = n.min(self.items.len());
        self.items.drain(..n).collect()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_in_order_and_preserves_rest() {
        let mut p = Pool::from(vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let even = p.take_matching(|x| x % 2 == 0, 3);
        assert_eq!(even, vec![2, 4, 6]);
        assert_eq!(p.into_vec(), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn fewer_matches_than_limit() {
        let mut p = Pool::from(vec!["a", "b", "c"]);
        assert_eq!(p.take_matching(|s| *s == "b", 10), vec!["b"]);
        assert_eq!(p.len(), 2);
        assert!(p.take_matching(|s| *s == "zz", 10).is_empty());
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn zero_limit_takes_nothing() {
        let mut p = Pool::from(vec![1, 2]);
        assert!(p.take_matching(|_| true, 0).is_empty());
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn take_front_clamps() {
        let mut p = Pool::from(vec![1, 2]);
        assert_eq!(p.take_front(3), vec![1, 2]);
        assert!(p.is_empty());
        assert!(p.take_front(3).is_empty());
    }
}
