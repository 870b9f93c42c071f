//! Cyclic cursor over a recorded list.

/// Hands out items of a slice in order, wrapping back to the start.
///
/// The cursor counts every item handed out, so the i-th call returns
/// `items[i % items.len()]`.
#[derive(Debug)]
pub struct RoundRobin<'a, T> {
    items: &'a [T],
    cursor: usize,
}

impl<'a, T> RoundRobin<'a, T> {
    /// Returns `None` for an empty slice, there is nothing to cycle over.
    pub fn new(items: &'a [T]) -> Option<RoundRobin<'a, T>> {
        if items.is_empty() {
            None
        } else {
            Some(RoundRobin { items, cursor: 0 })
        }
    }

    pub fn next_item(&mut self) -> &'a T {
        let item = &self.items[self.cursor % self.items.len()];
        self.cursor += 1;
        item
    }

    /// Total items handed out so far.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<'a, T> Iterator for RoundRobin<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        Some(self.next_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_cursor() {
        let empty: [u8; 0] = [];
        assert!(RoundRobin::new(&empty).is_none());
    }

    #[test]
    fn test_wraps_modulo_len() {
        let items = ["a", "b", "c"];
        let mut rr = RoundRobin::new(&items).unwrap();
        let got: Vec<&str> = (0..7).map(|_| *rr.next_item()).collect();
        assert_eq!(got, vec!["a", "b", "c", "a", "b", "c", "a"]);
        assert_eq!(rr.position(), 7);
    }

    #[test]
    fn test_ith_item_is_index_i_mod_n_across_batches() {
        let items: Vec<u32> = (0..5).collect();
        let mut rr = RoundRobin::new(&items).unwrap();
        let mut i = 0usize;
        // uneven batches, like source/destination member lists
        for batch in [3, 4, 0, 2, 6] {
            for v in rr.by_ref().take(batch) {
                assert_eq!(*v as usize, i % items.len());
                i += 1;
            }
        }
        assert_eq!(rr.position(), i);
    }
}
