//! Fixed-size pagination of ordered sequences.
//!
//! A missing or non-numeric page number means the first page; a number
//! outside `1..=num_pages` clamps to the last page. An empty sequence still
//! has one (empty) page.

use serde::{Deserialize, Serialize};

/// `?page=` query parameter, kept as text so malformed values fall back to
/// the first page instead of rejecting the request
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn number(&self) -> Option<&str> {
        self.page.as_deref()
    }
}

/// One page of an ordered sequence
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
}

impl<T> Page<T> {
    /// Same page metadata over different items
    pub fn with_items<U>(self, items: Vec<U>) -> Page<U> {
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_next: self.has_next,
            has_previous: self.has_previous,
            next_page_number: self.next_page_number,
            previous_page_number: self.previous_page_number,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn num_pages(&self, count: usize) -> usize {
        if count == 0 {
            1
        } else {
            (count + self.per_page - 1) / self.per_page
        }
    }

    /// Resolve a requested page number against `count` items
    pub fn resolve(&self, requested: Option<&str>, count: usize) -> usize {
        let last = self.num_pages(count);

        match requested.map(|raw| raw.trim().parse::<i64>()) {
            None | Some(Err(_)) => 1,
            Some(Ok(n)) if n < 1 => last,
            Some(Ok(n)) => (n as u64).min(last as u64) as usize,
        }
    }

    /// Slice `items` down to the requested page
    pub fn get_page<T>(&self, items: Vec<T>, requested: Option<&str>) -> Page<T> {
        let count = items.len();
        let num_pages = self.num_pages(count);
        let number = self.resolve(requested, count);

        let start = (number - 1) * self.per_page;
        let items: Vec<T> = items.into_iter().skip(start).take(self.per_page).collect();

        Page {
            items,
            number,
            num_pages,
            count,
            has_next: number < num_pages,
            has_previous: number > 1,
            next_page_number: (number < num_pages).then_some(number + 1),
            previous_page_number: (number > 1).then_some(number - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thirteen() -> Vec<u32> {
        (1..=13).collect()
    }

    #[test]
    fn test_thirteen_items_split_ten_and_three() {
        let paginator = Paginator::new(10);

        let first = paginator.get_page(thirteen(), Some("1"));
        assert_eq!(first.len(), 10);
        assert_eq!(first.num_pages, 2);
        assert!(first.has_next);
        assert!(!first.has_previous);

        let second = paginator.get_page(thirteen(), Some("2"));
        assert_eq!(second.items, vec![11, 12, 13]);
        assert_eq!(second.previous_page_number, Some(1));
        assert_eq!(second.next_page_number, None);
    }

    #[test]
    fn test_group_page_size() {
        let paginator = Paginator::new(12);
        assert_eq!(paginator.get_page(thirteen(), None).len(), 12);
        assert_eq!(paginator.get_page(thirteen(), Some("2")).len(), 1);
    }

    #[test]
    fn test_out_of_range_clamps_to_last_page() {
        let paginator = Paginator::new(10);

        for requested in ["3", "999", "0", "-1"] {
            let page = paginator.get_page(thirteen(), Some(requested));
            assert_eq!(page.number, 2, "page {:?}", requested);
            assert_eq!(page.len(), 3);
        }
    }

    #[test]
    fn test_missing_or_garbage_number_is_first_page() {
        let paginator = Paginator::new(10);

        assert_eq!(paginator.get_page(thirteen(), None).number, 1);
        assert_eq!(paginator.get_page(thirteen(), Some("abc")).number, 1);
        assert_eq!(paginator.get_page(thirteen(), Some("")).number, 1);
    }

    #[test]
    fn test_empty_sequence_has_one_empty_page() {
        let paginator = Paginator::new(10);
        let page = paginator.get_page(Vec::<u32>::new(), Some("5"));

        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_with_items_keeps_metadata() {
        let paginator = Paginator::new(10);
        let page = paginator.get_page(thirteen(), Some("2"));
        let labels = page.clone().with_items(vec!["a"]);

        assert_eq!(labels.number, page.number);
        assert_eq!(labels.count, 13);
        assert_eq!(labels.items, vec!["a"]);
    }
}
