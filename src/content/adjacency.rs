//! Previous/next navigation.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjacent<T> {
    pub prev: Option<T>,
    pub next: Option<T>,
}

impl<T> Default for Adjacent<T> {
    fn default() -> Self {
        Self {
            prev: None,
            next: None,
        }
    }
}

impl<T> Adjacent<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Adjacent<U> {
        Adjacent {
            prev: self.prev.map(&mut f),
            next: self.next.map(&mut f),
        }
    }
}

/// Greatest order below `order` and least order above it. Input need not
/// be sorted; items without an order never participate.
pub fn adjacent_by_order<'a, T>(
    items: &'a [T],
    order: Option<i64>,
    order_of: impl Fn(&T) -> Option<i64>,
) -> Adjacent<&'a T> {
    let Some(order) = order else {
        return Adjacent::default();
    };

    let mut prev: Option<(i64, &T)> = None;
    let mut next: Option<(i64, &T)> = None;

    for item in items {
        let Some(o) = order_of(item) else { continue };
        if o < order && prev.map_or(true, |(best, _)| o > best) {
            prev = Some((o, item));
        }
        if o > order && next.map_or(true, |(best, _)| o < best) {
            next = Some((o, item));
        }
    }

    Adjacent {
        prev: prev.map(|(_, item)| item),
        next: next.map(|(_, item)| item),
    }
}

/// Neighbours in a list whose position is the display order.
pub fn adjacent_by_index<T>(items: &[T], index: usize) -> Adjacent<&T> {
    if index >= items.len() {
        return Adjacent::default();
    }
    Adjacent {
        prev: index.checked_sub(1).and_then(|i| items.get(i)),
        next: items.get(index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        order: Option<i64>,
    }

    fn item(name: &'static str, order: i64) -> Item {
        Item {
            name,
            order: Some(order),
        }
    }

    fn names(adj: Adjacent<&Item>) -> (Option<&str>, Option<&str>) {
        (adj.prev.map(|i| i.name), adj.next.map(|i| i.name))
    }

    #[test]
    fn test_orders_one_through_four() {
        let items = vec![item("c", 3), item("a", 1), item("d", 4), item("b", 2)];
        let by = |o| names(adjacent_by_order(&items, Some(o), |i| i.order));

        assert_eq!(by(1), (None, Some("b")));
        assert_eq!(by(4), (Some("c"), None));
        assert_eq!(by(2), (Some("a"), Some("c")));
    }

    #[test]
    fn test_gaps_in_order_are_skipped() {
        let items = vec![item("a", 10), item("b", 40), item("c", 25)];
        let adj = adjacent_by_order(&items, Some(25), |i| i.order);
        assert_eq!(names(adj), (Some("a"), Some("b")));
    }

    #[test]
    fn test_missing_order_degrades_to_nothing() {
        let items = vec![
            item("a", 1),
            Item {
                name: "x",
                order: None,
            },
        ];
        assert_eq!(names(adjacent_by_order(&items, None, |i| i.order)), (None, None));

        let adj = adjacent_by_order(&items, Some(2), |i| i.order);
        assert_eq!(names(adj), (Some("a"), None));
    }

    #[test]
    fn test_index_neighbours() {
        let items = vec!["a", "b", "c"];
        let first = adjacent_by_index(&items, 0);
        assert_eq!((first.prev, first.next), (None, Some(&"b")));

        let last = adjacent_by_index(&items, 2);
        assert_eq!((last.prev, last.next), (Some(&"b"), None));

        let out_of_range = adjacent_by_index(&items, 7);
        assert_eq!(out_of_range, Adjacent::default());
    }
}
