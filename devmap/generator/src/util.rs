// Licensed under the Apache-2.0 license

//! Iteration and text helpers shared by the emitters.

use std::iter::Peekable;

/// Iterator adapter that pairs every item with whether more items follow.
///
/// # Examples
/// ```
/// use devmap_generator::util::Lookahead;
/// let items: Vec<_> = ["a", "b"].into_iter().lookahead().collect();
/// assert_eq!(items, [("a", true), ("b", false)]);
/// ```
pub struct WithLookahead<I: Iterator> {
    inner: Peekable<I>,
}

impl<I: Iterator> Iterator for WithLookahead<I> {
    type Item = (I::Item, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        let has_more = self.inner.peek().is_some();
        Some((item, has_more))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub trait Lookahead: Iterator + Sized {
    fn lookahead(self) -> WithLookahead<Self> {
        WithLookahead {
            inner: self.peekable(),
        }
    }
}

impl<I: Iterator> Lookahead for I {}

/// Pads `s` with spaces to exactly `width` characters, truncating if longer.
///
/// # Examples
/// ```
/// use devmap_generator::util::pad_to_width;
/// assert_eq!(pad_to_width("USART_1", 10), "USART_1   ");
/// assert_eq!(pad_to_width("ABCDEFGH", 4), "ABCD");
/// ```
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut result: String = s.chars().take(width).collect();
    let len = result.chars().count();
    result.extend(std::iter::repeat(' ').take(width - len));
    result
}
