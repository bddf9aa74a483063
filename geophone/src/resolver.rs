//! Longest-prefix phone number resolution.
//!
//! The search starts from the full digit string of the phone number and drops
//! one trailing digit per attempt. The first exact hit is, by construction,
//! the longest prefix of the number present in the table.

use crate::prefix::PrefixTable;

/// Exact-match lookup used by the resolver.
///
/// Implemented by [`PrefixTable`]; tests wrap it to observe the queries the
/// search makes.
pub trait PrefixLookup {
    /// Location for `prefix`, if it is present as an exact key.
    fn lookup(&self, prefix: &str) -> Option<&str>;
}

impl PrefixLookup for PrefixTable {
    fn lookup(&self, prefix: &str) -> Option<&str> {
        self.get(prefix)
    }
}

/// A successful resolution: the matching key and its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    /// Longest table prefix of the normalized number
    pub prefix: String,
    pub location: &'t str,
}

/// Strip every character that is not an ASCII digit, preserving order.
///
/// # Examples
///
/// ```
/// use geophone::resolver::normalize;
///
/// assert_eq!(normalize("+1 (408) 996-1010"), "14089961010");
/// assert_eq!(normalize("abc"), "");
/// ```
pub fn normalize(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Location of the longest table prefix of `phone`, or `None`.
///
/// Non-digit characters in `phone` are ignored. Input without digits never
/// queries the table.
pub fn find<'t, T>(table: &'t T, phone: &str) -> Option<&'t str>
where
    T: PrefixLookup + ?Sized,
{
    let digits = normalize(phone);
    search(table, &digits).map(|(_, location)| location)
}

/// Like [`find`], but also reports which prefix matched.
pub fn find_match<'t, T>(table: &'t T, phone: &str) -> Option<Match<'t>>
where
    T: PrefixLookup + ?Sized,
{
    let digits = normalize(phone);
    search(table, &digits).map(|(prefix, location)| Match {
        prefix: prefix.to_string(),
        location,
    })
}

/// `digits` must be `normalize` output.
fn search<'t, 'd, T>(table: &'t T, digits: &'d str) -> Option<(&'d str, &'t str)>
where
    T: PrefixLookup + ?Sized,
{
    let mut candidate = digits;
    // Digits are ASCII, so slicing off one byte removes one digit.
    while !candidate.is_empty() {
        if let Some(location) = table.lookup(candidate) {
            return Some((candidate, location));
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    None
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::prefix::{Prefix, PrefixRecord};
    use proptest::prelude::*;
    use std::cell::RefCell;

    /// Wraps a table and records every key the search asks for.
    struct Recording<'a> {
        table: &'a PrefixTable,
        queries: RefCell<Vec<String>>,
    }

    impl PrefixLookup for Recording<'_> {
        fn lookup(&self, prefix: &str) -> Option<&str> {
            self.queries.borrow_mut().push(prefix.to_string());
            self.table.get(prefix)
        }
    }

    fn arb_table() -> impl Strategy<Value = PrefixTable> {
        prop::collection::vec(("[0-9]{1,6}", "[A-Za-z ]{1,12}"), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(p, l)| PrefixRecord::new(Prefix::parse(&p).unwrap(), l))
                .collect::<PrefixTable>()
        })
    }

    /// Reference answer: scan every key and keep the longest prefix of `digits`.
    fn brute_force<'t>(table: &'t PrefixTable, digits: &str) -> Option<&'t str> {
        table
            .iter()
            .filter(|(p, _)| digits.starts_with(p.as_str()))
            .max_by_key(|(p, _)| p.len())
            .map(|(_, l)| l)
    }

    proptest! {
        /// The shrinking search agrees with an exhaustive scan
        #[test]
        fn matches_exhaustive_scan(t in arb_table(), phone in "[0-9 +()-]{0,16}") {
            let digits = normalize(&phone);
            prop_assert_eq!(find(&t, &phone), brute_force(&t, &digits));
        }

        /// Never more than len(digits) + 1 queries, never an empty key, each one shorter
        #[test]
        fn search_shrinks_and_terminates(t in arb_table(), phone in "\\PC{0,24}") {
            let rec = Recording { table: &t, queries: RefCell::new(Vec::new()) };
            let digits = normalize(&phone);
            let _ = find(&rec, &phone);

            let queries = rec.queries.into_inner();
            prop_assert!(queries.len() <= digits.len() + 1);
            prop_assert!(queries.iter().all(|q| !q.is_empty()));
            for pair in queries.windows(2) {
                prop_assert_eq!(pair[1].len() + 1, pair[0].len());
            }
            if let Some(first) = queries.first() {
                prop_assert_eq!(first, &digits);
            }
        }

        /// find_match agrees with find on any input, Unicode included
        #[test]
        fn find_match_agrees_with_find(t in arb_table(), phone in "\\PC{0,24}") {
            let m = find_match(&t, &phone);
            prop_assert_eq!(m.as_ref().map(|m| m.location), find(&t, &phone));
            if let Some(m) = m {
                prop_assert!(normalize(&phone).starts_with(&m.prefix));
            }
        }

        /// Normalization keeps exactly the ASCII digits, in order
        #[test]
        fn normalize_keeps_digits(phone in "\\PC{0,32}") {
            let expected: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
            let digits = normalize(&phone);
            prop_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
            prop_assert_eq!(digits, expected);
        }

        /// Punctuation around a number never changes the answer
        #[test]
        fn formatting_is_ignored(t in arb_table(), digits in "[0-9]{1,12}") {
            let formatted: String = digits
                .chars()
                .flat_map(|c| [c, '-'])
                .collect();
            let formatted = format!("+({formatted})");
            prop_assert_eq!(find(&t, &formatted), find(&t, &digits));
        }
    }
}
