//! Offline phone number geocoding.
//!
//! Resolves a phone number to an approximate location by longest-prefix
//! match against libphonenumber's geocoding table.
//!
//! ```
//! use geophone::prefix::{Prefix, PrefixRecord, PrefixTable};
//! use geophone::resolver::find;
//!
//! let table = PrefixTable::from_records([
//!     PrefixRecord::new(Prefix::parse("1408").unwrap(), "California"),
//!     PrefixRecord::new(Prefix::parse("14089").unwrap(), "San Jose, CA"),
//! ]);
//!
//! assert_eq!(find(&table, "+1 (408) 996-1010"), Some("San Jose, CA"));
//! assert_eq!(find(&table, "+44 20 7946 0000"), None);
//! ```

pub mod config;
pub mod directory;
pub mod prefix;
pub mod resolver;
pub mod source;
pub mod web;

#[cfg(test)]
mod test_support;
