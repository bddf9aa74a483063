//! Prefix types and the in-memory prefix table.

mod code;
mod table;

pub use code::{InvalidPrefix, Prefix};
pub use table::{PrefixRecord, PrefixTable};
