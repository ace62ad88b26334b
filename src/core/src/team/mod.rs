pub mod selector;
pub mod team;

pub use selector::*;
pub use team::*;
