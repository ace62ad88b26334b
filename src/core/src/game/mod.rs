pub mod atbat;
pub mod bases;
pub mod engine;
pub mod result;

pub use atbat::*;
pub use bases::*;
pub use engine::*;
pub use result::*;
