pub mod codes;
pub mod enums;

pub use codes::*;
pub use enums::*;
