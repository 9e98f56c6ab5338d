pub mod clock;
pub use clock::*;

pub mod custody;
pub use custody::*;

pub mod program_log;
pub use program_log::*;

pub mod token;
pub use token::*;
