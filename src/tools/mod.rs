pub mod browse;
pub mod register;
pub mod search;

pub use browse::*;
pub use register::*;
pub use search::*;
