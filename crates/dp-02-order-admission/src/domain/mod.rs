pub mod circuit;
pub mod entities;
pub mod errors;
pub mod order;

pub use circuit::*;
pub use entities::*;
pub use errors::*;
pub use order::*;
