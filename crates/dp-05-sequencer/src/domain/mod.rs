pub mod entities;
pub mod errors;
pub mod runtime;
pub mod transaction;

pub use entities::*;
pub use errors::*;
pub use runtime::*;
pub use transaction::*;
