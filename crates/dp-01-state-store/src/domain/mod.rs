pub mod entities;
pub mod errors;
pub mod merkle_map;
pub mod state_map;
pub mod witness;

pub use entities::*;
pub use errors::*;
pub use merkle_map::*;
pub use state_map::*;
pub use witness::*;
