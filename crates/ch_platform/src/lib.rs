pub mod events;
pub mod host;

pub use events::*;
pub use host::*;
