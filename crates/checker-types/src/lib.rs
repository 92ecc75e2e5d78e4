pub mod errors;
pub mod findings;
pub mod network;
pub mod reference;

pub use errors::*;
pub use findings::*;
pub use network::*;
pub use reference::*;
