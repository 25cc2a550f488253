pub mod assets;
pub mod engine;
pub mod layout;
pub mod scheduler;

pub use assets::*;
pub use engine::*;
pub use layout::*;
pub use scheduler::*;
