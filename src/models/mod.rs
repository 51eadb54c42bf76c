pub mod dialogue;
pub mod stage;
pub mod subtitle;

pub use dialogue::*;
pub use stage::*;
pub use subtitle::*;
