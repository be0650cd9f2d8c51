pub mod analysis;
pub mod severity;
pub mod upload;

pub use analysis::*;
pub use severity::*;
pub use upload::*;
