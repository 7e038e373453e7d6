mod group;
mod state;
mod update;

pub use group::*;
pub use state::*;
pub use update::*;
