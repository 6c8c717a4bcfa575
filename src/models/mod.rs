mod organization;
mod principal;

pub use organization::*;
pub use principal::*;
