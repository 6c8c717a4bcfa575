mod caller_auth;
mod network_scope;
mod path_guard;

pub use caller_auth::*;
pub use network_scope::*;
pub use path_guard::*;
