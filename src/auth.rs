//! Auth-domain identifiers, secrets, and the token bundle supplied by the host framework.

pub mod id;
pub mod info;
pub mod secret;

pub use id::*;
pub use info::*;
pub use secret::*;
