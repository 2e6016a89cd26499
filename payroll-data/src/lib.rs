pub mod policy_loader;
pub mod profile_loader;

pub use policy_loader::{PolicyLoadError, PolicyLoader};
pub use profile_loader::{ProfileLoadError, ProfileLoader};
