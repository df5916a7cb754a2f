//! Wavefunction module - hydrogen-like orbitals and the spherical frame they are evaluated in.

mod traits;
mod spherical;
mod hydrogen;

pub use traits::Orbital;
pub use spherical::SphericalCoord;
pub use hydrogen::{Hydrogen1s, Hydrogen2px};
