//! Travel cost and time between real locations.
//!
//! The `TravelMatrix` trait abstracts the source of pairwise travel data for
//! real locations. Synthetic overnight nodes never reach a provider: the
//! schedule layer maps them back onto the depot before asking.
//!
//! [`DenseMatrix`] stores explicit square tables, either supplied directly
//! in seconds or derived from coordinates at a constant travel speed.

mod dense;
mod error;
mod geodesic;
mod provider;

pub use dense::DenseMatrix;
pub use error::MatrixError;
pub use geodesic::haversine_metres;
pub use provider::TravelMatrix;
