// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry conversion
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting geometry into topology
///
/// None of them is retried: conversions are deterministic, so only a
/// different input or tolerance can change the outcome.
#[derive(Error, Debug)]
pub enum Error {
    #[error("This type of geometry is not yet supported: {0}")]
    UnsupportedGeometry(String),

    #[error("This type of curve is not yet supported: {0}")]
    UnsupportedCurve(String),

    #[error("This type of surface is not yet supported: {0}")]
    UnsupportedSurface(String),

    #[error("Degenerate curve: {0}")]
    DegenerateCurve(String),

    #[error("Degenerate boundary: {0}")]
    DegenerateBoundary(String),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Topology construction failed: {0}")]
    Topology(#[from] topobridge_topology::Error),
}
