//! Error types for slater-enum

use thiserror::Error;

/// Errors that can occur while enumerating Slater-determinant matrix elements
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    /// Particle count exceeds the number of orbitals
    #[error("Invalid sector: {n} particles in {orbs} orbitals")]
    InvalidSector { orbs: usize, n: usize },

    /// The created particle count `n2 - n1 + p1` is negative
    #[error("Incompatible sectors: cannot annihilate {p1} of {n1} particles and end with {n2}")]
    IncompatibleSectors { p1: usize, n1: usize, n2: usize },

    /// Bit strings are 64 bits wide
    #[error("Too many orbitals: {orbs} (at most {max} supported)")]
    TooManyOrbitals { orbs: usize, max: usize },

    /// Sector dimension does not fit in usize
    #[error("Sector dimension C({orbs}, {n}) does not fit in usize")]
    DimensionOverflow { orbs: usize, n: usize },

    /// Storage for an enumeration could not be reserved
    #[error("Allocation of {elements} elements failed")]
    AllocationFailed { elements: usize },

    /// Multi-species kernels are not implemented
    #[error("Unsupported configuration: {species} species (only single-species kernels are implemented)")]
    UnsupportedConfiguration { species: usize },

    /// Per-species lists of a configuration have different lengths or are empty
    #[error("Inconsistent configuration: {message}")]
    InconsistentConfiguration { message: String },

    /// Input matrix has the wrong number of entries
    #[error("Shape mismatch: expected {expected} entries, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Result type for enumeration operations
pub type Result<T> = std::result::Result<T, EnumerationError>;
