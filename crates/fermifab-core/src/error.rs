//! Error types for fermifab-core

use block_sparse::BlockSparseError;
use slater_enum::EnumerationError;
use thiserror::Error;

/// Errors raised by fermionic state and operator computations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FermiError {
    /// Particle count exceeds the number of orbitals
    #[error("Invalid sector: {n} particles in {orbs} orbitals")]
    InvalidSector { orbs: usize, n: usize },

    /// Supplied data does not have the size implied by the sectors
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Operands live on different sectors
    #[error("Type mismatch: {lhs} vs {rhs}")]
    TypeMismatch { lhs: String, rhs: String },

    /// Operator does not have the required particle numbers
    #[error("Invalid operator: {message}")]
    InvalidOperator { message: String },

    /// Scalar multiplier or divisor is not usable
    #[error("Invalid scalar: {message}")]
    InvalidScalar { message: String },

    /// Particle numbers or inner sectors do not line up
    #[error("Dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// Composite (multi-species) objects passed to a single-species engine
    #[error("Unsupported configuration: {message}")]
    UnsupportedConfiguration { message: String },

    /// Sector dimension does not fit in usize
    #[error("Sector dimension C({orbs}, {n}) does not fit in usize")]
    DimensionOverflow { orbs: usize, n: usize },

    /// Storage for an enumeration could not be reserved
    #[error("Allocation of {elements} elements failed")]
    AllocationFailed { elements: usize },

    /// Orbital index out of range
    #[error("Invalid orbital {orbital}: only {orbs} orbitals")]
    InvalidOrbital { orbital: usize, orbs: usize },

    /// Dense eigensolver failure
    #[error("Decomposition failed: {0}")]
    Decomposition(String),
}

/// Result type for fermifab-core operations
pub type Result<T> = std::result::Result<T, FermiError>;

impl From<EnumerationError> for FermiError {
    fn from(err: EnumerationError) -> Self {
        match err {
            EnumerationError::InvalidSector { orbs, n } => FermiError::InvalidSector { orbs, n },
            EnumerationError::DimensionOverflow { orbs, n } => {
                FermiError::DimensionOverflow { orbs, n }
            }
            EnumerationError::AllocationFailed { elements } => {
                FermiError::AllocationFailed { elements }
            }
            EnumerationError::ShapeMismatch { expected, actual } => FermiError::ShapeMismatch {
                expected: vec![expected],
                actual: vec![actual],
            },
            err @ EnumerationError::IncompatibleSectors { .. } => FermiError::DimensionMismatch {
                message: err.to_string(),
            },
            err @ (EnumerationError::TooManyOrbitals { .. }
            | EnumerationError::UnsupportedConfiguration { .. }
            | EnumerationError::InconsistentConfiguration { .. }) => {
                FermiError::UnsupportedConfiguration {
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<BlockSparseError> for FermiError {
    fn from(err: BlockSparseError) -> Self {
        match err {
            BlockSparseError::BlockIndexOutOfBounds { index, shape }
            | BlockSparseError::EntryOutOfBounds { index, shape } => FermiError::ShapeMismatch {
                expected: shape,
                actual: index,
            },
            BlockSparseError::LengthMismatch { expected, actual } => FermiError::ShapeMismatch {
                expected: vec![expected],
                actual: vec![actual],
            },
        }
    }
}
