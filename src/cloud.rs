// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Structured point cloud representation and error handling.

use crate::fields::PointFieldType;
use std::fmt;

/// In-memory point cloud with optional per-point color.
///
/// Positions are full-precision XYZ triples; colors, when present, are
/// normalized RGB triples in `[0.0, 1.0]` index-aligned with positions.
/// If `colors` is `Some`, its length must equal `positions.len()` — the
/// encoder rejects clouds that violate this.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<[f64; 3]>,
    pub colors: Option<Vec<[f64; 3]>>,
}

impl PointCloud {
    /// Create an empty cloud with no colors.
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            colors: None,
        }
    }

    /// Get the current number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check whether per-point colors are present.
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }
}

/// Common error type for conversion operations.
///
/// Every variant is a malformed-input condition detected before any
/// output is built; conversions never return partial results.
#[derive(Debug)]
pub enum Error {
    /// A required field is absent from the descriptor list.
    MissingField(&'static str),
    /// A field is present but declared with the wrong datatype.
    FieldType {
        name: String,
        expected: PointFieldType,
        found: u8,
    },
    /// Color count does not match position count.
    LengthMismatch { positions: usize, colors: usize },
    /// Data buffer shorter than `point_step * width * height`.
    TruncatedData { expected: usize, actual: usize },
    /// A field extends past the declared record stride.
    FieldOutOfBounds {
        name: String,
        offset: u32,
        point_step: u32,
    },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingField(name) => write!(f, "missing required field: {}", name),
            Error::FieldType {
                name,
                expected,
                found,
            } => write!(
                f,
                "field {} has datatype {} but {:?} is required",
                name, found, expected
            ),
            Error::LengthMismatch { positions, colors } => write!(
                f,
                "color count {} does not match position count {}",
                colors, positions
            ),
            Error::TruncatedData { expected, actual } => write!(
                f,
                "data buffer holds {} bytes but the layout requires {}",
                actual, expected
            ),
            Error::FieldOutOfBounds {
                name,
                offset,
                point_step,
            } => write!(
                f,
                "field {} at offset {} extends past point_step {}",
                name, offset, point_step
            ),
        }
    }
}
