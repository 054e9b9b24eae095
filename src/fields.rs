// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Point field catalog and color-encoding classification.
//!
//! This module defines the two field layouts the encoder emits and the
//! logic the decoder uses to recognize which color representation a
//! message carries.
//!
//! # Layouts
//!
//! ## 12-byte format (xyz)
//! ```text
//! ┌───────┬───────┬───────┐
//! │ x:f32 │ y:f32 │ z:f32 │
//! │ 4B    │ 4B    │ 4B    │
//! └───────┴───────┴───────┘
//! ```
//!
//! ## 16-byte format (xyz + packed rgb)
//! ```text
//! ┌───────┬───────┬───────┬─────────┐
//! │ x:f32 │ y:f32 │ z:f32 │ rgb:f32 │
//! │ 4B    │ 4B    │ 4B    │ 4B      │
//! └───────┴───────┴───────┴─────────┘
//! ```
//!
//! The `rgb` field is a 32-bit float whose bit pattern packs four bytes
//! `[0, R, G, B]` high-to-low; see [`crate::color`].

use crate::msg::PointField;

/// Record stride of the position-only layout.
pub const XYZ_STRIDE: u32 = 12;

/// Record stride of the position + packed-RGB layout.
pub const XYZRGB_STRIDE: u32 = 16;

/// Point field data types for PointCloud2 messages.
///
/// These values correspond to the ROS sensor_msgs/PointField datatype
/// field. All variants are defined for completeness, even if not all are
/// currently used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[allow(dead_code)]
pub enum PointFieldType {
    INT8 = 1,
    UINT8 = 2,
    INT16 = 3,
    UINT16 = 4,
    INT32 = 5,
    UINT32 = 6,
    FLOAT32 = 7,
    FLOAT64 = 8,
}

impl PointFieldType {
    /// Size in bytes of one scalar of this type.
    pub fn size(self) -> usize {
        match self {
            PointFieldType::INT8 | PointFieldType::UINT8 => 1,
            PointFieldType::INT16 | PointFieldType::UINT16 => 2,
            PointFieldType::INT32 | PointFieldType::UINT32 | PointFieldType::FLOAT32 => 4,
            PointFieldType::FLOAT64 => 8,
        }
    }
}

/// Build the position-only point fields (12-byte stride).
///
/// Returns a vector of PointField definitions for:
/// - x: FLOAT32 at offset 0
/// - y: FLOAT32 at offset 4
/// - z: FLOAT32 at offset 8
pub fn xyz_fields() -> Vec<PointField> {
    vec![
        PointField {
            name: String::from("x"),
            offset: 0,
            datatype: PointFieldType::FLOAT32 as u8,
            count: 1,
        },
        PointField {
            name: String::from("y"),
            offset: 4,
            datatype: PointFieldType::FLOAT32 as u8,
            count: 1,
        },
        PointField {
            name: String::from("z"),
            offset: 8,
            datatype: PointFieldType::FLOAT32 as u8,
            count: 1,
        },
    ]
}

/// Build the position + packed-RGB point fields (16-byte stride).
///
/// Extends [`xyz_fields`] with:
/// - rgb: FLOAT32 at offset 12 (bit-packed `[0, R, G, B]`)
pub fn xyz_rgb_fields() -> Vec<PointField> {
    let mut fields = xyz_fields();
    fields.push(PointField {
        name: String::from("rgb"),
        offset: 12,
        datatype: PointFieldType::FLOAT32 as u8,
        count: 1,
    });
    fields
}

/// Look up a field descriptor by name.
pub fn find_field<'a>(fields: &'a [PointField], name: &str) -> Option<&'a PointField> {
    fields.iter().find(|field| field.name == name)
}

/// Color representation carried by a field descriptor list.
///
/// Classification happens once per message so the unpack loop can
/// dispatch on a plain enum instead of re-checking field names per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorEncoding {
    /// No recognized color fields.
    None,
    /// Separate `r`, `g`, `b` fields, one UINT8 each.
    SeparateBytes,
    /// Single `rgb` FLOAT32 field with bit-packed `[0, R, G, B]`.
    PackedFloatRgb,
    /// Single `rgba` UINT32 field packing `R<<16 | G<<8 | B`, alpha in
    /// the top byte.
    PackedU32Rgba,
}

/// Classify the color encoding of a field descriptor list.
///
/// Rules are checked in a fixed priority order and the first match wins:
/// separate bytes, then packed-float `rgb`, then packed-u32 `rgba`. A
/// name match with the wrong declared datatype does not select that
/// encoding and falls through to the next rule.
pub fn color_encoding(fields: &[PointField]) -> ColorEncoding {
    let typed = |name: &str, datatype: PointFieldType| {
        find_field(fields, name).is_some_and(|field| field.datatype == datatype as u8)
    };

    if typed("r", PointFieldType::UINT8)
        && typed("g", PointFieldType::UINT8)
        && typed("b", PointFieldType::UINT8)
    {
        ColorEncoding::SeparateBytes
    } else if typed("rgb", PointFieldType::FLOAT32) {
        ColorEncoding::PackedFloatRgb
    } else if typed("rgba", PointFieldType::UINT32) {
        ColorEncoding::PackedU32Rgba
    } else {
        ColorEncoding::None
    }
}
