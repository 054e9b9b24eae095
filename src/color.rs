// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Packed color bit manipulation.
//!
//! PCL-style clouds store color inside a single wider field rather than
//! as separate channels: either a FLOAT32 whose bit pattern packs
//! `[0, R, G, B]` high-to-low, or a UINT32 packing `A<<24 | R<<16 |
//! G<<8 | B`. The float variant is a pure reinterpretation of the bits;
//! converting the integer value to a float numerically would corrupt the
//! channels, so everything here goes through `f32::from_bits` /
//! `f32::to_bits`.

/// Pack three color bytes into the low 24 bits of a FLOAT32 bit pattern.
///
/// The top byte is zero. Exact inverse of [`unpack_rgb`].
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> f32 {
    f32::from_bits((r as u32) << 16 | (g as u32) << 8 | b as u32)
}

/// Unpack the three color bytes from a packed-RGB FLOAT32.
#[inline]
pub fn unpack_rgb(rgb: f32) -> (u8, u8, u8) {
    unpack_rgba32(rgb.to_bits())
}

/// Extract R, G, B from a packed UINT32, discarding the alpha byte.
#[inline]
pub fn unpack_rgba32(v: u32) -> (u8, u8, u8) {
    (
        ((v >> 16) & 0xFF) as u8,
        ((v >> 8) & 0xFF) as u8,
        (v & 0xFF) as u8,
    )
}
