// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Structured cloud to PointCloud2 encoding.

use crate::{
    cloud::{Error, PointCloud},
    color::pack_rgb,
    fields::{xyz_fields, xyz_rgb_fields, XYZRGB_STRIDE, XYZ_STRIDE},
    msg::{Header, PointCloud2, Time},
};

/// Quantize a normalized color channel to one byte.
///
/// Channels are contractually in `[0.0, 1.0]`; out-of-range values
/// saturate at the clamp rather than wrapping.
#[inline]
fn quantize_channel(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).floor() as u8
}

/// Encode a [`PointCloud`] into a PointCloud2 message.
///
/// Positions become three FLOAT32 columns at host byte order. When colors
/// are present each triple is quantized to bytes and bit-packed into the
/// `rgb` field, giving a 16-byte stride instead of 12. `frame_id` and
/// `stamp` are copied verbatim into the header and never influence the
/// encoding.
///
/// Returns [`Error::LengthMismatch`] when the color count differs from
/// the position count.
pub fn to_msg(cloud: &PointCloud, frame_id: &str, stamp: Time) -> Result<PointCloud2, Error> {
    let n_points = cloud.positions.len();
    if let Some(colors) = &cloud.colors {
        if colors.len() != n_points {
            return Err(Error::LengthMismatch {
                positions: n_points,
                colors: colors.len(),
            });
        }
    }

    let (fields, point_step) = match cloud.colors {
        None => (xyz_fields(), XYZ_STRIDE),
        Some(_) => (xyz_rgb_fields(), XYZRGB_STRIDE),
    };

    let mut data = Vec::with_capacity(point_step as usize * n_points);
    for (index, position) in cloud.positions.iter().enumerate() {
        data.extend_from_slice(&(position[0] as f32).to_ne_bytes());
        data.extend_from_slice(&(position[1] as f32).to_ne_bytes());
        data.extend_from_slice(&(position[2] as f32).to_ne_bytes());

        if let Some(colors) = &cloud.colors {
            let [r, g, b] = colors[index];
            let rgb = pack_rgb(
                quantize_channel(r),
                quantize_channel(g),
                quantize_channel(b),
            );
            data.extend_from_slice(&rgb.to_ne_bytes());
        }
    }

    Ok(PointCloud2 {
        header: Header {
            stamp,
            frame_id: frame_id.to_string(),
        },
        height: 1,
        width: n_points as u32,
        fields,
        is_bigendian: false,
        point_step,
        row_step: point_step * n_points as u32,
        data,
        is_dense: true,
    })
}
