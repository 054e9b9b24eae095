// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! PointCloud2 to structured cloud decoding.
//!
//! Accepts arbitrary field layouts, not only the ones the encoder emits:
//! positions are read from the mandatory `x`/`y`/`z` FLOAT32 fields at
//! whatever offsets the message declares, color is recognized via
//! [`color_encoding`], and unknown extra fields are ignored. Points with
//! a non-finite coordinate are dropped from the output.

use crate::{
    cloud::{Error, PointCloud},
    color::{unpack_rgb, unpack_rgba32},
    fields::{color_encoding, find_field, ColorEncoding, PointFieldType},
    msg::PointCloud2,
};
use log::debug;

#[inline]
fn read_f32(data: &[u8], at: usize) -> f32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[at..at + 4]);
    f32::from_ne_bytes(bytes)
}

#[inline]
fn read_u32(data: &[u8], at: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[at..at + 4]);
    u32::from_ne_bytes(bytes)
}

/// Resolve a field to its byte offset, checking datatype and stride fit.
fn field_offset(
    msg: &PointCloud2,
    name: &'static str,
    datatype: PointFieldType,
) -> Result<usize, Error> {
    let field = find_field(&msg.fields, name).ok_or(Error::MissingField(name))?;
    if field.datatype != datatype as u8 {
        return Err(Error::FieldType {
            name: field.name.clone(),
            expected: datatype,
            found: field.datatype,
        });
    }
    let offset = field.offset as usize;
    if offset + datatype.size() > msg.point_step as usize {
        return Err(Error::FieldOutOfBounds {
            name: field.name.clone(),
            offset: field.offset,
            point_step: msg.point_step,
        });
    }
    Ok(offset)
}

/// Decode a PointCloud2 message into a [`PointCloud`].
///
/// Requires `x`, `y`, and `z` FLOAT32 fields; any record whose position
/// has a NaN or infinite coordinate is filtered out, so the output may
/// hold fewer points than the message. Colors, when a recognized
/// encoding is present, are extracted from the same filtered record
/// subset and normalized to `[0.0, 1.0]`.
pub fn from_msg(msg: &PointCloud2) -> Result<PointCloud, Error> {
    let n_points = msg.n_points();
    let point_step = msg.point_step as usize;

    let x = field_offset(msg, "x", PointFieldType::FLOAT32)?;
    let y = field_offset(msg, "y", PointFieldType::FLOAT32)?;
    let z = field_offset(msg, "z", PointFieldType::FLOAT32)?;

    let required = point_step * n_points;
    if msg.data.len() < required {
        return Err(Error::TruncatedData {
            expected: required,
            actual: msg.data.len(),
        });
    }

    // Finiteness mask: keep the record base offset of every point whose
    // three coordinates are all finite.
    let mut positions = Vec::with_capacity(n_points);
    let mut kept = Vec::with_capacity(n_points);
    for index in 0..n_points {
        let base = index * point_step;
        let px = read_f32(&msg.data, base + x);
        let py = read_f32(&msg.data, base + y);
        let pz = read_f32(&msg.data, base + z);
        if px.is_finite() && py.is_finite() && pz.is_finite() {
            positions.push([px as f64, py as f64, pz as f64]);
            kept.push(base);
        }
    }

    let dropped = n_points - positions.len();
    if dropped > 0 {
        debug!("dropped {} of {} points with non-finite coordinates", dropped, n_points);
    }

    let colors = match color_encoding(&msg.fields) {
        ColorEncoding::None => None,
        ColorEncoding::SeparateBytes => {
            let r = field_offset(msg, "r", PointFieldType::UINT8)?;
            let g = field_offset(msg, "g", PointFieldType::UINT8)?;
            let b = field_offset(msg, "b", PointFieldType::UINT8)?;
            Some(
                kept.iter()
                    .map(|&base| {
                        [
                            msg.data[base + r] as f64 / 255.0,
                            msg.data[base + g] as f64 / 255.0,
                            msg.data[base + b] as f64 / 255.0,
                        ]
                    })
                    .collect(),
            )
        }
        ColorEncoding::PackedFloatRgb => {
            let rgb = field_offset(msg, "rgb", PointFieldType::FLOAT32)?;
            Some(
                kept.iter()
                    .map(|&base| normalize(unpack_rgb(read_f32(&msg.data, base + rgb))))
                    .collect(),
            )
        }
        ColorEncoding::PackedU32Rgba => {
            let rgba = field_offset(msg, "rgba", PointFieldType::UINT32)?;
            Some(
                kept.iter()
                    .map(|&base| normalize(unpack_rgba32(read_u32(&msg.data, base + rgba))))
                    .collect(),
            )
        }
    };

    Ok(PointCloud { positions, colors })
}

#[inline]
fn normalize((r, g, b): (u8, u8, u8)) -> [f64; 3] {
    [r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::pack_rgb,
        fields::{xyz_fields, xyz_rgb_fields},
        msg::PointField,
    };

    fn msg_with(fields: Vec<PointField>, point_step: u32, points: usize, data: Vec<u8>) -> PointCloud2 {
        PointCloud2 {
            width: points as u32,
            height: 1,
            fields,
            point_step,
            row_step: point_step * points as u32,
            data,
            ..Default::default()
        }
    }

    fn xyz_record(x: f32, y: f32, z: f32) -> Vec<u8> {
        let mut record = Vec::with_capacity(12);
        record.extend_from_slice(&x.to_ne_bytes());
        record.extend_from_slice(&y.to_ne_bytes());
        record.extend_from_slice(&z.to_ne_bytes());
        record
    }

    #[test]
    fn test_decode_positions() {
        let mut data = xyz_record(1.0, 2.0, 3.0);
        data.extend(xyz_record(-0.5, 10.0, 0.0));
        let cloud = from_msg(&msg_with(xyz_fields(), 12, 2, data)).unwrap();

        assert_eq!(cloud.positions, vec![[1.0, 2.0, 3.0], [-0.5, 10.0, 0.0]]);
        assert!(cloud.colors.is_none());
    }

    #[test]
    fn test_decode_missing_field() {
        let fields = vec![xyz_fields()[0].clone(), xyz_fields()[1].clone()];
        match from_msg(&msg_with(fields, 8, 0, Vec::new())) {
            Err(Error::MissingField(name)) => assert_eq!(name, "z"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_wrong_datatype() {
        let mut fields = xyz_fields();
        fields[0].datatype = PointFieldType::FLOAT64 as u8;
        match from_msg(&msg_with(fields, 12, 0, Vec::new())) {
            Err(Error::FieldType { name, .. }) => assert_eq!(name, "x"),
            other => panic!("expected FieldType, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_truncated_data() {
        let data = xyz_record(1.0, 2.0, 3.0);
        match from_msg(&msg_with(xyz_fields(), 12, 2, data)) {
            Err(Error::TruncatedData { expected, actual }) => {
                assert_eq!(expected, 24);
                assert_eq!(actual, 12);
            }
            other => panic!("expected TruncatedData, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_field_past_stride() {
        let mut fields = xyz_fields();
        fields[2].offset = 10;
        let data = vec![0u8; 12];
        match from_msg(&msg_with(fields, 12, 1, data)) {
            Err(Error::FieldOutOfBounds { name, .. }) => assert_eq!(name, "z"),
            other => panic!("expected FieldOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_filters_non_finite() {
        let mut data = xyz_record(1.0, 1.0, 1.0);
        data.extend(xyz_record(f32::NAN, 2.0, 2.0));
        data.extend(xyz_record(3.0, 3.0, 3.0));
        data.extend(xyz_record(4.0, f32::INFINITY, 4.0));

        let cloud = from_msg(&msg_with(xyz_fields(), 12, 4, data)).unwrap();
        assert_eq!(cloud.positions, vec![[1.0, 1.0, 1.0], [3.0, 3.0, 3.0]]);
    }

    #[test]
    fn test_decode_packed_rgb() {
        let mut data = xyz_record(0.0, 0.0, 0.0);
        data.extend_from_slice(&pack_rgb(255, 0, 127).to_ne_bytes());
        let cloud = from_msg(&msg_with(xyz_rgb_fields(), 16, 1, data)).unwrap();

        let colors = cloud.colors.unwrap();
        assert_eq!(colors, vec![[1.0, 0.0, 127.0 / 255.0]]);
    }

    #[test]
    fn test_decode_packed_rgba() {
        let mut fields = xyz_fields();
        fields.push(PointField {
            name: String::from("rgba"),
            offset: 12,
            datatype: PointFieldType::UINT32 as u8,
            count: 1,
        });
        let mut data = xyz_record(0.0, 0.0, 0.0);
        data.extend_from_slice(&0xFF00_8040u32.to_ne_bytes());

        let cloud = from_msg(&msg_with(fields, 16, 1, data)).unwrap();
        let colors = cloud.colors.unwrap();
        assert_eq!(colors, vec![[0.0, 128.0 / 255.0, 64.0 / 255.0]]);
    }

    #[test]
    fn test_decode_separate_channel_bytes() {
        let mut fields = xyz_fields();
        for (index, name) in ["r", "g", "b"].into_iter().enumerate() {
            fields.push(PointField {
                name: String::from(name),
                offset: 12 + index as u32,
                datatype: PointFieldType::UINT8 as u8,
                count: 1,
            });
        }
        let mut data = xyz_record(0.0, 0.0, 0.0);
        data.extend_from_slice(&[255, 0, 51]);
        data.push(0); // pad to stride

        let cloud = from_msg(&msg_with(fields, 16, 1, data)).unwrap();
        let colors = cloud.colors.unwrap();
        assert_eq!(colors, vec![[1.0, 0.0, 51.0 / 255.0]]);
    }

    #[test]
    fn test_decode_mask_applies_to_colors() {
        let mut data = xyz_record(1.0, 1.0, 1.0);
        data.extend_from_slice(&pack_rgb(10, 20, 30).to_ne_bytes());
        data.extend(xyz_record(f32::NAN, 2.0, 2.0));
        data.extend_from_slice(&pack_rgb(40, 50, 60).to_ne_bytes());
        data.extend(xyz_record(3.0, 3.0, 3.0));
        data.extend_from_slice(&pack_rgb(70, 80, 90).to_ne_bytes());

        let cloud = from_msg(&msg_with(xyz_rgb_fields(), 16, 3, data)).unwrap();
        assert_eq!(cloud.len(), 2);
        let colors = cloud.colors.unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0], [10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0]);
        assert_eq!(colors[1], [70.0 / 255.0, 80.0 / 255.0, 90.0 / 255.0]);
    }

    #[test]
    fn test_decode_rgb_wins_over_rgba() {
        let mut fields = xyz_rgb_fields();
        fields.push(PointField {
            name: String::from("rgba"),
            offset: 16,
            datatype: PointFieldType::UINT32 as u8,
            count: 1,
        });
        let mut data = xyz_record(0.0, 0.0, 0.0);
        data.extend_from_slice(&pack_rgb(255, 0, 0).to_ne_bytes());
        data.extend_from_slice(&0x0000_00FFu32.to_ne_bytes());

        let cloud = from_msg(&msg_with(fields, 20, 1, data)).unwrap();
        let colors = cloud.colors.unwrap();
        // Packed-float interpretation: pure red, not the rgba pure blue.
        assert_eq!(colors, vec![[1.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let mut fields = xyz_fields();
        fields.push(PointField {
            name: String::from("intensity"),
            offset: 12,
            datatype: PointFieldType::UINT8 as u8,
            count: 1,
        });
        let mut data = xyz_record(5.0, 6.0, 7.0);
        data.push(200);

        let cloud = from_msg(&msg_with(fields, 13, 1, data)).unwrap();
        assert_eq!(cloud.positions, vec![[5.0, 6.0, 7.0]]);
        assert!(cloud.colors.is_none());
    }

    #[test]
    fn test_decode_empty_message() {
        let cloud = from_msg(&msg_with(xyz_fields(), 12, 0, Vec::new())).unwrap();
        assert!(cloud.is_empty());
        assert!(cloud.colors.is_none());
    }

    #[test]
    fn test_decode_offsets_not_canonical() {
        // z first, x last: offsets matter, field order does not.
        let fields = vec![
            PointField {
                name: String::from("z"),
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
                name: String::from("x"),
                offset: 8,
                datatype: PointFieldType::FLOAT32 as u8,
                count: 1,
            },
        ];
        let data = xyz_record(3.0, 2.0, 1.0);
        let cloud = from_msg(&msg_with(fields, 12, 1, data)).unwrap();
        assert_eq!(cloud.positions, vec![[1.0, 2.0, 3.0]]);
    }
}
