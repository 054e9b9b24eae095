// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! ROS2 message types for the PointCloud2 wire format.
//!
//! These structures mirror the `builtin_interfaces`, `std_msgs`, and
//! `sensor_msgs` message definitions field-for-field so they serialize
//! through CDR unchanged. The codec itself never touches the wire; the
//! transport layer owns serialization and hands these structs in and out.

use serde::{Deserialize, Serialize};

/// ROS2 builtin_interfaces/Time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

/// ROS2 std_msgs/Header.
///
/// Carried verbatim from encoder input to the output message; the
/// conversion logic never inspects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

/// ROS2 sensor_msgs/PointField.
///
/// Describes how to read one named attribute out of a fixed-stride point
/// record: byte offset within the record, scalar datatype code (see
/// [`crate::fields::PointFieldType`]), and element count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointField {
    pub name: String,
    pub offset: u32,
    pub datatype: u8,
    pub count: u32,
}

/// ROS2 sensor_msgs/PointCloud2.
///
/// A flat buffer of `width * height` fixed-stride point records plus the
/// field descriptors needed to interpret each record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud2 {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub fields: Vec<PointField>,
    pub is_bigendian: bool,
    pub point_step: u32,
    pub row_step: u32,
    pub data: Vec<u8>,
    pub is_dense: bool,
}

impl PointCloud2 {
    /// Total number of point records in the buffer.
    pub fn n_points(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
