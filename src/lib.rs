// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Point cloud <-> ROS2 PointCloud2 conversion library.
//!
//! This crate converts between a columnar in-memory point cloud
//! ([`PointCloud`]: positions plus optional normalized colors) and the
//! flat byte-packed [`msg::PointCloud2`] message format. The two
//! directions are independent pure functions with no shared state:
//!
//! ```text
//! ┌──────────────┐   to_msg()    ┌───────────────────┐
//! │  PointCloud  │ ────────────► │    PointCloud2    │
//! │ (positions + │               │ (packed records + │
//! │   colors)    │ ◄──────────── │ field descriptors)│
//! └──────────────┘   from_msg()  └───────────────────┘
//! ```
//!
//! The encoder emits one of two canonical layouts: 12-byte `x,y,z`
//! records, or 16-byte `x,y,z,rgb` records where `rgb` is a FLOAT32
//! bit-packing three quantized color bytes. The decoder accepts any
//! field layout with FLOAT32 `x`/`y`/`z`, recognizes three color
//! encodings found in the wild (separate `r`/`g`/`b` bytes, packed-float
//! `rgb`, packed-u32 `rgba`), and drops points with non-finite
//! coordinates.
//!
//! Transport is out of scope: messages go over the wire however the
//! caller likes (typically CDR-encoded onto a zenoh or DDS topic), and
//! the header metadata passes through the codec untouched.
//!
//! # Modules
//!
//! - [`msg`]: ROS2 message types (serde-derived for CDR transport)
//! - [`fields`]: field layout catalog and color-encoding classification
//! - [`color`]: packed color bit manipulation
//! - [`cloud`]: structured cloud type and error handling
//! - [`encode`]: cloud to message conversion
//! - [`decode`]: message to cloud conversion
//!
//! # Example
//!
//! ```
//! use cloudconv::{from_msg, to_msg, msg::Time, PointCloud};
//!
//! let cloud = PointCloud {
//!     positions: vec![[1.0, 2.0, 3.0]],
//!     colors: Some(vec![[1.0, 0.0, 0.5]]),
//! };
//!
//! let msg = to_msg(&cloud, "lidar", Time::default())?;
//! assert_eq!(msg.point_step, 16);
//!
//! let decoded = from_msg(&msg)?;
//! assert_eq!(decoded.positions, vec![[1.0, 2.0, 3.0]]);
//! # Ok::<(), cloudconv::Error>(())
//! ```

pub mod cloud;
pub mod color;
pub mod decode;
pub mod encode;
pub mod fields;
pub mod msg;

// Re-exports for convenience
pub use cloud::{Error, PointCloud};
pub use decode::from_msg;
pub use encode::to_msg;
pub use fields::{ColorEncoding, PointFieldType};
