// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Round-trip demo: encode a colored cloud, push it through CDR the way
//! a transport layer would, and decode what comes back.
//!
//! Run with: RUST_LOG=info cargo run --example roundtrip

use cdr::{CdrLe, Infinite};
use cloudconv::{from_msg, msg::PointCloud2, msg::Time, to_msg, PointCloud};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cloud = PointCloud {
        positions: vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
        colors: Some(vec![
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]),
    };

    let stamp = Time {
        sec: 1_700_000_000,
        nanosec: 0,
    };
    let msg = to_msg(&cloud, "lidar", stamp)?;
    info!(
        "encoded {} points into {} record bytes ({} byte stride)",
        cloud.len(),
        msg.data.len(),
        msg.point_step
    );

    let wire = cdr::serialize::<_, _, CdrLe>(&msg, Infinite)?;
    info!("serialized message to {} wire bytes", wire.len());

    let received: PointCloud2 = cdr::deserialize(&wire)?;
    let decoded = from_msg(&received)?;
    info!(
        "decoded {} points from frame '{}' (colors: {})",
        decoded.len(),
        received.header.frame_id,
        decoded.has_colors()
    );

    for (position, color) in decoded
        .positions
        .iter()
        .zip(decoded.colors.as_deref().unwrap_or(&[]))
    {
        println!("{:?} -> {:?}", position, color);
    }

    Ok(())
}
