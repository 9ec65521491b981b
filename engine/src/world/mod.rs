//! World Module
//!
//! Room-space configuration shared by placement, picking and the studio.
//!
//! ## Room Frame
//! The room is centered on the X/Z origin with the floor at Y=0.
//! - width spans X from -width/2 to +width/2
//! - depth spans Z from -depth/2 to +depth/2
//! - 1 unit = 1 meter

pub mod room;

pub use room::{Room, RoomDimensions, RoomError};
