//! # Layout Module
//!
//! Zone geometry and the planner that maps content items onto zones.
//!
//! ## Modules
//!
//! - [`zone`]: rectangles, rotations and zones
//! - [`config`]: the immutable [`LayoutConfig`] passed into every call
//! - [`planner`]: the band split and the fixed assignment table

pub mod config;
pub mod planner;
pub mod zone;

pub use config::LayoutConfig;
pub use planner::{Placement, ZonePlan, plan};
pub use zone::{Rect, Rotation, Zone, ZoneId};

/// Kind of a content item, used to describe which items a render carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Date,
    Message,
    BorderMessage,
    SideCaption,
    BackgroundImage,
}
