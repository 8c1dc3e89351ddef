//! # Zone Planner
//!
//! Splits the printable area into named zones and decides which content item
//! goes where.
//!
//! ## Band Layout
//!
//! ```text
//! ┌───────────────────────────────────────┐  ← cut border (margin + thickness)
//! │ ┌───────────────────────────────────┐ │
//! │ │ Top      25%   (upright)          │ │
//! │ ├────┬─────────────────────────┬────┤ │
//! │ │ L  │ Middle   50%  (upright) │ R  │ │  ← L/R only with a side caption
//! │ │ 90°│                         │-90°│ │
//! │ ├────┴─────────────────────────┴────┤ │
//! │ │ Bottom   25%   (upside down)      │ │
//! │ └───────────────────────────────────┘ │
//! └───────────────────────────────────────┘
//! ```
//!
//! Every zone is inset by the zone padding, so neighbouring zones never share
//! a pixel. When a side caption is present the three bands are narrowed by the
//! side-caption width (equal to the top band height) plus padding on both sides.
//!
//! ## Assignment Table
//!
//! | Date | Message | Border | Top | Middle | Bottom |
//! |------|---------|--------|-----|--------|--------|
//! |      | ✓       |        |     | Message |       |
//! |      |         | ✓      | Border | | Border (180°) |
//! | ✓    |         |        |     | Date |          |
//! |      | ✓       | ✓      | Border | Message | Border (180°) |
//! | ✓    | ✓       |        | Date | Message | Date (180°) |
//! | ✓    |         | ✓      | Border | Date | Border (180°) |
//! | ✓    | ✓       | ✓      | Date | Message | Date (180°), border dropped |

use std::collections::BTreeSet;

use super::{ItemKind, LayoutConfig, Rect, Rotation, Zone, ZoneId};
use crate::error::EngineWarning;

/// One item assigned to one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub item: ItemKind,
    pub zone: Zone,
}

/// Result of zone planning for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePlan {
    /// Canvas inset by the border margin and thickness.
    pub printable: Rect,
    /// Printable area narrowed by the side-caption columns (equal to
    /// `printable` without a side caption). Backgrounds are centered here.
    pub content_area: Rect,
    pub placements: Vec<Placement>,
    /// Items that were present but got no zone.
    pub dropped: Vec<ItemKind>,
}

impl ZonePlan {
    /// Zones assigned to `item`, in top-to-bottom / left-to-right order.
    pub fn zones_for(&self, item: ItemKind) -> impl Iterator<Item = &Zone> + '_ {
        self.placements
            .iter()
            .filter(move |p| p.item == item)
            .map(|p| &p.zone)
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.zone.id == id)
    }
}

/// (date, message, border) presence → zone assignments and dropped item.
struct Rule {
    when: (bool, bool, bool),
    place: &'static [(ItemKind, ZoneId)],
    drop: Option<ItemKind>,
}

const RULES: &[Rule] = &[
    Rule {
        when: (false, true, false),
        place: &[(ItemKind::Message, ZoneId::Middle)],
        drop: None,
    },
    Rule {
        when: (false, false, true),
        place: &[
            (ItemKind::BorderMessage, ZoneId::Top),
            (ItemKind::BorderMessage, ZoneId::Bottom),
        ],
        drop: None,
    },
    Rule {
        when: (true, false, false),
        place: &[(ItemKind::Date, ZoneId::Middle)],
        drop: None,
    },
    Rule {
        when: (false, true, true),
        place: &[
            (ItemKind::BorderMessage, ZoneId::Top),
            (ItemKind::Message, ZoneId::Middle),
            (ItemKind::BorderMessage, ZoneId::Bottom),
        ],
        drop: None,
    },
    Rule {
        when: (true, true, false),
        place: &[
            (ItemKind::Date, ZoneId::Top),
            (ItemKind::Message, ZoneId::Middle),
            (ItemKind::Date, ZoneId::Bottom),
        ],
        drop: None,
    },
    Rule {
        when: (true, false, true),
        place: &[
            (ItemKind::BorderMessage, ZoneId::Top),
            (ItemKind::Date, ZoneId::Middle),
            (ItemKind::BorderMessage, ZoneId::Bottom),
        ],
        drop: None,
    },
    Rule {
        when: (true, true, true),
        place: &[
            (ItemKind::Date, ZoneId::Top),
            (ItemKind::Message, ZoneId::Middle),
            (ItemKind::Date, ZoneId::Bottom),
        ],
        drop: Some(ItemKind::BorderMessage),
    },
];

impl ZoneId {
    /// Orientation content is drawn at in this zone.
    pub fn rotation(self) -> Rotation {
        match self {
            ZoneId::Top | ZoneId::Middle => Rotation::None,
            ZoneId::Bottom => Rotation::Half,
            ZoneId::Left => Rotation::Cw90,
            ZoneId::Right => Rotation::Ccw90,
        }
    }
}

/// Raw zone rectangles before assignment.
struct Bands {
    top: Rect,
    middle: Rect,
    bottom: Rect,
    left: Option<Rect>,
    right: Option<Rect>,
    content_area: Rect,
}

impl Bands {
    fn rect(&self, id: ZoneId) -> Option<Rect> {
        match id {
            ZoneId::Top => Some(self.top),
            ZoneId::Middle => Some(self.middle),
            ZoneId::Bottom => Some(self.bottom),
            ZoneId::Left => self.left,
            ZoneId::Right => self.right,
        }
    }
}

fn carve(config: &LayoutConfig, printable: Rect, side_caption: bool) -> Bands {
    let pad = config.zone_padding;
    let ph = printable.height();
    let q1 = ph / 4;
    let q3 = 3 * ph / 4;

    let mut band_x0 = printable.x0 + pad;
    let mut band_x1 = printable.x1 - pad;
    let mut content_area = printable;
    let mut left = None;
    let mut right = None;

    let top_y = (printable.y0 + pad, printable.y0 + q1 - pad);
    let middle_y = (printable.y0 + q1 + pad, printable.y0 + q3 - pad);
    let bottom_y = (printable.y0 + q3 + pad, printable.y1 - pad);

    if side_caption {
        // Side columns are as wide as the top band is tall.
        let side_w = q1;
        let side_pad = config.side_caption_padding;
        let y0 = top_y.1 + side_pad;
        let y1 = bottom_y.0 - side_pad;
        let l = Rect::new(printable.x0 + pad, y0, printable.x0 + pad + side_w, y1);
        let r = Rect::new(printable.x1 - pad - side_w, y0, printable.x1 - pad, y1);
        band_x0 = l.x1 + pad;
        band_x1 = r.x0 - pad;
        content_area = Rect::new(
            printable.x0 + side_w + pad,
            printable.y0,
            printable.x1 - side_w - pad,
            printable.y1,
        );
        left = Some(l);
        right = Some(r);
    }

    Bands {
        top: Rect::new(band_x0, top_y.0, band_x1, top_y.1),
        middle: Rect::new(band_x0, middle_y.0, band_x1, middle_y.1),
        bottom: Rect::new(band_x0, bottom_y.0, band_x1, bottom_y.1),
        left,
        right,
        content_area,
    }
}

/// Partition the printable area and assign the present items to zones.
///
/// `BackgroundImage` in `present` is ignored here; it has no zone.
///
/// ## Errors
///
/// Returns [`EngineWarning::ZonePlanningDegenerate`] when the canvas is too
/// small to carve non-empty zones. Callers draw only the border in that case.
pub fn plan(
    config: &LayoutConfig,
    present: &BTreeSet<ItemKind>,
) -> Result<ZonePlan, EngineWarning> {
    let degenerate = EngineWarning::ZonePlanningDegenerate {
        width: config.canvas_width,
        height: config.canvas_height,
    };

    let printable = config.printable_area();
    if printable.is_empty() {
        return Err(degenerate);
    }

    let side_caption = present.contains(&ItemKind::SideCaption);
    let bands = carve(config, printable, side_caption);

    let needed: &[ZoneId] = if side_caption {
        &[ZoneId::Top, ZoneId::Middle, ZoneId::Bottom, ZoneId::Left, ZoneId::Right]
    } else {
        &[ZoneId::Top, ZoneId::Middle, ZoneId::Bottom]
    };
    if needed
        .iter()
        .any(|&id| bands.rect(id).is_none_or(|r| r.is_empty()))
    {
        return Err(degenerate);
    }

    let key = (
        present.contains(&ItemKind::Date),
        present.contains(&ItemKind::Message),
        present.contains(&ItemKind::BorderMessage),
    );

    let mut placements = Vec::new();
    let mut dropped = Vec::new();

    if let Some(rule) = RULES.iter().find(|rule| rule.when == key) {
        for &(item, id) in rule.place {
            if let Some(rect) = bands.rect(id) {
                placements.push(Placement {
                    item,
                    zone: Zone {
                        id,
                        rect,
                        rotation: id.rotation(),
                    },
                });
            }
        }
        dropped.extend(rule.drop);
    }

    if side_caption {
        for id in [ZoneId::Left, ZoneId::Right] {
            if let Some(rect) = bands.rect(id) {
                placements.push(Placement {
                    item: ItemKind::SideCaption,
                    zone: Zone {
                        id,
                        rect,
                        rotation: id.rotation(),
                    },
                });
            }
        }
    }

    Ok(ZonePlan {
        printable,
        content_area: bands.content_area,
        placements,
        dropped,
    })
}
