//! # Label Composer
//!
//! Orchestrates one render: plan zones, composite the background, fit and
//! draw every text item, then draw the cut border.
//!
//! ## Stages
//!
//! ```text
//! Init ──► PlanZones ──► CompositeBackground ──► FitAndRender (per item) ──► DrawBorder ──► Done
//!              │
//!              └── degenerate canvas ─────────────────────────────────────────┘
//! ```
//!
//! No stage is retried or rolled back. Anything that goes wrong on the way
//! (missing font, undecodable image, text that cannot fit) degrades to a
//! fallback and is reported as an [`EngineWarning`] next to the finished
//! canvas. A render always returns a complete canvas.
//!
//! ## Example
//!
//! ```
//! use etiqueta::{ContentItem, LabelComposer, LabelContent, LayoutConfig};
//! use etiqueta::text::FontFace;
//!
//! let composer = LabelComposer::new(LayoutConfig::new(456, 253), FontFace::builtin());
//! let content = LabelContent::new()
//!     .with(ContentItem::Date("August 09, 2025".into()))
//!     .with(ContentItem::BorderMessage("Birthday".into()));
//!
//! let label = composer.render(&content);
//! assert_eq!(label.canvas.width(), 456);
//! assert!(label.warnings.is_empty());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::EngineWarning;
use crate::layout::{self, ItemKind, LayoutConfig, Placement, ZoneId, ZonePlan};
use crate::render::text::BOLD_GROWTH;
use crate::render::{LabelCanvas, background, text as text_renderer};
use crate::text::{FitResult, FontFace, MeasureCache, fit};

// ============================================================================
// CONTENT
// ============================================================================

/// One piece of caller-supplied content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Date(String),
    Message(String),
    /// Drawn twice, upright in the top zone and upside down in the bottom zone.
    BorderMessage(String),
    /// Drawn in the left (90°) and right (−90°) side columns.
    SideCaption(String),
    /// Encoded image bytes (PNG, JPEG, BMP, ...).
    BackgroundImage(Vec<u8>),
}

impl ContentItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            ContentItem::Date(_) => ItemKind::Date,
            ContentItem::Message(_) => ItemKind::Message,
            ContentItem::BorderMessage(_) => ItemKind::BorderMessage,
            ContentItem::SideCaption(_) => ItemKind::SideCaption,
            ContentItem::BackgroundImage(_) => ItemKind::BackgroundImage,
        }
    }

    /// Text of a text item; `None` for images.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentItem::Date(s)
            | ContentItem::Message(s)
            | ContentItem::BorderMessage(s)
            | ContentItem::SideCaption(s) => Some(s),
            ContentItem::BackgroundImage(_) => None,
        }
    }

    /// Blank text and empty image bytes count as absent.
    fn is_present(&self) -> bool {
        match self {
            ContentItem::BackgroundImage(bytes) => !bytes.is_empty(),
            other => other.text().is_some_and(|t| !t.trim().is_empty()),
        }
    }
}

/// The content of one label: at most one item of each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelContent {
    items: BTreeMap<ItemKind, ContentItem>,
}

impl LabelContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, replacing any earlier item of the same kind.
    pub fn with(mut self, item: ContentItem) -> Self {
        self.insert(item);
        self
    }

    /// Add an item, returning the item of the same kind it replaced.
    pub fn insert(&mut self, item: ContentItem) -> Option<ContentItem> {
        self.items.insert(item.kind(), item)
    }

    pub fn get(&self, kind: ItemKind) -> Option<&ContentItem> {
        self.items.get(&kind)
    }

    /// Kinds that will actually be laid out.
    pub fn kinds(&self) -> BTreeSet<ItemKind> {
        self.items
            .values()
            .filter(|item| item.is_present())
            .map(ContentItem::kind)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }

    fn text(&self, kind: ItemKind) -> Option<&str> {
        self.get(kind).and_then(ContentItem::text)
    }

    fn background(&self) -> Option<&[u8]> {
        match self.get(ItemKind::BackgroundImage) {
            Some(ContentItem::BackgroundImage(bytes)) if !bytes.is_empty() => Some(bytes),
            _ => None,
        }
    }
}

impl FromIterator<ContentItem> for LabelContent {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        let mut content = LabelContent::new();
        for item in iter {
            content.insert(item);
        }
        content
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// A finished render.
#[derive(Debug, Clone)]
pub struct Label {
    pub canvas: LabelCanvas,
    /// Conditions recovered from along the way, in the order they occurred.
    pub warnings: Vec<EngineWarning>,
}

/// Per-placement record, mainly for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub item: ItemKind,
    pub zone: ZoneId,
    pub fit: FitResult,
}

// ============================================================================
// COMPOSER
// ============================================================================

/// Renders [`LabelContent`] onto canvases of one fixed layout.
///
/// A composer holds only immutable state, so one instance can serve
/// concurrent renders from several threads.
#[derive(Debug, Clone)]
pub struct LabelComposer {
    config: LayoutConfig,
    face: FontFace,
    font_warning: Option<EngineWarning>,
}

impl LabelComposer {
    pub fn new(config: LayoutConfig, face: FontFace) -> Self {
        Self {
            config,
            face,
            font_warning: None,
        }
    }

    /// Composer using the font at `path`, or the built-in font if it cannot
    /// be loaded. The fallback is reported on every render.
    pub fn with_font_path(config: LayoutConfig, path: Option<&Path>) -> Self {
        let (face, font_warning) = FontFace::load_or_builtin(path);
        Self {
            config,
            face,
            font_warning,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Render `content` to a new canvas.
    pub fn render(&self, content: &LabelContent) -> Label {
        let (label, _) = self.render_detailed(content);
        label
    }

    /// Render `content`, also returning the fit chosen for each placement.
    pub fn render_detailed(&self, content: &LabelContent) -> (Label, Vec<RenderedItem>) {
        let config = &self.config;
        let mut canvas = LabelCanvas::new(config.canvas_width, config.canvas_height);
        let mut warnings: Vec<EngineWarning> = self.font_warning.iter().cloned().collect();
        let mut rendered = Vec::new();

        let present = content.kinds();
        tracing::debug!(
            width = config.canvas_width,
            height = config.canvas_height,
            items = ?present,
            "composing label"
        );

        match layout::plan(config, &present) {
            Ok(plan) => {
                self.draw_content(&mut canvas, &plan, content, &mut warnings, &mut rendered);
            }
            Err(warning) => {
                tracing::warn!(%warning, "zone planning degenerate, drawing border only");
                warnings.push(warning);
            }
        }

        tracing::debug!("drawing border");
        canvas.draw_border(config.border_margin, config.border_thickness);

        (Label { canvas, warnings }, rendered)
    }

    fn draw_content(
        &self,
        canvas: &mut LabelCanvas,
        plan: &ZonePlan,
        content: &LabelContent,
        warnings: &mut Vec<EngineWarning>,
        rendered: &mut Vec<RenderedItem>,
    ) {
        for item in &plan.dropped {
            if *item == ItemKind::BorderMessage {
                tracing::warn!("date and message present, dropping border message");
                warnings.push(EngineWarning::BorderMessageDropped);
            }
        }

        if let Some(bytes) = content.background() {
            tracing::debug!(area = %plan.content_area, "compositing background");
            if let Err(warning) = background::composite(canvas, &plan.content_area, bytes) {
                tracing::warn!(%warning, "background skipped");
                warnings.push(warning);
            }
        }

        // Measurements are shared across every fit of this render only.
        let metrics = MeasureCache::new(&self.face);

        for placement in &plan.placements {
            let Some(text) = content.text(placement.item) else {
                continue;
            };
            let zone = self.text_zone(placement);
            let bold = is_bold(placement);
            let (w, h) = zone.text_extent();
            let (w, h) = if bold { (w - BOLD_GROWTH, h - BOLD_GROWTH) } else { (w, h) };

            let fitted = fit(
                &metrics,
                text,
                w,
                h,
                self.config.min_font_size,
                self.config.max_font_size,
            );

            if !fitted.fits_within(w, h) {
                let warning = EngineWarning::FitNeverSatisfied {
                    item: placement.item,
                    font_size: fitted.font_size,
                };
                if !warnings.contains(&warning) {
                    tracing::warn!(%warning, "text overflows its zone");
                    warnings.push(warning);
                }
            }

            tracing::debug!(
                item = ?placement.item,
                zone = ?zone.id,
                rect = %zone.rect,
                size = fitted.font_size,
                lines = fitted.lines.len(),
                "fit"
            );
            text_renderer::render(canvas, &zone, &self.face, &fitted, bold, &plan.printable);

            rendered.push(RenderedItem {
                item: placement.item,
                zone: zone.id,
                fit: fitted,
            });
        }
    }

    /// Zone the text is actually fitted into.
    ///
    /// Border messages get extra vertical padding inside their bands, and
    /// side captions lose a strip on either side of their column.
    fn text_zone(&self, placement: &Placement) -> layout::Zone {
        match placement.item {
            ItemKind::BorderMessage => placement.zone.inset(0, self.config.border_text_padding),
            ItemKind::SideCaption => placement.zone.inset(self.config.side_text_padding, 0),
            _ => placement.zone,
        }
    }
}

/// Middle-zone content is drawn bold.
fn is_bold(placement: &Placement) -> bool {
    placement.zone.id == ZoneId::Middle
}
