//! # Flex Layout
//!
//! A single-line flexbox: children are laid out along one main axis, each
//! starting from its basis (or measured size), then grown into free space
//! or shrunk to remove overflow by their weights. Whatever space remains
//! is handed out by `justify_content`, and each child is placed on the
//! cross axis by `align_self`/`align_items`.
//!
//! Sizes are whole pixels. Shares are rounded cumulatively so the pixels
//! handed out always add up to exactly the free space.

use crate::canvas::Canvas;
use crate::style::{AlignItems, Background, Direction, JustifyContent};
use crate::text::TextMeasure;

use super::{Element, Rect, RenderContext, Size, Widget};

/// Default gap between children in base pixels.
pub const DEFAULT_GAP: i32 = 10;
/// Default background corner radius in base pixels.
pub const DEFAULT_RADIUS: i32 = 12;

/// A child of a flex container together with its flex parameters.
pub struct FlexItem<W = Element> {
    pub widget: W,
    pub grow: f64,
    pub shrink: f64,
    /// Main-axis size in base pixels, overriding the measured size.
    pub basis: Option<i32>,
    pub align_self: Option<AlignItems>,
}

impl<W> FlexItem<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            grow: 0.0,
            shrink: 1.0,
            basis: None,
            align_self: None,
        }
    }

    pub fn grow(mut self, grow: f64) -> Self {
        self.grow = grow;
        self
    }

    pub fn shrink(mut self, shrink: f64) -> Self {
        self.shrink = shrink;
        self
    }

    pub fn basis(mut self, basis: i32) -> Self {
        self.basis = Some(basis);
        self
    }

    pub fn align_self(mut self, align: AlignItems) -> Self {
        self.align_self = Some(align);
        self
    }
}

/// A row or column of flex items.
pub struct FlexContainer<W = Element> {
    pub direction: Direction,
    /// Gap between children in base pixels.
    pub gap: i32,
    /// Uniform padding in base pixels.
    pub padding: i32,
    pub align_items: AlignItems,
    pub justify_content: JustifyContent,
    pub background: Option<Background>,
    /// Render each child into its own layer the size of its box.
    pub clip_children: bool,
    pub children: Vec<FlexItem<W>>,
}

impl<W> FlexContainer<W> {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            gap: DEFAULT_GAP,
            padding: 0,
            align_items: AlignItems::Stretch,
            justify_content: JustifyContent::Start,
            background: None,
            clip_children: true,
            children: Vec::new(),
        }
    }

    pub fn row() -> Self {
        Self::new(Direction::Row)
    }

    pub fn column() -> Self {
        Self::new(Direction::Column)
    }

    pub fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }

    pub fn justify_content(mut self, justify: JustifyContent) -> Self {
        self.justify_content = justify;
        self
    }

    pub fn push(&mut self, item: FlexItem<W>) {
        self.children.push(item);
    }

    pub fn with_child(mut self, item: FlexItem<W>) -> Self {
        self.children.push(item);
        self
    }

    fn is_row(&self) -> bool {
        self.direction == Direction::Row
    }

    fn main(&self, s: Size) -> i32 {
        if self.is_row() {
            s.w
        } else {
            s.h
        }
    }

    fn cross(&self, s: Size) -> i32 {
        if self.is_row() {
            s.h
        } else {
            s.w
        }
    }

    fn total_gaps(&self, gap: i32) -> i32 {
        gap * (self.children.len() as i32 - 1).max(0)
    }
}

impl<W: Widget> FlexContainer<W> {
    /// Base main size and natural cross size of every child, measured
    /// against the inner envelope.
    fn measure_children<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, inner: Size) -> Vec<(i32, i32)> {
        self.children
            .iter()
            .map(|item| {
                let natural = item.widget.measure(m, ctx, inner);
                let base = item
                    .basis
                    .map(|b| ctx.px(b).max(0))
                    .unwrap_or_else(|| self.main(natural));
                (base, self.cross(natural))
            })
            .collect()
    }

    /// Final main size of every child: bases grown into free space or
    /// shrunk by their weights, then cut to fit `main_space`.
    fn main_sizes(&self, measured: &[(i32, i32)], main_space: i32, gaps: i32) -> Vec<i32> {
        let mut sizes: Vec<i32> = measured.iter().map(|(base, _)| *base).collect();
        let free = main_space - (sizes.iter().sum::<i32>() + gaps);
        if free > 0 {
            let grows: Vec<f64> = self.children.iter().map(|c| c.grow).collect();
            distribute_grow(&mut sizes, &grows, free);
        } else if free < 0 {
            let shrinks: Vec<f64> = self.children.iter().map(|c| c.shrink).collect();
            distribute_shrink(&mut sizes, &shrinks, -free);
        }
        clamp_to_span(&mut sizes, main_space - gaps);
        sizes
    }

    /// Natural cross size of every child at its final main size. Row
    /// children are measured again at their final width, so wrapped text
    /// reports the height it needs in the column it actually gets.
    fn cross_sizes<M: TextMeasure>(
        &self,
        m: &M,
        ctx: &RenderContext,
        measured: &[(i32, i32)],
        sizes: &[i32],
        cross_space: i32,
    ) -> Vec<i32> {
        if !self.is_row() {
            return measured.iter().map(|(_, cross)| *cross).collect();
        }
        self.children
            .iter()
            .zip(sizes)
            .map(|(item, size)| item.widget.measure(m, ctx, Size::new(*size, cross_space)).h)
            .collect()
    }

    /// Compute the box of every child inside `rect`.
    pub fn layout<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, rect: Rect) -> Vec<Rect> {
        let padding = ctx.px(self.padding);
        let gap = ctx.px(self.gap);
        let inner = rect.inset(padding);
        let measured = self.measure_children(m, ctx, inner.size());

        let main_space = self.main(inner.size());
        let cross_space = self.cross(inner.size());
        let gaps = self.total_gaps(gap);

        // Pass 1: sizing.
        let sizes = self.main_sizes(&measured, main_space, gaps);
        let crosses = self.cross_sizes(m, ctx, &measured, &sizes, cross_space);

        // Pass 2: positioning.
        let leftover = (main_space - (sizes.iter().sum::<i32>() + gaps)).max(0);
        let (offset, extra_gap) = justify_fn(self.justify_content)(leftover, self.children.len());
        let step_gap = gap + extra_gap;

        let (inner_main_start, inner_cross_start) = if self.is_row() {
            (inner.x, inner.y)
        } else {
            (inner.y, inner.x)
        };

        let mut cursor = inner_main_start + offset;
        let mut rects = Vec::with_capacity(sizes.len());
        for ((item, size), natural_cross) in self.children.iter().zip(&sizes).zip(&crosses) {
            let align = item.align_self.unwrap_or(self.align_items);
            let cross_size = match align {
                AlignItems::Stretch => cross_space,
                _ => (*natural_cross).min(cross_space).max(0),
            };
            let cross_pos = inner_cross_start
                + match align {
                    AlignItems::Center => (cross_space - cross_size) / 2,
                    AlignItems::End => cross_space - cross_size,
                    AlignItems::Start | AlignItems::Stretch => 0,
                };

            rects.push(if self.is_row() {
                Rect::new(cursor, cross_pos, *size, cross_size)
            } else {
                Rect::new(cross_pos, cursor, cross_size, *size)
            });
            cursor += size + step_gap;
        }
        rects
    }
}

impl<W: Widget> Widget for FlexContainer<W> {
    fn measure<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, avail: Size) -> Size {
        let padding = ctx.px(self.padding);
        let inner = Size::new((avail.w - 2 * padding).max(0), (avail.h - 2 * padding).max(0));
        let measured = self.measure_children(m, ctx, inner);
        let gaps = self.total_gaps(ctx.px(self.gap));

        let main = measured.iter().map(|(base, _)| base).sum::<i32>() + gaps;
        let sizes = self.main_sizes(&measured, self.main(inner), gaps);
        let cross = self
            .cross_sizes(m, ctx, &measured, &sizes, self.cross(inner))
            .into_iter()
            .max()
            .unwrap_or(0);

        let preferred = if self.is_row() {
            Size::new(main, cross)
        } else {
            Size::new(cross, main)
        };
        Size::new(preferred.w + 2 * padding, preferred.h + 2 * padding).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        if let Some(bg) = &self.background {
            canvas.rounded_rect(rect, ctx.px(bg.radius), bg.fill, bg.outline);
        }

        let rects = self.layout(canvas, ctx, rect);
        log::debug!(
            "flex {:?} in {:?}: {} children -> {:?}",
            self.direction,
            rect,
            rects.len(),
            rects
        );

        for (item, r) in self.children.iter().zip(rects) {
            if r.is_empty() {
                continue;
            }
            if self.clip_children {
                let mut layer = canvas.new_layer(r.w, r.h);
                item.widget.render(&mut layer, ctx, Rect::sized(r.w, r.h));
                canvas.composite_layer(&layer, r.x, r.y);
            } else {
                item.widget.render(canvas, ctx, r);
            }
        }
    }
}

/// Maps `(leftover, child_count)` to `(start_offset, extra_gap)`.
pub type JustifyFn = fn(i32, usize) -> (i32, i32);

fn justify_start(_leftover: i32, _n: usize) -> (i32, i32) {
    (0, 0)
}

fn justify_end(leftover: i32, _n: usize) -> (i32, i32) {
    (leftover, 0)
}

fn justify_center(leftover: i32, _n: usize) -> (i32, i32) {
    (leftover / 2, 0)
}

fn justify_space_between(leftover: i32, n: usize) -> (i32, i32) {
    if n > 1 {
        (0, leftover / (n as i32 - 1))
    } else {
        (0, 0)
    }
}

fn justify_space_around(leftover: i32, n: usize) -> (i32, i32) {
    if n == 0 {
        return (0, 0);
    }
    let extra = leftover / n as i32;
    (extra / 2, extra)
}

fn justify_space_evenly(leftover: i32, n: usize) -> (i32, i32) {
    let extra = leftover / (n as i32 + 1);
    (extra, extra)
}

pub fn justify_fn(justify: JustifyContent) -> JustifyFn {
    match justify {
        JustifyContent::Start => justify_start,
        JustifyContent::End => justify_end,
        JustifyContent::Center => justify_center,
        JustifyContent::SpaceBetween => justify_space_between,
        JustifyContent::SpaceAround => justify_space_around,
        JustifyContent::SpaceEvenly => justify_space_evenly,
    }
}

/// Hand out `free` pixels in proportion to the grow factors.
///
/// Cumulative rounding: child `i` ends at `round(free × Σgrow[..=i] / Σgrow)`,
/// so the shares always add up to exactly `free`. Children with zero (or
/// negative) grow receive nothing.
pub fn distribute_grow(sizes: &mut [i32], grows: &[f64], free: i32) {
    let total: f64 = grows.iter().map(|g| g.max(0.0)).sum();
    if total <= 0.0 || free <= 0 {
        return;
    }
    let mut acc = 0.0;
    let mut given = 0;
    for (size, grow) in sizes.iter_mut().zip(grows) {
        acc += grow.max(0.0);
        let target = (free as f64 * acc / total).round() as i32;
        *size += target - given;
        given = target;
    }
}

/// Remove `deficit` pixels in proportion to the shrink factors.
///
/// No child goes below zero. Whatever a child couldn't give up is taken
/// from the remaining shrinkable children in further rounds.
pub fn distribute_shrink(sizes: &mut [i32], shrinks: &[f64], deficit: i32) {
    let mut remaining = deficit;
    while remaining > 0 {
        let active: Vec<usize> = (0..sizes.len())
            .filter(|&i| shrinks.get(i).copied().unwrap_or(0.0) > 0.0 && sizes[i] > 0)
            .collect();
        let total: f64 = active.iter().map(|&i| shrinks[i]).sum();
        if active.is_empty() || total <= 0.0 {
            break;
        }

        let mut acc = 0.0;
        let mut assigned = 0;
        let mut taken = 0;
        for &i in &active {
            acc += shrinks[i];
            let target = (remaining as f64 * acc / total).round() as i32;
            let share = target - assigned;
            assigned = target;
            let cut = share.min(sizes[i]);
            sizes[i] -= cut;
            taken += cut;
        }
        if taken == 0 {
            break;
        }
        remaining -= taken;
    }
}

/// Cut sizes in order so their sum never exceeds `span`. Only bites when
/// shrinking couldn't remove all overflow.
fn clamp_to_span(sizes: &mut [i32], span: i32) {
    let mut avail = span.max(0);
    for size in sizes.iter_mut() {
        *size = (*size).clamp(0, avail);
        avail -= *size;
    }
}
