//! Deciding how much of an item goes into the space left on a page.
//!
//! Content is a sequence of bands: table rows that no cell spans across,
//! or text lines. Bands belong to groups, and each group may carry a fixed
//! cost (repeated header rows) paid once in every slice that touches it.

/// One unbreakable run of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub group: usize,
    pub height: i32,
}

/// Where the next slice starts: a band, and how far into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceCursor {
    pub band: usize,
    /// Only nonzero inside an oversized band.
    pub offset: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceLimits {
    /// Space left in the current slice.
    pub space: i32,
    /// Height of an empty page body.
    pub body: i32,
    /// Least space in which an oversized band may start.
    pub min_break: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePlan {
    /// Whole bands `start..end`; `height` includes fixed costs.
    Bands { start: usize, end: usize, height: i32 },
    /// Offsets `from..to` of a band taller than a page body.
    Partial { band: usize, from: i32, to: i32 },
    /// Nothing fits here; retry on a fresh page.
    Defer,
    Done,
}

impl SlicePlan {
    pub fn height(&self) -> i32 {
        match *self {
            SlicePlan::Bands { height, .. } => height,
            SlicePlan::Partial { from, to, .. } => to - from,
            SlicePlan::Defer | SlicePlan::Done => 0,
        }
    }

    /// The cursor after this plan has been drawn.
    pub fn advance(&self, bands: &[Band], cursor: SliceCursor) -> SliceCursor {
        match *self {
            SlicePlan::Bands { end, .. } => SliceCursor { band: end, offset: 0 },
            SlicePlan::Partial { band, to, .. } if to >= bands[band].height => SliceCursor {
                band: band + 1,
                offset: 0,
            },
            SlicePlan::Partial { band, to, .. } => SliceCursor { band, offset: to },
            SlicePlan::Defer | SlicePlan::Done => cursor,
        }
    }
}

/// Plans the next slice starting at `cursor`.
pub fn plan_slice(
    bands: &[Band],
    fixed: &[i32],
    cursor: SliceCursor,
    limits: SliceLimits,
) -> SlicePlan {
    let Some(first) = bands.get(cursor.band) else {
        return SlicePlan::Done;
    };
    let fixed_of = |group: usize| fixed.get(group).copied().unwrap_or(0);

    if cursor.offset > 0 {
        let take = (first.height - cursor.offset).min(limits.space);
        if take <= 0 {
            return SlicePlan::Defer;
        }
        return SlicePlan::Partial {
            band: cursor.band,
            from: cursor.offset,
            to: cursor.offset + take,
        };
    }

    let mut height = 0;
    let mut group = None;
    let mut end = cursor.band;
    for band in &bands[cursor.band..] {
        let extra = if group == Some(band.group) { 0 } else { fixed_of(band.group) };
        if height + extra + band.height > limits.space {
            break;
        }
        height += extra + band.height;
        group = Some(band.group);
        end += 1;
    }
    if end > cursor.band {
        return SlicePlan::Bands {
            start: cursor.band,
            end,
            height,
        };
    }

    if fixed_of(first.group) + first.height <= limits.body {
        return SlicePlan::Defer;
    }
    if limits.space <= 0 || limits.space < limits.min_break.min(limits.body) {
        return SlicePlan::Defer;
    }
    log::trace!(
        "band {} of height {} exceeds the body height {}",
        cursor.band,
        first.height,
        limits.body
    );
    SlicePlan::Partial {
        band: cursor.band,
        from: 0,
        to: first.height.min(limits.space),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(heights: &[i32]) -> Vec<Band> {
        heights.iter().map(|&height| Band { group: 0, height }).collect()
    }

    fn limits(space: i32) -> SliceLimits {
        SliceLimits {
            space,
            body: 100,
            min_break: 50,
        }
    }

    #[test]
    fn whole_bands_fill_the_space() {
        let b = bands(&[30, 30, 30, 30]);
        let plan = plan_slice(&b, &[0], SliceCursor::default(), limits(100));
        assert_eq!(plan, SlicePlan::Bands { start: 0, end: 3, height: 90 });
        let cursor = plan.advance(&b, SliceCursor::default());
        assert_eq!(plan_slice(&b, &[0], cursor, limits(100)).height(), 30);
        assert_eq!(
            plan_slice(&b, &[0], SliceCursor { band: 4, offset: 0 }, limits(100)),
            SlicePlan::Done
        );
    }

    #[test]
    fn band_that_fits_a_fresh_page_is_deferred() {
        let b = bands(&[60]);
        assert_eq!(plan_slice(&b, &[0], SliceCursor::default(), limits(59)), SlicePlan::Defer);
    }

    #[test]
    fn fixed_cost_is_paid_once_per_group() {
        let b = vec![
            Band { group: 0, height: 10 },
            Band { group: 1, height: 20 },
            Band { group: 1, height: 20 },
            Band { group: 1, height: 20 },
        ];
        let plan = plan_slice(&b, &[0, 15], SliceCursor::default(), limits(70));
        assert_eq!(plan, SlicePlan::Bands { start: 0, end: 3, height: 65 });
    }

    #[test]
    fn oversized_band_is_cut_into_pieces() {
        let b = bands(&[250]);
        assert_eq!(plan_slice(&b, &[0], SliceCursor::default(), limits(40)), SlicePlan::Defer);

        let mut cursor = SliceCursor::default();
        let mut pieces = Vec::new();
        loop {
            let plan = plan_slice(&b, &[0], cursor, limits(100));
            if plan == SlicePlan::Done {
                break;
            }
            pieces.push(plan.height());
            cursor = plan.advance(&b, cursor);
        }
        assert_eq!(pieces, [100, 100, 50]);
    }
}
