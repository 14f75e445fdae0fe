//! Crop/pad geometry planning.
//!
//! Given an observed frame size and a target size, computes the typed
//! [`TransformPlan`] that turns one into the other without scaling: crop any
//! axis that is too large, then pad any axis that is too small. Both steps
//! are center-anchored. Serializing a plan into a tool-specific filter is
//! left to the executor (see `external::ffmpeg_builder`).

use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;

use std::fmt;

/// Centered crop: output `width`x`height`, taken at offset (`x`, `y`) of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Centered pad: output `width`x`height`, input placed at offset (`x`, `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pad {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Crop {
    fn centered(input: Resolution, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: (input.width() - width) / 2,
            y: (input.height() - height) / 2,
        }
    }
}

impl Pad {
    fn centered(input: Resolution, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: (width - input.width()) / 2,
            y: (height - input.height()) / 2,
        }
    }
}

/// Ordered geometric transform. Crop always precedes pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformPlan {
    /// Observed size already equals the target; pass the stream through.
    None,
    CropOnly(Crop),
    PadOnly(Pad),
    CropThenPad(Crop, Pad),
}

impl TransformPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, TransformPlan::None)
    }

    #[must_use]
    pub fn crop(&self) -> Option<&Crop> {
        match self {
            TransformPlan::CropOnly(crop) | TransformPlan::CropThenPad(crop, _) => Some(crop),
            _ => None,
        }
    }

    #[must_use]
    pub fn pad(&self) -> Option<&Pad> {
        match self {
            TransformPlan::PadOnly(pad) | TransformPlan::CropThenPad(_, pad) => Some(pad),
            _ => None,
        }
    }

    /// Frame size produced by applying this plan to a frame of `input` size.
    #[must_use]
    pub fn output_size(&self, input: Resolution) -> (u32, u32) {
        let (mut width, mut height) = (input.width(), input.height());
        if let Some(crop) = self.crop() {
            width = crop.width;
            height = crop.height;
        }
        if let Some(pad) = self.pad() {
            width = pad.width;
            height = pad.height;
        }
        (width, height)
    }
}

impl fmt::Display for TransformPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformPlan::None => write!(f, "pass-through"),
            TransformPlan::CropOnly(c) => write!(f, "crop {}x{}", c.width, c.height),
            TransformPlan::PadOnly(p) => write!(f, "pad {}x{}", p.width, p.height),
            TransformPlan::CropThenPad(c, p) => write!(
                f,
                "crop {}x{} then pad {}x{}",
                c.width, c.height, p.width, p.height
            ),
        }
    }
}

/// Computes the crop/pad plan that turns `observed` into `target`.
///
/// Each axis is handled independently: an axis larger than the target is
/// cropped down to it, an axis smaller than the target is padded up to it,
/// and an axis that already matches is left alone.
pub fn plan(observed: Resolution, target: Resolution) -> CoreResult<TransformPlan> {
    let crop_w = observed.width().min(target.width());
    let crop_h = observed.height().min(target.height());
    let needs_crop = crop_w < observed.width() || crop_h < observed.height();

    let crop = if needs_crop {
        Some(Crop::centered(observed, crop_w, crop_h))
    } else {
        None
    };

    // Pad operates on the cropped frame.
    let after_crop = Resolution::new(crop_w, crop_h).map_err(|_| {
        CoreError::InvalidPlan(format!(
            "crop of {observed} toward {target} has a zero dimension ({crop_w}x{crop_h})"
        ))
    })?;
    let pad_w = after_crop.width().max(target.width());
    let pad_h = after_crop.height().max(target.height());
    let needs_pad = pad_w > after_crop.width() || pad_h > after_crop.height();

    let pad = if needs_pad {
        Some(Pad::centered(after_crop, pad_w, pad_h))
    } else {
        None
    };

    let plan = match (crop, pad) {
        (None, None) => TransformPlan::None,
        (Some(c), None) => TransformPlan::CropOnly(c),
        (None, Some(p)) => TransformPlan::PadOnly(p),
        (Some(c), Some(p)) => TransformPlan::CropThenPad(c, p),
    };

    check_plan(observed, target, &plan)?;
    log::debug!("Planned {plan} for {observed} -> {target}");
    Ok(plan)
}

/// Asserts the plan's geometric guarantees. A failure here means the
/// planner itself is wrong.
fn check_plan(observed: Resolution, target: Resolution, plan: &TransformPlan) -> CoreResult<()> {
    let mut current = (observed.width(), observed.height());

    if let Some(crop) = plan.crop() {
        if crop.width == 0 || crop.height == 0 {
            return Err(CoreError::InvalidPlan(format!(
                "non-positive crop {}x{} for {observed} -> {target}",
                crop.width, crop.height
            )));
        }
        if crop.width > current.0 || crop.height > current.1 {
            return Err(CoreError::InvalidPlan(format!(
                "crop {}x{} enlarges {observed}",
                crop.width, crop.height
            )));
        }
        current = (crop.width, crop.height);
    }

    if let Some(pad) = plan.pad() {
        if pad.width == 0 || pad.height == 0 {
            return Err(CoreError::InvalidPlan(format!(
                "non-positive pad {}x{} for {observed} -> {target}",
                pad.width, pad.height
            )));
        }
        if pad.width < current.0 || pad.height < current.1 {
            return Err(CoreError::InvalidPlan(format!(
                "pad {}x{} shrinks {}x{}",
                pad.width, pad.height, current.0, current.1
            )));
        }
        current = (pad.width, pad.height);
    }

    if current != (target.width(), target.height()) {
        return Err(CoreError::InvalidPlan(format!(
            "plan for {observed} ends at {}x{} instead of {target}",
            current.0, current.1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StandardCatalog;

    fn res(w: u32, h: u32) -> Resolution {
        Resolution::new(w, h).unwrap()
    }

    #[test]
    fn test_identity_is_empty() {
        for entry in StandardCatalog::default().iter() {
            assert_eq!(plan(*entry, *entry).unwrap(), TransformPlan::None);
        }
    }

    #[test]
    fn test_pad_width_only() {
        let plan = plan(res(1918, 1080), res(1920, 1080)).unwrap();
        assert_eq!(
            plan,
            TransformPlan::PadOnly(Pad { width: 1920, height: 1080, x: 1, y: 0 })
        );
    }

    #[test]
    fn test_crop_both_axes() {
        let plan = plan(res(2558, 1438), res(1920, 1080)).unwrap();
        assert_eq!(
            plan,
            TransformPlan::CropOnly(Crop { width: 1920, height: 1080, x: 319, y: 179 })
        );
    }

    #[test]
    fn test_pad_height_only() {
        let plan = plan(res(854, 476), res(854, 480)).unwrap();
        assert_eq!(
            plan,
            TransformPlan::PadOnly(Pad { width: 854, height: 480, x: 0, y: 2 })
        );
    }

    #[test]
    fn test_crop_then_pad() {
        // 642x358 -> 640x360: width too large, height too small.
        let plan = plan(res(642, 358), res(640, 360)).unwrap();
        assert_eq!(
            plan,
            TransformPlan::CropThenPad(
                Crop { width: 640, height: 358, x: 1, y: 0 },
                Pad { width: 640, height: 360, x: 0, y: 1 },
            )
        );
    }

    #[test]
    fn test_output_always_matches_target() {
        let catalog = StandardCatalog::default();
        let observed_sizes = [
            (1, 1),
            (2, 4000),
            (4000, 2),
            (854, 476),
            (642, 358),
            (1250, 720),
            (1918, 1080),
            (2558, 1438),
            (3838, 2158),
            (1921, 1079),
        ];

        for &(w, h) in &observed_sizes {
            let observed = res(w, h);
            for target in catalog.iter() {
                let plan = plan(observed, *target).unwrap();
                assert_eq!(
                    plan.output_size(observed),
                    (target.width(), target.height()),
                    "{observed} -> {target} via {plan}"
                );

                if let Some(crop) = plan.crop() {
                    assert!(crop.width <= observed.width() && crop.height <= observed.height());
                    assert!(crop.width >= target.width().min(observed.width()));
                }
                if let Some(pad) = plan.pad() {
                    let (cw, ch) = plan
                        .crop()
                        .map_or((observed.width(), observed.height()), |c| (c.width, c.height));
                    assert!(pad.width >= cw && pad.height >= ch);
                    assert!(pad.x + cw <= pad.width && pad.y + ch <= pad.height);
                }
            }
        }
    }

    #[test]
    fn test_check_plan_rejects_wrong_output() {
        let bogus = TransformPlan::PadOnly(Pad { width: 1920, height: 1080, x: 0, y: 0 });
        assert!(matches!(
            check_plan(res(1280, 720), res(1280, 720), &bogus),
            Err(CoreError::InvalidPlan(_))
        ));

        let zero_crop = TransformPlan::CropOnly(Crop { width: 0, height: 720, x: 0, y: 0 });
        assert!(matches!(
            check_plan(res(1920, 1080), res(1280, 720), &zero_crop),
            Err(CoreError::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(TransformPlan::None.to_string(), "pass-through");
        let plan = plan(res(642, 358), res(640, 360)).unwrap();
        assert_eq!(plan.to_string(), "crop 640x358 then pad 640x360");
    }
}
