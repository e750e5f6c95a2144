//! Gradient-voting Hough circle detection.
//!
//! For each pixel with a strong gradient, votes are cast along the gradient
//! direction at distances in [r_min, r_max]. Approximately circular contours
//! produce peaks in the center accumulator because gradient vectors from the
//! contour converge radially. Radii are recovered afterwards from an
//! edge-distance histogram per accepted center, which keeps the accumulator
//! two-dimensional.

use image::GrayImage;

use crate::error::{Error, Result};

/// Scharr kernel weight sum; divides raw gradients back to intensity units
/// so `edge_threshold` is expressed per pixel step.
const SCHARR_NORM: f32 = 16.0;

/// Configuration for circle detection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CircleParams {
    /// Inverse accumulator resolution: one accumulator cell spans `dp`
    /// image pixels.
    pub dp: f32,
    /// Minimum distance between accepted circle centers (pixels).
    pub min_dist: f32,
    /// Gradient magnitude threshold for edge pixels (intensity units).
    pub edge_threshold: f32,
    /// Minimum accumulator vote count for a candidate center.
    pub accum_threshold: f32,
    /// Minimum radius (pixels).
    pub r_min: u32,
    /// Maximum radius (pixels).
    pub r_max: u32,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            dp: 1.2,
            min_dist: 30.0,
            edge_threshold: 50.0,
            accum_threshold: 30.0,
            r_min: 20,
            r_max: 50,
        }
    }
}

impl CircleParams {
    /// Reject malformed parameter sets before any pixel work happens.
    pub fn validate(&self) -> Result<()> {
        if !(self.dp.is_finite() && self.dp > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "dp must be positive, got {}",
                self.dp
            )));
        }
        if !(self.min_dist.is_finite() && self.min_dist >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "min_dist must be non-negative, got {}",
                self.min_dist
            )));
        }
        if !(self.edge_threshold.is_finite() && self.edge_threshold > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "edge_threshold must be positive, got {}",
                self.edge_threshold
            )));
        }
        if !(self.accum_threshold.is_finite() && self.accum_threshold > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "accum_threshold must be positive, got {}",
                self.accum_threshold
            )));
        }
        if self.r_max < self.r_min {
            return Err(Error::InvalidParameter(format!(
                "r_max ({}) < r_min ({})",
                self.r_max, self.r_min
            )));
        }
        Ok(())
    }
}

/// A detected circle with its accumulator vote score.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Center x coordinate (pixels).
    pub x: i32,
    /// Center y coordinate (pixels).
    pub y: i32,
    /// Radius (pixels), within the configured [r_min, r_max].
    pub radius: u32,
    /// Accumulator peak score.
    pub score: f32,
}

/// An edge pixel with its normalized gradient direction.
struct EdgePixel {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

/// Deposit a vote into the accumulator using bilinear interpolation.
#[inline]
fn bilinear_add_in_bounds(accum: &mut [f32], stride: usize, x: f32, y: f32, weight: f32) {
    let x0 = x as usize;
    let y0 = y as usize;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;
    let base = y0 * stride + x0;
    accum[base] += weight * (1.0 - fx) * (1.0 - fy);
    accum[base + 1] += weight * fx * (1.0 - fy);
    accum[base + stride] += weight * (1.0 - fx) * fy;
    accum[base + stride + 1] += weight * fx * fy;
}

/// Collect pixels whose gradient magnitude exceeds the edge threshold.
fn collect_edges(gray: &GrayImage, edge_threshold: f32) -> Vec<EdgePixel> {
    let gx = imageproc::gradients::horizontal_scharr(gray);
    let gy = imageproc::gradients::vertical_scharr(gray);
    let gx_raw = gx.as_raw();
    let gy_raw = gy.as_raw();

    let threshold = edge_threshold * SCHARR_NORM;
    let threshold_sq = threshold * threshold;
    let w = gray.width() as usize;

    let mut edges = Vec::new();
    for (idx, (&gxv, &gyv)) in gx_raw.iter().zip(gy_raw.iter()).enumerate() {
        let gxv = gxv as f32;
        let gyv = gyv as f32;
        let mag_sq = gxv * gxv + gyv * gyv;
        if mag_sq < threshold_sq {
            continue;
        }
        let inv_mag = 1.0 / mag_sq.sqrt();
        edges.push(EdgePixel {
            x: (idx % w) as f32,
            y: (idx / w) as f32,
            dx: gxv * inv_mag,
            dy: gyv * inv_mag,
        });
    }
    edges
}

/// A candidate accumulator peak prior to non-maximum suppression.
struct Peak {
    idx: usize,
    cx: f32,
    cy: f32,
    votes: f32,
}

/// Extract accumulator cells above `accum_threshold` that are local maxima
/// over their 8-neighborhood. Ties go to the lower scan index so the result
/// never depends on traversal order.
fn find_peaks(accum: &[f32], aw: usize, ah: usize, dp: f32, accum_threshold: f32) -> Vec<Peak> {
    let mut peaks = Vec::new();
    for ay in 0..ah {
        for ax in 0..aw {
            let idx = ay * aw + ax;
            let val = accum[idx];
            if val < accum_threshold {
                continue;
            }
            let mut is_max = true;
            'neighbors: for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = ax as i64 + dx;
                    let ny = ay as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= aw as i64 || ny >= ah as i64 {
                        continue;
                    }
                    let nidx = ny as usize * aw + nx as usize;
                    if accum[nidx] > val || (accum[nidx] == val && nidx < idx) {
                        is_max = false;
                        break 'neighbors;
                    }
                }
            }
            if is_max {
                peaks.push(Peak {
                    idx,
                    cx: ax as f32 * dp,
                    cy: ay as f32 * dp,
                    votes: val,
                });
            }
        }
    }
    peaks
}

/// Suppress peaks within `min_dist` of an already kept, higher-voted peak.
///
/// Expects `peaks` sorted by vote descending so the strongest candidate in a
/// neighborhood always wins.
fn suppress_close_peaks(peaks: &[Peak], min_dist: f32) -> Vec<usize> {
    let d2 = min_dist * min_dist;
    let mut keep: Vec<usize> = Vec::new();
    for (i, p) in peaks.iter().enumerate() {
        let close = keep.iter().any(|&k| {
            let dx = peaks[k].cx - p.cx;
            let dy = peaks[k].cy - p.cy;
            dx * dx + dy * dy < d2
        });
        if !close {
            keep.push(i);
        }
    }
    keep
}

/// Histogram edge-pixel distances from `(cx, cy)` and return the fullest
/// radius bin in [r_min, r_max], or None when no edge supports the center.
fn estimate_radius(edges: &[EdgePixel], cx: f32, cy: f32, r_min: u32, r_max: u32) -> Option<u32> {
    let mut hist = vec![0u32; (r_max - r_min + 1) as usize];
    for e in edges {
        let dx = e.x - cx;
        let dy = e.y - cy;
        let r = (dx * dx + dy * dy).sqrt().round() as i64;
        if r >= r_min as i64 && r <= r_max as i64 {
            hist[(r - r_min as i64) as usize] += 1;
        }
    }
    let (bin, &count) = hist
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?;
    (count > 0).then(|| r_min + bin as u32)
}

/// Detect circle centers and radii in a grayscale image.
///
/// Returns circles sorted by accumulator vote (highest first, ties by
/// accumulator scan order). An empty or gradient-free image yields an empty
/// list; malformed parameters yield [`Error::InvalidParameter`].
pub fn find_circles(gray: &GrayImage, params: &CircleParams) -> Result<Vec<Circle>> {
    params.validate()?;

    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return Ok(Vec::new());
    }

    let edges = collect_edges(gray, params.edge_threshold);
    tracing::debug!(n_edges = edges.len(), "edge extraction done");
    if edges.is_empty() {
        return Ok(Vec::new());
    }

    // Vote accumulation at dp resolution
    let aw = ((w as f32 / params.dp).ceil() as usize).max(2);
    let ah = ((h as f32 / params.dp).ceil() as usize).max(2);
    let mut accum = vec![0.0f32; aw * ah];
    let x_limit = (aw - 1) as f32;
    let y_limit = (ah - 1) as f32;
    let inv_dp = 1.0 / params.dp;

    for e in &edges {
        // Vote along +gradient and -gradient directions: contour polarity
        // (bright-on-dark vs dark-on-bright) is unknown.
        for r in params.r_min..=params.r_max {
            let r = r as f32;
            let vx_pos = (e.x + e.dx * r) * inv_dp;
            let vy_pos = (e.y + e.dy * r) * inv_dp;
            if vx_pos >= 0.0 && vx_pos < x_limit && vy_pos >= 0.0 && vy_pos < y_limit {
                bilinear_add_in_bounds(&mut accum, aw, vx_pos, vy_pos, 1.0);
            }

            let vx_neg = (e.x - e.dx * r) * inv_dp;
            let vy_neg = (e.y - e.dy * r) * inv_dp;
            if vx_neg >= 0.0 && vx_neg < x_limit && vy_neg >= 0.0 && vy_neg < y_limit {
                bilinear_add_in_bounds(&mut accum, aw, vx_neg, vy_neg, 1.0);
            }
        }
    }

    let mut peaks = find_peaks(&accum, aw, ah, params.dp, params.accum_threshold);
    peaks.sort_by(|a, b| {
        b.votes
            .partial_cmp(&a.votes)
            .expect("accumulator votes are finite")
            .then(a.idx.cmp(&b.idx))
    });
    let kept = suppress_close_peaks(&peaks, params.min_dist);
    tracing::debug!(
        n_peaks = peaks.len(),
        n_kept = kept.len(),
        "peak extraction done"
    );

    let mut circles = Vec::with_capacity(kept.len());
    for i in kept {
        let p = &peaks[i];
        if let Some(radius) = estimate_radius(&edges, p.cx, p.cy, params.r_min, params.r_max) {
            circles.push(Circle {
                x: p.cx.round() as i32,
                y: p.cy.round() as i32,
                radius,
                score: p.votes,
            });
        }
    }
    Ok(circles)
}
