//! Multi-plane RANSAC segmentation
//!
//! Planes are extracted one at a time. Each search runs a fixed number of
//! RANSAC trials on the working set (the points not yet claimed by any plane),
//! refits the best trial's consensus set, classifies the full input against
//! the refined plane and removes the newly claimed points from the working set.

use crate::classification::{classify, count_inliers};
use crate::estimation::{estimate_plane, estimate_plane_from_records, MIN_PLANE_POINTS};
use crate::partition::partition;
use crate::sampling::ConsensusSampler;
use planecrate_core::{Error, InlierMask, Membership, Plane, Point3f, PointSet, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for [`MultiPlaneSegmenter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Points drawn per RANSAC trial (at least 3)
    pub sample_size: usize,
    /// Points strictly closer than this to a plane are its inliers
    pub distance_threshold: f32,
    /// RANSAC trials per plane
    pub iterations: usize,
    /// Number of planes to extract
    pub plane_count: usize,
    /// Seed for reproducible runs; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Evaluate the trials of one search on the rayon thread pool
    pub parallel: bool,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sample_size: 4,
            distance_threshold: 0.05,
            iterations: 500,
            plane_count: 3,
            seed: None,
            parallel: true,
        }
    }
}

impl SegmentationConfig {
    /// Check every parameter, returning [`Error::InvalidConfig`] on the first bad one
    pub fn validate(&self) -> Result<()> {
        if self.sample_size < MIN_PLANE_POINTS {
            return Err(Error::InvalidConfig(format!(
                "sample size must be at least {MIN_PLANE_POINTS}, got {}",
                self.sample_size
            )));
        }

        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "distance threshold must be positive, got {}",
                self.distance_threshold
            )));
        }

        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iterations must be positive".to_string()));
        }

        if self.plane_count == 0 {
            return Err(Error::InvalidConfig("plane count must be positive".to_string()));
        }

        Ok(())
    }
}

/// One detected plane
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationResult {
    /// Zero-based position of this plane in detection order
    pub index: usize,
    /// Plane refitted on the consensus set
    pub plane: Plane,
    /// Points of the full input classified as inliers of this plane
    pub inliers: PointSet,
    /// Points of the full input not claimed by this or any earlier plane
    pub outliers: PointSet,
    /// Inliers of the best trial within the working set
    pub consensus_size: usize,
    /// Size of `inliers`
    pub plane_inlier_count: usize,
    /// Points claimed by this and all earlier planes
    pub total_inlier_count: usize,
}

/// How a segmentation run ended
#[derive(Debug)]
pub enum Termination {
    /// Every requested plane was found
    Completed,
    /// The search for plane `plane_index` failed; earlier planes are kept
    StoppedEarly { plane_index: usize, reason: Error },
}

/// Output of a full segmentation run
#[derive(Debug)]
pub struct Segmentation {
    pub planes: Vec<SegmentationResult>,
    /// Points not claimed by any plane
    pub residual: PointSet,
    pub termination: Termination,
}

impl Segmentation {
    pub fn is_complete(&self) -> bool {
        matches!(self.termination, Termination::Completed)
    }
}

/// State carried between plane searches.
///
/// `global_mask` is aligned to the full input and only gains inliers;
/// `working` is always the full input minus the points in `global_mask`.
#[derive(Debug, Clone)]
pub struct SegmentationState {
    global_mask: InlierMask,
    working: PointSet,
    planes_found: usize,
}

impl SegmentationState {
    /// Fresh state for `points`: nothing claimed, everything still to search
    pub fn new(points: &PointSet) -> Self {
        Self {
            global_mask: InlierMask::new(points.len()),
            working: points.clone(),
            planes_found: 0,
        }
    }

    pub fn global_mask(&self) -> &InlierMask {
        &self.global_mask
    }

    pub fn working(&self) -> &PointSet {
        &self.working
    }

    pub fn planes_found(&self) -> usize {
        self.planes_found
    }

    pub fn into_working(self) -> PointSet {
        self.working
    }
}

/// Best RANSAC trial of one search
#[derive(Debug, Clone, Copy)]
struct Candidate {
    trial: usize,
    plane: Plane,
    inlier_count: usize,
}

impl Candidate {
    /// Higher inlier count wins; ties go to the earlier trial
    fn better(a: Candidate, b: Candidate) -> Candidate {
        if b.inlier_count > a.inlier_count
            || (b.inlier_count == a.inlier_count && b.trial < a.trial)
        {
            b
        } else {
            a
        }
    }
}

/// Iterative multi-plane RANSAC segmenter
#[derive(Debug, Clone)]
pub struct MultiPlaneSegmenter {
    config: SegmentationConfig,
    sampler: ConsensusSampler,
}

impl MultiPlaneSegmenter {
    /// Create a segmenter, validating `config`
    pub fn new(config: SegmentationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sampler: ConsensusSampler::default(),
        })
    }

    /// Replace the sampler used to draw trial samples
    pub fn with_sampler(mut self, sampler: ConsensusSampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Segment `points` with a generator seeded from the configuration
    pub fn segment(&self, points: &PointSet) -> Segmentation {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.segment_with_rng(points, &mut rng)
    }

    /// Segment `points`, drawing all randomness from `rng`.
    ///
    /// A failed plane search ends the run early; the planes found before it
    /// are returned and the failure is recorded in [`Segmentation::termination`].
    pub fn segment_with_rng<R: Rng + ?Sized>(
        &self,
        points: &PointSet,
        rng: &mut R,
    ) -> Segmentation {
        let mut state = SegmentationState::new(points);
        let mut planes = Vec::with_capacity(self.config.plane_count);
        let mut termination = Termination::Completed;

        tracing::debug!(
            points = points.len(),
            planes = self.config.plane_count,
            "starting multi-plane segmentation"
        );

        for plane_index in 0..self.config.plane_count {
            match self.segment_next(points, &mut state, rng) {
                Ok(result) => planes.push(result),
                Err(reason) => {
                    tracing::warn!(
                        plane = plane_index,
                        error = %reason,
                        "stopping plane search early"
                    );
                    termination = Termination::StoppedEarly { plane_index, reason };
                    break;
                }
            }
        }

        Segmentation {
            planes,
            residual: state.into_working(),
            termination,
        }
    }

    /// Find the next plane and advance `state`.
    ///
    /// `points` must be the full input `state` was created for. On error the
    /// state is left unchanged.
    pub fn segment_next<R: Rng + ?Sized>(
        &self,
        points: &PointSet,
        state: &mut SegmentationState,
        rng: &mut R,
    ) -> Result<SegmentationResult> {
        if state.global_mask.len() != points.len() {
            return Err(Error::MaskSizeMismatch {
                mask_len: state.global_mask.len(),
                set_len: points.len(),
            });
        }

        let threshold = self.config.distance_threshold;
        let working = &state.working;
        if working.len() < self.config.sample_size {
            return Err(Error::InsufficientRemainingPoints {
                required: self.config.sample_size,
                remaining: working.len(),
            });
        }

        let best = self.search_consensus(working, rng)?;

        // Refit on the consensus set, which lives in the working set
        let (consensus_mask, consensus_size) = classify(working, &best.plane, threshold);
        let consensus = partition(working, &consensus_mask, Membership::Inliers)?;
        let plane = estimate_plane_from_records(&consensus)?;

        let (reference_mask, plane_inlier_count) = classify(points, &plane, threshold);
        let mut global_mask = state.global_mask.clone();
        global_mask.union_with(&reference_mask)?;

        let outliers = partition(points, &global_mask, Membership::Outliers)?;
        let inliers = partition(points, &reference_mask, Membership::Inliers)?;

        let index = state.planes_found;
        let total_inlier_count = global_mask.count();

        tracing::debug!(
            plane = index,
            trial = best.trial,
            consensus = consensus_size,
            inliers = plane_inlier_count,
            total = total_inlier_count,
            remaining = outliers.len(),
            "plane found"
        );

        state.global_mask = global_mask;
        state.working = outliers.clone();
        state.planes_found += 1;

        Ok(SegmentationResult {
            index,
            plane,
            inliers,
            outliers,
            consensus_size,
            plane_inlier_count,
            total_inlier_count,
        })
    }

    /// Run the RANSAC trials of one search on `working`
    fn search_consensus<R: Rng + ?Sized>(
        &self,
        working: &PointSet,
        rng: &mut R,
    ) -> Result<Candidate> {
        let threshold = self.config.distance_threshold;

        // Samples are drawn up front from the single generator so parallel and
        // sequential runs see the same trials.
        let samples = (0..self.config.iterations)
            .map(|_| self.sampler.sample(self.config.sample_size, working.len(), rng))
            .collect::<Result<Vec<_>>>()?;

        let evaluate = |(trial, indices): (usize, &Vec<usize>)| -> Option<Candidate> {
            let sample: Vec<Point3f> = indices.iter().map(|&i| working[i].position).collect();
            match estimate_plane(&sample) {
                Ok(plane) => Some(Candidate {
                    trial,
                    plane,
                    inlier_count: count_inliers(working, &plane, threshold),
                }),
                Err(err) => {
                    tracing::trace!(trial, error = %err, "skipping degenerate sample");
                    None
                }
            }
        };

        let best = if self.config.parallel {
            samples
                .par_iter()
                .enumerate()
                .filter_map(evaluate)
                .reduce_with(Candidate::better)
        } else {
            samples
                .iter()
                .enumerate()
                .filter_map(evaluate)
                .reduce(Candidate::better)
        };

        best.ok_or(Error::ConsensusNotFound {
            trials: self.config.iterations,
        })
    }
}

/// Segment `points` into up to `config.plane_count` planes
pub fn segment_planes(points: &PointSet, config: SegmentationConfig) -> Result<Segmentation> {
    Ok(MultiPlaneSegmenter::new(config)?.segment(points))
}
