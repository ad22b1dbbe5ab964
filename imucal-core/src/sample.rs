//! Raw Sensor Samples
//!
//! A `Sample` is one uncalibrated three-axis reading as the sensor reports it,
//! in integer ADC units. A `SampleSet` is the deduplicated, ordered batch a
//! calibration run works on.
//!
//! ## Sharing
//!
//! Every `Calibration` produced during a search holds the set it is scored
//! against. The samples live in one `Arc<[Sample]>`, so binding a new
//! calibration to a set is a reference-count bump, never a copy.
//!
//! ## Deduplication
//!
//! Identical readings are dropped at load time, keeping the first occurrence.
//! A sensor resting in one orientation can repeat the same reading thousands
//! of times; left in, those repeats would cost time in every score evaluation
//! and weight the fit towards that orientation.
//!
//! ```rust
//! use imucal_core::SampleSet;
//!
//! let set = SampleSet::load([[1, 2, 3], [1, 2, 3], [4, 5, 6]]);
//! assert_eq!(set.len(), 2);
//! ```

use alloc::collections::BTreeSet;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use crate::constants::AXIS_COUNT;

/// One raw three-axis reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// X axis reading
    pub x: i32,
    /// Y axis reading
    pub y: i32,
    /// Z axis reading
    pub z: i32,
}

impl Sample {
    /// Create a sample from its three components
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component along `axis` as a real number
    ///
    /// # Panics
    ///
    /// Panics if `axis >= 3`.
    pub fn axis(&self, axis: usize) -> f64 {
        f64::from(self[axis])
    }

    /// All three components as reals
    pub fn to_f64(&self) -> [f64; AXIS_COUNT] {
        [f64::from(self.x), f64::from(self.y), f64::from(self.z)]
    }
}

impl Index<usize> for Sample {
    type Output = i32;

    fn index(&self, axis: usize) -> &i32 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {}", axis),
        }
    }
}

impl From<[i32; 3]> for Sample {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(i32, i32, i32)> for Sample {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Immutable, deduplicated, ordered batch of samples
///
/// Cloning is cheap: clones share the same backing slice.
#[derive(Clone)]
pub struct SampleSet {
    samples: Arc<[Sample]>,
}

impl SampleSet {
    /// Build a set from raw readings, dropping repeats and keeping order
    pub fn load<I, S>(readings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Sample>,
    {
        let mut seen = BTreeSet::new();
        let samples: Vec<Sample> = readings
            .into_iter()
            .map(Into::into)
            .filter(|sample| seen.insert(*sample))
            .collect();

        Self { samples: samples.into() }
    }

    /// Number of distinct samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the set holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in load order
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate samples in load order
    pub fn iter(&self) -> core::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Values of one axis across all samples, in load order
    pub fn axis_values(&self, axis: usize) -> Vec<f64> {
        self.samples.iter().map(|s| s.axis(axis)).collect()
    }

    /// Evenly spaced subsample of roughly `n` samples
    ///
    /// The set is cut into consecutive slices of `len / n` samples and the
    /// first sample of each slice is kept, so the result is an ordered subset
    /// of `self` and identical across runs. With `n == 0` or `n >= len` the
    /// whole set is returned.
    pub fn regular_sample(&self, n: usize) -> SampleSet {
        if n == 0 || n >= self.len() {
            return self.clone();
        }

        let stride = (self.len() / n).max(1);
        let samples: Vec<Sample> = self.samples.iter().step_by(stride).copied().collect();
        Self { samples: samples.into() }
    }

    /// True when both sets share the same backing storage
    pub fn ptr_eq(&self, other: &SampleSet) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

impl fmt::Debug for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleSet")
            .field("len", &self.len())
            .finish()
    }
}

impl PartialEq for SampleSet {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.samples == other.samples
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = core::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<Sample>> FromIterator<S> for SampleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::load(iter)
    }
}

/// Build a deduplicated `SampleSet` from raw readings
pub fn load<I, S>(readings: I) -> SampleSet
where
    I: IntoIterator<Item = S>,
    S: Into<Sample>,
{
    SampleSet::load(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn duplicates_are_dropped() {
        let set = load([[1, 2, 3], [1, 2, 3], [4, 5, 6]]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn first_occurrence_order_is_kept() {
        let set = SampleSet::load([[4, 5, 6], [1, 2, 3], [4, 5, 6], [7, 8, 9], [1, 2, 3]]);
        assert_eq!(
            set.as_slice(),
            &[Sample::new(4, 5, 6), Sample::new(1, 2, 3), Sample::new(7, 8, 9)]
        );
    }

    #[test]
    fn axis_access() {
        let sample = Sample::new(-7, 0, 12);
        assert_eq!(sample[0], -7);
        assert_eq!(sample.axis(2), 12.0);
        assert_eq!(sample.to_f64(), [-7.0, 0.0, 12.0]);
    }

    #[test]
    #[should_panic]
    fn axis_out_of_range_panics() {
        let _ = Sample::new(1, 2, 3)[3];
    }

    #[test]
    fn axis_values_follow_load_order() {
        let set = SampleSet::load([(3, 0, 0), (1, 0, 0), (2, 0, 0)]);
        assert_eq!(set.axis_values(0), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn regular_sample_takes_first_of_each_stride() {
        let set: SampleSet = (0..10).map(|i| [i, 0, 0]).collect();

        // stride = 10 / 3 = 3 -> indices 0, 3, 6, 9
        let sub = set.regular_sample(3);
        let xs: Vec<i32> = sub.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![0, 3, 6, 9]);
    }

    #[test]
    fn regular_sample_is_a_subset() {
        let set: SampleSet = (0..1000).map(|i| [i, i * 2, -i]).collect();
        let sub = set.regular_sample(300);

        // stride = 3 -> ceil(1000 / 3)
        assert_eq!(sub.len(), 334);
        assert!(sub.iter().all(|s| set.as_slice().contains(s)));
    }

    #[test]
    fn regular_sample_of_small_set_is_the_set() {
        let set = SampleSet::load([[1, 1, 1], [2, 2, 2]]);
        assert!(set.regular_sample(300).ptr_eq(&set));
        assert!(set.regular_sample(0).ptr_eq(&set));
    }

    #[test]
    fn clones_share_storage() {
        let set = SampleSet::load([[1, 1, 1], [2, 2, 2]]);
        let other = set.clone();
        assert!(set.ptr_eq(&other));
        assert_eq!(set, other);
    }
}
