//! Rank-bucket color assignment.
//!
//! Rows sorted ascending by value are divided into equal-sized rank buckets,
//! one per palette color. Binning is rank-based rather than value-based:
//! each bucket holds the same number of regions, so the legend reads as a
//! quantile scale. Ties take no special handling beyond the stable sort
//! order of the input.

use geojson::JsonValue;

use super::palette::Rgb;
use crate::error::{Result, SnowmapError};
use crate::join::{JoinedCollection, JoinedRegion};
use crate::survey::Scale;

/// A region annotated with its bucket and color.
#[derive(Debug, Clone)]
pub struct ColoredRegion {
    pub region: JoinedRegion,
    /// Rank bucket in `[0, n_colors - 1]`
    pub bucket: usize,
    pub color: Rgb,
}

/// The color-bucketed collection, ready for layer construction.
#[derive(Debug, Clone)]
pub struct ColoredCollection {
    pub scale: Scale,
    pub attribute: String,
    pub crs: Option<JsonValue>,
    pub regions: Vec<ColoredRegion>,
}

impl ColoredCollection {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Smallest value in the collection, if any rows exist
    pub fn min_value(&self) -> Option<u64> {
        self.regions
            .iter()
            .filter_map(|r| r.region.value)
            .min()
    }

    /// Largest value in the collection, if any rows exist
    pub fn max_value(&self) -> Option<u64> {
        self.regions
            .iter()
            .filter_map(|r| r.region.value)
            .max()
    }
}

/// Assign each row of a sorted-ascending collection a palette color by rank.
///
/// Row `i` of `m` rows lands in bucket `floor(i / (m / n))`; the clamp to
/// `n - 1` guards the float-division edge at the tail. An empty collection
/// buckets to an empty result.
pub fn bucket_colors(collection: JoinedCollection, palette: &[Rgb]) -> Result<ColoredCollection> {
    if palette.is_empty() {
        return Err(SnowmapError::InvalidParameter {
            param: "palette".to_string(),
            message: "Cannot bucket with an empty palette".to_string(),
        });
    }

    let total = collection.regions.len();
    let n_colors = palette.len();

    let regions = collection
        .regions
        .into_iter()
        .enumerate()
        .map(|(rank, region)| {
            let bucket = bucket_index(rank, total, n_colors);
            ColoredRegion {
                region,
                bucket,
                color: palette[bucket],
            }
        })
        .collect();

    Ok(ColoredCollection {
        scale: collection.scale,
        attribute: collection.attribute,
        crs: collection.crs,
        regions,
    })
}

/// Bucket for one rank: `floor(rank / (total / n_colors))`, clamped.
fn bucket_index(rank: usize, total: usize, n_colors: usize) -> usize {
    let index = (rank as f64 / (total as f64 / n_colors as f64)) as usize;
    index.min(n_colors - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Geometry, JsonObject, Value};

    fn sorted_collection(values: Vec<u64>) -> JoinedCollection {
        let regions = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| JoinedRegion {
                key: Some(format!("R{:02}", i)),
                geometry: Geometry::new(Value::Point(vec![0.0, 0.0])),
                properties: JsonObject::new(),
                value: Some(value),
            })
            .collect();
        JoinedCollection {
            scale: Scale::State,
            attribute: "Female".to_string(),
            crs: None,
            regions,
        }
    }

    fn gray_palette(n: usize) -> Vec<Rgb> {
        (0..n).map(|i| [i as u8, i as u8, i as u8]).collect()
    }

    #[test]
    fn test_equal_buckets_when_divisible() {
        // 80 rows over 8 colors: rows 0-9 in bucket 0, rows 70-79 in bucket 7
        let collection = sorted_collection((0..80).collect());
        let colored = bucket_colors(collection, &gray_palette(8)).unwrap();

        assert!(colored.regions[..10].iter().all(|r| r.bucket == 0));
        assert!(colored.regions[70..].iter().all(|r| r.bucket == 7));
        assert!(colored.regions.iter().all(|r| r.bucket < 8));

        for bucket in 0..8 {
            let size = colored.regions.iter().filter(|r| r.bucket == bucket).count();
            assert_eq!(size, 10);
        }
    }

    #[test]
    fn test_bucket_bounds_when_not_divisible() {
        let collection = sorted_collection((0..53).collect());
        let colored = bucket_colors(collection, &gray_palette(8)).unwrap();

        assert!(colored.regions.iter().all(|r| r.bucket < 8));
        assert_eq!(colored.regions.last().unwrap().bucket, 7);
    }

    #[test]
    fn test_bucket_is_monotonic_in_sort_order() {
        let collection = sorted_collection((0..37).collect());
        let colored = bucket_colors(collection, &gray_palette(5)).unwrap();

        let buckets: Vec<usize> = colored.regions.iter().map(|r| r.bucket).collect();
        assert!(buckets.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_fewer_rows_than_colors() {
        let collection = sorted_collection(vec![5, 9, 12]);
        let colored = bucket_colors(collection, &gray_palette(8)).unwrap();

        assert_eq!(colored.len(), 3);
        assert!(colored.regions.iter().all(|r| r.bucket < 8));
    }

    #[test]
    fn test_empty_collection_is_a_noop() {
        let collection = sorted_collection(vec![]);
        let colored = bucket_colors(collection, &gray_palette(8)).unwrap();

        assert!(colored.is_empty());
        assert_eq!(colored.min_value(), None);
        assert_eq!(colored.max_value(), None);
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let collection = sorted_collection(vec![1, 2]);
        assert!(bucket_colors(collection, &[]).is_err());
    }

    #[test]
    fn test_colors_follow_buckets() {
        let collection = sorted_collection((0..16).collect());
        let palette = gray_palette(4);
        let colored = bucket_colors(collection, &palette).unwrap();

        for region in &colored.regions {
            assert_eq!(region.color, palette[region.bucket]);
        }
    }

    #[test]
    fn test_value_range() {
        let collection = sorted_collection(vec![3, 8, 21]);
        let colored = bucket_colors(collection, &gray_palette(2)).unwrap();

        assert_eq!(colored.min_value(), Some(3));
        assert_eq!(colored.max_value(), Some(21));
    }
}
