// Feature standardization carried in the model artifact

use serde::{Deserialize, Serialize};

/// Column-wise standardization: x' = (x - mean) / scale.
///
/// Parameters are fitted at training time and exported with the model so
/// inference applies exactly the same transform. Columns follow the
/// artifact's feature order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub means: Vec<f32>,
    pub scales: Vec<f32>,
}

impl StandardScaler {
    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Standardize one feature row in place.
    ///
    /// A non-positive scale (constant training column) leaves the centered
    /// value unscaled rather than dividing by zero.
    pub fn transform(&self, values: &mut [f32]) {
        for (i, value) in values.iter_mut().enumerate() {
            if i >= self.means.len() {
                break;
            }
            let centered = *value - self.means[i];
            let scale = self.scales[i];
            *value = if scale > 0.0 { centered / scale } else { centered };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardizes_values() {
        let scaler = StandardScaler {
            means: vec![10.0, 0.0],
            scales: vec![2.0, 1.0],
        };
        let mut values = [14.0, -3.0];
        scaler.transform(&mut values);
        assert_eq!(values, [2.0, -3.0]);
    }

    #[test]
    fn test_zero_scale_only_centers() {
        let scaler = StandardScaler {
            means: vec![5.0],
            scales: vec![0.0],
        };
        let mut values = [8.0];
        scaler.transform(&mut values);
        assert_eq!(values, [3.0]);
    }

    #[test]
    fn test_identity_scaler_is_noop() {
        let scaler = StandardScaler {
            means: vec![0.0; 3],
            scales: vec![1.0; 3],
        };
        let mut values = [1.5, -2.0, 0.25];
        scaler.transform(&mut values);
        assert_eq!(values, [1.5, -2.0, 0.25]);
    }
}
