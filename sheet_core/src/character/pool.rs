//! ResourcePool - consumable dice reserve bounded by bestiality

use serde::{Deserialize, Deserializer, Serialize};

/// Per-character dice reserve, spent once per skill roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourcePool {
    #[serde(default)]
    pub max: i32,
    /// `None` when the host left a missing or non-numeric value
    #[serde(default, deserialize_with = "lenient_count")]
    pub current: Option<i32>,
}

/// What `normalize` had to do to bring `current` back in range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolAdjustment {
    Unchanged,
    /// Was invalid, snapped to max
    Reset,
    /// Exceeded max, snapped down
    CappedToMax,
    /// Was negative, raised to zero
    RaisedToZero,
}

impl ResourcePool {
    pub fn new(max: i32) -> Self {
        ResourcePool {
            max,
            current: Some(max),
        }
    }

    /// Points available to spend; an invalid value counts as none
    pub fn available(&self) -> i32 {
        self.current.unwrap_or(0).max(0)
    }

    /// Set a new max and clamp current into `[0, max]`. Never raises a value
    /// that is already in range.
    pub fn normalize(&mut self, max: i32) -> PoolAdjustment {
        self.max = max.max(0);
        let (current, adjustment) = match self.current {
            None => (self.max, PoolAdjustment::Reset),
            Some(c) if c > self.max => (self.max, PoolAdjustment::CappedToMax),
            Some(c) if c < 0 => (0, PoolAdjustment::RaisedToZero),
            Some(c) => (c, PoolAdjustment::Unchanged),
        };
        self.current = Some(current);
        adjustment
    }

    /// Spend one point, floored at zero. Returns the remaining points.
    pub fn spend(&mut self) -> i32 {
        let remaining = (self.available() - 1).max(0);
        self.current = Some(remaining);
        remaining
    }

    /// Rest: refill to max
    pub fn refill(&mut self) {
        self.current = Some(self.max);
    }
}

/// Accept integers, floats and numeric strings; anything else is invalid
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
            .map(saturate),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok().map(saturate),
        _ => None,
    }))
}

fn saturate(n: i64) -> i32 {
    n.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_from(json: &str) -> ResourcePool {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_lenient_current() {
        assert_eq!(pool_from(r#"{"max": 7, "current": 3}"#).current, Some(3));
        assert_eq!(pool_from(r#"{"max": 7, "current": "5"}"#).current, Some(5));
        assert_eq!(pool_from(r#"{"max": 7, "current": 2.9}"#).current, Some(2));
        assert_eq!(pool_from(r#"{"max": 7, "current": "lots"}"#).current, None);
        assert_eq!(pool_from(r#"{"max": 7, "current": null}"#).current, None);
        assert_eq!(pool_from(r#"{"max": 7}"#).current, None);
    }

    #[test]
    fn test_normalize_invalid_snaps_to_max() {
        let mut pool = ResourcePool { max: 3, current: None };
        assert_eq!(pool.normalize(7), PoolAdjustment::Reset);
        assert_eq!(pool.current, Some(7));
    }

    #[test]
    fn test_normalize_never_raises_in_range() {
        let mut pool = ResourcePool { max: 7, current: Some(2) };
        assert_eq!(pool.normalize(8), PoolAdjustment::Unchanged);
        assert_eq!(pool.current, Some(2));
    }

    #[test]
    fn test_normalize_caps_and_floors() {
        let mut over = ResourcePool { max: 7, current: Some(9) };
        assert_eq!(over.normalize(5), PoolAdjustment::CappedToMax);
        assert_eq!(over.current, Some(5));

        let mut negative = ResourcePool { max: 7, current: Some(-4) };
        assert_eq!(negative.normalize(7), PoolAdjustment::RaisedToZero);
        assert_eq!(negative.current, Some(0));
    }

    #[test]
    fn test_spend_floors_at_zero() {
        let mut pool = ResourcePool { max: 7, current: Some(1) };
        assert_eq!(pool.spend(), 0);
        assert_eq!(pool.spend(), 0);
        assert_eq!(pool.current, Some(0));
    }

    #[test]
    fn test_refill() {
        let mut pool = ResourcePool { max: 7, current: Some(0) };
        pool.refill();
        assert_eq!(pool.available(), 7);
    }
}
