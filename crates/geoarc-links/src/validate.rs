use geoarc_core::error::{GeoArcError, Result};
use geoarc_core::traits::Validate;

use crate::registry::LinkRegistry;
use crate::types::LifecycleState;

impl Validate for LinkRegistry {
    /// Check that the endpoint index, groups, and markers agree with each
    /// other.
    fn validate(&self) -> Result<()> {
        for (key, &group_id) in &self.index {
            let group = self.groups.get(group_id).ok_or_else(|| {
                GeoArcError::Integrity(format!("index points at released group {:?}", group_id))
            })?;
            if group.key != *key {
                return Err(GeoArcError::Integrity(format!(
                    "group {:?} indexed under a foreign key",
                    group_id
                )));
            }
            if group.fading {
                return Err(GeoArcError::Integrity(format!(
                    "fading group {:?} is still mergeable",
                    group_id
                )));
            }
        }

        for (group_id, group) in &self.groups {
            if !group.fading {
                if self.index.get(&group.key) != Some(&group_id) {
                    return Err(GeoArcError::Integrity(format!(
                        "active group {:?} missing from index",
                        group_id
                    )));
                }
                let live = group
                    .markers
                    .iter()
                    .filter(|&&m| self.markers.get(m).is_some_and(|m| m.state.is_live()))
                    .count();
                if live == 0 {
                    return Err(GeoArcError::Integrity(format!(
                        "active group {:?} has no live marker",
                        group_id
                    )));
                }
            }
            if !(0.0..=1.0).contains(&group.curve.opacity) {
                return Err(GeoArcError::Integrity(format!(
                    "curve opacity {} out of range in group {:?}",
                    group.curve.opacity, group_id
                )));
            }
            for &marker_id in &group.markers {
                let marker = self.markers.get(marker_id).ok_or_else(|| {
                    GeoArcError::Integrity(format!(
                        "group {:?} lists released marker {:?}",
                        group_id, marker_id
                    ))
                })?;
                if marker.group != group_id {
                    return Err(GeoArcError::Integrity(format!(
                        "marker {:?} points at another group",
                        marker_id
                    )));
                }
            }
        }

        for (marker_id, marker) in &self.markers {
            let group = self.groups.get(marker.group).ok_or_else(|| {
                GeoArcError::Integrity(format!("marker {:?} has no group", marker_id))
            })?;
            if !group.markers.contains(&marker_id) {
                return Err(GeoArcError::Integrity(format!(
                    "marker {:?} not listed by its group",
                    marker_id
                )));
            }
            if marker.state == LifecycleState::Removed {
                return Err(GeoArcError::Integrity(format!(
                    "removed marker {:?} still stored",
                    marker_id
                )));
            }
            if !(0.0..=1.0).contains(&marker.opacity) {
                return Err(GeoArcError::Integrity(format!(
                    "marker {:?} opacity {} out of range",
                    marker_id, marker.opacity
                )));
            }
        }

        Ok(())
    }
}
