use chrono::{DateTime, Utc};

use crate::colormap::{Colormap, ColormapRange};
use crate::data::{Graph, Path};
use crate::error::ScenewireResult;
use crate::objects::Animatable;
use crate::properties::Vec3;

/// Virtual camera describing the initial view of the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    /// Where the camera sits; viewer default when absent.
    pub position: Option<Vec3>,
    /// Where the camera points; the origin when absent.
    pub target: Option<Vec3>,
}

/// Complete description of one animated event.
///
/// `graphs` and `paths` are the scene-owned data tables. Encoding never
/// mutates them: implicit data created for properties is accumulated in an
/// internal builder seeded from these lists.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub name: String,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    /// Animation start; derived from the earliest data point when absent.
    pub start_time: Option<f64>,
    /// Animation end; derived from the latest data point when absent.
    pub end_time: Option<f64>,
    /// Playback speed in time units per second.
    pub speed_ratio: f64,
    pub graphs: Vec<Graph>,
    pub paths: Vec<Path>,
    pub animatables: Vec<Animatable>,
    /// Groups viewers should hide by default.
    pub hidden_groups: Vec<String>,
    pub camera: Option<Camera>,
    /// Palette for scalar-driven colors; viridis when absent.
    pub colormap: Option<Colormap>,
    /// Explicit colormap domain; inferred from the data when absent.
    pub colormap_range: Option<ColormapRange>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            speed_ratio: 1.0,
            ..Self::default()
        }
    }

    /// Checks the scene invariants the encoder relies on. Fallible
    /// constructors already reject most bad values; this catches structs
    /// assembled by hand.
    pub fn validate(&self) -> ScenewireResult<()> {
        if let Some(Colormap::Stops(stops)) = &self.colormap {
            Colormap::from_stops(stops.clone())?;
        }
        if let Some(range) = self.colormap_range {
            ColormapRange::new(range.min(), range.max())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_plays_at_unit_speed() {
        let scene = Scene::new("test");
        assert_eq!(scene.speed_ratio, 1.0);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn validate_rejects_hand_built_empty_colormap() {
        let scene = Scene {
            colormap: Some(Colormap::Stops(Vec::new())),
            ..Scene::new("test")
        };
        assert!(scene.validate().is_err());
    }
}
