use crate::color::resolve_palette;
use crate::data::Graph;
use crate::error::{ScenewireError, ScenewireResult};
use crate::properties::Color;
use crate::wire;

/// One `(value, color)` stop of an explicit colormap.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColormapStop {
    pub value: f64,
    pub color: Color,
}

/// Palette mapping a numeric domain to colors.
///
/// Either the name of a built-in continuous palette (sampled at encode time)
/// or an explicit stop table. Stops are rescaled onto the scene's colormap
/// domain when the scene is encoded.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Colormap {
    Named(String),
    Stops(Vec<ColormapStop>),
}

impl Colormap {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Builds an explicit colormap, rejecting an empty stop table.
    pub fn from_stops(stops: Vec<ColormapStop>) -> ScenewireResult<Self> {
        if stops.is_empty() {
            return Err(ScenewireError::validation(
                "colormap must have at least one stop",
            ));
        }
        Ok(Self::Stops(stops))
    }
}

/// Explicit colormap domain override, `min < max` enforced on construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColormapRange {
    min: f64,
    max: f64,
}

impl ColormapRange {
    pub fn new(min: f64, max: f64) -> ScenewireResult<Self> {
        if !(min < max) {
            return Err(ScenewireError::validation(
                "colormap range min must be smaller than max",
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Running `(min, max)` extent of every colormap usage seen while encoding
/// animatables. The palette is only built once the accumulator is final.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DomainAccumulator {
    min: f64,
    max: f64,
}

impl Default for DomainAccumulator {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl DomainAccumulator {
    pub(crate) fn fold(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Folds the value extent of a color-driving graph. Applied on every use,
    /// whether or not table deduplication found the graph already present.
    pub(crate) fn fold_graph(&mut self, graph: &Graph) {
        for point in &graph.points {
            self.fold(point.value);
        }
    }

    /// Final domain; `(0, 0)` when nothing was folded.
    pub(crate) fn resolve(&self) -> (f64, f64) {
        if self.min > self.max {
            (0.0, 0.0)
        } else {
            (self.min, self.max)
        }
    }
}

/// Builds the wire stop table for `colormap` rescaled onto `domain`.
///
/// The last emitted stop is force-set to the domain maximum, overriding any
/// floating-point drift from the rescale arithmetic.
pub(crate) fn build_colormap(
    colormap: &Colormap,
    domain: (f64, f64),
) -> ScenewireResult<wire::ColorMap> {
    let (min_out, max_out) = domain;
    let d_out = max_out - min_out;

    let mut stops: Vec<wire::ColorStop> = match colormap {
        Colormap::Named(name) => {
            let colors = resolve_palette(name, None)?;
            let n = colors.len();
            colors
                .into_iter()
                .enumerate()
                .map(|(i, color)| wire::ColorStop {
                    value: i as f64 * d_out / n as f64 + min_out,
                    color: Some(color.into()),
                })
                .collect()
        }
        Colormap::Stops(model) => {
            if model.is_empty() {
                return Err(ScenewireError::validation(
                    "colormap must have at least one stop",
                ));
            }
            let mut sorted = model.clone();
            sorted.sort_by(|a, b| a.value.total_cmp(&b.value));
            let src_min = sorted[0].value;
            let src_max = sorted[sorted.len() - 1].value;
            let d_in = src_max - src_min;
            sorted
                .into_iter()
                .map(|stop| wire::ColorStop {
                    value: if d_in > 0.0 {
                        (stop.value - src_min) * d_out / d_in + min_out
                    } else {
                        min_out
                    },
                    color: Some(stop.color.into()),
                })
                .collect()
        }
    };

    if let Some(last) = stops.last_mut() {
        last.value = max_out;
    }
    Ok(wire::ColorMap { stops })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_defaults_to_zero_domain() {
        let acc = DomainAccumulator::default();
        assert_eq!(acc.resolve(), (0.0, 0.0));
    }

    #[test]
    fn accumulator_tracks_extents() {
        let mut acc = DomainAccumulator::default();
        acc.fold(3.0);
        acc.fold(-1.5);
        acc.fold_graph(&Graph::from_rows("g", [(0.0, 7.0), (1.0, 2.0)]));
        assert_eq!(acc.resolve(), (-1.5, 7.0));
    }

    #[test]
    fn explicit_stops_are_rescaled_and_terminal_clamped() {
        let colormap = Colormap::from_stops(vec![
            ColormapStop {
                value: 0.0,
                color: Color::BLACK,
            },
            ColormapStop {
                value: 1.0,
                color: Color::rgb(0.5, 0.5, 0.5),
            },
            ColormapStop {
                value: 3.0,
                color: Color::WHITE,
            },
        ])
        .unwrap();

        // Domain chosen so naive rescale of the last stop would not land
        // exactly on max.
        let built = build_colormap(&colormap, (0.1, 0.73)).unwrap();
        assert_eq!(built.stops.len(), 3);
        assert!((built.stops[0].value - 0.1).abs() < 1e-12);
        assert_eq!(built.stops[2].value, 0.73);
    }

    #[test]
    fn named_palette_ends_exactly_at_domain_max() {
        let built = build_colormap(&Colormap::named("viridis"), (-2.0, 5.0)).unwrap();
        assert_eq!(built.stops.last().unwrap().value, 5.0);
        assert!(built.stops[0].value >= -2.0);
    }

    #[test]
    fn degenerate_source_span_collapses_to_domain_min() {
        let colormap = Colormap::from_stops(vec![
            ColormapStop {
                value: 2.0,
                color: Color::BLACK,
            },
            ColormapStop {
                value: 2.0,
                color: Color::WHITE,
            },
        ])
        .unwrap();
        let built = build_colormap(&colormap, (0.0, 1.0)).unwrap();
        assert_eq!(built.stops[0].value, 0.0);
        assert_eq!(built.stops[1].value, 1.0);
    }

    #[test]
    fn empty_stop_table_is_rejected() {
        assert!(Colormap::from_stops(Vec::new()).is_err());
        assert!(ColormapRange::new(1.0, 1.0).is_err());
        assert!(ColormapRange::new(0.0, 1.0).is_ok());
    }
}
