//! Probability chart, serialized in plotly's figure JSON shape.

use serde::Serialize;

use super::curves::{ReferenceCurve, ReferenceCurves};
use super::diagnosis::Prediction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lines,
    Markers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
}

/// One series of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub name: String,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

impl Trace {
    fn reference(curve: &ReferenceCurve, name: &str, color: &str) -> Self {
        Self {
            kind: "scatter",
            x: curve.ages(),
            y: curve.probabilities(),
            name: name.to_string(),
            mode: Mode::Lines,
            marker: None,
            line: Some(LineStyle {
                color: color.to_string(),
            }),
        }
    }

    fn point(prediction: &Prediction) -> Self {
        Self {
            kind: "scatter",
            x: vec![prediction.age],
            y: vec![prediction.probability],
            name: "prediction".to_string(),
            mode: Mode::Markers,
            marker: Some(Marker {
                color: "red".to_string(),
                size: 10,
            }),
            line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            title: AxisTitle {
                text: text.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub xaxis: Axis,
    pub yaxis: Axis,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            xaxis: Axis::titled("age"),
            yaxis: Axis::titled("probability"),
        }
    }
}

/// A complete chart: series plus axis layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// The two static reference lines, shown before any prediction.
    #[must_use]
    pub fn reference(curves: &ReferenceCurves) -> Self {
        Self {
            data: vec![
                Trace::reference(&curves.male, "males", "green"),
                Trace::reference(&curves.female, "females", "orange"),
            ],
            layout: Layout::default(),
        }
    }

    /// Reference lines plus the prediction marker.
    ///
    /// Always built from scratch, so the figure has exactly three series.
    #[must_use]
    pub fn with_prediction(curves: &ReferenceCurves, prediction: &Prediction) -> Self {
        let mut figure = Self::reference(curves);
        figure.data.push(Trace::point(prediction));
        figure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::curves::CurvePoint;

    fn curves() -> ReferenceCurves {
        let line = |p: f64| {
            ReferenceCurve::new(vec![
                CurvePoint { age: 30.0, probability: p },
                CurvePoint { age: 70.0, probability: p * 2.0 },
            ])
        };
        ReferenceCurves {
            male: line(0.2),
            female: line(0.1),
        }
    }

    #[test]
    fn test_reference_figure() {
        let fig = Figure::reference(&curves());
        assert_eq!(fig.data.len(), 2);
        assert_eq!(fig.data[0].name, "males");
        assert_eq!(fig.data[1].name, "females");

        let json = serde_json::to_value(&fig).expect("serialize");
        assert_eq!(json["layout"]["xaxis"]["title"]["text"], "age");
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "probability");
        assert_eq!(json["data"][0]["line"]["color"], "green");
        assert_eq!(json["data"][1]["line"]["color"], "orange");
        assert!(json["data"][0].get("marker").is_none());
    }

    #[test]
    fn test_prediction_figure_has_three_series() {
        let curves = curves();
        let prediction = Prediction::select(54.0, vec![0.1, 0.2, 0.7], 2).expect("class");

        for _ in 0..3 {
            let fig = Figure::with_prediction(&curves, &prediction);
            assert_eq!(fig.data.len(), 3);
        }

        let fig = Figure::with_prediction(&curves, &prediction);
        let point = &fig.data[2];
        assert_eq!(point.mode, Mode::Markers);
        assert_eq!(point.x, vec![54.0]);
        assert_eq!(point.y, vec![0.7]);
        assert_eq!(point.marker.as_ref().map(|m| m.size), Some(10));
    }
}
