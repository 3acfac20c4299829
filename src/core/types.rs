/*
 * Copyright 2025 Vijaykumar Singh
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::MazeError;
use crate::storage::DocumentId;

/// Named point on the plane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spot {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    pub x_coordinate: f64,
    pub y_coordinate: f64,
    pub name: String,
    pub number: i64,
}

impl Spot {
    pub fn new(name: impl Into<String>, x_coordinate: f64, y_coordinate: f64, number: i64) -> Self {
        Self {
            id: None,
            x_coordinate,
            y_coordinate,
            name: name.into(),
            number,
        }
    }
}

/// Weighted edge between two spots. `distance` is derived from the
/// endpoints and only as fresh as the last write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    pub point_a: DocumentId,
    pub point_b: DocumentId,
    #[serde(default)]
    pub distance: f64,
}

/// Reference point for quadrant classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    pub x_origin: f64,
    pub y_origin: f64,
}

impl Origin {
    pub fn new(x_origin: f64, y_origin: f64) -> Self {
        Self { x_origin, y_origin }
    }
}

/// Euclidean distance between two spots
pub fn distance(a: &Spot, b: &Spot) -> f64 {
    let dx = b.x_coordinate - a.x_coordinate;
    let dy = b.y_coordinate - a.y_coordinate;
    (dx * dx + dy * dy).sqrt()
}

/// Region relative to the origin. Boundaries are inclusive, so a spot
/// sitting on an axis through the origin belongs to both neighbouring
/// quadrants and the origin itself belongs to all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::UpperLeft => "upper_left",
            Quadrant::UpperRight => "upper_right",
            Quadrant::BottomLeft => "bottom_left",
            Quadrant::BottomRight => "bottom_right",
        }
    }

    pub fn contains(&self, origin: &Origin, spot: &Spot) -> bool {
        let (x, y) = (spot.x_coordinate, spot.y_coordinate);
        match self {
            Quadrant::UpperLeft => origin.x_origin >= x && origin.y_origin <= y,
            Quadrant::UpperRight => origin.x_origin <= x && origin.y_origin <= y,
            Quadrant::BottomLeft => origin.x_origin >= x && origin.y_origin >= y,
            Quadrant::BottomRight => origin.x_origin <= x && origin.y_origin >= y,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quadrant::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| MazeError::UnknownQuadrant(s.to_string()))
    }
}

/// Body of `POST /quadrantSpots`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadrantRequest {
    pub name: String,
}

/// Body of `POST /path` and `PUT /path/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRequest {
    pub point_a: String,
    pub point_b: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateObjectResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyObjectResponse {
    pub affected_items: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn at(x: f64, y: f64) -> Spot {
        Spot::new("p", x, y, 0)
    }

    #[test]
    fn test_distance_three_four_five() {
        assert_eq!(distance(&at(0.0, 0.0), &at(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_distance_identical_points_is_zero() {
        assert_eq!(distance(&at(-7.5, 2.25), &at(-7.5, 2.25)), 0.0);
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(ax in -1e6f64..1e6, ay in -1e6f64..1e6, bx in -1e6f64..1e6, by in -1e6f64..1e6) {
            let (a, b) = (at(ax, ay), at(bx, by));
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }

        #[test]
        fn prop_distance_zero_iff_same_coordinates(ax in -1000i32..1000, ay in -1000i32..1000, bx in -1000i32..1000, by in -1000i32..1000) {
            let (a, b) = (at(ax as f64, ay as f64), at(bx as f64, by as f64));
            prop_assert_eq!(distance(&a, &b) == 0.0, ax == bx && ay == by);
        }
    }

    #[test]
    fn test_strict_side_spots_land_in_one_quadrant() {
        let origin = Origin::new(0.0, 0.0);
        let cases = [
            (at(-1.0, 1.0), Quadrant::UpperLeft),
            (at(1.0, 1.0), Quadrant::UpperRight),
            (at(-1.0, -1.0), Quadrant::BottomLeft),
            (at(1.0, -1.0), Quadrant::BottomRight),
        ];

        for (spot, expected) in cases {
            let matching: Vec<_> = Quadrant::ALL
                .into_iter()
                .filter(|q| q.contains(&origin, &spot))
                .collect();
            assert_eq!(matching, vec![expected]);
        }
    }

    #[test]
    fn test_boundary_spots_are_inclusive() {
        let origin = Origin::new(2.0, -3.0);

        let center = at(2.0, -3.0);
        assert!(Quadrant::ALL.iter().all(|q| q.contains(&origin, &center)));

        let on_vertical_axis_above = at(2.0, 10.0);
        assert!(Quadrant::UpperLeft.contains(&origin, &on_vertical_axis_above));
        assert!(Quadrant::UpperRight.contains(&origin, &on_vertical_axis_above));
        assert!(!Quadrant::BottomLeft.contains(&origin, &on_vertical_axis_above));
        assert!(!Quadrant::BottomRight.contains(&origin, &on_vertical_axis_above));
    }

    #[test]
    fn test_quadrant_labels() {
        for q in Quadrant::ALL {
            assert_eq!(q.as_str().parse::<Quadrant>().unwrap(), q);
        }
        assert!(matches!("center".parse::<Quadrant>(), Err(MazeError::UnknownQuadrant(_))));
    }

    #[test]
    fn test_spot_wire_shape() {
        let id: DocumentId = "5fbecff95f80a305742abb10".parse().unwrap();
        let spot = Spot {
            id: Some(id),
            ..Spot::new("fountain", 1.5, -2.0, 4)
        };

        let value = serde_json::to_value(&spot).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "5fbecff95f80a305742abb10",
                "x_coordinate": 1.5,
                "y_coordinate": -2.0,
                "name": "fountain",
                "number": 4
            })
        );

        let without_id = serde_json::to_value(Spot::new("a", 0.0, 0.0, 0)).unwrap();
        assert!(without_id.get("_id").is_none());
    }

    #[test]
    fn test_spot_missing_fields_default_to_zero_values() {
        let spot: Spot = serde_json::from_value(json!({"name": "partial"})).unwrap();
        assert_eq!(spot, Spot::new("partial", 0.0, 0.0, 0));
    }
}
