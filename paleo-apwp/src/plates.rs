//! Tectonic plate outlines and site-to-plate lookup.
//!
//! A [`PlatePolygon`] is one closed ring of vertices joined by great-circle
//! edges. Some plates are stitched together from several parts; each part is
//! its own polygon and the parts share a plate id. Rotations for a plate are
//! stored in a [`RotationTable`](crate::RotationTable) under the frame id
//! [`plate_frame_id`], so a site's plate doubles as the frame its pole is
//! rotated into.
//!
//! # Containment
//!
//! Seen from an enclosed site, the azimuths of a ring's vertices turn through
//! a full circle; seen from an outside site they turn back to where they
//! started. The site's antipode also sees a full turn, with the opposite
//! sign, so each ring records which side it encloses. That side is always
//! the smaller of the two regions the ring bounds, whatever the vertex order
//! in the source data.
//!
//! Plates may nest. When a site falls in two plates and one of them lies
//! inside the other, the inner (more specific) plate wins; any other overlap
//! is an error.

use std::collections::BTreeSet;

use paleo_core::constants::{COINCIDENT_EPSILON_RAD, PI};
use paleo_core::Vector3;

use crate::errors::PlateErrorKind;
use crate::{ApwpError, ApwpResult};

/// Plate id of the mobile belts, which have no rigid-plate motion model.
pub const UNCONSTRAINED_PLATE_ID: u32 = 1001;

/// Name given to every plate part whose source name marks it as a mobile belt.
pub const UNCONSTRAINED_PLATE_NAME: &str = "mobile belt (unconstrained)";

/// Share of another outline's vertices that must fall inside a plate for the
/// plate to count as enclosing it.
const NESTING_FRACTION: f64 = 0.9;

/// Frame id under which rotations for `plate_id` are stored.
///
/// ```
/// use paleo_apwp::plates::plate_frame_id;
///
/// assert_eq!(plate_frame_id(701), "plate-701");
/// ```
pub fn plate_frame_id(plate_id: u32) -> String {
    format!("plate-{}", plate_id)
}

fn plate_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.contains("unconstrained") || lower.contains("mobile") {
        UNCONSTRAINED_PLATE_NAME.to_string()
    } else {
        name.trim().to_string()
    }
}

fn valid_coordinate(latitude_deg: f64, longitude_deg: f64) -> bool {
    latitude_deg.is_finite()
        && (-90.0..=90.0).contains(&latitude_deg)
        && longitude_deg.is_finite()
        && (-360.0..=360.0).contains(&longitude_deg)
}

/// One outline of a tectonic plate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatePolygon {
    plate_id: u32,
    name: String,
    vertices: Vec<Vector3>,
    /// +1 when the enclosed side lies left of the direction of travel.
    orientation: f64,
}

impl PlatePolygon {
    /// Builds an outline from `(latitude, longitude)` vertices in degrees.
    ///
    /// The ring may be given open or closed (first vertex repeated at the
    /// end), in either direction. Consecutive repeated vertices are dropped.
    /// At least three distinct vertices are required.
    pub fn new(plate_id: u32, name: &str, vertices_deg: &[(f64, f64)]) -> ApwpResult<Self> {
        let label = plate_frame_id(plate_id);
        let mut vertices: Vec<Vector3> = Vec::with_capacity(vertices_deg.len());

        for (index, &(lat, lon)) in vertices_deg.iter().enumerate() {
            if !valid_coordinate(lat, lon) {
                return Err(ApwpError::data_integrity(
                    &label,
                    index,
                    format!("vertex ({lat}, {lon}) is not a valid coordinate"),
                ));
            }
            let vertex = Vector3::from_lat_lon_deg(lat, lon);
            let repeated = vertices
                .last()
                .is_some_and(|prev| prev.angle_to(&vertex) < COINCIDENT_EPSILON_RAD);
            if !repeated {
                vertices.push(vertex);
            }
        }

        let closed = match (vertices.first(), vertices.last()) {
            (Some(first), Some(last)) if vertices.len() > 1 => {
                first.angle_to(last) < COINCIDENT_EPSILON_RAD
            }
            _ => false,
        };
        if closed {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(ApwpError::data_integrity(
                &label,
                vertices_deg.len(),
                "outline needs at least three distinct vertices",
            ));
        }

        // Gauss-Bonnet: the region left of the ring has area 2π minus the
        // total turning, so a positive turn means the left side is the smaller
        let turning = turning_angle(&vertices);
        let orientation = if turning >= 0.0 { 1.0 } else { -1.0 };

        Ok(Self {
            plate_id,
            name: plate_name(name),
            vertices,
            orientation,
        })
    }

    pub fn plate_id(&self) -> u32 {
        self.plate_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Frame id of this plate in a rotation table.
    pub fn frame_id(&self) -> String {
        plate_frame_id(self.plate_id)
    }

    /// Whether this part belongs to a mobile belt.
    pub fn is_unconstrained(&self) -> bool {
        self.plate_id == UNCONSTRAINED_PLATE_ID
    }

    /// Whether the site lies inside this outline. Vertices count as inside.
    pub fn contains(&self, latitude_deg: f64, longitude_deg: f64) -> bool {
        let site = Vector3::from_lat_lon_deg(latitude_deg, longitude_deg);
        self.contains_point(&site)
    }

    /// Whether `other` lies inside this outline, judged by more than 90% of
    /// its vertices.
    pub fn contains_plate(&self, other: &PlatePolygon) -> bool {
        let inside = other.vertices.iter().filter(|v| self.contains_point(v));
        inside.count() as f64 / other.vertices.len() as f64 > NESTING_FRACTION
    }

    fn contains_point(&self, site: &Vector3) -> bool {
        let on_vertex = self
            .vertices
            .iter()
            .any(|v| v.angle_to(site) < COINCIDENT_EPSILON_RAD);
        on_vertex || self.orientation * self.winding_angle(site) > PI
    }

    /// Total azimuth swept by the ring as seen from `site`: ±2π if the ring
    /// goes around the site or its antipode, 0 otherwise.
    fn winding_angle(&self, site: &Vector3) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let a = &self.vertices[i];
                let b = &self.vertices[(i + 1) % n];
                let y = site.dot(&a.cross(b));
                let x = a.dot(b) - a.dot(site) * b.dot(site);
                libm::atan2(y, x)
            })
            .sum()
    }
}

/// Sum of the signed turns at each vertex, left turns positive.
fn turning_angle(vertices: &[Vector3]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let a = vertices[(i + n - 1) % n];
            let b = vertices[i];
            let c = vertices[(i + 1) % n];
            let incoming = a.cross(&b).cross(&b);
            let outgoing = b.cross(&c).cross(&b);
            let turn = b.dot(&incoming.cross(&outgoing));
            libm::atan2(turn, incoming.dot(&outgoing))
        })
        .sum()
}

/// Every loaded plate outline, searched by site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlateIndex {
    plates: Vec<PlatePolygon>,
}

impl PlateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_plates(plates: impl IntoIterator<Item = PlatePolygon>) -> Self {
        Self {
            plates: plates.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, plate: PlatePolygon) {
        self.plates.push(plate);
    }

    /// Number of outlines (plate parts).
    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatePolygon> {
        self.plates.iter()
    }

    /// Distinct plate ids, counting multi-part plates once.
    pub fn plate_ids(&self) -> BTreeSet<u32> {
        self.plates.iter().map(PlatePolygon::plate_id).collect()
    }

    pub fn plate_name(&self, plate_id: u32) -> Option<&str> {
        self.plates
            .iter()
            .find(|p| p.plate_id == plate_id)
            .map(PlatePolygon::name)
    }

    /// The plate the site lies on.
    ///
    /// When two outlines contain the site and one encloses the other, the
    /// enclosed one is returned. Fails with [`ApwpError::PlateLookup`] if no
    /// outline contains the site or two unrelated plates overlap there.
    pub fn find_plate(&self, latitude_deg: f64, longitude_deg: f64) -> ApwpResult<&PlatePolygon> {
        if !valid_coordinate(latitude_deg, longitude_deg) {
            return Err(ApwpError::invalid_input(
                "site coordinates",
                format!("({latitude_deg}, {longitude_deg}) is off the globe"),
            ));
        }

        let site = Vector3::from_lat_lon_deg(latitude_deg, longitude_deg);
        let mut found: Option<&PlatePolygon> = None;

        for plate in self.plates.iter().filter(|p| p.contains_point(&site)) {
            found = match found {
                None => Some(plate),
                Some(prev) if prev.plate_id == plate.plate_id => Some(prev),
                Some(prev) if prev.contains_plate(plate) => Some(plate),
                Some(prev) if plate.contains_plate(prev) => Some(prev),
                Some(prev) => {
                    return Err(ApwpError::plate_lookup(
                        latitude_deg,
                        longitude_deg,
                        PlateErrorKind::Overlapping,
                        format!(
                            "'{}' ({}) and '{}' ({}) both contain the site",
                            prev.name, prev.plate_id, plate.name, plate.plate_id
                        ),
                    ))
                }
            };
        }

        let plate = found.ok_or_else(|| {
            ApwpError::plate_lookup(
                latitude_deg,
                longitude_deg,
                PlateErrorKind::NoPlate,
                format!("none of {} plate outlines contains the site", self.len()),
            )
        })?;

        tracing::debug!(
            latitude_deg,
            longitude_deg,
            plate_id = plate.plate_id,
            plate = %plate.name,
            "located site plate"
        );
        Ok(plate)
    }
}
