use geo::{Distance, Haversine, Point, Rect};

/// The bounding box of a geohash cell.
///
/// Wraps a `geo::Rect` with x = longitude and y = latitude, both in degrees.
/// Cell edges are inclusive here; the encoder itself assigns a coordinate
/// on a shared edge to the northern/eastern cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBounds {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl CellBounds {
    /// Create bounds from western, southern, eastern and northern edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use spatio_geohash::CellBounds;
    ///
    /// let bounds = CellBounds::new(-180.0, 0.0, -90.0, 90.0);
    /// assert_eq!(bounds.width(), 90.0);
    /// ```
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: west, y: south },
                geo::coord! { x: east, y: north },
            ),
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x() + self.max_x()) / 2.0,
            (self.min_y() + self.max_y()) / 2.0,
        )
    }

    /// Longitude extent in degrees.
    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    /// Latitude extent in degrees.
    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    pub fn contains_point(&self, point: &Point) -> bool {
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }

    /// North-south extent in metres, measured along the central meridian.
    pub fn height_meters(&self) -> f64 {
        let x = self.center().x();
        Haversine.distance(Point::new(x, self.min_y()), Point::new(x, self.max_y()))
    }

    /// East-west extent in metres, measured along the central parallel.
    pub fn width_meters(&self) -> f64 {
        let lat = self.center().y().to_radians();
        self.width() * lat.cos() * meters_per_degree()
    }

    /// Ratio of [`height_meters`](Self::height_meters) to
    /// [`width_meters`](Self::width_meters) across the centre of the box.
    pub fn aspect_ratio(&self) -> f64 {
        self.height_meters() / self.width_meters()
    }
}

/// Length of one degree of arc on `geo`'s haversine sphere.
fn meters_per_degree() -> f64 {
    Haversine.distance(Point::new(0.0, 0.0), Point::new(0.0, 1.0))
}

impl From<CellBounds> for Rect {
    fn from(bounds: CellBounds) -> Rect {
        bounds.rect
    }
}
