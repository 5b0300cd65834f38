pub trait FromCoordinates <T> {
    /// Creates a new instance of the struct from the given coordinates.
    /// # Arguments
    /// * `position` - The coordinates to create the struct from.
    /// # Returns
    /// A new instance of the struct.
    /// # Example
    /// ```
    /// use marble_physics::models::{FromCoordinates, Point3D};
    ///
    /// let point = Point3D::from_coord((1.0, 2.0, 3.0));
    /// assert_eq!(point.x, 1.0);
    /// assert_eq!(point.z, 3.0);
    /// ```
    fn from_coord(position: T) -> Self;
}

pub trait ToCoordinates <T> {
    /// Converts the struct to a tuple of coordinates.
    /// # Returns
    /// A tuple of coordinates.
    /// # Example
    /// ```
    /// use marble_physics::models::{Point3D, ToCoordinates};
    ///
    /// let point = Point3D::new(1.0, 2.0, 3.0);
    /// let coordinates: (f64, f64, f64) = point.to_coord();
    ///
    /// assert_eq!(coordinates.1, 2.0);
    /// ```
    fn to_coord(&self) -> T;
}
