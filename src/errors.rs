use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or driving the marble solver.
///
/// The tick itself never fails; these come from the edges where outside data
/// enters the crate (constants, level geometry, console strings, setters).
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid radius value (e.g., negative or zero radius).
    InvalidRadius,
    /// Indicates an invalid mass value (e.g., negative or zero mass).
    InvalidMass,
    /// Indicates an invalid time value (e.g., negative time).
    InvalidTime,
    /// Indicates a coefficient outside its allowed range. Carries the field name.
    InvalidCoefficient(&'static str),
    /// A vector handed to a setter contained NaN or infinity.
    NonFiniteVector,
    /// Polygon has fewer than three vertices or they are collinear.
    DegeneratePolygon,
    /// A textual vector could not be parsed.
    ParseError(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidRadius => write!(f, "Invalid radius value"),
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidTime => write!(f, "Invalid time value"),
            PhysicsError::InvalidCoefficient(name) => write!(f, "Invalid coefficient value: {}", name),
            PhysicsError::NonFiniteVector => write!(f, "Vector components must be finite"),
            PhysicsError::DegeneratePolygon => write!(f, "Polygon is degenerate"),
            PhysicsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl Error for PhysicsError {}
