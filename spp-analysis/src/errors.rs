use crate::Vector2D;

#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// A snapshot index past the end of the trajectory was requested
    SnapshotOutOfRange {
        /// the requested snapshot
        step: usize,
        /// number of snapshots in the trajectory
        length: usize,
    },
    /// A lag of zero was given to a quantity dividing by the lag
    InvalidLag,
    /// Statistics were requested over a pair set without any pair
    EmptyPairSet,
    /// A particle is outside of the simulation box, and the out of box
    /// policy asked to reject it
    OutOfBox {
        /// index of the particle
        particle: usize,
        /// snapshot containing the particle
        step: usize,
        /// position of the particle
        position: Vector2D,
    },
    /// Error while reading or writing trajectory data
    Io(std::io::Error),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::SnapshotOutOfRange { step, length } => write!(f,
                "snapshot {} is out of range for a trajectory containing {} snapshots",
                step, length
            ),
            Error::InvalidLag => write!(f, "invalid lag: the lag must be at least one snapshot"),
            Error::EmptyPairSet => write!(f, "the pair set does not contain any pair"),
            Error::OutOfBox { particle, step, position } => write!(f,
                "particle {} at step {} is outside of the simulation box (position = [{}, {}])",
                particle, step, position[0], position[1]
            ),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::SnapshotOutOfRange { .. } |
            Error::InvalidLag |
            Error::EmptyPairSet |
            Error::OutOfBox { .. } => None,
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let error = Error::SnapshotOutOfRange { step: 3, length: 3 };
        assert_eq!(
            error.to_string(),
            "snapshot 3 is out of range for a trajectory containing 3 snapshots"
        );

        let error = Error::OutOfBox { particle: 2, step: 0, position: Vector2D::new(12.0, -1.5) };
        assert_eq!(
            error.to_string(),
            "particle 2 at step 0 is outside of the simulation box (position = [12, -1.5])"
        );
    }
}
