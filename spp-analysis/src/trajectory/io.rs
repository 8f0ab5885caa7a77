//! Reading and writing trajectories in the binary format produced by the
//! simulation engine.
//!
//! A file contains consecutive snapshots. Each snapshot starts with the
//! number of particles as a 32-bit signed integer, followed by four 64-bit
//! floats for each particle: the position `x, y` and the velocity `vx, vy`
//! (the engine stores the unit heading vector of the particle as velocity).
//! All values are little-endian.
use std::io::{Read, Write, BufReader};

use log::debug;

use crate::{Error, Vector2D};
use super::{SimpleTrajectory, SimulationBox, Snapshot};

/// Read all snapshots from `reader` until the end of the stream, and collect
/// them in a `SimpleTrajectory` using the given `simulation_box`.
pub fn read_trajectory(reader: impl Read, simulation_box: SimulationBox) -> Result<SimpleTrajectory, Error> {
    let mut reader = BufReader::new(reader);
    let mut trajectory = SimpleTrajectory::new(simulation_box);

    while let Some(count) = read_particle_count(&mut reader)? {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(read_vector(&mut reader)?);
            velocities.push(read_vector(&mut reader)?);
        }

        trajectory.add_snapshot(Snapshot::with_velocities(positions, velocities)?)?;
    }

    debug!(
        "read {} snapshots containing {} particles",
        trajectory.snapshots().len(),
        trajectory.snapshots().first().map_or(0, Snapshot::len),
    );

    return Ok(trajectory);
}

/// Write a single snapshot to `writer`. If `velocities` is `None`, zero
/// velocities are written instead.
pub fn write_snapshot(writer: &mut impl Write, positions: &[Vector2D], velocities: Option<&[Vector2D]>) -> Result<(), Error> {
    if let Some(velocities) = velocities {
        if velocities.len() != positions.len() {
            return Err(Error::InvalidParameter(format!(
                "got {} positions but {} velocities in the same snapshot",
                positions.len(), velocities.len()
            )));
        }
    }

    let count = i32::try_from(positions.len()).map_err(|_| Error::InvalidParameter(format!(
        "can not write a snapshot with {} particles", positions.len()
    )))?;
    writer.write_all(&count.to_le_bytes())?;

    for (i, position) in positions.iter().enumerate() {
        let velocity = velocities.map_or(Vector2D::zero(), |v| v[i]);
        for value in [position[0], position[1], velocity[0], velocity[1]] {
            writer.write_all(&value.to_le_bytes())?;
        }
    }

    Ok(())
}

/// Read the particle count at the start of a snapshot, returning `None` if
/// the stream ended cleanly before the snapshot.
fn read_particle_count(reader: &mut impl Read) -> Result<Option<usize>, Error> {
    let mut buffer = [0; 4];
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    if filled == 0 {
        return Ok(None);
    } else if filled < buffer.len() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stream ended in the middle of a particle count",
        )));
    }

    let count = i32::from_le_bytes(buffer);
    let count = usize::try_from(count).map_err(|_| Error::InvalidParameter(format!(
        "invalid negative particle count in snapshot: {}", count
    )))?;

    return Ok(Some(count));
}

fn read_vector(reader: &mut impl Read) -> Result<Vector2D, Error> {
    let mut buffer = [0; 8];
    reader.read_exact(&mut buffer)?;
    let x = f64::from_le_bytes(buffer);
    reader.read_exact(&mut buffer)?;
    let y = f64::from_le_bytes(buffer);
    return Ok(Vector2D::new(x, y));
}

#[cfg(test)]
mod tests {
    use crate::Trajectory;
    use super::*;

    #[test]
    fn write_and_read() {
        let mut data = Vec::<u8>::new();
        let positions = [Vector2D::new(1.0, -2.5), Vector2D::new(3.25, 4.0)];
        let velocities = [Vector2D::new(0.0, 1.0), Vector2D::new(-1.0, 0.0)];
        write_snapshot(&mut data, &positions, Some(&velocities)).unwrap();
        write_snapshot(&mut data, &positions, None).unwrap();

        assert_eq!(data.len(), 2 * (4 + 2 * 4 * 8));

        let trajectory = read_trajectory(data.as_slice(), SimulationBox::square(5.0)).unwrap();
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.particle_count(), 2);
        assert_eq!(trajectory.positions(0).unwrap(), &positions);
        assert_eq!(trajectory.velocities(0).unwrap().unwrap(), &velocities);
        assert_eq!(trajectory.velocities(1).unwrap().unwrap(), &[Vector2D::zero(); 2]);
    }

    #[test]
    fn empty_stream() {
        let trajectory = read_trajectory(&[0_u8; 0][..], SimulationBox::square(5.0)).unwrap();
        assert!(trajectory.is_empty());
    }

    #[test]
    fn truncated_stream() {
        let mut data = Vec::<u8>::new();
        write_snapshot(&mut data, &[Vector2D::new(1.0, 1.0)], None).unwrap();
        data.truncate(data.len() - 3);

        let error = read_trajectory(data.as_slice(), SimulationBox::square(5.0)).unwrap_err();
        match &error {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            _ => panic!("expected an io error, got {}", error),
        }

        let error = read_trajectory(&[1_u8, 0][..], SimulationBox::square(5.0)).unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn invalid_count() {
        let data = (-3_i32).to_le_bytes();
        let error = read_trajectory(&data[..], SimulationBox::square(5.0)).unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: invalid negative particle count in snapshot: -3");
    }

    #[test]
    fn changing_particle_count() {
        let mut data = Vec::<u8>::new();
        write_snapshot(&mut data, &[Vector2D::new(1.0, 1.0)], None).unwrap();
        write_snapshot(&mut data, &[Vector2D::new(1.0, 1.0), Vector2D::new(2.0, 1.0)], None).unwrap();

        let error = read_trajectory(data.as_slice(), SimulationBox::square(5.0)).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }
}
