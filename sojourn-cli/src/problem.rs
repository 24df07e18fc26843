//! Problem files: the locations to plan over.

use std::io::BufReader;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use geo::Coord;
use serde::Deserialize;
use sojourn_core::{DenseMatrix, MatrixError};

use crate::CliError;

/// A named location given by latitude and longitude.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct NamedLocation {
    pub(crate) name: String,
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

/// Problem file contents.
///
/// Locations 0 and 1 are the start and end depots; pass the same place twice
/// for a round trip.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProblemFile {
    /// Coordinates travelled at a constant speed.
    Coordinates {
        locations: Vec<NamedLocation>,
        speed_kmh: f64,
    },
    /// Explicit travel times, and optionally costs, in seconds.
    Matrix {
        #[serde(default)]
        names: Vec<String>,
        travel_time_seconds: Vec<Vec<i64>>,
        #[serde(default)]
        travel_cost: Option<Vec<Vec<i64>>>,
    },
}

/// A problem ready to solve.
#[derive(Debug, Clone)]
pub(crate) struct Problem {
    pub(crate) matrix: DenseMatrix,
    /// One name per location, or empty when the file gave none.
    pub(crate) names: Vec<String>,
}

impl Problem {
    /// Display name of `node`, falling back to its index.
    pub(crate) fn name_of(&self, node: usize) -> String {
        self.names
            .get(node)
            .cloned()
            .unwrap_or_else(|| node.to_string())
    }
}

impl ProblemFile {
    fn into_problem(self) -> Result<(Problem, usize), MatrixError> {
        match self {
            Self::Coordinates {
                locations,
                speed_kmh,
            } => {
                let coords: Vec<Coord<f64>> = locations
                    .iter()
                    .map(|location| Coord {
                        x: location.lon,
                        y: location.lat,
                    })
                    .collect();
                let matrix = DenseMatrix::from_coordinates(&coords, speed_kmh)?;
                let names = locations.into_iter().map(|location| location.name).collect();
                Ok((Problem { matrix, names }, coords.len()))
            }
            Self::Matrix {
                names,
                travel_time_seconds,
                travel_cost,
            } => {
                let count = travel_time_seconds.len();
                let matrix = match travel_cost {
                    Some(costs) => DenseMatrix::with_costs(travel_time_seconds, costs)?,
                    None => DenseMatrix::from_seconds(travel_time_seconds)?,
                };
                Ok((Problem { matrix, names }, count))
            }
        }
    }
}

/// Load and check a JSON problem file.
pub(crate) fn load_problem(path: &Utf8Path) -> Result<Problem, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenProblem {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let parsed: ProblemFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseProblem {
            path: path.to_path_buf(),
            source,
        })?;
    let (problem, expected) = parsed
        .into_problem()
        .map_err(|source| CliError::InvalidMatrix {
            path: path.to_path_buf(),
            source,
        })?;
    let found = problem.names.len();
    if found != 0 && found != expected {
        return Err(CliError::NameCount {
            path: path.to_path_buf(),
            expected,
            found,
        });
    }
    Ok(problem)
}
