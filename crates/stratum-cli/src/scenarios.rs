//! Scenarios: a mesh, a pinned mask and initial velocities.
//!
//! Built-ins cover the three basic contact shapes. Anything else is read
//! from a JSON file holding a [`ScenarioFile`].

use serde::{Deserialize, Serialize};
use stratum_layers::SimulationState;
use stratum_math::DVec3;
use stratum_mesh::{generators, TriangleMesh};
use stratum_types::{StratumError, StratumResult};

/// Closing speed of the built-in scenarios (m/s).
const APPROACH_SPEED: f64 = 1.0;

/// On-disk scenario description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub mesh: TriangleMesh,
    /// Indices of vertices with infinite mass.
    #[serde(default)]
    pub pinned: Vec<u32>,
    /// Initial velocity of every free vertex.
    #[serde(default)]
    pub velocity: [f64; 3],
    #[serde(default = "default_mass")]
    pub vertex_mass: f64,
}

impl ScenarioFile {
    pub fn from_json_str(text: &str) -> StratumResult<Self> {
        serde_json::from_str(text).map_err(|e| StratumError::Serialization(e.to_string()))
    }
}

fn default_mass() -> f64 {
    1.0
}

/// A loaded scenario ready to simulate.
pub struct Scenario {
    pub name: String,
    pub mesh: TriangleMesh,
    pub state: SimulationState,
}

impl Scenario {
    /// Resolve `name` as a built-in, falling back to a JSON file path.
    pub fn load(name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(scenario) = Self::builtin(name)? {
            return Ok(scenario);
        }
        if name.ends_with(".json") {
            let content = std::fs::read_to_string(name)?;
            let file = ScenarioFile::from_json_str(&content)?;
            return Ok(Self::from_file(name, file)?);
        }
        Err(format!(
            "Unknown scenario: '{name}'. Available: {}, or a .json file",
            Self::builtin_names().join(", ")
        )
        .into())
    }

    pub fn builtin_names() -> &'static [&'static str] {
        &["vertex_over_triangle", "crossing_edges", "stacked_sheets"]
    }

    fn builtin(name: &str) -> StratumResult<Option<Self>> {
        let down = DVec3::new(0.0, 0.0, -APPROACH_SPEED);
        let (mesh, moving) = match name {
            // Triangle 0..3 pinned, vertex 3 falls onto it.
            "vertex_over_triangle" => (generators::vertex_over_triangle(1.0, 0.02), 3..4),
            // Lower triangle pinned, upper one falls edge first.
            "crossing_edges" => (generators::crossing_edges(1.0, 0.02), 3..6),
            "stacked_sheets" => {
                let mesh = generators::stacked_sheets(4, 4, 1.0, 0.02);
                let n = mesh.vertex_count() / 2;
                (mesh, n..2 * n)
            }
            _ => return Ok(None),
        };

        let pinned: Vec<bool> = (0..mesh.vertex_count())
            .map(|i| !moving.contains(&i))
            .collect();
        let mut state = SimulationState::from_mesh(&mesh, 1.0, &pinned)?;
        for i in moving {
            state.set_velocity(i, down);
        }
        Ok(Some(Self {
            name: name.to_string(),
            mesh,
            state,
        }))
    }

    pub fn from_file(name: &str, file: ScenarioFile) -> StratumResult<Self> {
        file.mesh.validate()?;
        let n = file.mesh.vertex_count();
        let mut pinned = vec![false; n];
        for &i in &file.pinned {
            let slot = pinned.get_mut(i as usize).ok_or_else(|| {
                StratumError::InvalidMesh(format!(
                    "Pinned vertex {i} out of range (mesh has {n} vertices)"
                ))
            })?;
            *slot = true;
        }

        let mut state = SimulationState::from_mesh(&file.mesh, file.vertex_mass, &pinned)?;
        let velocity = DVec3::from_array(file.velocity);
        for i in (0..n).filter(|&i| !pinned[i]) {
            state.set_velocity(i, velocity);
        }
        Ok(Self {
            name: name.to_string(),
            mesh: file.mesh,
            state,
        })
    }
}
