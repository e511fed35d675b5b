//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;

use stratum_layers::{ActiveLayers, LayerConfig, StepReport, StepResolver};
use stratum_mesh::TriangleMesh;
use stratum_types::StratumError;
use stratum_telemetry::{EventBus, EventKind, JsonLinesSink, TracingSink};

use crate::scenarios::{Scenario, ScenarioFile};

fn load_config(path: Option<&str>) -> Result<LayerConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => LayerConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => LayerConfig::default(),
    })
}

/// Translate one resolved step into telemetry events.
fn emit_step(bus: &EventBus, step: u32, report: &StepReport) {
    for it in &report.iterations {
        bus.emit_kind(
            step,
            EventKind::OuterIteration {
                iteration: it.iteration,
                converged: it.converged,
                vf_collisions: it.vf_collisions as u32,
                ee_collisions: it.ee_collisions as u32,
                earliest_time: it.earliest_time,
                events: it.events,
                deepest_layer: it.deepest_layer,
            },
        );
        if !it.converged {
            bus.emit_kind(
                step,
                EventKind::Escalation {
                    stencils: (it.vf_collisions + it.ee_collisions) as u32,
                    deepest_layer: it.deepest_layer,
                },
            );
        }
    }
    bus.emit_kind(
        step,
        EventKind::Energy {
            kinetic: report.kinetic_energy,
        },
    );
    bus.emit_kind(
        step,
        EventKind::StepEnd {
            outer_iterations: report.outer_iterations(),
            wall_time: report.wall_time,
        },
    );
}

/// Resolve `steps` consecutive steps of a scenario.
pub fn simulate(
    scenario_name: &str,
    config_path: Option<&str>,
    steps: u32,
    json_events: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Stratum Simulation");
    println!("──────────────────");

    let config = load_config(config_path)?;
    let mut scenario = Scenario::load(scenario_name)?;
    let mut layers = ActiveLayers::new(config.clone())?;
    let resolver = StepResolver::for_layers(&layers);

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    if let Some(path) = json_events {
        bus.add_sink(Box::new(JsonLinesSink::new(BufWriter::new(File::create(path)?))));
    }

    println!(
        "Scenario: {} ({} verts, {} tris)",
        scenario.name,
        scenario.mesh.vertex_count(),
        scenario.mesh.face_count()
    );
    println!(
        "Horizon:  {:.4}s  outer eta: {:.2e}  inner eta: {:.2e}",
        config.horizon, config.outer_eta, config.inner_eta
    );
    println!();

    let mut outcome: Result<(), Box<dyn std::error::Error>> = Ok(());
    for step in 0..steps {
        bus.emit_kind(
            step,
            EventKind::StepBegin {
                horizon: config.horizon,
                deepest_layer: layers.deepest_layer(),
            },
        );
        match resolver.resolve(&mut layers, &scenario.mesh, &mut scenario.state) {
            Ok(report) => {
                println!(
                    "Step {step:>4}: {} outer iterations, {} events, deepest layer {}, KE {:.6e}, {:.3}ms",
                    report.outer_iterations(),
                    report.total_events(),
                    report.deepest_layer,
                    report.kinetic_energy,
                    report.wall_time * 1000.0
                );
                emit_step(&bus, step, &report);
                bus.flush();
            }
            Err(e) => {
                outcome = Err(format!("step {step} failed: {e}").into());
                break;
            }
        }
    }
    bus.finish();
    outcome?;

    let closest = layers.closest_distance(&scenario.state.q, &scenario.mesh)?;
    println!();
    println!("Closest distance at end: {closest:.6e}");
    if let Some(path) = json_events {
        println!("Events written to: {path}");
    }
    Ok(())
}

/// Report the closest distance of a scenario's initial configuration.
pub fn closest(scenario_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load(scenario_name)?;
    let mut layers = ActiveLayers::new(LayerConfig::default())?;
    let distance = layers.closest_distance(&scenario.state.q, &scenario.mesh)?;
    println!("{}: closest distance {distance:.6e}", scenario.name);
    Ok(())
}

/// Validate a layer config or a mesh / scenario file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Stratum Validator");
    println!("─────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        match LayerConfig::from_toml_str(&content) {
            Ok(_) => println!("✅ Config is valid."),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        let content = std::fs::read_to_string(path)?;
        // Scenario files wrap a mesh; plain mesh files are accepted too.
        let mesh = match ScenarioFile::from_json_str(&content) {
            Ok(file) => {
                println!("Validating scenario: {path}");
                file.mesh
            }
            Err(_) => {
                println!("Validating mesh: {path}");
                serde_json::from_str::<TriangleMesh>(&content)
                    .map_err(|e| StratumError::Serialization(e.to_string()))?
            }
        };
        match mesh.validate() {
            Ok(()) => println!(
                "✅ Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.face_count()
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (mesh or scenario).");
    }

    Ok(())
}
