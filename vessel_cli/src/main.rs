//! # Vessel CLI Application
//!
//! Terminal front end for the analysis engine: runs the reference design,
//! evaluates design-case JSON files and converts failure probabilities to
//! reliability indices.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use vessel_core::calculations::{
    fatigue,
    CalculationItem,
    CalculationOutput,
    FatigueInput,
    FatigueResult,
    LaminateInput,
    LaminateResult,
    LimitStateDefinition,
    ReliabilityInput,
    ReliabilityResult,
    VesselGeometry,
    VesselInput,
    VesselResult,
};
use vessel_core::design::{DesignCase, DesignReport};
use vessel_core::equations::vessel::burst_pressure;
use vessel_core::equations::StressComponent;
use vessel_core::materials::{CompositeGrade, PlyMaterial, SnCurve, SnSource};
use vessel_core::units::{Bar, Megapascals};
use vessel_core::{load_design, load_settings, reliability_index, CalcResult};

#[derive(Parser)]
#[command(name = "vessel_cli")]
#[command(about = "Vessel CLI - Composite pressure-vessel analysis", long_about = None)]
struct Cli {
    /// JSON file overriding the analysis settings
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference 70 MPa design through every calculation
    Demo {
        /// Overwrap ply grade code (T700, T800, IM7-8552, E-glass)
        #[arg(long, default_value = "T700")]
        material: String,
        /// S-N curve code for the fill cycles (CFRP-T700, Al-6061-T6, Steel-4130)
        #[arg(long, default_value = "CFRP-T700")]
        sn_curve: String,
        /// Also print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate every item of a design case
    Evaluate {
        /// Path to the design JSON file
        design_path: PathBuf,
        /// Also print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reliability index β for a failure probability
    ReliabilityIndex {
        /// Failure probability in [0, 1]
        #[arg(allow_negative_numbers = true)]
        p_failure: f64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Demo { material, sn_curve, json } => {
            cmd_demo(&material, &sn_curve, cli.settings.as_deref(), json)
        }
        Commands::Evaluate { design_path, json } => cmd_evaluate(&design_path, cli.settings.as_deref(), json),
        Commands::ReliabilityIndex { p_failure } => cmd_reliability_index(p_failure),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::from(2)
        }
    }
}

fn cmd_demo(material: &str, sn_curve: &str, settings_path: Option<&Path>, json: bool) -> CalcResult<bool> {
    let grade: CompositeGrade = material.parse()?;
    let curve: SnCurve = sn_curve.parse()?;
    debug!(material = grade.code(), sn_curve = curve.code(), "building reference design");
    let mut design = reference_design(grade, curve)?;
    if let Some(path) = settings_path {
        design.settings = load_settings(path)?;
    }
    report_design(&design, json)
}

fn cmd_evaluate(design_path: &Path, settings_path: Option<&Path>, json: bool) -> CalcResult<bool> {
    debug!(path = %design_path.display(), "loading design");
    let mut design = load_design(design_path)?;
    if let Some(path) = settings_path {
        debug!(path = %path.display(), "overriding settings");
        design.settings = load_settings(path)?;
    }
    report_design(&design, json)
}

fn cmd_reliability_index(p_failure: f64) -> CalcResult<bool> {
    let beta = reliability_index(p_failure)?;
    println!("p_f = {:e}  →  β = {:.4}", p_failure, beta);
    Ok(true)
}

fn report_design(design: &DesignCase, json: bool) -> CalcResult<bool> {
    println!("Vessel - {}", design.meta.name);
    println!("{} calculation(s)", design.item_count());
    println!();

    let report = design.evaluate()?;
    for (item, entry) in design.items.iter().zip(&report.items) {
        print_item(item, &entry.output);
    }
    print_summary(&report);

    if json {
        println!();
        println!("JSON Output:");
        if let Ok(text) = serde_json::to_string_pretty(&report) {
            println!("{}", text);
        }
    }
    Ok(report.all_pass())
}

// ============================================================================
// Reference design
// ============================================================================

const REF_RADIUS_MM: f64 = 87.5;
const REF_THICKNESS_MM: f64 = 5.0;
const REF_LENGTH_MM: f64 = 800.0;
const REF_WORKING_MPA: f64 = 70.0;
const REF_STRENGTH_MPA: f64 = 2000.0;
const REF_REQUIRED_CYCLES: f64 = 11_000.0;

/// 70 MPa Type IV tank: thin overwrap wall, hoop/helical layup, fill cycling
/// and burst and fatigue scatter.
fn reference_design(grade: CompositeGrade, curve: SnCurve) -> CalcResult<DesignCase> {
    let mut design = DesignCase::new("Reference 70 MPa Type IV");

    let vessel = VesselInput {
        label: "Cylinder wall".to_string(),
        geometry: VesselGeometry {
            inner_radius_mm: REF_RADIUS_MM,
            thickness_mm: REF_THICKNESS_MM,
            cylinder_length_mm: REF_LENGTH_MM,
        },
        working_pressure_mpa: REF_WORKING_MPA,
        material: PlyMaterial::from(grade),
        ultimate_strength_mpa: Some(REF_STRENGTH_MPA),
        min_burst_ratio: None,
    };

    let laminate = LaminateInput {
        label: "Overwrap layup".to_string(),
        layup: vec![90.0, 90.0, 15.0, -15.0, 90.0, 90.0],
        radius_mm: REF_RADIUS_MM + 12.5,
        thickness_mm: 25.0,
        material: PlyMaterial::from(grade),
        working_pressure_mpa: REF_WORKING_MPA,
    };

    let fatigue_input = FatigueInput {
        label: "Fill cycles 2-70 MPa".to_string(),
        radius_mm: REF_RADIUS_MM,
        thickness_mm: REF_THICKNESS_MM,
        min_pressure_mpa: 2.0,
        max_pressure_mpa: REF_WORKING_MPA,
        component: StressComponent::Hoop,
        sn: SnSource::from(curve),
        goodman: true,
        required_cycles: REF_REQUIRED_CYCLES,
        additional_blocks: Vec::new(),
    };
    let predicted_life = fatigue::calculate(&fatigue_input)?.predicted_life;

    let burst = ReliabilityInput {
        label: "Burst scatter".to_string(),
        limit_state: LimitStateDefinition::Burst {
            nominal_burst_mpa: burst_pressure(REF_STRENGTH_MPA, REF_THICKNESS_MM, REF_RADIUS_MM)?,
            burst_cov: 0.1,
            working_pressure_mpa: REF_WORKING_MPA,
            pressure_cov: 0.05,
        },
        samples: None,
        seed: Some(42),
    };

    design.add_item(CalculationItem::Vessel(vessel));
    design.add_item(CalculationItem::Laminate(laminate));
    design.add_item(CalculationItem::Fatigue(fatigue_input));
    design.add_item(CalculationItem::Reliability(burst));
    if predicted_life.is_finite() {
        design.add_item(CalculationItem::Reliability(ReliabilityInput {
            label: "Fatigue scatter".to_string(),
            limit_state: LimitStateDefinition::Fatigue {
                predicted_life,
                required_cycles: REF_REQUIRED_CYCLES,
                cycles_cov: 0.1,
            },
            samples: None,
            seed: Some(42),
        }));
    }
    Ok(design)
}

// ============================================================================
// Output
// ============================================================================

fn print_item(item: &CalculationItem, output: &CalculationOutput) {
    println!("═══════════════════════════════════════");
    println!("  {} - {}", item.calc_type().to_uppercase(), item.label());
    println!("═══════════════════════════════════════");
    println!();
    match output {
        CalculationOutput::Vessel(r) => print_vessel(r),
        CalculationOutput::Laminate(r) => print_laminate(r),
        CalculationOutput::Fatigue(r) => print_fatigue(r),
        CalculationOutput::Reliability(r) => print_reliability(r),
    }
    println!();
    println!("  RESULT: {}", if output.passes() { "PASS" } else { "FAIL" });
    println!();
}

fn print_vessel(r: &VesselResult) {
    println!("Stresses at working pressure:");
    println!("  Hoop:      {:.1} MPa", r.hoop_stress_mpa);
    println!("  Axial:     {:.1} MPa", r.axial_stress_mpa);
    println!("  Von Mises: {:.1} MPa", r.von_mises_stress_mpa);
    println!();
    println!("Checks:");
    println!("  Burst:     {:.2} MPa ({}), ratio {:.2} vs {:.2} {}",
        r.burst_pressure_mpa,
        Bar::from(Megapascals(r.burst_pressure_mpa)),
        r.burst_ratio,
        r.min_burst_ratio,
        status_icon(r.burst_unity() <= 1.0)
    );
    println!("  Thickness: {:.2} mm required, ratio {:.2} {}",
        r.required_thickness_mm,
        r.thickness_ratio,
        status_icon(r.thickness_unity() <= 1.0)
    );
    println!();
    println!("Capacity:");
    println!("  Volume:    {}", r.internal_volume);
    println!("  Weight:    {}", r.shell_weight);
    println!("  Governs:   {}", r.governing_condition());
}

fn print_laminate(r: &LaminateResult) {
    println!("  Ply  Angle    σ1 (MPa)  σ2 (MPa) τ12 (MPa)  Tsai-Wu  Hashin");
    for ply in &r.plies {
        println!("  {:>3} {:>6.1} {:>11.1} {:>9.1} {:>9.1} {:>8.3}  {} {}",
            ply.ply_index,
            ply.angle_deg,
            ply.stress.sigma1,
            ply.stress.sigma2,
            ply.stress.tau12,
            ply.tsai_wu_index,
            ply.hashin.dominant_mode().description(),
            status_icon(ply.passes())
        );
    }
    println!();
    let fpf = &r.first_ply_failure;
    println!("First-ply failure:");
    println!("  Pressure:  {:.2} MPa (ply {} at {:.0}°, {})",
        fpf.failure_pressure_mpa,
        fpf.governing_ply,
        fpf.governing_angle_deg,
        fpf.mode.description()
    );
    println!("  FPF / working: {:.2}", r.fpf_ratio);
}

fn print_fatigue(r: &FatigueResult) {
    println!("Cycle:");
    println!("  Amplitude:   {:.1} MPa", r.stress_amplitude_mpa);
    println!("  Mean:        {:.1} MPa", r.mean_stress_mpa);
    println!("  Equivalent:  {:.1} MPa (allowable {:.1}) {}",
        r.equivalent_amplitude_mpa,
        r.allowable_amplitude_mpa,
        status_icon(r.amplitude_unity() <= 1.0)
    );
    println!();
    println!("Life:");
    println!("  Predicted:   {:.3e} cycles", r.predicted_life);
    println!("  Safety:      {:.2}", r.safety_factor);
    println!("  Miner D:     {:.4} {}", r.damage, status_icon(r.passes()));
}

fn print_reliability(r: &ReliabilityResult) {
    let mc = &r.monte_carlo;
    println!("Monte Carlo ({} limit state, seed {}):", r.limit_state, mc.seed);
    println!("  Samples:     {} ({} failures)", mc.samples, mc.failures);
    println!("  p_f:         {:.3e} [{:.3e}, {:.3e}]",
        mc.p_failure,
        mc.confidence_interval.lower,
        mc.confidence_interval.upper
    );
    println!("  g mean/sd:   {:.2} / {:.2}", mc.mean, mc.std_dev);
    println!("  β:           {:.3} vs target {:.2} {}",
        r.reliability_index,
        r.target_reliability_index,
        status_icon(r.passes())
    );
}

fn print_summary(report: &DesignReport) {
    println!("═══════════════════════════════════════");
    println!("  DESIGN: {}", if report.all_pass() { "PASS" } else { "FAIL" });
    for failed in report.failures() {
        println!("    {} {}", status_icon(false), failed.label);
    }
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
