use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use aeroperf::{
    climb_rate, constants::METERS_TO_FEET, dynamic_thrust, export, landing_distance, sink_rate,
    store::keys,
    takeoff_distance, vn_diagram, wheel_track, wing_area, wing_params, ClimbRateResults,
    DynamicThrustData, DynamicThrustInputs, ExportBundle, LandingDistanceData, SinkRateResults,
    Store, TakeoffDistanceData, VnPoint, WheelTrackPoint, WingAreaInputs, WingAreaMatrix,
    WingParametersInputs, WingParametersResults,
};

#[derive(Parser)]
#[command(name = "aeroperf")]
#[command(version = "0.1.0")]
#[command(about = "Aircraft performance calculator suite", long_about = None)]
struct Cli {
    /// Directory holding the shared calculation store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Accept documented fallback values for missing upstream data
    #[arg(long, global = true)]
    use_defaults: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Required wing area over a stall-speed / CLmax grid
    WingArea {
        /// Aircraft weight (kg)
        #[arg(short = 'w', long)]
        weight: f64,

        /// Stall speed sweep start (m/s)
        #[arg(long, default_value = "10")]
        vstall_start: f64,

        /// Stall speed sweep end (m/s)
        #[arg(long, default_value = "20")]
        vstall_end: f64,

        /// Stall speed sweep step (m/s)
        #[arg(long, default_value = "1")]
        vstall_step: f64,

        /// CLmax sweep start
        #[arg(long, default_value = "1.0")]
        clmax_start: f64,

        /// CLmax sweep end
        #[arg(long, default_value = "2.0")]
        clmax_end: f64,

        /// CLmax sweep step
        #[arg(long, default_value = "0.1")]
        clmax_step: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Wing geometry and flight-dynamics scalars
    WingParams {
        /// Root chord (in)
        #[arg(long)]
        root_chord: Option<f64>,

        /// Tip chord (in)
        #[arg(long)]
        tip_chord: Option<f64>,

        /// Wingspan (in)
        #[arg(long)]
        wingspan: Option<f64>,

        /// Surface area override (in²)
        #[arg(long)]
        surface_area: Option<f64>,

        /// Flight velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: Option<f64>,

        /// Lift coefficient
        #[arg(long)]
        cl: Option<f64>,

        /// Maximum lift coefficient
        #[arg(long)]
        cl_max: Option<f64>,

        /// Aircraft weight (kg); falls back to the wing-area weight
        #[arg(short = 'w', long)]
        weight: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Propeller thrust available vs. required over a velocity sweep
    DynamicThrust {
        /// Sweep start velocity (m/s)
        #[arg(long, default_value = "0")]
        start_vel: f64,

        /// Sweep end velocity (m/s)
        #[arg(long, default_value = "50")]
        end_vel: f64,

        /// Sweep step (m/s)
        #[arg(long, default_value = "5")]
        step_vel: f64,

        /// Zero-lift drag coefficient
        #[arg(long, default_value = "0.02")]
        cd0: f64,

        /// Propeller diameter (in)
        #[arg(long, default_value = "10")]
        prop_dia: f64,

        /// Propeller pitch (in)
        #[arg(long, default_value = "7")]
        prop_pitch: f64,

        /// Motor speed (rpm)
        #[arg(long, default_value = "8000")]
        rpm: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Climb rate from excess power over the stored thrust curve
    ClimbRate {
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Power-off sink rate over the stored thrust curve
    SinkRate {
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Landing distance from approach energy and effective drag
    LandingDistance {
        /// Drag coefficient on approach
        #[arg(long)]
        cd: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Ground-roll takeoff distance
    TakeoffDistance {
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Flight-envelope load factors (V-n diagram data)
    VnDiagram {
        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Landing-gear placement over a wheel-base sweep
    WheelTrack {
        /// Wheel base sweep start (m)
        #[arg(long)]
        start: f64,

        /// Wheel base sweep end (m)
        #[arg(long)]
        end: f64,

        /// Wheel base sweep step (m)
        #[arg(long)]
        step: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Bundle every stored result into one report
    Export {
        /// Output format
        #[arg(short = 'o', long, default_value = "json")]
        output: OutputFormat,
    },

    /// Dump raw stored documents
    Show {
        /// A single storage key; all keys when omitted
        key: Option<String>,
    },

    /// Remove one stage's stored keys
    Reset {
        /// Stage whose keys to remove
        stage: ResetStage,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResetStage {
    WingArea,
    WingParams,
    DynamicThrust,
    ClimbRate,
    SinkRate,
    LandingDistance,
    TakeoffDistance,
}

impl ResetStage {
    fn keys(self) -> &'static [&'static str] {
        match self {
            ResetStage::WingArea => &[keys::WING_AREA_INPUTS],
            ResetStage::WingParams => &[keys::WING_PARAMETERS_INPUTS],
            ResetStage::DynamicThrust => &[keys::DYNAMIC_THRUST_INPUTS, keys::DYNAMIC_THRUST_DATA],
            ResetStage::ClimbRate => &[keys::CLIMB_RATE_RESULTS],
            ResetStage::SinkRate => &[keys::SINK_RATE_RESULTS],
            ResetStage::LandingDistance => {
                &[keys::LANDING_CD_VALUE, keys::LANDING_DISTANCE_DATA]
            }
            ResetStage::TakeoffDistance => &[keys::TAKEOFF_DISTANCE_DATA],
        }
    }
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var_os("HOME").context("HOME is not set; pass --data-dir")?;
    Ok(PathBuf::from(home).join(".config").join("aeroperf").join("store"))
}

fn open_store(data_dir: Option<PathBuf>) -> anyhow::Result<Store> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    Store::open(dir).context("failed to open the calculation store")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = open_store(cli.data_dir)?;
    let use_defaults = cli.use_defaults;

    let result = match cli.command {
        Commands::WingArea {
            weight,
            vstall_start,
            vstall_end,
            vstall_step,
            clmax_start,
            clmax_end,
            clmax_step,
            output,
        } => {
            let inputs = WingAreaInputs {
                weight,
                vstall_start,
                vstall_end,
                vstall_step,
                clmax_start,
                clmax_end,
                clmax_step,
            };
            wing_area::run(&mut store, &inputs).map(|matrix| display_wing_area(&matrix, output))
        }

        Commands::WingParams {
            root_chord,
            tip_chord,
            wingspan,
            surface_area,
            velocity,
            cl,
            cl_max,
            weight,
            output,
        } => {
            let inputs = WingParametersInputs {
                root_chord,
                tip_chord,
                wingspan,
                surface_area,
                velocity,
                cl,
                cl_max,
                weight,
            };
            wing_params::run(&mut store, &inputs)
                .map(|results| display_wing_params(&results, output))
        }

        Commands::DynamicThrust {
            start_vel,
            end_vel,
            step_vel,
            cd0,
            prop_dia,
            prop_pitch,
            rpm,
            output,
        } => {
            let inputs = DynamicThrustInputs {
                start_vel,
                end_vel,
                step_vel,
                cd0,
                prop_dia,
                prop_pitch,
                rpm,
            };
            dynamic_thrust::run(&mut store, &inputs, use_defaults)
                .map(|data| display_thrust(&data, output))
        }

        Commands::ClimbRate { output } => {
            climb_rate::run(&mut store).map(|results| display_climb(&results, output))
        }

        Commands::SinkRate { output } => {
            sink_rate::run(&mut store).map(|results| display_sink(&results, output))
        }

        Commands::LandingDistance { cd, output } => {
            landing_distance::run(&mut store, cd).map(|data| display_landing(&data, output))
        }

        Commands::TakeoffDistance { output } => takeoff_distance::run(&mut store, use_defaults)
            .map(|data| display_takeoff(&data, output)),

        Commands::VnDiagram { output } => {
            vn_diagram::run(&store).map(|points| display_vn(&points, output))
        }

        Commands::WheelTrack {
            start,
            end,
            step,
            output,
        } => wheel_track::run(&store, start, end, step)
            .map(|points| display_wheel_track(&points, output)),

        Commands::Export { output } => {
            export::collect(&store).map(|bundle| display_export(&bundle, output))
        }

        Commands::Show { key } => show_raw(&store, key.as_deref()),

        Commands::Reset { stage } => {
            for key in stage.keys() {
                store.remove(key)?;
            }
            println!("removed {} key(s)", stage.keys().len());
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("error: {err}");
            if !use_defaults {
                if let Some(default) = err.recoverable_default() {
                    eprintln!("hint: re-run with --use-defaults to accept {default}");
                }
            }
            std::process::exit(1);
        }
    }
}

fn show_raw(store: &Store, key: Option<&str>) -> aeroperf::Result<()> {
    match key {
        Some(key) => match store.raw(key)? {
            Some(value) => println!("{value}"),
            None => println!("(not set)"),
        },
        None => {
            for key in store.keys()? {
                let value = store.raw(&key)?.unwrap_or_default();
                println!("{key}: {value}");
            }
        }
    }
    Ok(())
}

fn display_wing_area(matrix: &WingAreaMatrix, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(matrix),
        OutputFormat::Csv => {
            let header: Vec<String> = matrix.vstalls.iter().map(|v| format!("{v} m/s")).collect();
            println!("clmax,{}", header.join(","));
            for row in &matrix.cells {
                let cells: Vec<String> =
                    row.iter().map(|c| format!("{:.4}", c.wing_area)).collect();
                println!("{},{}", row[0].cl_max, cells.join(","));
            }
        }
        OutputFormat::Table => {
            print!("{:>8} │", "CLmax");
            for v in &matrix.vstalls {
                print!("{v:>9.2}");
            }
            println!();
            println!("{}┼{}", "─".repeat(9), "─".repeat(9 * matrix.vstalls.len()));
            for row in &matrix.cells {
                print!("{:>8.2} │", row[0].cl_max);
                for cell in row {
                    print!("{:>9.2}", cell.wing_area);
                }
                println!();
            }
            println!("(required wing area in m², velocities in m/s)");
        }
    }
}

fn display_wing_params(results: &WingParametersResults, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(results),
        OutputFormat::Csv => {
            println!("metric,value");
            println!("surface_area_in2,{:.4}", results.surface_area_in2);
            println!("surface_area_m2,{:.6}", results.surface_area_m2);
            for (name, value) in [
                ("aspect_ratio", results.aspect_ratio),
                ("taper_ratio", results.taper_ratio),
                ("wing_loading", results.wing_loading),
                ("lift", results.lift),
                ("load_factor", results.load_factor),
                ("v_stall", results.v_stall),
            ] {
                if let Some(value) = value {
                    println!("{name},{value:.4}");
                }
            }
        }
        OutputFormat::Table => {
            println!("╔══════════════════════════════════════════╗");
            println!("║            WING PARAMETERS               ║");
            println!("╠══════════════════════════════════════════╣");
            println!("║ Surface area:     {:>12.4} in²       ║", results.surface_area_in2);
            println!("║                   {:>12.6} m²        ║", results.surface_area_m2);
            if let Some(ar) = results.aspect_ratio {
                println!("║ Aspect ratio:     {ar:>12.2}           ║");
            }
            if let Some(taper) = results.taper_ratio {
                println!("║ Taper ratio:      {taper:>12.3}           ║");
            }
            if let Some(loading) = results.wing_loading {
                println!("║ Wing loading:     {loading:>12.2} N/m²      ║");
            }
            if let Some(lift) = results.lift {
                println!("║ Lift:             {lift:>12.2} N         ║");
            }
            if let Some(n) = results.load_factor {
                println!("║ Load factor:      {n:>12.2}           ║");
            }
            if let Some(v_stall) = results.v_stall {
                println!("║ Stall speed:      {v_stall:>12.2} m/s       ║");
            }
            println!("╚══════════════════════════════════════════╝");
        }
    }
}

fn display_thrust(data: &DynamicThrustData, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => {
            println!("velocity,thrust_available,thrust_available_kgf,thrust_required,net_thrust");
            for p in &data.thrust_curve {
                println!(
                    "{:.2},{:.2},{:.2},{},{}",
                    p.velocity,
                    p.thrust,
                    p.thrust / 9.81,
                    fmt_opt(p.drag),
                    fmt_opt(p.net_thrust)
                );
            }
        }
        OutputFormat::Table => {
            println!(
                "{:>10} {:>12} {:>12} {:>12} {:>12}",
                "V (m/s)", "T avail (N)", "T avail (kgf)", "T req (N)", "net (N)"
            );
            for p in &data.thrust_curve {
                println!(
                    "{:>10.2} {:>12.2} {:>12.2} {:>12} {:>12}",
                    p.velocity,
                    p.thrust,
                    p.thrust / 9.81,
                    fmt_opt(p.drag),
                    fmt_opt(p.net_thrust)
                );
            }
            println!();
            println!("╔══════════════════════════════════════════╗");
            println!("║             THRUST SUMMARY               ║");
            println!("╠══════════════════════════════════════════╣");
            println!("║ Max thrust:       {:>12.2} N         ║", data.max_thrust);
            println!("║ Min thrust:       {:>12.2} N         ║", data.min_thrust);
            println!("║ Average thrust:   {:>12.2} N         ║", data.thrust_range.average);
            println!("║ Propeller:        {:>6.1} x {:<6.1} in     ║", data.prop_diameter, data.prop_pitch);
            println!("║ Motor speed:      {:>12.0} rpm       ║", data.rpm);
            println!("╚══════════════════════════════════════════╝");
        }
    }
}

fn display_climb(results: &ClimbRateResults, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(results),
        OutputFormat::Csv => {
            println!("velocity,climb_rate_ms,climb_rate_fpm,power_available,power_required");
            for i in 0..results.velocity_range.len() {
                println!(
                    "{:.2},{:.3},{:.1},{:.1},{:.1}",
                    results.velocity_range[i],
                    results.climb_rates_ms[i],
                    results.climb_rates_fpm[i],
                    results.power_available[i],
                    results.power_required[i]
                );
            }
        }
        OutputFormat::Table => {
            println!(
                "{:>10} {:>12} {:>14} {:>12} {:>12}",
                "V (m/s)", "climb (m/s)", "climb (ft/min)", "P avail (W)", "P req (W)"
            );
            for i in 0..results.velocity_range.len() {
                println!(
                    "{:>10.1} {:>12.3} {:>14.1} {:>12.1} {:>12.1}",
                    results.velocity_range[i],
                    results.climb_rates_ms[i],
                    results.climb_rates_fpm[i],
                    results.power_available[i],
                    results.power_required[i]
                );
            }
            let max = &results.max_climb_rate;
            println!();
            println!("╔══════════════════════════════════════════╗");
            println!("║         MAXIMUM CLIMB PERFORMANCE        ║");
            println!("╠══════════════════════════════════════════╣");
            println!("║ Climb rate:       {:>12.3} m/s       ║", max.climb_rate_ms);
            println!("║                   {:>12.0} ft/min    ║", max.climb_rate_fpm);
            println!("║ At velocity:      {:>12.1} m/s       ║", max.velocity);
            println!("╚══════════════════════════════════════════╝");
        }
    }
}

fn display_sink(results: &SinkRateResults, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(results),
        OutputFormat::Csv => {
            println!("velocity,sink_rate_ms,sink_rate_fpm,drag");
            for i in 0..results.velocity_range.len() {
                println!(
                    "{:.2},{:.3},{:.1},{:.2}",
                    results.velocity_range[i],
                    results.sink_rates_ms[i],
                    results.sink_rates_fpm[i],
                    results.drag_values[i]
                );
            }
        }
        OutputFormat::Table => {
            println!(
                "{:>10} {:>12} {:>14} {:>10}",
                "V (m/s)", "sink (m/s)", "sink (ft/min)", "drag (N)"
            );
            for i in 0..results.velocity_range.len() {
                println!(
                    "{:>10.1} {:>12.3} {:>14.1} {:>10.2}",
                    results.velocity_range[i],
                    results.sink_rates_ms[i],
                    results.sink_rates_fpm[i],
                    results.drag_values[i]
                );
            }
            println!("(weight {:.2} kg)", results.weight);
        }
    }
}

fn display_landing(data: &LandingDistanceData, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => {
            println!("metric,value");
            println!("cd,{:.4}", data.cd);
            println!("v_stall,{:.2}", data.v_stall);
            println!("v_takeoff,{:.2}", data.v_takeoff);
            println!("v_touchdown,{:.2}", data.v_touchdown);
            println!("lift,{:.2}", data.lift);
            println!("drag,{:.2}", data.drag);
            println!("net_thrust_at_v,{:.2}", data.net_thrust_at_v);
            println!("effective_drag,{:.2}", data.effective_drag);
            println!("landing_distance,{:.2}", data.landing_distance);
        }
        OutputFormat::Table => {
            println!("╔══════════════════════════════════════════╗");
            println!("║             LANDING DISTANCE             ║");
            println!("╠══════════════════════════════════════════╣");
            println!("║ Stall speed:      {:>12.2} m/s       ║", data.v_stall);
            println!("║ Approach speed:   {:>12.2} m/s       ║", data.v_takeoff);
            println!("║ Touchdown speed:  {:>12.2} m/s       ║", data.v_touchdown);
            println!("║ Lift:             {:>12.2} N         ║", data.lift);
            println!("║ Drag:             {:>12.2} N         ║", data.drag);
            println!("║ Net thrust:       {:>12.2} N         ║", data.net_thrust_at_v);
            println!("║ Effective drag:   {:>12.2} N         ║", data.effective_drag);
            println!("╠══════════════════════════════════════════╣");
            println!("║ Distance:         {:>12.2} m         ║", data.landing_distance);
            println!("║                   {:>12.2} ft        ║", data.landing_distance * METERS_TO_FEET);
            println!("╚══════════════════════════════════════════╝");
        }
    }
}

fn display_takeoff(data: &TakeoffDistanceData, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => {
            println!("metric,value");
            println!("distance,{:.2}", data.distance);
            println!("lift_force,{:.2}", data.lift_force);
            println!("thrust_at_takeoff,{:.2}", data.thrust_at_takeoff);
            println!("v_takeoff,{:.2}", data.v_takeoff);
            println!("v_stall,{:.2}", data.v_stall);
            println!("weight_n,{:.2}", data.weight);
            println!("surface_area,{:.4}", data.surface_area);
            println!("cl_max,{:.4}", data.cl_max);
        }
        OutputFormat::Table => {
            println!("╔══════════════════════════════════════════╗");
            println!("║             TAKEOFF DISTANCE             ║");
            println!("╠══════════════════════════════════════════╣");
            println!("║ Stall speed:      {:>12.2} m/s       ║", data.v_stall);
            println!("║ Rotation speed:   {:>12.2} m/s       ║", data.v_takeoff);
            println!("║ Thrust:           {:>12.2} N         ║", data.thrust_at_takeoff);
            println!("║ Lift at rotation: {:>12.2} N         ║", data.lift_force);
            println!("║ Weight:           {:>12.2} N         ║", data.weight);
            println!("║ Wing area:        {:>12.4} m²        ║", data.surface_area);
            println!("║ CLmax:            {:>12.4}           ║", data.cl_max);
            println!("╠══════════════════════════════════════════╣");
            println!("║ Ground roll:      {:>12.2} m         ║", data.distance);
            println!("╚══════════════════════════════════════════╝");
        }
    }
}

fn display_vn(points: &[VnPoint], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&points),
        OutputFormat::Csv => {
            println!("velocity,dynamic_pressure,lift,weight_n,load_factor");
            for p in points {
                println!(
                    "{:.2},{:.2},{:.2},{:.2},{:.4}",
                    p.velocity, p.dynamic_pressure, p.lift, p.weight_n, p.load_factor
                );
            }
        }
        OutputFormat::Table => {
            println!(
                "{:>10} {:>10} {:>10} {:>10} {:>8}",
                "V (m/s)", "q (Pa)", "lift (N)", "W (N)", "n"
            );
            for p in points {
                println!(
                    "{:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8.4}",
                    p.velocity, p.dynamic_pressure, p.lift, p.weight_n, p.load_factor
                );
            }
        }
    }
}

fn display_wheel_track(points: &[WheelTrackPoint], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&points),
        OutputFormat::Csv => {
            println!("wheel_base,main_gear_distance,nose_gear_distance");
            for p in points {
                println!(
                    "{:.2},{:.2},{:.2}",
                    p.wheel_base, p.main_gear_distance, p.nose_gear_distance
                );
            }
        }
        OutputFormat::Table => {
            println!(
                "{:>14} {:>16} {:>16}",
                "wheel base (m)", "main gear (m)", "nose gear (m)"
            );
            for p in points {
                println!(
                    "{:>14.2} {:>16.2} {:>16.2}",
                    p.wheel_base, p.main_gear_distance, p.nose_gear_distance
                );
            }
        }
    }
}

fn display_export(bundle: &ExportBundle, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(bundle),
        OutputFormat::Csv => {
            println!("section,present");
            println!("wingAreaInputs,{}", bundle.wing_area_inputs.is_some());
            println!(
                "wingParametersInputs,{}",
                bundle.wing_parameters_inputs.is_some()
            );
            println!("aerodynamicData,{}", bundle.aerodynamic_data.is_some());
            println!(
                "dynamicThrustInputs,{}",
                bundle.dynamic_thrust_inputs.is_some()
            );
            println!("dynamicThrustData,{}", bundle.dynamic_thrust_data.is_some());
            println!("climbRateResults,{}", bundle.climb_rate_results.is_some());
            println!("sinkRateResults,{}", bundle.sink_rate_results.is_some());
            println!(
                "landingDistanceData,{}",
                bundle.landing_distance_data.is_some()
            );
            println!("landingCdValue,{}", bundle.landing_cd_value.is_some());
            println!(
                "takeoffDistanceData,{}",
                bundle.takeoff_distance_data.is_some()
            );
        }
        OutputFormat::Table => {
            if bundle.is_empty() {
                println!("nothing stored yet");
            } else {
                println!(
                    "{} section(s) collected at {}",
                    bundle.section_count(),
                    bundle.exported_at
                );
                print_json(bundle);
            }
        }
    }
}

fn fmt_opt(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "-".to_string()
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("error: failed to serialize output: {err}"),
    }
}
