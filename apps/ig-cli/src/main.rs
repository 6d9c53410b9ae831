use clap::{Args, Parser, Subcommand, ValueEnum};
use ig_core::celsius_to_kelvin;
use ig_core::constants::{CP_DEFAULT, CV_DEFAULT};
use ig_formulas::{
    CarnotInputs, CyclePoint, FinalSpec, FormulaError, IdealGasKnowns, OttoInputs, PathInputs,
    Process, ProcessInputs, Series, SolveFor, StatePoint, VanDerWaals, VolumeRange, carnot_cycle,
    compressibility, curves, ideal_gas, molecular_speeds, otto_cycle, process_energetics,
    process_path, real_gas, vdw_pressure,
};
use ig_gases::{GasEntry, GasError, GasTable};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Formula(#[from] FormulaError),
    #[error(transparent)]
    Gas(#[from] GasError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(&'static str),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ig-cli")]
#[command(about = "idealgas CLI - ideal gas law, process energetics, kinetics and cycles", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Gas table file (YAML, or JSON with a .json extension) replacing the built-in table
    #[arg(long, global = true)]
    gas_table: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve PV = nRT for one variable
    GasLaw {
        /// Variable to solve for: P, V, n or T
        #[arg(long, short = 's')]
        solve_for: SolveFor,
        /// Pressure in atm
        #[arg(long, short = 'p', default_value_t = 1.0)]
        pressure: f64,
        /// Volume in L
        #[arg(long, short = 'v', default_value_t = 1.0)]
        volume: f64,
        /// Amount of substance in mol
        #[arg(long, short = 'n', default_value_t = 1.0)]
        moles: f64,
        /// Temperature in °C
        #[arg(long, short = 't', default_value_t = 25.0)]
        celsius: f64,
    },
    /// q, w, ΔU and ΔH for a process, ΔT measured from 25 °C
    Process {
        process: Process,
        #[command(flatten)]
        state: FormState,
        #[command(flatten)]
        gas: GasArgs,
    },
    /// Energetics between an initial state and one given final variable
    ProcessPath {
        process: Process,
        /// Amount of substance in mol
        #[arg(long, short = 'n', default_value_t = 1.0)]
        moles: f64,
        /// Initial temperature in K
        #[arg(long)]
        t1: f64,
        /// Initial pressure in atm
        #[arg(long)]
        p1: f64,
        /// Initial volume in L
        #[arg(long)]
        v1: f64,
        /// Final volume in L
        #[arg(long, conflicts_with_all = ["p2", "t2"])]
        v2: Option<f64>,
        /// Final pressure in atm
        #[arg(long, conflicts_with = "t2")]
        p2: Option<f64>,
        /// Final temperature in K
        #[arg(long)]
        t2: Option<f64>,
        #[command(flatten)]
        gas: GasArgs,
    },
    /// Mean, rms and most probable molecular speeds
    Kinetics {
        /// Temperature in °C
        #[arg(long, short = 't', default_value_t = 25.0)]
        celsius: f64,
        #[command(flatten)]
        gas: GasArgs,
    },
    /// Van der Waals pressure compared with the ideal gas
    Vdw {
        /// Amount of substance in mol
        #[arg(long, short = 'n', default_value_t = 1.0)]
        moles: f64,
        /// Volume in L
        #[arg(long, short = 'v', default_value_t = 1.0)]
        volume: f64,
        /// Temperature in °C
        #[arg(long, short = 't', default_value_t = 25.0)]
        celsius: f64,
        #[command(flatten)]
        gas: GasArgs,
    },
    /// Carnot cycle between two reservoirs
    Carnot {
        /// Hot reservoir temperature in K
        #[arg(long)]
        t_hot: f64,
        /// Cold reservoir temperature in K
        #[arg(long)]
        t_cold: f64,
        /// Amount of substance in mol
        #[arg(long, short = 'n', default_value_t = 1.0)]
        moles: f64,
        /// Volume before isothermal expansion in L
        #[arg(long, default_value_t = 1.0)]
        v1: f64,
        /// Volume after isothermal expansion in L
        #[arg(long, default_value_t = 2.0)]
        v2: f64,
        #[command(flatten)]
        gas: GasArgs,
        /// Also write the P–V trace as CSV to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Otto cycle for a compression ratio and heat input
    Otto {
        /// Compression ratio V_max/V_min
        #[arg(long, short = 'r')]
        ratio: f64,
        /// Heat added during combustion in J
        #[arg(long, default_value_t = 10_000.0)]
        q_in: f64,
        /// Intake temperature in K
        #[arg(long, default_value_t = 300.0)]
        t1: f64,
        /// Intake volume in L
        #[arg(long, default_value_t = 1.0)]
        v1: f64,
        /// Amount of substance in mol
        #[arg(long, short = 'n', default_value_t = 1.0)]
        moles: f64,
        #[command(flatten)]
        gas: GasArgs,
        /// Also write the P–V trace as CSV to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List gases in the table, optionally filtered
    Gases {
        query: Option<String>,
    },
    /// Export a curve as CSV
    Curve {
        kind: CurveKind,
        /// Amount of substance in mol
        #[arg(long, short = 'n', default_value_t = 1.0)]
        moles: f64,
        /// Temperature in °C
        #[arg(long, short = 't', default_value_t = 25.0)]
        celsius: f64,
        /// Smallest volume in L
        #[arg(long, default_value_t = 0.1)]
        v_min: f64,
        /// Largest volume in L
        #[arg(long, default_value_t = 5.0)]
        v_max: f64,
        /// Largest speed in m/s (speed distribution)
        #[arg(long, default_value_t = 2000.0)]
        speed_max: f64,
        /// Sample count
        #[arg(long, default_value_t = 200)]
        points: usize,
        #[command(flatten)]
        gas: GasArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CurveKind {
    /// Ideal isotherm P(V)
    Isotherm,
    /// Van der Waals isotherm P(V), ideal isotherm alongside
    Vdw,
    /// Maxwell-Boltzmann speed density
    Speeds,
}

/// The shared inputs of the classroom form.
#[derive(Args)]
struct FormState {
    /// Amount of substance in mol
    #[arg(long, short = 'n', default_value_t = 1.0)]
    moles: f64,
    /// Temperature in °C
    #[arg(long, short = 't', default_value_t = 25.0)]
    celsius: f64,
    /// Pressure in atm
    #[arg(long, short = 'p', default_value_t = 1.0)]
    pressure: f64,
    /// Initial volume in L
    #[arg(long, default_value_t = 1.0)]
    v1: f64,
    /// Final volume in L
    #[arg(long, default_value_t = 2.0)]
    v2: f64,
}

/// Gas constants, from the table or given directly. Direct values win.
#[derive(Args)]
struct GasArgs {
    /// Gas id, name or alias from the gas table
    #[arg(long, short = 'g')]
    gas: Option<String>,
    /// Cp in J/(mol·K)
    #[arg(long)]
    cp: Option<f64>,
    /// Cv in J/(mol·K)
    #[arg(long)]
    cv: Option<f64>,
    /// Heat capacity ratio, overriding Cp/Cv
    #[arg(long)]
    gamma: Option<f64>,
    /// Molar mass in g/mol
    #[arg(long)]
    molar_mass: Option<f64>,
    /// Van der Waals a in kPa·L²/mol²
    #[arg(long)]
    vdw_a: Option<f64>,
    /// Van der Waals b in L/mol
    #[arg(long)]
    vdw_b: Option<f64>,
}

impl GasArgs {
    fn entry<'t>(&self, table: &'t GasTable) -> CliResult<Option<&'t GasEntry>> {
        match &self.gas {
            Some(query) => Ok(Some(table.find(query)?)),
            None => Ok(None),
        }
    }

    /// (Cp, Cv), falling back to the form defaults 5/2·R and 3/2·R.
    fn heat_capacities(&self, table: &GasTable) -> CliResult<(f64, f64)> {
        let entry = self.entry(table)?;
        let cp = self
            .cp
            .or(entry.map(|e| e.properties.cp))
            .unwrap_or(CP_DEFAULT);
        let cv = self
            .cv
            .or(entry.map(|e| e.properties.cv))
            .unwrap_or(CV_DEFAULT);
        Ok((cp, cv))
    }

    fn gamma(&self, table: &GasTable) -> CliResult<f64> {
        if let Some(gamma) = self.gamma {
            return Ok(gamma);
        }
        let (cp, cv) = self.heat_capacities(table)?;
        Ok(cp / cv)
    }

    fn molar_mass(&self, table: &GasTable) -> CliResult<f64> {
        self.molar_mass
            .or(self.entry(table)?.map(|e| e.properties.molar_mass))
            .ok_or(CliError::Usage("give --gas or --molar-mass"))
    }

    fn vdw(&self, table: &GasTable) -> CliResult<VanDerWaals> {
        let entry = self.entry(table)?;
        let a = self.vdw_a.or(entry.map(|e| e.properties.vdw_a));
        let b = self.vdw_b.or(entry.map(|e| e.properties.vdw_b));
        match (a, b) {
            (Some(a), Some(b)) => Ok(VanDerWaals::new(a, b)),
            _ => Err(CliError::Usage("give --gas or both --vdw-a and --vdw-b")),
        }
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let table = load_table(cli.gas_table.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::GasLaw {
            solve_for,
            pressure,
            volume,
            moles,
            celsius,
        } => cmd_gas_law(
            solve_for,
            IdealGasKnowns {
                p: pressure,
                v: volume,
                n: moles,
                t: celsius_to_kelvin(celsius),
            },
            json,
        ),
        Commands::Process {
            process,
            state,
            gas,
        } => cmd_process(process, &state, &gas, &table, json),
        Commands::ProcessPath {
            process,
            moles,
            t1,
            p1,
            v1,
            v2,
            p2,
            t2,
            gas,
        } => {
            let spec = match (v2, p2, t2) {
                (Some(v), _, _) => FinalSpec::Volume(v),
                (_, Some(p), _) => FinalSpec::Pressure(p),
                (_, _, Some(t)) => FinalSpec::Temperature(t),
                _ => return Err(CliError::Usage("give one of --v2, --p2 or --t2")),
            };
            let initial = StatePoint {
                t: t1,
                p: p1,
                v: v1,
            };
            cmd_process_path(process, moles, initial, spec, &gas, &table, json)
        }
        Commands::Kinetics { celsius, gas } => cmd_kinetics(celsius, &gas, &table, json),
        Commands::Vdw {
            moles,
            volume,
            celsius,
            gas,
        } => cmd_vdw(moles, volume, celsius, &gas, &table, json),
        Commands::Carnot {
            t_hot,
            t_cold,
            moles,
            v1,
            v2,
            gas,
            export,
        } => {
            let inputs = CarnotInputs {
                n: moles,
                t_hot,
                t_cold,
                v1,
                v2,
                gamma: gas.gamma(&table)?,
            };
            cmd_carnot(&inputs, export.as_deref(), json)
        }
        Commands::Otto {
            ratio,
            q_in,
            t1,
            v1,
            moles,
            gas,
            export,
        } => {
            let inputs = OttoInputs {
                n: moles,
                t1,
                v1,
                compression_ratio: ratio,
                q_in,
                gamma: gas.gamma(&table)?,
            };
            cmd_otto(&inputs, export.as_deref(), json)
        }
        Commands::Gases { query } => cmd_gases(&table, query.as_deref().unwrap_or(""), json),
        Commands::Curve {
            kind,
            moles,
            celsius,
            v_min,
            v_max,
            speed_max,
            points,
            gas,
            output,
        } => {
            let t = celsius_to_kelvin(celsius);
            let range = VolumeRange {
                start: v_min,
                end: v_max,
                points,
            };
            let series = match kind {
                CurveKind::Isotherm => vec![curves::isotherm(moles, t, range)?],
                CurveKind::Vdw => curves::vdw_comparison(moles, t, gas.vdw(&table)?, range)?.to_vec(),
                CurveKind::Speeds => vec![curves::speed_distribution(
                    t,
                    gas.molar_mass(&table)?,
                    speed_max,
                    points,
                )?],
            };
            cmd_export_curve(kind, &series, output.as_deref(), json)
        }
    }
}

fn load_table(path: Option<&Path>) -> CliResult<GasTable> {
    let Some(path) = path else {
        return Ok(GasTable::builtin());
    };
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => GasTable::from_json_str(&text)?,
        _ => GasTable::from_yaml_str(&text)?,
    };
    tracing::info!(path = %path.display(), gases = table.len(), "loaded gas table");
    Ok(table)
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_gas_law(solve_for: SolveFor, knowns: IdealGasKnowns, json: bool) -> CliResult<()> {
    let solution = ideal_gas::solve(knowns.query(solve_for))?;
    if json {
        return print_json(&solution);
    }
    println!("{}", solution);
    Ok(())
}

fn cmd_process(
    process: Process,
    state: &FormState,
    gas: &GasArgs,
    table: &GasTable,
    json: bool,
) -> CliResult<()> {
    let (cp, cv) = gas.heat_capacities(table)?;
    let inputs = ProcessInputs {
        n: state.moles,
        t: celsius_to_kelvin(state.celsius),
        p: state.pressure,
        v1: state.v1,
        v2: state.v2,
        cp,
        cv,
    };
    let energetics = process_energetics(process, &inputs)?;
    if json {
        return print_json(&energetics);
    }
    println!("{} process", process);
    println!("{}", energetics);
    Ok(())
}

fn cmd_process_path(
    process: Process,
    n: f64,
    initial: StatePoint,
    spec: FinalSpec,
    gas: &GasArgs,
    table: &GasTable,
    json: bool,
) -> CliResult<()> {
    let (cp, cv) = gas.heat_capacities(table)?;
    let path = process_path(
        process,
        &PathInputs {
            n,
            cp,
            cv,
            initial,
            spec,
        },
    )?;
    if json {
        return print_json(&path);
    }
    println!("{} process", process);
    println!("  {:<8} {:>10} {:>10} {:>10}", "state", "T [K]", "P [atm]", "V [L]");
    for (label, s) in [("initial", &path.initial), ("final", &path.final_state)] {
        println!("  {:<8} {:>10.2} {:>10.4} {:>10.4}", label, s.t, s.p, s.v);
    }
    println!("{}", path.energetics);
    Ok(())
}

fn cmd_kinetics(celsius: f64, gas: &GasArgs, table: &GasTable, json: bool) -> CliResult<()> {
    let t = celsius_to_kelvin(celsius);
    let speeds = molecular_speeds(t, gas.molar_mass(table)?)?;
    if json {
        return print_json(&speeds);
    }
    println!("Molecular speeds at {:.2} K", t);
    println!("  Mean speed:          {:.2} m/s", speeds.mean);
    println!("  RMS speed:           {:.2} m/s", speeds.rms);
    println!("  Most probable speed: {:.2} m/s", speeds.most_probable);
    println!(
        "  Mean kinetic energy: {:.2} J/mol",
        speeds.mean_kinetic_energy
    );
    Ok(())
}

#[derive(Serialize)]
struct VdwReport {
    ideal_kpa: f64,
    vdw_kpa: f64,
    compressibility: f64,
    excluded_volume: f64,
}

fn cmd_vdw(
    n: f64,
    volume: f64,
    celsius: f64,
    gas: &GasArgs,
    table: &GasTable,
    json: bool,
) -> CliResult<()> {
    let t = celsius_to_kelvin(celsius);
    let coeffs = gas.vdw(table)?;
    let report = VdwReport {
        ideal_kpa: real_gas::ideal_pressure_kpa(t, volume, n)?,
        vdw_kpa: vdw_pressure(t, volume, n, coeffs)?,
        compressibility: compressibility(t, volume, n, coeffs)?,
        excluded_volume: coeffs.excluded_volume(n),
    };
    if json {
        return print_json(&report);
    }
    println!("Ideal gas:      {:.4} kPa", report.ideal_kpa);
    println!("Van der Waals:  {:.4} kPa", report.vdw_kpa);
    println!("Z = P/P_ideal:  {:.4}", report.compressibility);
    println!("Excluded n·b:   {:.4} L", report.excluded_volume);
    Ok(())
}

fn print_points(points: &[CyclePoint]) {
    println!(
        "  {:<12} {:>10} {:>10} {:>10}",
        "point", "V [L]", "T [K]", "P [atm]"
    );
    for p in points {
        println!(
            "  {:<12} {:>10.4} {:>10.2} {:>10.4}",
            p.label, p.volume, p.temperature, p.pressure
        );
    }
}

/// Samples per curved leg of an exported cycle trace.
const CYCLE_SAMPLES: usize = 50;

fn cmd_carnot(inputs: &CarnotInputs, export: Option<&Path>, json: bool) -> CliResult<()> {
    let cycle = carnot_cycle(inputs)?;
    if let Some(path) = export {
        let trace = curves::carnot_path(&cycle, CYCLE_SAMPLES);
        write_csv(path, &trace.to_csv("volume_l", "pressure_atm"), trace.len())?;
    }
    if json {
        return print_json(&cycle);
    }
    println!("Carnot cycle: efficiency {:.4}", cycle.efficiency);
    print_points(&cycle.points);
    println!("\n  {:<24} {:>12} {:>12}", "leg", "q [J]", "w [J]");
    for leg in &cycle.legs {
        println!("  {:<24} {:>12.2} {:>12.2}", leg.label, leg.q, leg.w);
    }
    println!("\n  Q_in:     {:.2} J", cycle.q_in);
    println!("  Q_out:    {:.2} J", cycle.q_out);
    println!("  Net work: {:.2} J", cycle.net_work);
    Ok(())
}

fn cmd_otto(inputs: &OttoInputs, export: Option<&Path>, json: bool) -> CliResult<()> {
    let cycle = otto_cycle(inputs)?;
    if let Some(path) = export {
        let trace = curves::otto_path(&cycle, CYCLE_SAMPLES);
        write_csv(path, &trace.to_csv("volume_l", "pressure_atm"), trace.len())?;
    }
    if json {
        return print_json(&cycle);
    }
    println!("Otto cycle: efficiency {:.4}", cycle.efficiency);
    print_points(&cycle.points);
    println!("\n  Q_in:     {:.2} J", cycle.q_in);
    println!("  Q_out:    {:.2} J", cycle.q_out);
    println!("  Net work: {:.2} J", cycle.net_work);
    Ok(())
}

fn cmd_gases(table: &GasTable, query: &str, json: bool) -> CliResult<()> {
    let entries = table.filter(query);
    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No gases match '{}'", query);
        return Ok(());
    }
    println!(
        "  {:<6} {:<18} {:>9} {:>8} {:>8} {:>6} {:>8} {:>8}",
        "id", "name", "M", "Cp", "Cv", "γ", "a", "b"
    );
    for e in entries {
        let p = &e.properties;
        println!(
            "  {:<6} {:<18} {:>9.3} {:>8.3} {:>8.3} {:>6.3} {:>8.2} {:>8.5}",
            e.id,
            e.name,
            p.molar_mass,
            p.cp,
            p.cv,
            p.gamma(),
            p.vdw_a,
            p.vdw_b
        );
    }
    Ok(())
}

fn cmd_export_curve(
    kind: CurveKind,
    series: &[Series],
    output: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    if json {
        return print_json(&series);
    }

    let (x_header, y_header) = match kind {
        CurveKind::Isotherm => ("volume_l", "pressure_atm"),
        CurveKind::Vdw => ("volume_l", "pressure_kpa"),
        CurveKind::Speeds => ("speed_mps", "density"),
    };

    // One CSV block per series, label as a comment line
    let mut csv = String::new();
    for s in series {
        csv.push_str(&format!("# {}\n", s.label));
        csv.push_str(&s.to_csv(x_header, y_header));
    }

    if let Some(path) = output {
        let total: usize = series.iter().map(Series::len).sum();
        write_csv(path, &csv, total)?;
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn write_csv(path: &Path, csv: &str, points: usize) -> CliResult<()> {
    std::fs::write(path, csv).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    println!("✓ Exported {} data points to {}", points, path.display());
    Ok(())
}
