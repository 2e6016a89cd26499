use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use payroll_core::{
    DeductionCalculator, PayPeriod, PersonalProfile, PolicyRegistry, PolicyYearConfig, Region,
};
use payroll_data::{PolicyLoader, ProfileLoader};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// German payroll deduction calculator.
///
/// Computes income tax, solidarity surcharge, church tax and the employee
/// share of social insurance for a gross salary.
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about, long_about = None)]
struct Cli {
    /// Policy year to compute with. Defaults to the latest registered year.
    #[arg(long, global = true)]
    year: Option<i32>,

    /// TOML policy file to register before computing.
    ///
    /// A file for an existing year replaces the built-in policy.
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Log intermediate values of every calculation step.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute one breakdown from command-line flags.
    Calc(CalcArgs),

    /// Compute a breakdown for every row of a CSV file.
    Batch {
        /// CSV file with one payroll request per row.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the selected policy year as TOML.
    Policy,
}

#[derive(Debug, Args)]
struct CalcArgs {
    /// Gross income for one pay period.
    #[arg(long)]
    gross: Decimal,

    /// Pay period of `--gross`: monthly or yearly.
    #[arg(long, default_value = "yearly", value_parser = parse_period)]
    period: PayPeriod,

    #[arg(long, default_value_t = false)]
    married: bool,

    #[arg(long, default_value_t = 0)]
    children: u32,

    #[arg(long, default_value_t = false)]
    single_parent: bool,

    #[arg(long, default_value_t = false)]
    church: bool,

    /// Region code: BY, BW or OTHER.
    #[arg(long, default_value = "OTHER", value_parser = parse_region)]
    region: Region,

    /// Privately insured; the health contribution is zero.
    #[arg(long, default_value_t = false)]
    private: bool,

    #[arg(long, default_value_t = false)]
    saxony: bool,

    /// Supplemental health rate in percent. Defaults to the policy's rate.
    #[arg(long)]
    supplemental_rate: Option<Decimal>,
}

fn parse_period(s: &str) -> Result<PayPeriod, String> {
    PayPeriod::parse(s).ok_or_else(|| format!("unknown pay period '{s}' (monthly, yearly)"))
}

fn parse_region(s: &str) -> Result<Region, String> {
    Region::parse(s).ok_or_else(|| {
        let codes: Vec<_> = Region::all().iter().map(Region::as_str).collect();
        format!("unknown region '{s}' ({})", codes.join(", "))
    })
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info`, or `debug` with `--verbose`.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── commands ────────────────────────────────────────────────────────────────

fn build_registry(policy_file: Option<&Path>) -> Result<PolicyRegistry> {
    let mut registry = PolicyRegistry::with_builtin();
    if let Some(path) = policy_file {
        let policy = PolicyLoader::load_from_file(path)
            .with_context(|| format!("Failed to load policy: {}", path.display()))?;
        registry.register(policy);
    }
    debug!(years = ?registry.available_years(), "policy registry ready");
    Ok(registry)
}

fn run_calc(
    policy: &PolicyYearConfig,
    args: CalcArgs,
) -> Result<()> {
    let profile = PersonalProfile {
        is_married: args.married,
        num_children: args.children,
        is_single_parent: args.single_parent,
        is_church_member: args.church,
        region: args.region,
        is_privately_insured: args.private,
        is_in_saxony: args.saxony,
        additional_health_rate_percent: args
            .supplemental_rate
            .unwrap_or(policy.contributions.health.default_supplemental_rate_percent),
    };
    let annual_gross = args
        .period
        .to_annual(args.gross)
        .with_context(|| format!("Gross income {} is too large to annualise", args.gross))?;

    let breakdown = DeductionCalculator::new(policy)
        .compute_breakdown(annual_gross, &profile)
        .context("Failed to compute deductions")?;

    println!("Policy year {}\n", policy.policy_year);
    println!("{breakdown}\n");
    println!("{}", breakdown.per_period(PayPeriod::Monthly));
    Ok(())
}

fn run_batch(
    policy: &PolicyYearConfig,
    file: &Path,
) -> Result<()> {
    let loader = ProfileLoader::new(policy.contributions.health.default_supplemental_rate_percent);
    let requests = loader
        .load_from_file(file)
        .with_context(|| format!("Failed to load payroll file: {}", file.display()))?;
    info!("Loaded {} requests from {}", requests.len(), file.display());

    let results = DeductionCalculator::new(policy).compute_batch(&requests);

    println!(
        "{:>4} {:>12} {:>10} {:>8} {:>8} {:>12} {:>12} {:>12}",
        "row", "gross", "tax", "soli", "church", "social", "deductions", "net"
    );
    let mut failed = 0usize;
    for (idx, result) in results.iter().enumerate() {
        let row = idx + 1;
        match result {
            Ok(b) => println!(
                "{:>4} {:>12} {:>10} {:>8} {:>8} {:>12} {:>12} {:>12}",
                row,
                b.gross_income,
                b.income_tax,
                b.solidarity_surcharge,
                b.church_tax,
                b.total_contributions(),
                b.total_deductions,
                b.net_income
            ),
            Err(err) => {
                failed += 1;
                warn!("row {row}: {err}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} rows failed", results.len());
    }
    Ok(())
}

fn run_policy(policy: &PolicyYearConfig) -> Result<()> {
    let rendered = PolicyLoader::to_toml_string(policy).context("Failed to render policy")?;
    print!("{rendered}");
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = build_registry(cli.policy.as_deref())?;
    let policy = match cli.year {
        Some(year) => registry
            .get(year)
            .with_context(|| format!("Available years: {:?}", registry.available_years()))?,
        None => registry.latest().context("No policy registered")?,
    };

    match cli.command {
        Command::Calc(args) => run_calc(policy, args),
        Command::Batch { file } => run_batch(policy, &file),
        Command::Policy => run_policy(policy),
    }
}
