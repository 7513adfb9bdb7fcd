//! `cdms` entry-point: runs contract invocations against a snapshot file.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use cdms::config::CdmsSettings;
use cdms::domain::InvocationContext;
use cdms::inbound::contract::Contract;
use cdms::outbound::digest::sha256_file;
use cdms::outbound::identity::StaticIdentityResolver;
use cdms::outbound::ledger::LedgerSnapshotFile;

/// `cdms` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "cdms",
    about = "Case-management ledger with policy-based access control",
    version
)]
struct CliArgs {
    /// Ledger snapshot file. Overrides `CDMS_LEDGER_PATH`.
    #[arg(long, global = true, value_name = "path")]
    ledger: Option<String>,
    /// Caller organization. Overrides `CDMS_CALLER_ORG`.
    #[arg(long, global = true, value_name = "org")]
    org: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one contract operation and print its JSON result.
    Invoke {
        /// Operation name, e.g. `QueryCase`.
        function: String,
        /// Positional string arguments.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the SHA-256 of a file for use as a record's `fileHash`.
    Digest {
        /// File to hash.
        path: Utf8PathBuf,
    },
    /// Write fixture organizations and members into the ledger.
    #[cfg(feature = "ledger-fixtures")]
    Seed,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = CliArgs::parse();
    let settings = CdmsSettings::load_from_iter([OsString::from("cdms")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    init_tracing(settings.json_logs);

    let ledger_path = cli
        .ledger
        .map_or_else(|| settings.ledger_path(), Utf8PathBuf::from);
    let caller_org = cli.org.or(settings.caller_org);

    match cli.command {
        Command::Invoke { function, args } => invoke(ledger_path, caller_org, &function, &args),
        Command::Digest { path } => {
            let digest = sha256_file(&path).wrap_err_with(|| format!("failed to hash {path}"))?;
            println!("{digest}");
            Ok(())
        }
        #[cfg(feature = "ledger-fixtures")]
        Command::Seed => seed(ledger_path),
    }
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn invoke(
    ledger_path: Utf8PathBuf,
    caller_org: Option<String>,
    function: &str,
    args: &[String],
) -> Result<()> {
    let snapshot = LedgerSnapshotFile::new(ledger_path);
    let lock = snapshot.lock()?;
    let ledger = lock.load()?;
    let context = InvocationContext::resolve(&StaticIdentityResolver::new(caller_org));

    let (response, dirty) = ledger
        .transact(|transaction| {
            let response = Contract::new(transaction).invoke(&context, function, args)?;
            Ok((response, transaction.is_dirty()))
        })
        .map_err(|err| eyre!("{function} failed [{:?}]: {err}", err.code()))?;

    if dirty {
        lock.store(&ledger)?;
    }
    if let Some(payload) = response.payload() {
        let rendered = serde_json::to_string_pretty(payload).wrap_err("failed to render result")?;
        println!("{rendered}");
    }
    Ok(())
}

#[cfg(feature = "ledger-fixtures")]
fn seed(ledger_path: Utf8PathBuf) -> Result<()> {
    use cdms::fixtures::{LedgerFixtureSettings, seed_ledger};

    let settings = LedgerFixtureSettings::load_from_iter([OsString::from("cdms")])
        .map_err(|err| eyre!("failed to load fixture settings: {err}"))?;
    let snapshot = LedgerSnapshotFile::new(ledger_path);
    let lock = snapshot.lock()?;
    let ledger = lock.load()?;

    let outcome = ledger
        .transact(|transaction| {
            seed_ledger(&settings, transaction).map_err(|err| {
                cdms::domain::Error::dependency_failure(err.to_string())
            })
        })
        .wrap_err("seeding failed")?;
    lock.store(&ledger)?;
    println!(
        "seed={} organizations_created={} organizations_existing={} users_created={} users_existing={}",
        outcome.seed_name,
        outcome.organizations_created,
        outcome.organizations_existing,
        outcome.users_created,
        outcome.users_existing
    );
    Ok(())
}
