//! Command-line interface for `an10922-rs`.
//!
//! Keys are given as hex and held as software keys; this tool does not talk
//! to a hardware module.

#![forbid(unsafe_code)]

use aes_core::{Aes128Key, SoftAes128};
use an10922::{
    derive_subkeys, encoding, unwrap, wrap, DiversificationInput, DiversifiedKey, Diversifier,
    DiversifierConfig, Framing, KekKey, MasterKey, WrappedKey,
};
use an10922_runtime::{BatchConfig, BatchRunner};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// AN10922 key diversification CLI.
#[derive(Parser)]
#[command(
    name = "nxpdiv",
    version,
    author,
    about = "NXP AN10922 AES-128 key diversification and KEK wrapping"
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a diversified key, optionally wrapping it under a KEK.
    Diversify {
        /// Master key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        master_key_hex: String,
        /// Diversification input as hex (1 to 32 bytes).
        #[arg(long, value_name = "HEX")]
        div_input: String,
        /// KEK as 32 hex characters; prints the wrapped key when given.
        #[arg(long, value_name = "HEX")]
        kek_hex: Option<String>,
        /// Input layout: `unprefixed` or `an10922` (prepends 0x01).
        #[arg(long, default_value_t = Framing::Unprefixed)]
        framing: Framing,
    },
    /// Print the CMAC subkeys K1 and K2 of a master key.
    Subkeys {
        /// Master key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        master_key_hex: String,
    },
    /// Wrap a 16-byte key under a KEK (AES-CBC, zero IV, no padding).
    Wrap {
        /// KEK as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        kek_hex: String,
        /// Key to wrap as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
    },
    /// Recover a wrapped key.
    Unwrap {
        /// KEK as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        kek_hex: String,
        /// Wrapped key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        wrapped_hex: String,
    },
    /// Run many diversify-and-wrap requests on a worker pool.
    Batch {
        /// Master key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        master_key_hex: String,
        /// KEK as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        kek_hex: String,
        /// Diversification input as hex (1 to 32 bytes).
        #[arg(long, value_name = "HEX")]
        div_input: String,
        /// Worker threads.
        #[arg(long, default_value_t = 4)]
        threads: usize,
        /// Number of requests to submit.
        #[arg(long, default_value_t = 1)]
        requests: usize,
        /// Input layout: `unprefixed` or `an10922`.
        #[arg(long, default_value_t = Framing::Unprefixed)]
        framing: Framing,
    },
    /// Run a local demo: random keys, diversify, wrap, unwrap.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Input layout: `unprefixed` or `an10922`.
        #[arg(long, default_value_t = Framing::Unprefixed)]
        framing: Framing,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Diversify {
            master_key_hex,
            div_input,
            kek_hex,
            framing,
        } => cmd_diversify(&master_key_hex, &div_input, kek_hex.as_deref(), framing),
        Commands::Subkeys { master_key_hex } => cmd_subkeys(&master_key_hex),
        Commands::Wrap { kek_hex, key_hex } => cmd_wrap(&kek_hex, &key_hex),
        Commands::Unwrap {
            kek_hex,
            wrapped_hex,
        } => cmd_unwrap(&kek_hex, &wrapped_hex),
        Commands::Batch {
            master_key_hex,
            kek_hex,
            div_input,
            threads,
            requests,
            framing,
        } => cmd_batch(
            &master_key_hex,
            &kek_hex,
            &div_input,
            BatchConfig { threads, requests },
            framing,
        ),
        Commands::Demo { seed, framing } => cmd_demo(seed, framing),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_diversify(
    master_key_hex: &str,
    div_input: &str,
    kek_hex: Option<&str>,
    framing: Framing,
) -> Result<()> {
    let master = parse_master_key(master_key_hex)?;
    let input = parse_div_input(div_input)?;
    let diversifier = Diversifier::with_config(DiversifierConfig { framing });
    let key = diversifier
        .diversify(&master, &input)
        .context("diversify key")?;
    println!("diversified key: {}", key.to_hex());
    if let Some(kek_hex) = kek_hex {
        let kek = parse_kek(kek_hex)?;
        let wrapped = wrap(&kek, &key).context("wrap diversified key")?;
        println!("wrapped key: {wrapped}");
    }
    Ok(())
}

fn cmd_subkeys(master_key_hex: &str) -> Result<()> {
    let master = parse_master_key(master_key_hex)?;
    let subkeys = derive_subkeys(&master).context("derive subkeys")?;
    println!("K1: {}", encoding::encode_upper(subkeys.k1()));
    println!("K2: {}", encoding::encode_upper(subkeys.k2()));
    Ok(())
}

fn cmd_wrap(kek_hex: &str, key_hex: &str) -> Result<()> {
    let kek = parse_kek(kek_hex)?;
    let key = DiversifiedKey::from_hex(key_hex.trim()).context("decode key hex")?;
    let wrapped = wrap(&kek, &key).context("wrap key")?;
    println!("wrapped key: {wrapped}");
    Ok(())
}

fn cmd_unwrap(kek_hex: &str, wrapped_hex: &str) -> Result<()> {
    let kek = parse_kek(kek_hex)?;
    let wrapped = WrappedKey::from_hex(wrapped_hex.trim()).context("decode wrapped key hex")?;
    let key = unwrap(&kek, &wrapped).context("unwrap key")?;
    println!("key: {}", key.to_hex());
    Ok(())
}

fn cmd_batch(
    master_key_hex: &str,
    kek_hex: &str,
    div_input: &str,
    config: BatchConfig,
    framing: Framing,
) -> Result<()> {
    let master = parse_master_key(master_key_hex)?;
    let kek = parse_kek(kek_hex)?;
    let input = parse_div_input(div_input)?;
    let diversifier = Diversifier::with_config(DiversifierConfig { framing });
    let runner = BatchRunner::new(config).context("start worker pool")?;

    debug!(threads = config.threads, requests = config.requests, "submitting batch");
    let report = runner.run(&diversifier, &master, &kek, &input);
    for outcome in report.outcomes() {
        let elapsed_ms = outcome.elapsed.as_millis();
        match &outcome.result {
            Ok(wrapped) => println!(
                "execution id {}: {} ms, wrapped key {}",
                outcome.execution_id, elapsed_ms, wrapped
            ),
            Err(err) => println!(
                "execution id {}: {} ms, failed: {}",
                outcome.execution_id, elapsed_ms, err
            ),
        }
    }
    println!(
        "{} of {} requests succeeded in {} ms",
        report.succeeded(),
        report.outcomes().len(),
        report.elapsed().as_millis()
    );
    if report.failed() > 0 {
        bail!("{} diversification requests failed", report.failed());
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>, framing: Framing) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let master_key = random_key(&mut rng);
    let kek_key = random_key(&mut rng);
    let master = MasterKey::new(SoftAes128::new(&master_key));
    let kek = KekKey::new(SoftAes128::new(&kek_key));

    let mut uid = [0u8; 7];
    rng.fill_bytes(&mut uid);
    let input = DiversificationInput::new(uid.to_vec()).context("build demo input")?;

    let diversifier = Diversifier::with_config(DiversifierConfig { framing });
    let (key, wrapped) = diversifier
        .diversify_and_wrap(&master, &kek, &input)
        .context("diversify and wrap")?;
    let recovered = unwrap(&kek, &wrapped).context("unwrap")?;

    println!("demo master key: {}", encoding::encode_upper(master_key.as_bytes()));
    println!("demo kek: {}", encoding::encode_upper(kek_key.as_bytes()));
    println!("diversification input: {}", encoding::encode_upper(input.as_bytes()));
    println!("diversified key: {}", key.to_hex());
    println!("wrapped key: {wrapped}");
    if recovered != key {
        bail!("demo unwrap round trip failed");
    }
    Ok(())
}

fn parse_master_key(hex_str: &str) -> Result<MasterKey<SoftAes128>> {
    MasterKey::from_hex(hex_str.trim()).context("decode master key hex")
}

fn parse_kek(hex_str: &str) -> Result<KekKey<SoftAes128>> {
    KekKey::from_hex(hex_str.trim()).context("decode KEK hex")
}

fn parse_div_input(hex_str: &str) -> Result<DiversificationInput> {
    DiversificationInput::from_hex(hex_str.trim()).context("decode diversification input hex")
}

fn random_key(rng: &mut impl RngCore) -> Aes128Key {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Aes128Key::from(bytes)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
