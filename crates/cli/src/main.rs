use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use planar::algorithms::{
    AlgorithmRegistry, ClosestPairDivideAndConquer, ClosestPairNaive, GeometryAlgorithm,
};
use planar::api::cross_checked_min_distance;
use planar::geom::rand::rand_points_with;
use planar::session::Session;
use planar::view::ViewCfg;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod points;
mod provenance;
mod replay;

#[derive(Parser)]
#[command(name = "planar-cli")]
#[command(about = "Batch driver for plane point sets and geometry algorithms")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List registered algorithms in registration order
    List,
    /// Run one algorithm on a point set and write the result with a provenance sidecar
    Run {
        /// Algorithm name, or the aliases `naive` / `dc`
        #[arg(long)]
        algo: String,
        #[command(flatten)]
        source: points::Source,
        #[arg(long)]
        out: PathBuf,
    },
    /// Compare naive and divide-and-conquer on random point sets
    Crosscheck {
        #[arg(long, default_value_t = 100)]
        trials: u32,
        #[arg(long, default_value_t = 200)]
        max_n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1000.0)]
        extent: f64,
    },
    /// Drive an interactive session from a JSON step script and print the final frame
    Replay {
        #[arg(long)]
        script: PathBuf,
        /// Viewport config (JSON); missing fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the transcript here (plus provenance) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let registry = Arc::new(AlgorithmRegistry::with_defaults());
    match cmd.action {
        Action::List => list(&registry),
        Action::Run { algo, source, out } => run(&registry, &algo, &source, &out),
        Action::Crosscheck {
            trials,
            max_n,
            seed,
            extent,
        } => crosscheck(trials, max_n, seed, extent),
        Action::Replay {
            script,
            config,
            out,
        } => {
            let cfg = load_cfg(config.as_deref())?;
            replay_script(cfg, registry, &script, out.as_deref())
        }
        Action::Report => report(),
    }
}

fn load_cfg(path: Option<&Path>) -> Result<ViewCfg> {
    let Some(path) = path else {
        return Ok(ViewCfg::default());
    };
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let cfg: ViewCfg =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?;
    if let Err(err) = cfg.validate() {
        bail!("{}: {err}", path.display());
    }
    tracing::info!(?cfg, "config loaded");
    Ok(cfg)
}

/// Accept the registered name or a short alias.
fn resolve<'a>(
    registry: &'a AlgorithmRegistry,
    algo: &str,
) -> Result<&'a Arc<dyn GeometryAlgorithm>> {
    let name = match algo {
        "naive" => ClosestPairNaive.name().to_string(),
        "dc" => ClosestPairDivideAndConquer::default().name().to_string(),
        other => other.to_string(),
    };
    match registry.lookup(&name) {
        Some(alg) => Ok(alg),
        None => bail!(
            "unknown algorithm {algo:?}; known: {:?}",
            registry.names().collect::<Vec<_>>()
        ),
    }
}

fn list(registry: &AlgorithmRegistry) -> Result<()> {
    for (k, alg) in registry.list().iter().enumerate() {
        println!("{k}\t{}\t(min {} points)", alg.name(), alg.minimum_points());
    }
    Ok(())
}

fn run(registry: &AlgorithmRegistry, algo: &str, source: &points::Source, out: &Path) -> Result<()> {
    let alg = resolve(registry, algo)?;
    let points = source.load()?;
    tracing::info!(algo = alg.name(), n = points.len(), out = %out.display(), "run");
    if points.len() < alg.minimum_points() {
        bail!(
            "{} needs at least {} points, input has {}",
            alg.name(),
            alg.minimum_points(),
            points.len()
        );
    }
    let result = registry.execute(alg.as_ref(), &points)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let doc = json!({
        "algorithm": alg.name(),
        "n": points.len(),
        "result": result,
    });
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(json!({
        "algo": alg.name(),
        "input": source.input.as_ref().map(|p| p.display().to_string()),
        "random": source.random,
        "seed": source.seed,
        "extent": source.extent,
    }));
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn crosscheck(trials: u32, max_n: usize, seed: u64, extent: f64) -> Result<()> {
    if max_n < 2 {
        bail!("--max-n must be at least 2");
    }
    points::check_extent(extent)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mismatches = 0u32;
    for trial in 0..trials {
        let n = rng.gen_range(2..=max_n);
        let pts = rand_points_with(&mut rng, n, extent);
        if cross_checked_min_distance(&pts).is_none() {
            mismatches += 1;
            tracing::error!(trial, n, "naive and divide-and-conquer disagree");
        }
    }
    tracing::info!(trials, max_n, seed, mismatches, "crosscheck");
    if mismatches > 0 {
        bail!("{mismatches} of {trials} trials disagree");
    }
    println!("ok: {trials} trials agree");
    Ok(())
}

fn replay_script(
    cfg: ViewCfg,
    registry: Arc<AlgorithmRegistry>,
    script: &Path,
    out: Option<&Path>,
) -> Result<()> {
    let steps = replay::load_script(script)?;
    tracing::info!(steps = steps.len(), script = %script.display(), "replay");
    let session = Session::new(cfg, registry);
    let transcript = replay::replay(&session, &steps)?;
    let body = serde_json::to_vec_pretty(&transcript)?;
    match out {
        Some(out) => {
            std::fs::write(out, &body).with_context(|| format!("writing {}", out.display()))?;
            let payload = provenance::Payload::new(json!({
                "script": script.display().to_string(),
                "cfg": cfg,
            }));
            provenance::write_sidecar(out, payload)?;
        }
        None => println!("{}", String::from_utf8_lossy(&body)),
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "planar_version": planar::VERSION,
        "algorithms": AlgorithmRegistry::with_defaults().names().collect::<Vec<_>>(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_cfg_defaults_without_a_path() {
        assert_eq!(load_cfg(None).unwrap(), ViewCfg::default());
    }

    #[test]
    fn load_cfg_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("view.json");
        std::fs::write(&path, r#"{ "pixels_per_unit": 30.0 }"#).unwrap();
        let cfg = load_cfg(Some(path.as_path())).unwrap();
        assert_eq!(cfg.pixels_per_unit, 30.0);
        assert_eq!(cfg.scroll_factor, ViewCfg::default().scroll_factor);
    }

    #[test]
    fn load_cfg_rejects_degenerate_scale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("view.json");
        for body in [
            r#"{ "pixels_per_unit": 0.0 }"#,
            r#"{ "pixels_per_unit": -2.0 }"#,
            r#"{ "pixels_per_unit": 1e-310 }"#,
        ] {
            std::fs::write(&path, body).unwrap();
            let err = load_cfg(Some(path.as_path())).unwrap_err();
            assert!(err.to_string().contains("pixels_per_unit"), "{err}");
        }
    }

    #[test]
    fn config_is_only_accepted_by_replay() {
        let replay = ["planar-cli", "replay", "--script", "s.json", "--config", "c.json"];
        assert!(Cmd::try_parse_from(replay).is_ok());
        assert!(Cmd::try_parse_from(["planar-cli", "list", "--config", "c.json"]).is_err());
        assert!(Cmd::try_parse_from(["planar-cli", "crosscheck", "--config", "c.json"]).is_err());
    }

    #[test]
    fn crosscheck_rejects_unusable_extent() {
        for extent in [f64::INFINITY, f64::NAN, 1e308, -1.0] {
            assert!(crosscheck(1, 10, 0, extent).is_err());
        }
        assert!(crosscheck(5, 20, 3, 100.0).is_ok());
    }
}
