use std::path::PathBuf;

use anyhow::Context as _;
use perfection_engine::{Catalog, DEFAULT_TIME_LIMIT, GameSession, PuzzleSeed};
use tracing::info;

use crate::{command::play::app::PlayApp, tui::Runtime, util};

mod app;
mod screens;

const DEFAULT_LOG_FILE: &str = "perfection.log";

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum CatalogChoice {
    /// Twelve geometric shapes on a 4x3 board
    #[default]
    Shapes,
    /// Twenty-five sprite tiles on a 5x5 board
    Sprites,
}

#[derive(Debug, Clone, clap::Args)]
struct SessionArg {
    /// Built-in piece catalog to play with
    #[clap(long, value_enum, conflicts_with = "catalog_file")]
    catalog: Option<CatalogChoice>,
    /// Read the piece catalog from a JSON file instead
    #[clap(long)]
    catalog_file: Option<PathBuf>,
    /// Countdown length in seconds
    #[clap(long, default_value_t = DEFAULT_TIME_LIMIT)]
    time_limit: u32,
    /// Seed for the tray order, as up to 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PuzzleSeed>,
    /// File that receives log output
    #[clap(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
    /// Print the final game snapshot as JSON after exiting
    #[clap(long)]
    json: bool,
}

impl Default for SessionArg {
    fn default() -> Self {
        Self {
            catalog: None,
            catalog_file: None,
            time_limit: DEFAULT_TIME_LIMIT,
            seed: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            json: false,
        }
    }
}

impl SessionArg {
    fn catalog(&self) -> anyhow::Result<Catalog> {
        if let Some(path) = &self.catalog_file {
            return util::read_catalog_file(path);
        }
        let catalog = match self.catalog.unwrap_or_default() {
            CatalogChoice::Shapes => Catalog::shapes(),
            CatalogChoice::Sprites => Catalog::sprites(),
        };
        Ok(catalog)
    }

    fn build_session(&self) -> anyhow::Result<GameSession> {
        let catalog = self.catalog()?;
        let seed = self.seed.unwrap_or_else(rand::random);
        let session = GameSession::with_seed(catalog, self.time_limit, seed)
            .context("Invalid game configuration")?;
        info!(
            %seed,
            pieces = session.catalog().len(),
            time_limit = session.time_limit(),
            "session created"
        );
        Ok(session)
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    #[clap(flatten)]
    session: SessionArg,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    session: SessionArg,
    /// Probability that the bot drops a piece on a wrong slot
    #[clap(long, default_value_t = 0.2)]
    miss_rate: f64,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { session: session_arg } = arg;

    util::init_logging(&session_arg.log_file)?;
    let session = session_arg.build_session()?;
    let mut app = PlayApp::manual(session);

    Runtime::new().run(&mut app)?;

    if session_arg.json {
        util::write_json(&app.snapshot())?;
    }
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        session: session_arg,
        miss_rate,
    } = arg;

    util::init_logging(&session_arg.log_file)?;
    let session = session_arg.build_session()?;
    let mut app = PlayApp::auto(session, *miss_rate)?;

    Runtime::new().run(&mut app)?;

    if session_arg.json {
        util::write_json(&app.snapshot())?;
    }
    Ok(())
}
