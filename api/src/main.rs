// FICHIER : api/src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

use skillsms::store::load_initial_data;
use skillsms::utils::config::StoreProvider;
use skillsms::utils::init_logging;
use skillsms::{build_router, open_store, AppConfig, AppState};

#[derive(Parser, Debug)]
#[command(name = "skillsms", version, about = "API HTTP SkillsMS (collaborateurs et compétences)")]
struct Cli {
    /// Fichier de configuration JSON (partiel, fusionné sur les défauts)
    #[arg(long, env = "SKILLSMS_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// Racine des données du moteur json_db
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Magasin en mémoire (rien n'est persisté)
    #[arg(long)]
    memory: bool,

    /// Collaborateurs initiaux, chargés si la collection est vide
    #[arg(long)]
    seed_file: Option<PathBuf>,
}

impl Cli {
    /// La ligne de commande a le dernier mot sur fichier et environnement.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(root) = &self.data_root {
            config.store.data_root = root.clone();
        }
        if self.memory {
            config.store.provider = StoreProvider::Memory;
        }
        if let Some(seed) = &self.seed_file {
            config.store.seed_file = Some(seed.clone());
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Écoute du signal d'arrêt impossible : {}", e);
    }
    info!("🛑 Signal d'arrêt reçu");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    init_logging(&config.log);

    let store = open_store(&config.store).await?;
    if let Some(seed) = &config.store.seed_file {
        load_initial_data(store.as_ref(), seed).await?;
    }

    let app = build_router(AppState::new(store), &config.server.base_path);
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Impossible d'écouter sur {}", addr))?;

    info!(
        "🚀 SkillsMS à l'écoute sur http://{}{}",
        addr, config.server.base_path
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Arrêt terminé");
    Ok(())
}
