use std::collections::HashMap;

use api_shared::HealthService;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dic_client::{
    api::ApiClient,
    faq::FaqAccordion,
    render,
    session::{find_drug, run_interactive},
    CheckerSession, ClientError, DEFAULT_API_URL,
};

#[derive(Parser)]
#[command(name = "dic")]
#[command(about = "Drug interaction checker client")]
struct Cli {
    /// Base URL of the checker API
    #[arg(long, env = "DIC_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is up
    Ping,
    /// Search drugs by name
    Search {
        /// Case-insensitive part of the drug name (empty lists every drug)
        #[arg(default_value = "")]
        term: String,
    },
    /// Check interactions among two or more drugs
    Check {
        /// Drug names or ids
        #[arg(required = true)]
        drugs: Vec<String>,
    },
    /// List every stored interaction
    Interactions,
    /// Show the FAQ
    Faq {
        /// Entry to expand (1-based)
        #[arg(long)]
        open: Option<usize>,
    },
    /// Start an interactive session
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dic_client=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url);
    let mut out = std::io::stdout();

    match cli.command {
        Some(Commands::Ping) => match client.liveness().await {
            Ok(body) if HealthService::is_live(&body) => {
                println!("{} is up: {}", client.base_url(), body.trim())
            }
            Ok(body) => tracing::warn!("unexpected liveness response: {}", body.trim()),
            Err(e) => tracing::error!("{} is not reachable: {e}", client.base_url()),
        },
        Some(Commands::Search { term }) => match client.search_drugs(&term).await {
            Ok(drugs) if drugs.is_empty() => println!("No drugs found."),
            Ok(drugs) => render::write_drugs(&mut out, &drugs)?,
            Err(e) => tracing::error!("Error fetching drugs: {e}"),
        },
        Some(Commands::Check { drugs }) => {
            let mut session = CheckerSession::new(client.clone());
            for query in &drugs {
                match find_drug(&client, query).await {
                    Ok(drug) => {
                        session.add(drug);
                    }
                    Err(e) => {
                        eprintln!("{e}");
                        return Ok(());
                    }
                }
            }

            session.write_selection(&mut out)?;
            match session.check().await {
                Ok(_) => session.write_results(&mut out)?,
                Err(ClientError::TooFewDrugs) => eprintln!("{}", ClientError::TooFewDrugs),
                // Already logged by the session.
                Err(_) => {}
            }
        }
        Some(Commands::Interactions) => {
            let (drugs, interactions) =
                match tokio::try_join!(client.search_drugs(""), client.all_interactions()) {
                    Ok(both) => both,
                    Err(e) => {
                        tracing::error!("Error fetching interactions: {e}");
                        return Ok(());
                    }
                };
            let names: HashMap<_, _> = drugs.into_iter().map(|d| (d.id, d.name)).collect();
            render::write_results(&mut out, Some(&interactions[..]), &names)?;
        }
        Some(Commands::Faq { open }) => {
            let mut faq = FaqAccordion::new();
            if let Some(n) = open.filter(|n| *n >= 1) {
                faq.toggle(n - 1);
            }
            render::write_faq(&mut out, &faq)?;
        }
        Some(Commands::Interactive) => run_interactive(client).await?,
        None => {
            println!("Use 'dic --help' for commands");
        }
    }

    Ok(())
}
