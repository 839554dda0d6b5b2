use clap::{Parser, Subcommand};
use equied::client::GatewayClient;
use equied::favorites::FavoritesStore;
use equied::session::{ChatSession, Outcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "equied")]
#[command(about = "EquiED: Equidistributed Salary assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config.json (no api key is written).
    Init {
        /// Config file path (default: EQUIED_CONFIG_PATH or ~/.equied/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Run the completion gateway (POST /api/chat). Reads the provider key from EQUIED_API_KEY or provider.apiKey.
    Gateway {
        /// Config file path (default: EQUIED_CONFIG_PATH or ~/.equied/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// HTTP port (default from config or 15152)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Chat with EquiED through a running gateway (interactive). Type /help for commands.
    Chat {
        /// Config file path (default: EQUIED_CONFIG_PATH or ~/.equied/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Gateway URL (default from config, else http://bind:port)
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },

    /// Print the equidistributed salary estimate (defaults: 8 trillion Rand, 61 million people).
    Calc {
        /// Total money, e.g. 8t or 8000000000000
        total: Option<String>,

        /// Population, e.g. 61m
        population: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("equied {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Gateway { config, port }) => {
            if let Err(e) = run_gateway(config, port).await {
                log::error!("gateway failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Chat { config, url }) => {
            if let Err(e) = run_chat(config, url).await {
                log::error!("chat failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Calc { total, population }) => {
            let args: Vec<&str> = total.iter().chain(population.iter()).map(String::as_str).collect();
            match equied::calculator::estimate_from_args(&args) {
                Ok(e) => println!("{}", e.to_markdown()),
                Err(e) => {
                    eprintln!("calc: {}", e);
                    std::process::exit(2);
                }
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(equied::config::default_config_path);
    let dir = equied::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

async fn run_gateway(config_path: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let (mut config, _path) = equied::config::load_config(config_path)?;
    if let Some(p) = port {
        config.gateway.port = p;
    }
    log::info!("starting gateway on {}:{}", config.gateway.bind, config.gateway.port);
    equied::gateway::run_gateway(config).await
}

async fn run_chat(config_path: Option<PathBuf>, url: Option<String>) -> anyhow::Result<()> {
    use std::io::{self, Write};

    let (config, _path) = equied::config::load_config(config_path)?;
    let gateway_url = url.unwrap_or_else(|| equied::config::resolve_gateway_url(&config));
    let client = GatewayClient::new(gateway_url.clone(), config.client.timeout());
    let favorites = FavoritesStore::load(equied::config::resolve_favorites_path(&config)).await;
    let models = config.provider.models.iter().map(|m| m.label.clone()).collect();
    let mut session = ChatSession::new(client, favorites, models, gateway_url);

    if let Some(welcome) = session.conversation().messages().first() {
        println!("< {}\n", welcome.content);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("/exit") || input.eq_ignore_ascii_case("/quit") {
            break;
        }
        print_outcome(session.submit(input).await);
    }

    Ok(())
}

fn print_outcome(outcome: Outcome) {
    match outcome {
        Outcome::Ignored => {}
        Outcome::Local(m) => println!("< {}\n", m.content.trim()),
        Outcome::Reply(m) => {
            println!("< {}", m.content.trim());
            if let Some(source) = m.source {
                println!("  [{}]\n", source);
            }
        }
        Outcome::Failed { message, error } => {
            eprintln!("chat error: {}", error);
            println!("< {}\n  (type /retry to try again)\n", message.content);
        }
        Outcome::Cleared => println!("(conversation cleared)\n\n< {}\n", equied::prompt::WELCOME_CONTENT),
        Outcome::Favorites(list) => {
            if list.is_empty() {
                println!("(no favorites yet; /fav saves the latest reply)\n");
            }
            for (i, f) in list.iter().enumerate() {
                println!("{}. {}\n", i + 1, f.content.trim());
            }
        }
        Outcome::Favorited { favorited, .. } => {
            println!(
                "{}\n",
                if favorited { "(saved to favorites)" } else { "(removed from favorites)" }
            );
        }
        Outcome::Share(url) => println!("{}\n", url),
        Outcome::Notice(text) => println!("({})\n", text),
    }
}
