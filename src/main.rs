mod audio_feedback;
mod cli;
mod config;
mod engine;
mod error;
mod host;
mod recipe;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Commands};
use config::Config;
use engine::StepTimer;
use error::Error;
use host::Session;
use store::{JsonStore, RecipeBook};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);
    let store_path: PathBuf = cli
        .store
        .or_else(|| config.store_path.clone())
        .unwrap_or_else(JsonStore::default_path);
    let store = JsonStore::new(store_path);
    log::debug!("Using recipe file {}", store.path().display());

    match cli.command {
        Commands::List => {
            let book = RecipeBook::load(&store)?;
            print!("{}", host::render_list(book.recipes()));
        }
        Commands::Show { id } => {
            let book = RecipeBook::load(&store)?;
            let timer = StepTimer::start(book.find(id)?.clone())?;
            print!("{}", host::render(timer.recipe(), timer.state()));
        }
        Commands::Add { name, steps } => {
            let mut book = RecipeBook::load(&store)?;
            let id = book.add(&name, steps)?;
            book.save(&store)?;
            log::info!("Added recipe {id}");
            println!("{id}");
        }
        Commands::Edit { id, name, steps } => {
            let mut book = RecipeBook::load(&store)?;
            let mut recipe = book.find(id)?.clone();
            if let Some(name) = name {
                recipe.name = name;
            }
            if !steps.is_empty() {
                recipe.steps = steps;
            }
            book.update(recipe)?;
            book.save(&store)?;
            log::info!("Updated recipe {id}");
        }
        Commands::Delete { id } => {
            let mut book = RecipeBook::load(&store)?;
            let removed = book.remove(id)?;
            book.save(&store)?;
            log::info!("Deleted recipe {id} ({})", removed.name);
        }
        Commands::Run { id, exit_on_finish } => {
            let book = RecipeBook::load(&store)?;
            let timer = StepTimer::start(book.find(id)?.clone())?;
            run_session(timer, &config, exit_on_finish)?;
        }
        Commands::Config { write } => {
            if write {
                config.save_to(&config_path)?;
                log::info!("Wrote {}", config_path.display());
            }
            let rendered = serde_json::to_string_pretty(&config)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            println!("{rendered}");
        }
    }
    Ok(())
}

fn run_session(timer: StepTimer, config: &Config, exit_on_finish: bool) -> Result<(), Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let sink = audio_feedback::sink_for(&config.alert);
    let session = Session::new(timer, sink, std::io::stdout()).exit_on_finish(exit_on_finish);
    eprintln!("{}", host::HELP);

    let result = runtime.block_on(async {
        host::spawn_stdin_reader(session.sender());
        session.run().await
    });
    // The stdin reader may still be parked on a blocking read.
    runtime.shutdown_background();

    let report = result?;
    log::info!(
        "Run ended at step {} with {} of {} steps completed, {} alerts",
        report.state.current_step + 1,
        report.state.completed.len(),
        report.state.step_count(),
        report.alerts
    );
    Ok(())
}
