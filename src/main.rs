use anyhow::Context;
use clap::Parser;

use storeplan::cli::{CliArgs, Command};
use storeplan::{
    init_logging, load_or_start, open_backend, session_from_config, Config, FixtureId, Point,
};
use storeplan_designer::LayoutSession;
use storeplan_settings::default_config_path;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    if let Some(store) = &args.store {
        config.storage.store_name = store.clone();
    }
    if let Some(dir) = &args.layout_dir {
        config.storage.layout_directory = dir.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;

    init_logging(&config.logging.level, config.logging.json)?;
    tracing::debug!(
        "storeplan {} (built {})",
        storeplan::VERSION,
        storeplan::BUILD_DATE
    );

    let backend = open_backend(&config)?;
    let mut session = session_from_config(&config, None);
    load_or_start(&mut session, &backend)?;

    match args.command() {
        Command::Summary => print_summary(&session),
        Command::Add { flavor, x, y, name } => {
            let id = match flavor {
                Some(flavor) => session.add_fixture_of(flavor.into()),
                None => session.add_fixture(),
            };
            if let (Some(x), Some(y)) = (x, y) {
                session.move_fixture(&id, x, y)?;
            }
            if let Some(name) = name {
                session.set_name(&id, &name)?;
            }
            session.save(&backend)?;
            println!("{}", id);
        }
        Command::Delete { id } => {
            let removed = session.delete_fixture(Some(&FixtureId::from(id)))?;
            session.save(&backend)?;
            println!("Deleted {} ({})", removed.id, removed.name);
        }
        Command::Clear => {
            session.clear(&backend)?;
            println!("Cleared saved layout '{}'", session.store_name());
        }
    }

    Ok(())
}

fn print_summary(session: &LayoutSession) {
    println!(
        "Store '{}': {} fixtures",
        session.store_name(),
        session.fixture_count()
    );
    for fixture in session.fixtures().iter() {
        let Point { x, y } = fixture.position();
        println!(
            "  {}  {:<16} at ({:.1}, {:.1})  rot {:.1}  {} nodes",
            fixture.id,
            fixture.name,
            x,
            y,
            fixture.rotation,
            fixture.node_count()
        );
    }
}
