use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use uwquest::config::{self, Credentials, NotifierConfig};
use uwquest::models::TermGrades;
use uwquest::utils::store::GradeStore;
use uwquest::utils::telegram::{parse_new_grades_message, send};
use uwquest::Client;

fn main() {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    if let Err(e) = TermLogger::init(
        config::log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Error initializing logger: {e}");
    }

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let creds = Credentials::from_env().context("reading Quest credentials")?;
    let mut quest = Client::new().context("creating Quest client")?;

    info!("Logging into Quest...");
    quest
        .login(&creds.user, &creds.pass)
        .context("logging into Quest")?;

    info!("Fetching terms...");
    let terms = quest.terms().context("fetching terms data")?;

    let mut fetched = Vec::with_capacity(terms.len());
    for term in terms {
        let grades = quest
            .grades(term.index)
            .with_context(|| format!("fetching grades data for term {}", term.index))?;

        println!("Term {}: {}", term.index, term.name);
        for course in grades.iter().filter(|g| !g.grade.is_empty()) {
            println!("\t- {}: {}", course.name, course.grade);
        }
        fetched.push(TermGrades { term, grades });
    }

    // Compares the newly fetched grades with the ones recorded on the last run.
    let store = GradeStore::new(config::grades_file());
    let new_grades = store
        .update(&fetched)
        .with_context(|| format!("updating {}", store.path().display()))?;
    if new_grades.is_empty() {
        info!("No new grades found");
        return Ok(());
    }
    info!("{} new grades found", new_grades.len());

    let Some(notifier) = NotifierConfig::from_env()? else {
        info!("Telegram notifier not configured, skipping notification");
        return Ok(());
    };
    let message = parse_new_grades_message(&new_grades);

    // The Quest session is blocking; the bot only needs a runtime for the send.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building Telegram runtime")?
        .block_on(send(&notifier, &message))
}
