use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use inquire::{CustomType, DateSelect};
use tracing::info;

use crate::models::life_stats::parse_birth_date;
use crate::render;
use crate::service::calendar_session::{CalendarSession, lifespan_from_input};
use crate::service::reflection_service::ReflectionProvider;
use crate::store::PreferenceStore;

#[derive(Parser)]
#[command(name = "life-calendar", about = "Your life in weeks")]
pub struct Cli {
    /// Keep preferences in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Compute as of this instant (RFC 3339) instead of the current time
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show stats, a reflection and the week grid
    Show {
        #[arg(long)]
        no_grid: bool,
        #[arg(long)]
        no_reflection: bool,
    },
    /// Store a birth date and optionally a lifespan, then show
    Set {
        #[arg(long)]
        birth_date: String,
        #[arg(long)]
        lifespan: Option<String>,
    },
    /// Pick birth date and lifespan interactively
    Setup {},
    /// Ask for a new reflection
    Reflect {},
    /// Forget the stored birth date and lifespan
    Reset {},
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    pub grid: bool,
    pub reflection: bool,
}

impl ShowOptions {
    pub fn full() -> Self {
        Self {
            grid: true,
            reflection: true,
        }
    }
}

pub async fn run<S: PreferenceStore>(
    cli: Cli,
    session: &mut CalendarSession<S>,
    reflections: &dyn ReflectionProvider,
) -> Result<()> {
    let now = cli.now.unwrap_or_else(Utc::now);
    let command = cli.command.unwrap_or(Commands::Show {
        no_grid: false,
        no_reflection: false,
    });

    match command {
        Commands::Show {
            no_grid,
            no_reflection,
        } => {
            let options = ShowOptions {
                grid: !no_grid,
                reflection: !no_reflection,
            };
            print!("{}", show(session, reflections, now, options).await);
        }
        Commands::Set {
            birth_date,
            lifespan,
        } => {
            apply_inputs(session, &birth_date, lifespan.as_deref(), now)?;
            print!("{}", show(session, reflections, now, ShowOptions::full()).await);
        }
        Commands::Setup {} => {
            let (birth_date, lifespan) = prompt_inputs(session, now)?;
            let birth_date = birth_date.format("%Y-%m-%d").to_string();
            let lifespan = lifespan.to_string();
            apply_inputs(session, &birth_date, Some(lifespan.as_str()), now)?;
            print!("{}", show(session, reflections, now, ShowOptions::full()).await);
        }
        Commands::Reflect {} => match session.reflection_request(now) {
            Some(request) => {
                let text = reflections.request_for(request).await;
                println!("{}", render::render_reflection(Some(&text)));
            }
            None => println!("{}", render::EMPTY_STATE),
        },
        Commands::Reset {} => {
            session.reset();
            println!("Birth date and lifespan cleared.");
        }
    }
    Ok(())
}

/// Validates and stores new inputs. A date after `now` is rejected here, the
/// way a date picker bounded by today would.
pub fn apply_inputs<S: PreferenceStore>(
    session: &mut CalendarSession<S>,
    birth_date: &str,
    lifespan: Option<&str>,
    now: DateTime<Utc>,
) -> Result<()> {
    let date = parse_birth_date(birth_date)
        .ok_or_else(|| anyhow!("Invalid birth date {:?}, expected YYYY-MM-DD", birth_date))?;
    if date > now.date_naive() {
        return Err(anyhow!("Birth date {} is in the future", date));
    }
    session.set_birth_date(birth_date);
    if let Some(raw) = lifespan {
        session.set_lifespan(lifespan_from_input(raw) as i64);
    }
    if session.refresh(now).is_some() {
        info!(birth_date = %date, lifespan = session.lifespan(), "calendar updated");
    }
    Ok(())
}

/// Renders everything the calendar view shows. Stats are refreshed (and
/// therefore persisted) first; without stats only the empty state is shown.
pub async fn show<S: PreferenceStore>(
    session: &mut CalendarSession<S>,
    reflections: &dyn ReflectionProvider,
    now: DateTime<Utc>,
    options: ShowOptions,
) -> String {
    let Some(stats) = session.refresh(now) else {
        return format!("{}\n", render::EMPTY_STATE);
    };

    let mut out = render::render_summary(&stats, session.lifespan());
    if options.reflection {
        let reflection = match session.reflection_request(now) {
            Some(request) => Some(reflections.request_for(request).await),
            None => None,
        };
        out.push('\n');
        out.push_str(&render::render_reflection(reflection.as_deref()));
        out.push('\n');
    }
    if options.grid {
        if let Some(grid) = session.grid(now) {
            out.push('\n');
            out.push_str(&render::render_grid(&grid));
        }
    }
    out
}

fn prompt_inputs<S: PreferenceStore>(
    session: &CalendarSession<S>,
    now: DateTime<Utc>,
) -> Result<(NaiveDate, u32)> {
    let today = now.date_naive();
    let mut picker = DateSelect::new("Pick your birth date").with_max_date(today);
    if let Some(current) = session.birth_date().filter(|date| *date <= today) {
        picker = picker.with_starting_date(current);
    }
    let birth_date = picker.prompt()?;

    let lifespan = CustomType::<u32>::new("Expected lifespan (years)")
        .with_default(session.lifespan())
        .with_error_message("Please enter a whole number of years")
        .prompt()?;

    Ok((birth_date, lifespan))
}
