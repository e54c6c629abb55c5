//! MindAlign CLI
//!
//! Command-line front end for the MindAlign productivity service.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mindalign::app::App;
use mindalign::config::Config;
use mindalign::constants::CONFIG_GENERATED;
use mindalign::entities::habit::DAY_LABELS;
use mindalign::entities::{EventDraft, Repeat};
use mindalign::logger;
use mindalign::notify::{Notification, NotificationLevel};
use mindalign::session::RegistrationForm;
use mindalign::sync::activity::greeting;
use mindalign::utils::datetime;

#[derive(Parser)]
#[command(name = "mindalign")]
#[command(about = "MindAlign - tasks, notes, habits and calendar from the terminal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign in with a Google ID token
    LoginGoogle { token: String },
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(short, long)]
        confirm: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        command: Option<TaskCommands>,
    },
    /// Manage notes
    Notes {
        #[command(subcommand)]
        command: Option<NoteCommands>,
    },
    /// Manage weekly habits
    Habits {
        #[command(subcommand)]
        command: Option<HabitCommands>,
    },
    /// Manage calendar events
    Events {
        #[command(subcommand)]
        command: Option<EventCommands>,
    },
    /// Show recent activity
    Activity,
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    #[command(alias = "ls")]
    List,
    Add { text: String },
    /// Flip a task between done and pending
    Toggle { id: String },
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand)]
enum NoteCommands {
    #[command(alias = "ls")]
    List,
    Add { content: String },
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand)]
enum HabitCommands {
    #[command(alias = "ls")]
    List,
    Add { name: String },
    /// Flip one day, 0 (Monday) to 6 (Sunday)
    Toggle { id: String, day: usize },
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand)]
enum EventCommands {
    #[command(alias = "ls")]
    List,
    /// Create an event, optionally repeating
    Add {
        title: String,
        /// Start, e.g. 2024-01-01T09:00
        #[arg(long, value_parser = parse_when)]
        start: DateTime<Utc>,
        /// End; defaults to one hour after the start
        #[arg(long, value_parser = parse_when)]
        end: Option<DateTime<Utc>>,
        /// weekly or monthly
        #[arg(long)]
        repeat: Option<Repeat>,
    },
    /// Edit an existing event
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = parse_when)]
        start: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_when)]
        end: Option<DateTime<Utc>>,
    },
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Target path; defaults to the XDG config location
        path: Option<PathBuf>,
    },
}

fn parse_when(s: &str) -> Result<DateTime<Utc>, String> {
    datetime::parse_timestamp(s).ok_or_else(|| format!("invalid date-time '{}', expected YYYY-MM-DDTHH:MM", s))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config {
        command: ConfigCommands::Init { path },
    } = &cli.command
    {
        let path = match path {
            Some(p) => p.clone(),
            None => Config::get_default_config_path()?,
        };
        Config::generate_default_config(&path)?;
        println!("{}: {}", CONFIG_GENERATED, path.display());
        return Ok(());
    }

    let config = Config::load()?;
    logger::init(&config.logging, cli.verbose)?;

    let mut app = App::from_config(&config)?;
    let result = dispatch(&mut app, cli.command).await;

    let notifications = app.notifier.drain();
    let already_reported = notifications.iter().any(Notification::is_error);
    print_notifications(notifications);

    match result {
        Err(e) if already_reported => {
            log::debug!("{:#}", e);
            std::process::exit(1);
        }
        other => other,
    }
}

async fn dispatch(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let user = app.session.login(&email, &password).await?;
            println!("{}", greeting(Some(&user)));
        }
        Commands::LoginGoogle { token } => {
            let user = app.session.login_with_google(&token).await?;
            println!("{}", greeting(Some(&user)));
        }
        Commands::Register {
            name,
            email,
            password,
            confirm,
        } => {
            let form = RegistrationForm {
                name,
                email,
                password,
                confirm_password: confirm,
            };
            app.session.register(&form).await?;
        }
        Commands::Logout => app.session.logout(),
        Commands::Whoami => match app.session.user() {
            Some(user) => println!("{} <{}>", user.display_name(), user.email),
            None => println!("Not signed in"),
        },
        Commands::Tasks { command } => {
            app.require_auth()?;
            run_tasks(app, command.unwrap_or(TaskCommands::List)).await?;
        }
        Commands::Notes { command } => {
            app.require_auth()?;
            run_notes(app, command.unwrap_or(NoteCommands::List)).await?;
        }
        Commands::Habits { command } => {
            app.require_auth()?;
            run_habits(app, command.unwrap_or(HabitCommands::List)).await?;
        }
        Commands::Events { command } => {
            app.require_auth()?;
            run_events(app, command.unwrap_or(EventCommands::List)).await?;
        }
        Commands::Activity => {
            app.require_auth()?;
            println!("{}", greeting(app.session.user()));
            let mut feed = app.activity();
            if feed.load().await.is_err() {
                return Err(anyhow!(feed.error().unwrap_or_default().to_string()));
            }
            if feed.items().is_empty() {
                println!("No recent activity");
            }
            for item in feed.items() {
                println!(
                    "{}  [{}] {}",
                    datetime::format_activity_date(&item.date),
                    item.kind.label(),
                    item.content
                );
            }
        }
        Commands::Config { .. } => {}
    }
    Ok(())
}

async fn run_tasks(app: &App, command: TaskCommands) -> Result<()> {
    let mut view = app.tasks();
    match command {
        TaskCommands::List => {
            view.load().await?;
            for task in view.tasks() {
                println!("[{}] {}  {}", if task.completed { "x" } else { " " }, task.id, task.text);
            }
            println!("{}/{} done", view.completed_count(), view.tasks().len());
        }
        TaskCommands::Add { text } => view.add(&text).await?,
        TaskCommands::Toggle { id } => {
            view.load().await?;
            view.toggle(&id).await?;
        }
        TaskCommands::Delete { id } => {
            view.load().await?;
            view.delete(&id).await?;
        }
    }
    Ok(())
}

async fn run_notes(app: &App, command: NoteCommands) -> Result<()> {
    let mut view = app.notes();
    match command {
        NoteCommands::List => {
            view.load().await?;
            for note in view.notes() {
                println!("{}  {}", note.id, datetime::format_activity_date(&note.date));
                println!("    {}", note.content);
            }
        }
        NoteCommands::Add { content } => view.add(&content).await?,
        NoteCommands::Delete { id } => {
            view.load().await?;
            view.delete(&id).await?;
        }
    }
    Ok(())
}

async fn run_habits(app: &App, command: HabitCommands) -> Result<()> {
    let mut view = app.habits();
    match command {
        HabitCommands::List => {
            view.load().await?;
            println!("{:<24} {}", "", DAY_LABELS.join(" "));
            for habit in view.habits() {
                let marks: Vec<&str> = habit
                    .week_data
                    .as_array()
                    .iter()
                    .map(|done| if *done { " ✓ " } else { " · " })
                    .collect();
                println!("{:<24} {}  ({})", habit.name, marks.join(" "), habit.id);
            }
        }
        HabitCommands::Add { name } => view.add(&name).await?,
        HabitCommands::Toggle { id, day } => {
            view.load().await?;
            view.toggle_day(&id, day).await?;
        }
        HabitCommands::Delete { id } => {
            view.load().await?;
            view.delete(&id).await?;
        }
    }
    Ok(())
}

async fn run_events(app: &App, command: EventCommands) -> Result<()> {
    let mut view = app.calendar();
    match command {
        EventCommands::List => {
            view.load().await?;
            for event in view.events() {
                let repeat = event.repeat.map(|r| format!(" ({})", r)).unwrap_or_default();
                println!(
                    "{}  {} -> {}  {}{}",
                    event.id,
                    datetime::format_human_datetime(event.start),
                    datetime::format_datetime_local(event.end),
                    event.title,
                    repeat
                );
            }
        }
        EventCommands::Add {
            title,
            start,
            end,
            repeat,
        } => {
            let mut draft = EventDraft::starting_at(start).with_repeat(repeat);
            draft.title = title;
            if let Some(end) = end {
                draft.end = end;
            }
            view.save(&draft).await?;
        }
        EventCommands::Update { id, title, start, end } => {
            view.load().await?;
            let mut draft = view
                .draft_for(&id)
                .with_context(|| format!("No event with id {}", id))?;
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(start) = start {
                draft.start = start;
            }
            if let Some(end) = end {
                draft.end = end;
            }
            view.save(&draft).await?;
        }
        EventCommands::Delete { id } => {
            view.load().await?;
            view.delete(&id).await?;
        }
    }
    Ok(())
}

fn print_notifications(notifications: Vec<Notification>) {
    for n in notifications {
        match n.level {
            NotificationLevel::Error => eprintln!("{}", n.message),
            _ => println!("{}", n.message),
        }
    }
}
