use anyhow::{Context, Result, bail, ensure};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{Recipe, ValidationOutcome, WheelItem};
use crate::frameworks::app::App;
use crate::frameworks::config::Settings;
use crate::use_cases::spin::spin;

// Colors handed out to segments added without one.
const PALETTE: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3", "#54a0ff", "#5f27cd",
];

#[derive(Parser)]
#[command(
    name = "recipe-wheel",
    about = "Spin the recipe wheel, unlock it with the daily code and fetch AI recipes",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Exchange today's code for access on this device
    Validate {
        /// The code, case and surrounding whitespace do not matter
        code: String,
    },
    /// Show whether this device currently has access
    Status,
    /// Forget the session token and today's access
    SignOut,
    /// Generate a recipe for a dish
    Recipe {
        name: String,
        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },
    /// Spin the wheel and generate a recipe for the winning dish
    Spin {
        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or edit the wheel segments
    Wheel {
        #[command(subcommand)]
        action: WheelAction,
    },
    /// Fetch today's code (admin)
    Today,
    /// Generate codes for a range of days (admin)
    GenerateCodes {
        /// First day, YYYY-MM-DD
        start: NaiveDate,
        /// Number of days
        days: u32,
    },
}

#[derive(Subcommand)]
pub enum WheelAction {
    /// List the current segments
    Show,
    /// Add a segment
    Add {
        text: String,
        /// Segment color, e.g. #ff6b6b
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove every segment with this text
    Remove { text: String },
    /// Drop local edits and go back to the bundled wheel
    Reset,
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load()?;
    let app = App::from_settings(&settings).await?;

    match cli.command {
        Commands::Validate { code } => {
            let outcome = app.validate_code().execute(&code).await;
            println!("{}", render_outcome(&outcome));
            ensure!(outcome.is_valid, "code was not accepted");
        }
        Commands::Status => status(&app).await,
        Commands::SignOut => {
            app.sign_out().execute().await;
            println!("Signed out.");
        }
        Commands::Recipe { name, json } => generate(&app, &name, json).await?,
        Commands::Spin { json } => {
            if !app.access_ledger().has_valid_access().await {
                bail!("no valid access for today; run `recipe-wheel validate <code>` first");
            }
            let config = app.wheel.load().await;
            let item = spin(&config, &mut rand::rng())
                .cloned()
                .context("the wheel has no segments")?;
            println!("The wheel stopped on: {}", item.text);
            generate(&app, &item.text, json).await?;
        }
        Commands::Wheel { action } => wheel(&app, action).await?,
        Commands::Today => {
            let code = app.admin_codes().todays_code().await;
            ensure!(!code.is_empty(), "today's code is unavailable");
            println!("{code}");
        }
        Commands::GenerateCodes { start, days } => {
            let pairs = app.admin_codes().generate_codes(start, days).await;
            ensure!(!pairs.is_empty(), "no codes were generated");
            for pair in pairs {
                println!("{}  {}", pair.date, pair.code);
            }
        }
    }

    Ok(())
}

async fn status(app: &App) {
    let ledger = app.access_ledger();
    if ledger.has_valid_access().await {
        match ledger.access_expires_at().await {
            Some(expires_at) => {
                println!("Access valid until {}.", expires_at.format("%Y-%m-%d %H:%M"))
            }
            None => println!("Access valid."),
        }
    } else {
        println!("No valid access for today.");
    }
    let token = if app.credentials.bearer().is_some() {
        "present"
    } else {
        "none"
    };
    println!("Session token: {token}");
    println!("Device id: {}", app.device_identity().get_device_id().await);
}

async fn generate(app: &App, name: &str, json: bool) -> Result<()> {
    let recipe = app
        .recipes()
        .execute(name)
        .await
        .with_context(|| format!("failed to generate a recipe for {name:?}"))?;

    match recipe {
        Some(recipe) if json => println!("{}", serde_json::to_string_pretty(&recipe)?),
        Some(recipe) => println!("{}", render_recipe(&recipe)),
        None => println!("Nothing was generated."),
    }
    Ok(())
}

async fn wheel(app: &App, action: WheelAction) -> Result<()> {
    match action {
        WheelAction::Show => {
            let config = app.wheel.load().await;
            println!("{}", config.wheel_name);
            for item in &config.items {
                println!("  {}  {}", item.color, item.text);
            }
        }
        WheelAction::Add { text, color } => {
            ensure!(!text.trim().is_empty(), "segment text must not be blank");
            let mut config = app.wheel.load().await;
            let color = color
                .unwrap_or_else(|| PALETTE[config.items.len() % PALETTE.len()].to_string());
            config.items.push(WheelItem::new(text.trim(), color));
            app.wheel.save(config).await.context("failed to save the wheel")?;
            println!("Added.");
        }
        WheelAction::Remove { text } => {
            let mut config = app.wheel.load().await;
            let before = config.items.len();
            config.items.retain(|item| item.text != text);
            ensure!(config.items.len() != before, "no segment named {text:?}");
            app.wheel.save(config).await.context("failed to save the wheel")?;
            println!("Removed.");
        }
        WheelAction::Reset => {
            app.wheel.reset().await.context("failed to reset the wheel")?;
            println!("Wheel reset.");
        }
    }
    Ok(())
}

fn render_outcome(outcome: &ValidationOutcome) -> String {
    let mut out = outcome.message.clone();
    if outcome.is_valid {
        if let Some(expires_at) = outcome.expires_at {
            let expires_at = expires_at.format("%Y-%m-%d %H:%M %:z");
            out.push_str(&format!("\nExpires: {expires_at}"));
        }
        out.push_str(&format!("\nRemaining uses: {}", outcome.remaining_uses));
    }
    out
}

pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    out.push_str(&recipe.name);
    out.push('\n');
    if !recipe.description.is_empty() {
        out.push_str(&format!("{}\n", recipe.description));
    }

    let facts = [
        ("Prep", &recipe.prep_time),
        ("Cook", &recipe.cook_time),
        ("Total", &recipe.total_time),
        ("Serves", &recipe.servings),
        ("Difficulty", &recipe.difficulty),
    ];
    let facts: Vec<String> = facts
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();
    if !facts.is_empty() {
        out.push_str(&format!("{}\n", facts.join(" | ")));
    }

    if !recipe.ingredients.is_empty() {
        out.push_str("\nIngredients:\n");
        for ingredient in &recipe.ingredients {
            out.push_str(&format!("  - {ingredient}\n"));
        }
    }
    if !recipe.instructions.is_empty() {
        out.push_str("\nInstructions:\n");
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            out.push_str(&format!("  {}. {instruction}\n", step + 1));
        }
    }
    if !recipe.tags.is_empty() {
        out.push_str(&format!("\nTags: {}\n", recipe.tags.join(", ")));
    }
    out.trim_end().to_string()
}
