use clap::{Parser, Subcommand, ValueEnum};
use std::borrow::Cow;
use std::io::{self, Read};
use std::path::PathBuf;
use workout_core::*;

#[derive(Parser)]
#[command(name = "wtrack")]
#[command(about = "Weekly workout plan tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a day's plan with logged progress (default)
    Show {
        /// Week identifier, e.g. 2025-W05 (default: this week)
        #[arg(long)]
        week: Option<WeekId>,

        /// Day name (default: today)
        #[arg(long)]
        day: Option<Day>,
    },

    /// Show the week's date range, neighbours and per-day completion
    Week {
        #[arg(long)]
        week: Option<WeekId>,
    },

    /// Mark an entry as done
    Check {
        /// Entry key, e.g. Monday-0-0-A (see `wtrack keys`)
        key: String,

        #[arg(long)]
        week: Option<WeekId>,

        /// Clear the mark instead of setting it
        #[arg(long, conflicts_with = "toggle")]
        off: bool,

        /// Flip the current mark
        #[arg(long)]
        toggle: bool,
    },

    /// Record the weight used for an exercise
    Weight {
        key: String,

        /// Free text; stored as typed
        value: String,

        #[arg(long)]
        week: Option<WeekId>,
    },

    /// Print a progress report
    Report {
        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Merge a JSON export into the stored progress
    Import {
        /// File to read (default: stdin)
        path: Option<PathBuf>,
    },

    /// List entry keys and the exercises they log
    Keys {
        #[arg(long)]
        day: Option<Day>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Markdown,
    Json,
}

fn main() -> Result<()> {
    // Initialize logging
    workout_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = config.load_catalog()?;
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Plan validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid plan".into()));
    }

    let mut store = ProgressStore::load(FileBackend::new(&data_dir));
    let ctx = Context {
        catalog,
        options: config.report_options(),
    };

    match cli.command {
        Some(Commands::Show { week, day }) => cmd_show(&ctx, &store, week, day),
        Some(Commands::Week { week }) => cmd_week(&ctx, &store, week),
        Some(Commands::Check {
            key,
            week,
            off,
            toggle,
        }) => {
            let mode = if toggle {
                CheckMode::Toggle
            } else if off {
                CheckMode::Off
            } else {
                CheckMode::On
            };
            cmd_check(&ctx, &mut store, &key, week, mode)
        }
        Some(Commands::Weight { key, value, week }) => {
            cmd_weight(&ctx, &mut store, &key, &value, week)
        }
        Some(Commands::Report { format, output }) => cmd_report(&ctx, &store, format, output),
        Some(Commands::Import { path }) => cmd_import(&mut store, path),
        Some(Commands::Keys { day }) => cmd_keys(&ctx, day),
        None => cmd_show(&ctx, &store, None, None),
    }
}

struct Context {
    catalog: Cow<'static, PlanCatalog>,
    options: ReportOptions,
}

enum CheckMode {
    On,
    Off,
    Toggle,
}

fn cmd_show(
    ctx: &Context,
    store: &ProgressStore<FileBackend>,
    week: Option<WeekId>,
    day: Option<Day>,
) -> Result<()> {
    let week = week.unwrap_or_else(current_week_id);
    let day = day.unwrap_or_else(Day::today);
    let Some(plan) = ctx.catalog.day(day) else {
        return Err(Error::Other(format!("No plan for {}", day)));
    };
    let data = store.get(&week);
    let unit = &ctx.options.weight_unit;

    println!();
    println!("  {} {} — {}", plan.icon, day, plan.label);
    print!("  Week {} ({})", week, week.label());
    if !plan.is_rest_day() {
        print!(" · {} total sets", plan.total_sets());
    }
    println!();
    if !plan.note.is_empty() {
        println!("  💡 {}", plan.note);
    }
    println!();

    let mut cardio_index = 0;
    for session in &plan.sessions {
        match parse_session(session) {
            Some(cardio) => {
                let key = EntryKey::cardio(day, cardio_index);
                cardio_index += 1;
                println!(
                    "  {} ❤️‍🔥 {}  → {}   {}",
                    mark(data.is_complete(key.as_str())),
                    session,
                    cardio.instruction,
                    key
                );
            }
            None => println!("      ⏰ {}", session),
        }
    }

    if plan.is_rest_day() {
        println!();
        println!("  Rest day. Suggested recovery:");
        println!("    - 10–15' easy walk or light stretching");
        println!("    - Hit daily step target and drink 2–3L of water");
        println!("    - 8+ hours of sleep and 1–2 high-protein meals");
        println!();
        return Ok(());
    }

    let slots = exercise_slots(day, plan);
    for (gi, group) in plan.groups.iter().enumerate() {
        println!();
        let intensity = match Intensity::from_rpe(&group.rpe) {
            Intensity::High => "🔴",
            Intensity::Moderate => "🟡",
            Intensity::Low => "🟢",
        };
        println!(
            "  {} · {} sets per exercise · {} {}",
            group.name, group.sets, intensity, group.rpe
        );
        for (pi, pair) in group.pairs.iter().enumerate() {
            let superset = has_second_exercise(pair);
            println!(
                "    {} — {} reps · Rest {}",
                if superset { "⚡ Superset" } else { "🏋️ Straight Set" },
                pair.reps,
                pair.rest
            );
            for slot in slots.iter().filter(|s| s.group == gi && s.pair == pi) {
                let key = slot.key.as_str();
                let prefix = match (superset, slot.slot) {
                    (false, _) => "",
                    (true, Slot::A) => "A: ",
                    (true, Slot::B) => "B: ",
                };
                let weight = data
                    .weight(key)
                    .map(|w| format!("{} {}", w, unit))
                    .unwrap_or_else(|| "—".into());
                let last = store
                    .last_weight(&week, key)
                    .map(|w| format!("  (last: {} {})", w, unit))
                    .unwrap_or_default();
                println!(
                    "      {} {}{}  {}{}   {}",
                    mark(data.is_complete(key)),
                    prefix,
                    slot.name,
                    weight,
                    last,
                    key
                );
            }
        }
    }

    let (done, total) = day_progress(&ctx.catalog, data, day);
    println!();
    println!("  {}/{} exercises done", done, total);
    println!();
    Ok(())
}

fn cmd_week(ctx: &Context, store: &ProgressStore<FileBackend>, week: Option<WeekId>) -> Result<()> {
    let current = current_week_id();
    let week = week.unwrap_or(current);
    let data = store.get(&week);

    let heading = if week == current {
        format!("This week ({})", week.label())
    } else {
        format!("{} ({})", week.label(), week)
    };
    println!("{}", heading);
    println!("  ← {}   {} →", week.previous(), week.next());
    println!();

    for (day, plan) in &ctx.catalog.days {
        if plan.is_rest_day() {
            println!("  {}  rest", day.short_name());
            continue;
        }
        let (done, total) = day_progress(&ctx.catalog, data, *day);
        let status = if is_day_complete(&ctx.catalog, data, *day) {
            "✓"
        } else {
            " "
        };
        println!(
            "  {}  {} {:>2}/{:<2} {}",
            day.short_name(),
            status,
            done,
            total,
            plan.label
        );
    }
    Ok(())
}

fn cmd_check(
    ctx: &Context,
    store: &mut ProgressStore<FileBackend>,
    key: &str,
    week: Option<WeekId>,
    mode: CheckMode,
) -> Result<()> {
    ensure_known_key(ctx, key, true)?;
    let week = week.unwrap_or_else(current_week_id);

    let value = match mode {
        CheckMode::Toggle => store.toggle_completion(week, key)?,
        CheckMode::On => {
            store.set_completion(week, key, true)?;
            true
        }
        CheckMode::Off => {
            store.set_completion(week, key, false)?;
            false
        }
    };

    tracing::debug!("Set {} in {} to {}", key, week, value);
    if value {
        println!("✓ {} done ({})", describe_key(ctx, key), week);
    } else {
        println!("○ {} not done ({})", describe_key(ctx, key), week);
    }
    Ok(())
}

fn cmd_weight(
    ctx: &Context,
    store: &mut ProgressStore<FileBackend>,
    key: &str,
    value: &str,
    week: Option<WeekId>,
) -> Result<()> {
    ensure_known_key(ctx, key, false)?;
    let week = week.unwrap_or_else(current_week_id);
    store.set_weight(week, key, value)?;

    println!(
        "✓ {}: {} {} ({})",
        describe_key(ctx, key),
        value,
        ctx.options.weight_unit,
        week
    );
    Ok(())
}

fn cmd_report(
    ctx: &Context,
    store: &ProgressStore<FileBackend>,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let builder = ReportBuilder::new(&ctx.catalog, ctx.options.clone());
    let text = match format {
        ReportFormat::Markdown => {
            builder.markdown(store.weeks(), chrono::Local::now().date_naive())
        }
        ReportFormat::Json => builder.json(store.weeks()).to_json()?,
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, format!("{}\n", text))?;
            println!("✓ Report written to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn cmd_import(store: &mut ProgressStore<FileBackend>, path: Option<PathBuf>) -> Result<()> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    match store.import_json(&text) {
        Ok(count) => {
            tracing::debug!("Merged {} weeks", count);
            println!("{}", IMPORT_SUCCESS_MESSAGE);
            Ok(())
        }
        Err(Error::Import(e)) => {
            tracing::warn!("Import rejected: {}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}

fn cmd_keys(ctx: &Context, day: Option<Day>) -> Result<()> {
    let days: Vec<Day> = match day {
        Some(d) => vec![d],
        None => Day::ALL.to_vec(),
    };

    for day in days {
        let Some(plan) = ctx.catalog.day(day) else {
            continue;
        };
        for slot in exercise_slots(day, plan) {
            println!("{:<22} {}", slot.key, slot.name);
        }
        for (key, cardio) in cardio_sessions(day, plan) {
            println!("{:<22} {}", key, cardio.kind);
        }
    }
    Ok(())
}

/// Reject keys the current plan never produces
///
/// Cardio keys only take completion marks, not weights.
fn ensure_known_key(ctx: &Context, key: &str, allow_cardio: bool) -> Result<()> {
    let known = ctx.catalog.days.iter().any(|(day, plan)| {
        exercise_slots(*day, plan).iter().any(|s| s.key.as_str() == key)
            || (allow_cardio
                && cardio_sessions(*day, plan)
                    .iter()
                    .any(|(k, _)| k.as_str() == key))
    });

    if known {
        Ok(())
    } else {
        Err(Error::Other(format!(
            "Unknown entry key '{}'. Run `wtrack keys` to list valid keys.",
            key
        )))
    }
}

fn describe_key(ctx: &Context, key: &str) -> String {
    KeyIndex::build(&ctx.catalog)
        .name(key)
        .map(String::from)
        .unwrap_or_else(|| key.to_string())
}

fn mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}
