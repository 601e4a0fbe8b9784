use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use eunoia_core::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "eunoia")]
#[command(about = "Menstrual wellness companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cycle snapshot for today (default)
    Status {
        /// Date to inspect instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Render a month calendar with period and fertile markers
    Calendar {
        /// Month to render (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// View or update cycle settings
    Cycle {
        #[command(subcommand)]
        action: CycleAction,
    },

    /// Record and inspect daily log entries
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Quick mood check-in
    Mood {
        /// Mood emoji to record; omit to show the saved one
        emoji: Option<String>,
    },

    /// Browse the education library
    Education {
        #[command(subcommand)]
        action: Option<EducationAction>,

        /// Filter topics by title, description or category
        #[arg(long)]
        search: Option<String>,
    },

    /// Talk with the Eunoia companion
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },

    /// Manage profile and preferences
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum CycleAction {
    /// Show the stored cycle configuration
    Show,

    /// Update cycle parameters
    Set {
        /// Cycle length in days
        #[arg(long)]
        length: Option<i64>,

        /// Period duration in days
        #[arg(long)]
        duration: Option<i64>,

        /// First day of the most recent period (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum LogAction {
    /// Add or replace the entry for a date
    Add {
        /// Entry date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Symptom label (repeatable)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,

        /// Mood label
        #[arg(long)]
        mood: Option<String>,

        /// Flow intensity (light, medium, heavy)
        #[arg(long)]
        flow: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the entry for a date
    Show {
        /// Entry date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List all entries
    List,

    /// Remove the entry for a date
    Remove {
        #[arg(long)]
        date: NaiveDate,
    },
}

#[derive(Subcommand)]
enum EducationAction {
    /// Read a topic's article
    Show {
        /// Topic id from the list
        id: u32,
    },
}

#[derive(Subcommand)]
enum ChatAction {
    /// Send a message
    Send {
        message: String,

        /// Continue a specific conversation
        #[arg(long)]
        conversation: Option<String>,
    },

    /// List conversations
    List,

    /// Show one conversation
    Show { conversation_id: String },

    /// Delete one conversation
    Delete { conversation_id: String },

    /// Clear all chat history
    Clear,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show profile and preferences
    Show,

    /// Update the display name
    SetName { name: String },

    /// Choose an avatar
    SetAvatar { emoji: String },

    /// Switch interface language (en, sw)
    SetLanguage { language: String },

    /// Turn period reminders on or off
    Reminders { state: String },

    /// Delete all local data for this profile
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    eunoia_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {}", data_dir.display());

    match cli.command {
        Some(Commands::Status { date }) => cmd_status(data_dir, &config, date),
        Some(Commands::Calendar { month }) => cmd_calendar(data_dir, &config, month),
        Some(Commands::Cycle { action }) => match action {
            CycleAction::Show => cmd_cycle_show(data_dir, &config),
            CycleAction::Set {
                length,
                duration,
                start,
            } => cmd_cycle_set(data_dir, &config, length, duration, start),
        },
        Some(Commands::Log { action }) => cmd_log(data_dir, action),
        Some(Commands::Mood { emoji }) => cmd_mood(data_dir, emoji),
        Some(Commands::Education { action, search }) => match action {
            Some(EducationAction::Show { id }) => cmd_education_show(id),
            None => cmd_education_list(search),
        },
        Some(Commands::Chat { action }) => cmd_chat(data_dir, &config, action),
        Some(Commands::Profile { action }) => cmd_profile(data_dir, action),
        None => {
            // Default to the status snapshot
            cmd_status(data_dir, &config, None)
        }
    }
}

/// Open the store, bootstrapping the profile on first run
fn open_store(store_path: &Path) -> Result<(Store, Profile)> {
    let mut store = Store::load(store_path)?;
    let had_profile = store.get_json::<Profile>(store::keys::PROFILE).is_some();
    let user = profile::load_or_create(&mut store)?;
    if !had_profile {
        // Persist the generated identity so every command sees the same user
        store.save(store_path)?;
    }
    Ok((store, user))
}

/// The stored cycle configuration, or the configured defaults
///
/// Returns the config plus whether it was assumed rather than saved.
fn cycle_config_or_default(
    store: &Store,
    user: &Profile,
    config: &Config,
    today: NaiveDate,
) -> (CycleConfig, bool) {
    match store.get_json::<CycleConfig>(&store::keys::cycle(&user.user_id)) {
        Some(saved) => (saved, false),
        None => (
            CycleConfig::assumed_from(
                today,
                config.cycle.default_cycle_length,
                config.cycle.default_period_duration,
            ),
            true,
        ),
    }
}

fn cmd_status(data_dir: PathBuf, config: &Config, date: Option<NaiveDate>) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (store, user) = open_store(&store_path)?;

    let today = Local::now().date_naive();
    let query = date.unwrap_or(today);
    let (cycle_config, assumed) = cycle_config_or_default(&store, &user, config, today);
    let facts = cycle::facts_for(&cycle_config, &config.cycle.policy(), query)?;

    let avatar = profile::avatar(&store, &user.user_id);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} {}", avatar, user.display_name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} · Day {} of {}",
        query, facts.day_of_cycle, cycle_config.cycle_length
    );

    if facts.is_period_day {
        println!(
            "  🩸 Period day ({} of {})",
            facts.day_of_cycle, cycle_config.period_duration
        );
    }
    if facts.is_fertile_day {
        println!("  🌼 Inside the fertile window");
    }

    if facts.days_until_next_period == 1 {
        let next = query + Duration::days(1);
        println!("  Next period expected tomorrow ({})", next);
    } else {
        let next = query + Duration::days(facts.days_until_next_period);
        println!(
            "  Next period in {} days ({})",
            facts.days_until_next_period, next
        );
    }

    if let Some(entry) = logbook::entry_for(&store, &user.user_id, query) {
        println!("  Logged: {}", summarize_entry(&entry));
    }
    if let Some(mood) = profile::quick_mood(&store, &user.user_id) {
        println!("  Last check-in: {}", mood);
    }

    let reminders = profile::reminders_enabled(&store, &user.user_id);
    println!("  Reminders: {}", if reminders { "on" } else { "off" });

    if assumed {
        println!();
        println!("  No cycle saved yet; showing defaults. Run `eunoia cycle set` to record yours.");
    }
    println!();

    Ok(())
}

fn cmd_calendar(data_dir: PathBuf, config: &Config, month: Option<String>) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (store, user) = open_store(&store_path)?;

    let today = Local::now().date_naive();
    let first = match month {
        Some(raw) => parse_month(&raw)?,
        None => today.with_day(1).unwrap_or(today),
    };

    let (cycle_config, assumed) = cycle_config_or_default(&store, &user, config, today);
    let policy = config.cycle.policy();
    let logged = logbook::entries(&store, &user.user_id);

    println!();
    let title = first.format("%B %Y").to_string();
    println!("{:^37}", title);
    let header: String = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        .iter()
        .map(|d| format!("{:^5}", d))
        .collect();
    println!("{}", header.trim_end());

    let mut line = String::new();
    for _ in 0..first.weekday().num_days_from_sunday() {
        line.push_str("     ");
    }

    let mut day = first;
    while day.month() == first.month() {
        let marker = if cycle::is_period_day(&cycle_config, day)? {
            'P'
        } else if cycle::is_fertile_day(&cycle_config, &policy, day)? {
            'F'
        } else if logged.contains_key(&day) {
            '.'
        } else {
            ' '
        };

        let cell = if day == today {
            format!("[{:>2}{}]", day.day(), marker)
        } else {
            format!(" {:>2}{} ", day.day(), marker)
        };
        line.push_str(&cell);

        if day.weekday().num_days_from_sunday() == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    if !line.trim().is_empty() {
        println!("{}", line.trim_end());
    }

    println!();
    println!("  P = period   F = fertile   . = logged   [ ] = today");
    if assumed {
        println!("  (cycle defaults; run `eunoia cycle set` to record yours)");
    }
    println!();

    Ok(())
}

fn cmd_cycle_show(data_dir: PathBuf, config: &Config) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (store, user) = open_store(&store_path)?;

    let today = Local::now().date_naive();
    let (cycle_config, assumed) = cycle_config_or_default(&store, &user, config, today);

    if assumed {
        println!("No cycle saved yet. Defaults shown below; run `eunoia cycle set` to record yours.");
    }
    println!("  Cycle length: {} days", cycle_config.cycle_length);
    println!("  Period duration: {} days", cycle_config.period_duration);
    println!("  Last period started: {}", cycle_config.last_period_start);

    match cycle::fertile_window(&cycle_config, &config.cycle.policy())? {
        Some((lo, hi)) => println!("  Fertile window: days {} to {} of the cycle", lo, hi),
        None => println!("  Fertile window: none for this cycle length"),
    }

    Ok(())
}

fn cmd_cycle_set(
    data_dir: PathBuf,
    config: &Config,
    length: Option<i64>,
    duration: Option<i64>,
    start: Option<NaiveDate>,
) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (mut store, user) = open_store(&store_path)?;

    let today = Local::now().date_naive();
    let (mut cycle_config, _) = cycle_config_or_default(&store, &user, config, today);

    if let Some(length) = length {
        cycle_config.cycle_length = length;
    }
    if let Some(duration) = duration {
        cycle_config.period_duration = duration;
    }
    if let Some(start) = start {
        cycle_config.last_period_start = start;
    }

    // Reject configurations the engine cannot compute with
    cycle::facts_for(&cycle_config, &config.cycle.policy(), today)?;

    store.set_json(store::keys::cycle(&user.user_id), &cycle_config)?;
    store.save(&store_path)?;

    println!(
        "✓ Cycle saved: {}-day cycle, {}-day period, last period started {}",
        cycle_config.cycle_length, cycle_config.period_duration, cycle_config.last_period_start
    );

    Ok(())
}

fn cmd_log(data_dir: PathBuf, action: LogAction) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (mut store, user) = open_store(&store_path)?;
    let today = Local::now().date_naive();

    match action {
        LogAction::Add {
            date,
            symptoms,
            mood,
            flow,
            notes,
        } => {
            let date = date.unwrap_or(today);
            let flow = flow.map(|raw| raw.parse::<FlowIntensity>()).transpose()?;

            let entry = LogEntry {
                symptoms: symptoms.into_iter().collect::<BTreeSet<_>>(),
                mood,
                flow,
                notes: notes.unwrap_or_default(),
            };

            logbook::save_entry(&mut store, &user.user_id, date, entry)?;
            store.save(&store_path)?;
            println!("✓ Logged entry for {}", date);
        }

        LogAction::Show { date } => {
            let date = date.unwrap_or(today);
            match logbook::entry_for(&store, &user.user_id, date) {
                Some(entry) => display_entry(date, &entry),
                None => println!("No entry for {}.", date),
            }
        }

        LogAction::List => {
            let entries = logbook::entries(&store, &user.user_id);
            if entries.is_empty() {
                println!("No entries yet. Try `eunoia log add --symptom Cramps`.");
            } else {
                for (date, entry) in &entries {
                    println!("  {}  {}", date, summarize_entry(entry));
                }
            }
        }

        LogAction::Remove { date } => {
            if logbook::remove_entry(&mut store, &user.user_id, date)? {
                store.save(&store_path)?;
                println!("✓ Removed entry for {}", date);
            } else {
                println!("No entry for {}.", date);
            }
        }
    }

    Ok(())
}

fn cmd_mood(data_dir: PathBuf, emoji: Option<String>) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (mut store, user) = open_store(&store_path)?;

    match emoji {
        Some(emoji) => {
            let message = profile::set_quick_mood(&mut store, &user.user_id, &emoji);
            store.save(&store_path)?;

            println!("✓ Mood saved: {}", emoji);
            if let Some(message) = message {
                println!();
                println!("  {}", message);
            }
        }
        None => match profile::quick_mood(&store, &user.user_id) {
            Some(saved) => println!("Last check-in: {}", saved),
            None => println!("No check-in yet. Try `eunoia mood 😊`."),
        },
    }

    Ok(())
}

fn cmd_education_list(search: Option<String>) -> Result<()> {
    let catalog = get_default_catalog();
    let query = search.unwrap_or_default();
    let topics = catalog.search_topics(&query);

    if topics.is_empty() {
        println!("No topics match '{}'.", query);
        return Ok(());
    }

    println!();
    for topic in topics {
        println!("  {:>2}  {}  {} · {}", topic.id, topic.icon, topic.title, topic.category);
        println!("      {}", topic.description);
    }
    println!();
    println!("  Read one with `eunoia education show <ID>`.");

    Ok(())
}

fn cmd_education_show(id: u32) -> Result<()> {
    let catalog = get_default_catalog();
    let topic = catalog
        .topic(id)
        .ok_or_else(|| Error::InvalidConfig(format!("No education topic with id {}", id)))?;

    match catalog.article(id) {
        Some(article) => {
            println!();
            println!("{}  {}", topic.icon, article.title);
            for section in &article.sections {
                println!();
                println!("## {}", section.heading);
                println!();
                println!("{}", section.body);
            }
            println!();
        }
        None => {
            println!("Content for \"{}\" is coming soon! 💕", topic.title);
        }
    }

    Ok(())
}

fn cmd_chat(data_dir: PathBuf, config: &Config, action: ChatAction) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (store, user) = open_store(&store_path)?;

    let language = profile::language(&store);
    let client = ChatClient::new(&config.chat)?;

    match action {
        ChatAction::Send {
            message,
            conversation,
        } => {
            let conversation_id = match conversation {
                Some(id) => id,
                None => client.ensure_conversation(&user.user_id)?,
            };

            println!("  You: {}", message);
            println!("  {}", i18n::translate("typing", language));

            let reply = client.send_message(
                &user.user_id,
                Some(conversation_id.as_str()),
                &message,
                language,
            )?;

            println!("  Eunoia: {}", reply.response);
            println!();
            println!("  · conversation {}", conversation_id);
        }

        ChatAction::List => {
            let conversations = client.list_conversations(&user.user_id)?;
            if conversations.is_empty() {
                println!("No conversations yet. Try `eunoia chat send \"hello\"`.");
            } else {
                let today = Local::now().date_naive();
                for summary in conversations {
                    println!(
                        "  {}  {:<12} {} ({} messages)",
                        summary.conversation_id,
                        format_relative_date(&summary.updated_at, today),
                        summary.title,
                        summary.message_count
                    );
                }
            }
        }

        ChatAction::Show { conversation_id } => {
            let conversation = client.get_conversation(&user.user_id, &conversation_id)?;
            println!();
            println!("  {}", conversation.title);
            println!();
            if conversation.messages.is_empty() {
                println!("  {}", i18n::greeting(language, &user.display_name));
            }
            for message in &conversation.messages {
                let speaker = match message.role {
                    ChatRole::User => "You",
                    ChatRole::Assistant => "Eunoia",
                };
                println!("  {} ({}): {}", speaker, message.timestamp, message.text);
            }
            println!();
        }

        ChatAction::Delete { conversation_id } => {
            client.delete_conversation(&user.user_id, &conversation_id)?;
            println!("✓ Deleted conversation {}", conversation_id);
        }

        ChatAction::Clear => {
            client.clear_history(&user.user_id)?;
            println!("✓ Chat history cleared");
        }
    }

    Ok(())
}

fn cmd_profile(data_dir: PathBuf, action: ProfileAction) -> Result<()> {
    let store_path = store::store_path(&data_dir);
    let (mut store, user) = open_store(&store_path)?;

    match action {
        ProfileAction::Show => {
            let avatar = profile::avatar(&store, &user.user_id);
            let language = profile::language(&store);
            let reminders = profile::reminders_enabled(&store, &user.user_id);

            println!();
            println!("  {} {}", avatar, user.display_name);
            println!("  User id: {}", user.user_id);
            println!("  Language: {}", language);
            println!("  Reminders: {}", if reminders { "on" } else { "off" });
            if let Some(mood) = profile::quick_mood(&store, &user.user_id) {
                println!("  Last check-in: {}", mood);
            }
            println!();
        }

        ProfileAction::SetName { name } => {
            let updated = profile::set_display_name(&mut store, &name)?;
            store.save(&store_path)?;
            println!("✓ Display name set to {}", updated.display_name);
        }

        ProfileAction::SetAvatar { emoji } => {
            profile::set_avatar(&mut store, &user.user_id, &emoji)?;
            store.save(&store_path)?;
            println!("✓ Avatar set to {}", emoji);
        }

        ProfileAction::SetLanguage { language } => {
            let language: Language = language.parse()?;
            profile::set_language(&mut store, language);
            store.save(&store_path)?;
            println!("✓ Language set to {}", language);
        }

        ProfileAction::Reminders { state } => {
            let enabled = match state.to_lowercase().as_str() {
                "on" => true,
                "off" => false,
                other => {
                    return Err(Error::InvalidConfig(format!(
                        "Expected 'on' or 'off', got '{}'",
                        other
                    )))
                }
            };
            profile::set_reminders(&mut store, &user.user_id, enabled)?;
            store.save(&store_path)?;
            println!("✓ Reminders {}", if enabled { "on" } else { "off" });
        }

        ProfileAction::Delete { yes } => {
            if !yes {
                println!(
                    "This removes all local data for {}. Re-run with --yes to confirm.",
                    user.display_name
                );
                return Ok(());
            }

            let removed = profile::delete_user_data(&mut store, &user.user_id);
            store.save(&store_path)?;
            println!("✓ Deleted profile and {} local entries", removed);
        }
    }

    Ok(())
}

fn display_entry(date: NaiveDate, entry: &LogEntry) {
    println!();
    println!("  {}", date);
    if !entry.symptoms.is_empty() {
        let symptoms: Vec<_> = entry.symptoms.iter().cloned().collect();
        println!("  Symptoms: {}", symptoms.join(", "));
    }
    if let Some(ref mood) = entry.mood {
        println!("  Mood: {}", mood);
    }
    if let Some(flow) = entry.flow {
        println!("  Flow: {}", flow.label());
    }
    if !entry.notes.is_empty() {
        println!("  Notes: {}", entry.notes);
    }
    if entry.is_empty() {
        println!("  (empty entry)");
    }
    println!();
}

fn summarize_entry(entry: &LogEntry) -> String {
    let mut parts = Vec::new();
    if !entry.symptoms.is_empty() {
        let symptoms: Vec<_> = entry.symptoms.iter().cloned().collect();
        parts.push(symptoms.join(", "));
    }
    if let Some(ref mood) = entry.mood {
        parts.push(mood.clone());
    }
    if let Some(flow) = entry.flow {
        parts.push(format!("{} flow", flow.label()));
    }
    if !entry.notes.is_empty() {
        parts.push(format!("\"{}\"", entry.notes));
    }
    if parts.is_empty() {
        parts.push("(empty entry)".to_string());
    }
    parts.join(" · ")
}

fn parse_month(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
        .map_err(|e| Error::InvalidConfig(format!("Invalid month '{}' (expected YYYY-MM): {}", raw, e)))
}

/// Render a backend timestamp relative to today
///
/// Unparseable timestamps come back unchanged.
fn format_relative_date(raw: &str, today: NaiveDate) -> String {
    let date = match parse_backend_date(raw) {
        Some(date) => date,
        None => return raw.to_string(),
    };

    let diff = today.signed_duration_since(date).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=7 => format!("{} days ago", diff),
        _ => date.to_string(),
    }
}

fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .ok()
        .or_else(|| raw.get(..10)?.parse().ok())
}
