//! marquee CLI: terminal text animations, blog search and ROI estimates

use clap::{Parser, Subcommand, ValueEnum};
use marquee_engine::{
    decode_payload, encode_payload, AnimationTask, Config, Page, Pace, Rank, RoiInputs, Script,
    SearchIndex, Sequencer, Typewriter,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Terminal typewriter, boot-log sequencer and fuzzy blog search
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .marquee/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine activity to stderr (ignored by the TUI)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Write the default config to .marquee/config.json
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Play an animation on stdout
    Play {
        /// What to play
        #[arg(value_enum)]
        target: Target,

        /// Reveal boot logs character by character
        #[arg(long)]
        typed: bool,

        /// Words to type before stopping the hero (default: every role once)
        #[arg(long)]
        cycles: Option<u64>,
    },

    /// Fuzzy-search blog posts
    Search {
        /// Search text (empty lists every post)
        #[arg(default_value = "")]
        query: String,

        /// Only posts with this exact tag
        #[arg(long)]
        tag: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every blog tag
    Tags,

    /// Estimate reminder plan savings
    Roi {
        #[arg(long)]
        patients: Option<u32>,

        /// No-show rate in percent
        #[arg(long)]
        no_show_rate: Option<u32>,

        #[arg(long)]
        fee: Option<f64>,

        /// Working days per month
        #[arg(long)]
        days: Option<u32>,

        /// Monthly plan cost
        #[arg(long)]
        plan_cost: Option<f64>,

        /// Fraction of no-shows prevented (0.0-1.0)
        #[arg(long)]
        reduction: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode the hidden message (or a given payload)
    Decode {
        /// Base64 payload; defaults to the configured message
        payload: Option<String>,

        /// Encode the argument instead of decoding it
        #[arg(long, requires = "payload")]
        encode: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Hero,
    About,
    Contact,
    Blog,
}

fn main() {
    let cli = Cli::parse();
    let is_tui = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(cli.verbose && !is_tui);

    let config_path = cli
        .config
        .unwrap_or_else(|| Config::path_in(Path::new(".")));

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = Config::load_or_default(&config_path);
            let rt = runtime();
            if let Err(e) = rt.block_on(marquee_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Init { force }) => {
            cmd_init(&config_path, force);
        }
        Some(Commands::Play {
            target,
            typed,
            cycles,
        }) => {
            let config = Config::load_or_default(&config_path);
            let rt = runtime();
            rt.block_on(cmd_play(&config, target, typed, cycles));
        }
        Some(Commands::Search { query, tag, json }) => {
            cmd_search(&Config::load_or_default(&config_path), &query, tag.as_deref(), json);
        }
        Some(Commands::Tags) => {
            cmd_tags(&Config::load_or_default(&config_path));
        }
        Some(Commands::Roi {
            patients,
            no_show_rate,
            fee,
            days,
            plan_cost,
            reduction,
            json,
        }) => {
            let base = Config::load_or_default(&config_path).roi;
            let inputs = RoiInputs {
                patients_per_day: patients.unwrap_or(base.patients_per_day),
                no_show_rate_pct: no_show_rate.unwrap_or(base.no_show_rate_pct),
                consultation_fee: fee.unwrap_or(base.consultation_fee),
                working_days: days.unwrap_or(base.working_days),
                plan_cost: plan_cost.unwrap_or(base.plan_cost),
                no_show_reduction: reduction.unwrap_or(base.no_show_reduction),
            };
            cmd_roi(inputs, json);
        }
        Some(Commands::Decode { payload, encode }) => {
            cmd_decode(&config_path, payload, encode);
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_init(config_path: &Path, force: bool) {
    if config_path.exists() && !force {
        println!("Config already exists at {}", config_path.display());
        println!("Use --force to overwrite it with the defaults");
        return;
    }

    match Config::default().save(config_path) {
        Ok(()) => println!("Created {}", config_path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }

    println!("Edit it to change the roles, boot logs and posts");
}

async fn cmd_play(config: &Config, target: Target, typed: bool, cycles: Option<u64>) {
    let page = match target {
        Target::Hero => {
            let limit = cycles.unwrap_or_else(|| u64::try_from(config.roles.len()).unwrap_or(u64::MAX));
            play_hero(config, limit).await;
            return;
        }
        Target::About => Page::About,
        Target::Contact => Page::Contact,
        Target::Blog => Page::Blog,
    };
    play_log(config, page, typed).await;
}

/// Stream a boot log to stdout, one line or one character at a time.
async fn play_log(config: &Config, page: Page, typed: bool) {
    let script = config.script(page);
    let pace = if typed {
        Pace::Characters {
            char_ms: config.timing.char_ms,
        }
    } else {
        Pace::Lines {
            interval_ms: config.interval_ms(page),
        }
    };
    debug!(%page, lines = script.len(), "playing boot log");

    let mut sequencer = Sequencer::new(script.clone(), pace);
    sequencer.start(0);
    let (task, mut frames) = AnimationTask::spawn(sequencer, |s: &Sequencer| {
        (s.cursor(), s.partial().chars().count())
    });

    let mut out = std::io::stdout().lock();
    let mut follower = LogFollower::default();
    while let Some((cursor, partial)) = frames.recv().await {
        let text = follower.catch_up(&script, cursor, partial);
        if let Err(e) = write_frame(&mut out, &text) {
            task.dispose();
            fail_output(&e);
        }
    }
    task.join().await;
}

/// Tracks how much of a script has been written so each frame only
/// prints what is new.
#[derive(Debug, Default)]
struct LogFollower {
    line: usize,
    col: usize,
}

impl LogFollower {
    /// Text to print to reach `cursor` committed lines plus `partial`
    /// characters of the next one.
    fn catch_up(&mut self, script: &Script, cursor: usize, partial: usize) -> String {
        let mut text = String::new();
        // Finish every line the sequencer has committed
        while self.line < cursor {
            if let Some(line) = script.get(self.line) {
                text.extend(line.text().chars().skip(self.col));
            }
            text.push('\n');
            self.line += 1;
            self.col = 0;
        }
        if partial > self.col {
            if let Some(current) = script.get(self.line) {
                text.extend(current.text().chars().skip(self.col).take(partial - self.col));
            }
            self.col = partial;
        }
        text
    }
}

fn write_frame(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Report a failed stdout write (a closed pipe, usually) and exit.
fn fail_output(err: &std::io::Error) -> ! {
    eprintln!("Failed to write output: {err}");
    std::process::exit(1);
}

/// Type the hero roles in place until `limit` words have cycled.
async fn play_hero(config: &Config, limit: u64) {
    if config.roles.is_empty() || limit == 0 {
        return;
    }
    let mut typewriter = Typewriter::new(config.roles.iter().cloned(), config.timing.typewriter);
    typewriter.start(0);
    let (task, mut frames) = AnimationTask::spawn(typewriter, |t: &Typewriter| {
        (t.display().to_string(), t.cycles())
    });

    let mut out = std::io::stdout().lock();
    let mut result = Ok(());
    while let Some((display, cycles)) = frames.recv().await {
        if cycles >= limit {
            break;
        }
        result = write_frame(&mut out, &format!("\r\x1b[2KI'm a {display}"));
        if result.is_err() {
            break;
        }
    }
    task.dispose();

    if let Err(e) = result.and_then(|()| writeln!(out)) {
        fail_output(&e);
    }
}

fn cmd_search(config: &Config, query: &str, tag: Option<&str>, json: bool) {
    let index = SearchIndex::new(config.posts.clone()).with_threshold(config.search_threshold);
    let hits = index.hits(query, tag);

    if json {
        let rows: Vec<serde_json::Value> = hits
            .iter()
            .map(|hit| {
                serde_json::json!({
                    "slug": hit.post.slug,
                    "title": hit.post.title,
                    "date": hit.post.date,
                    "tags": hit.post.tags,
                    "match": hit.rank.label(),
                    "score": hit.rank.value(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize results: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if hits.is_empty() {
        println!("No posts match.");
        return;
    }

    for hit in &hits {
        println!("  {}  {}", hit.post.date, hit.post.title);
        println!("      {} · {}", hit.post.reading_time, hit.post.tags.join(", "));
        match hit.rank {
            Rank::Listed => {}
            Rank::Fuzzy(score) => println!("      fuzzy match, score {score}"),
            Rank::Typo(distance) => println!("      typo match, distance {distance:.2}"),
        }
    }
    println!("\n{} of {} post(s)", hits.len(), index.posts().len());
}

fn cmd_tags(config: &Config) {
    let index = SearchIndex::new(config.posts.clone());
    for tag in index.all_tags() {
        println!("{tag}");
    }
}

fn cmd_roi(inputs: RoiInputs, json: bool) {
    let report = inputs.compute();

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let inputs = inputs.clamped();
    println!("Inputs");
    println!("  Patients per day:     {}", inputs.patients_per_day);
    println!("  No-show rate:         {}%", inputs.no_show_rate_pct);
    println!("  Consultation fee:     {:.0}", inputs.consultation_fee);
    println!("  Working days / month: {}", inputs.working_days);
    println!("  Plan cost / month:    {:.0}", inputs.plan_cost);
    println!();
    println!("Monthly estimate");
    println!("  No-shows:     {:.1}", report.monthly_no_shows);
    println!("  Revenue lost: {:.0}", report.monthly_loss);
    println!("  Recovered:    {:.0}", report.monthly_savings);
    println!("  Net savings:  {:.0}", report.net_savings);
    println!("  ROI:          {:.0}%", report.roi_pct);
    match report.payback_days {
        Some(days) => println!("  Payback:      {days:.1} days"),
        None => println!("  Payback:      never"),
    }
}

fn cmd_decode(config_path: &Path, payload: Option<String>, encode: bool) {
    if encode {
        // clap guarantees the payload is present
        if let Some(text) = payload {
            println!("{}", encode_payload(&text));
        }
        return;
    }

    let payload = payload.unwrap_or_else(|| Config::load_or_default(config_path).hidden_message);
    match decode_payload(&payload) {
        Some(text) => println!("{text}"),
        None => {
            eprintln!("{}", marquee_engine::DECODE_FAILED);
            std::process::exit(1);
        }
    }
}
