//! Configuration types for marquee.
//!
//! Everything a display needs that is content rather than logic lives
//! here: tick timings, the role rotation, boot-log scripts, blog posts,
//! the hidden message and ROI slider defaults. All of it is read once
//! and handed to displays as read-only data.

use crate::filter::{Post, DEFAULT_THRESHOLD};
use crate::line::Script;
use crate::roi::RoiInputs;
use crate::typewriter::TypewriterTiming;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Directory holding marquee state, relative to the working directory.
pub const CONFIG_DIR: &str = ".marquee";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Placeholder in boot-log lines replaced by the number of blog posts.
const POST_COUNT_PLACEHOLDER: &str = "{posts}";

/// Main configuration for marquee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tick timings.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Words cycled by the hero typewriter.
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,

    /// Boot-log scripts per page.
    #[serde(default)]
    pub boot_logs: BootLogs,

    /// Blog posts for the search screen.
    #[serde(default = "default_posts")]
    pub posts: Vec<Post>,

    /// Base64 payload revealed by the decode toggle.
    #[serde(default = "default_hidden_message")]
    pub hidden_message: String,

    /// Initial ROI slider values.
    #[serde(default)]
    pub roi: RoiInputs,

    /// Fuzzy search threshold (0 = exact, 1 = anything).
    #[serde(default = "default_search_threshold")]
    pub search_threshold: f64,
}

/// Tick timings in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Hero typewriter delays.
    #[serde(default)]
    pub typewriter: TypewriterTiming,

    /// Cursor blink half-period.
    #[serde(default = "default_blink_ms")]
    pub blink_ms: u64,

    /// Per-character delay when a boot log is typed instead of listed.
    #[serde(default = "default_char_ms")]
    pub char_ms: u64,
}

fn default_blink_ms() -> u64 {
    500
}

fn default_char_ms() -> u64 {
    15
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            typewriter: TypewriterTiming::default(),
            blink_ms: default_blink_ms(),
            char_ms: default_char_ms(),
        }
    }
}

/// Pages that show a boot log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    About,
    Contact,
    Blog,
}

impl Page {
    /// File-like title shown on the log window.
    pub fn log_name(self) -> &'static str {
        match self {
            Self::About => "bio.log",
            Self::Contact => "contact.log",
            Self::Blog => "blog.log",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::About => write!(f, "about"),
            Self::Contact => write!(f, "contact"),
            Self::Blog => write!(f, "blog"),
        }
    }
}

/// One page's boot log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootLog {
    /// Delay between revealed lines.
    pub interval_ms: u64,
    pub lines: Vec<String>,
}

/// Boot logs for every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootLogs {
    #[serde(default = "default_about_log")]
    pub about: BootLog,
    #[serde(default = "default_contact_log")]
    pub contact: BootLog,
    #[serde(default = "default_blog_log")]
    pub blog: BootLog,
}

impl Default for BootLogs {
    fn default() -> Self {
        Self {
            about: default_about_log(),
            contact: default_contact_log(),
            blog: default_blog_log(),
        }
    }
}

impl BootLogs {
    pub fn get(&self, page: Page) -> &BootLog {
        match page {
            Page::About => &self.about,
            Page::Contact => &self.contact,
            Page::Blog => &self.blog,
        }
    }
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_string()).collect()
}

fn default_about_log() -> BootLog {
    BootLog {
        interval_ms: 100,
        lines: lines(&[
            "> Initializing user profile...",
            "> Loading personal data...",
            "> Scanning digital footprint...",
            "",
            "USER: guest",
            "STATUS: Online",
            "LOCATION: Digital Frontier",
            "",
            "> Skills initialized:",
            "  - Software Engineering: ████████████ 95%",
            "  - Machine Learning: ██████████ 82%",
            "  - Problem Solving: ████████████████ 98%",
            "",
            "> Loading complete. Press Ctrl+D to decode the hidden message...",
        ]),
    }
}

fn default_contact_log() -> BootLog {
    BootLog {
        interval_ms: 200,
        lines: lines(&[
            "> Initializing secure communication channel...",
            "> Establishing encrypted connection...",
            "> Loading contact protocols...",
            "> System ready.",
            "",
            "> Available channels:",
            "  [1] Direct message (recommended)",
            "  [2] Email transmission",
            "  [3] Social network ping",
            "",
            "> Security: End-to-end encrypted ✓",
            "> Status: Online and monitoring ✓",
        ]),
    }
}

fn default_blog_log() -> BootLog {
    BootLog {
        interval_ms: 200,
        lines: lines(&[
            "> Initializing blog system...",
            "> Loading posts from database...",
            "> Indexing content for search...",
            "> Found {posts} posts",
            "> System ready. Type \"/\" to search.",
        ]),
    }
}

fn default_roles() -> Vec<String> {
    lines(&[
        "software engineer",
        "CTF creator",
        "ML enthusiast",
        "Applied Machine Learning Engineer",
        "full-stack developer",
        "Tech Innovator",
    ])
}

fn default_hidden_message() -> String {
    "SGV5IHRoZXJlISBJZiB5b3UncmUgcmVhZGluZyB0aGlzLCB5b3UgZm91bmQgdGhlIEVhc3RlciBlZ2chIEknbSBhbHdheXMgaGlkaW5nIGxpdHRsZSBzdXJwcmlzZXMgaW4gbXkgY29kZS4gS2VlcCBleHBsb3JpbmchIDo="
        .to_string()
}

fn default_search_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_posts() -> Vec<Post> {
    let post = |slug: &str, title: &str, date: (i32, u32, u32), excerpt: &str, tags: &[&str], minutes: u32| Post {
        slug: slug.into(),
        title: title.into(),
        date: chrono::NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or(chrono::NaiveDate::MIN),
        excerpt: excerpt.into(),
        tags: lines(tags),
        reading_time: format!("{minutes} min read"),
        featured: false,
    };
    vec![
        post(
            "neural-networks-cybersecurity",
            "Neural Networks in Cybersecurity: A Deep Dive",
            (2024, 1, 15),
            "How machine learning can change threat detection and vulnerability assessment.",
            &["Machine Learning", "Cybersecurity", "Neural Networks", "AI"],
            8,
        ),
        post(
            "building-ctf-challenges",
            "The Art of Building CTF Challenges",
            (2024, 1, 10),
            "Creating Capture The Flag challenges that test real-world security skills.",
            &["CTF", "Security", "Education", "Challenge Design"],
            12,
        ),
        post(
            "quantum-cryptography-future",
            "Quantum Cryptography: Securing the Future",
            (2024, 1, 5),
            "Quantum key distribution and what it means for post-quantum cryptography.",
            &["Quantum Computing", "Cryptography", "Security", "Future Tech"],
            10,
        ),
        post(
            "iot-security-challenges",
            "IoT Security: Challenges and Solutions",
            (2023, 12, 28),
            "The security landscape of connected devices and practical ways to harden them.",
            &["IoT", "Security", "Hardware", "Network Security"],
            6,
        ),
        post(
            "malware-analysis-techniques",
            "Advanced Malware Analysis Techniques",
            (2023, 12, 20),
            "Static and dynamic analysis methods for reverse engineering malicious software.",
            &["Malware Analysis", "Reverse Engineering", "Security Research"],
            15,
        ),
    ]
}

impl Config {
    /// Default config path under `root`.
    pub fn path_in(root: &Path) -> std::path::PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "falling back to default config");
                Self::default()
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// The boot-log script for `page`, with placeholders filled in.
    pub fn script(&self, page: Page) -> Script {
        let count = self.posts.len().to_string();
        self.boot_logs
            .get(page)
            .lines
            .iter()
            .map(|line| line.replace(POST_COUNT_PLACEHOLDER, &count))
            .collect()
    }

    /// Line interval for `page`.
    pub fn interval_ms(&self, page: Page) -> u64 {
        self.boot_logs.get(page).interval_ms
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            roles: default_roles(),
            boot_logs: BootLogs::default(),
            posts: default_posts(),
            hidden_message: default_hidden_message(),
            roi: RoiInputs::default(),
            search_threshold: default_search_threshold(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_payload;
    use crate::line::LineKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timing.typewriter.type_ms, 100);
        assert_eq!(config.timing.typewriter.hold_ms, 2000);
        assert_eq!(config.timing.typewriter.delete_ms, 50);
        assert_eq!(config.timing.blink_ms, 500);
        assert_eq!(config.interval_ms(Page::About), 100);
        assert_eq!(config.interval_ms(Page::Contact), 200);
        assert!(!config.roles.is_empty());
        assert!(decode_payload(&config.hidden_message).is_some());
    }

    #[test]
    fn test_default_content() {
        let config = Config::default();
        assert_eq!(config.roles.len(), 6);
        assert_eq!(config.roles[3], "Applied Machine Learning Engineer");
        assert_eq!(config.roles[5], "Tech Innovator");

        let message = decode_payload(&config.hidden_message).unwrap();
        assert!(message.starts_with("Hey there! If you're reading this, you found the Easter egg!"));
        assert!(message.ends_with("Keep exploring! :"));
    }

    #[test]
    fn test_blog_script_fills_post_count() {
        let config = Config::default();
        let script = config.script(Page::Blog);
        assert!(script.iter().any(|l| l.text() == "> Found 5 posts"));
    }

    #[test]
    fn test_script_lines_are_classified() {
        let config = Config::default();
        let script = config.script(Page::About);
        assert_eq!(script[0].kind(), LineKind::Prompt);
        assert!(script.iter().any(|l| l.kind() == LineKind::Status));
        assert!(script.iter().any(|l| l.kind() == LineKind::Metric));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"roles": ["engineer", "artist"], "timing": {"blink_ms": 250}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.roles, vec!["engineer", "artist"]);
        assert_eq!(config.timing.blink_ms, 250);
        assert_eq!(config.timing.typewriter, TypewriterTiming::default());
        assert_eq!(config.posts.len(), 5);
        assert_eq!(config.boot_logs, BootLogs::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_in(dir.path());

        let mut config = Config::default();
        config.roles = vec!["tester".into()];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.roles, vec!["tester"]);
        assert_eq!(loaded.posts, config.posts);
    }

    #[test]
    fn test_load_or_default_on_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        let config = Config::load_or_default(&path);
        assert_eq!(config.posts.len(), 5);
    }
}
