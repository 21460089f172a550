//! Typo-tolerant search over a static list of blog posts.
//!
//! Searchable fields are the title, the excerpt and every tag. A query
//! is matched in two passes:
//!
//! 1. nucleo fuzzy matching, where every word of the query must appear
//!    in one field as an in-order subsequence. These hits rank first,
//!    best score first.
//! 2. For posts the first pass rejects, the approximate substring
//!    distance: the fewest single-character edits that turn the query
//!    into *some* substring of a field, divided by the query length.
//!    Posts at or under the threshold match. This is what lets
//!    transposed letters such as `netwroks` through.
//!
//! An exact substring always matches.

use chrono::NaiveDate;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config as MatcherConfig, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Default typo threshold: up to 30% of the query may be edited.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// A blog post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reading_time: String,
    #[serde(default)]
    pub featured: bool,
}

impl Post {
    /// Title, excerpt and tags, in that order.
    fn searchable(&self) -> impl Iterator<Item = &str> {
        [self.title.as_str(), self.excerpt.as_str()]
            .into_iter()
            .chain(self.tags.iter().map(String::as_str))
    }
}

/// How a post matched the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rank {
    /// Blank query; every post is listed.
    Listed,
    /// nucleo score of the best field. Higher is better.
    Fuzzy(u32),
    /// Normalised substring distance of the best field. Lower is better.
    Typo(f64),
}

impl Rank {
    /// Orders better matches first: fuzzy before typo, then by score.
    pub fn relevance_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Fuzzy(a), Self::Fuzzy(b)) => b.cmp(a),
            (Self::Typo(a), Self::Typo(b)) => a.total_cmp(b),
            (Self::Fuzzy(_), Self::Typo(_)) => Ordering::Less,
            (Self::Typo(_), Self::Fuzzy(_)) => Ordering::Greater,
            (Self::Listed, _) | (_, Self::Listed) => Ordering::Equal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Listed => "listed",
            Self::Fuzzy(_) => "fuzzy",
            Self::Typo(_) => "typo",
        }
    }

    /// The raw score as a number, `0.0` for a listed post.
    pub fn value(self) -> f64 {
        match self {
            Self::Listed => 0.0,
            Self::Fuzzy(score) => f64::from(score),
            Self::Typo(distance) => distance,
        }
    }
}

/// A search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    pub post: &'a Post,
    pub rank: Rank,
}

/// Lower-cased searchable fields of one post, for the typo pass.
#[derive(Debug)]
struct Fields {
    fields: Vec<Vec<char>>,
}

impl Fields {
    fn of(post: &Post) -> Self {
        Self {
            fields: post.searchable().map(lower_chars).collect(),
        }
    }
}

fn lower_chars(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Read-only search index. Posts are kept newest first.
#[derive(Debug)]
pub struct SearchIndex {
    posts: Vec<Post>,
    fields: Vec<Fields>,
    threshold: f64,
}

impl SearchIndex {
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        let fields = posts.iter().map(Fields::of).collect();
        Self {
            posts,
            fields,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the typo threshold (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Every tag, in first-seen order.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Posts matching `query`, best first, restricted to `tag` if given.
    pub fn search(&self, query: &str, tag: Option<&str>) -> Vec<&Post> {
        self.hits(query, tag).into_iter().map(|h| h.post).collect()
    }

    /// Like [`SearchIndex::search`] but keeps how each post matched.
    ///
    /// A blank query lists every post in index order. The tag filter is
    /// exact and case-sensitive.
    pub fn hits(&self, query: &str, tag: Option<&str>) -> Vec<Hit<'_>> {
        let query = query.trim();
        let candidates = self
            .posts
            .iter()
            .zip(&self.fields)
            .filter(|(post, _)| tag.map_or(true, |tag| post.tags.iter().any(|t| t == tag)));

        if query.is_empty() {
            return candidates
                .map(|(post, _)| Hit {
                    post,
                    rank: Rank::Listed,
                })
                .collect();
        }

        let mut matcher = Matcher::new(MatcherConfig::DEFAULT);
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let typo_pattern = lower_chars(query);
        let mut buf = Vec::new();

        let mut hits: Vec<Hit<'_>> = candidates
            .filter_map(|(post, fields)| {
                let fuzzy = post
                    .searchable()
                    .filter_map(|text| pattern.score(Utf32Str::new(text, &mut buf), &mut matcher))
                    .max();
                let rank = match fuzzy {
                    Some(score) => Rank::Fuzzy(score),
                    None => {
                        let distance = typo_score(&typo_pattern, fields)?;
                        if distance > self.threshold {
                            return None;
                        }
                        Rank::Typo(distance)
                    }
                };
                Some(Hit { post, rank })
            })
            .collect();
        // Stable: equal ranks keep index order.
        hits.sort_by(|a, b| a.rank.relevance_cmp(&b.rank));
        hits
    }
}

#[allow(clippy::cast_precision_loss)]
fn typo_score(pattern: &[char], fields: &Fields) -> Option<f64> {
    let len = pattern.len() as f64;
    fields
        .fields
        .iter()
        .map(|text| substring_distance(pattern, text) as f64 / len)
        .min_by(f64::total_cmp)
}

/// Fewest edits turning `pattern` into any substring of `text`.
///
/// Column-wise edit distance where a match may start at any text
/// position for free.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut col: Vec<usize> = (0..=m).collect();
    let mut best = col[m];
    for &tc in text {
        let mut diag = col[0];
        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != tc);
            let next = (diag + cost).min(col[i] + 1).min(col[i - 1] + 1);
            diag = col[i];
            col[i] = next;
        }
        best = best.min(col[m]);
        if best == 0 {
            break;
        }
    }
    best
}
