//! Sentiment lexicon for classroom feedback
//!
//! Each word carries a polarity in [-1, 1] and a subjectivity in [0, 1].
//! Intensifiers scale the next sentiment word, negations flip it.

use std::collections::{HashMap, HashSet};

/// Scores attached to a lexicon word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Word-level sentiment lexicon
#[derive(Debug, Clone)]
pub struct FeedbackLexicon {
    words: HashMap<String, LexiconEntry>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for FeedbackLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackLexicon {
    /// Create a lexicon with the built-in vocabulary
    pub fn new() -> Self {
        let mut words = HashMap::new();

        // (word, polarity, subjectivity)
        let positive_words = [
            ("excellent", 1.0, 1.0),
            ("outstanding", 0.9, 0.9),
            ("amazing", 0.8, 0.9),
            ("awesome", 0.8, 0.9),
            ("fantastic", 0.8, 0.9),
            ("wonderful", 0.8, 0.9),
            ("best", 0.9, 0.3),
            ("great", 0.8, 0.75),
            ("love", 0.6, 0.6),
            ("loved", 0.6, 0.6),
            ("enjoy", 0.5, 0.6),
            ("enjoyed", 0.5, 0.6),
            ("enjoyable", 0.5, 0.6),
            ("fun", 0.3, 0.2),
            ("good", 0.7, 0.6),
            ("nice", 0.6, 1.0),
            ("helpful", 0.6, 0.5),
            ("useful", 0.5, 0.3),
            ("valuable", 0.5, 0.4),
            ("effective", 0.6, 0.6),
            ("clear", 0.4, 0.4),
            ("engaging", 0.5, 0.6),
            ("interesting", 0.5, 0.5),
            ("informative", 0.4, 0.4),
            ("interactive", 0.3, 0.3),
            ("inspiring", 0.6, 0.7),
            ("motivating", 0.5, 0.6),
            ("supportive", 0.5, 0.5),
            ("friendly", 0.4, 0.5),
            ("patient", 0.4, 0.5),
            ("organized", 0.3, 0.3),
            ("responsive", 0.4, 0.4),
            ("accessible", 0.3, 0.3),
            ("reliable", 0.4, 0.4),
            ("convenient", 0.4, 0.4),
            ("flexible", 0.3, 0.3),
            ("comfortable", 0.4, 0.6),
            ("easy", 0.4, 0.8),
            ("smooth", 0.4, 0.6),
            ("timely", 0.3, 0.3),
            ("better", 0.5, 0.5),
            ("improved", 0.4, 0.4),
            ("happy", 0.8, 1.0),
            ("satisfied", 0.5, 0.5),
            ("positive", 0.3, 0.5),
            ("appreciate", 0.5, 0.5),
            ("thanks", 0.4, 0.3),
            ("thank", 0.4, 0.3),
            ("recommend", 0.4, 0.4),
            ("well", 0.2, 0.2),
        ];

        let negative_words = [
            ("terrible", -1.0, 1.0),
            ("awful", -1.0, 1.0),
            ("horrible", -1.0, 1.0),
            ("worst", -1.0, 1.0),
            ("useless", -0.8, 0.6),
            ("hate", -0.8, 0.9),
            ("hated", -0.8, 0.9),
            ("bad", -0.7, 0.7),
            ("poor", -0.5, 0.6),
            ("worse", -0.5, 0.6),
            ("boring", -0.6, 1.0),
            ("frustrating", -0.6, 0.8),
            ("frustrated", -0.6, 0.8),
            ("disappointing", -0.6, 0.7),
            ("disappointed", -0.6, 0.7),
            ("annoying", -0.6, 0.8),
            ("stressful", -0.5, 0.6),
            ("stressed", -0.5, 0.6),
            ("overwhelming", -0.4, 0.6),
            ("overwhelmed", -0.4, 0.6),
            ("confusing", -0.4, 0.6),
            ("confused", -0.4, 0.6),
            ("unclear", -0.4, 0.5),
            ("unhelpful", -0.5, 0.5),
            ("unreliable", -0.5, 0.5),
            ("unfair", -0.5, 0.6),
            ("unhappy", -0.6, 0.9),
            ("sad", -0.5, 1.0),
            ("rude", -0.6, 0.7),
            ("lonely", -0.4, 0.6),
            ("isolated", -0.3, 0.4),
            ("difficult", -0.4, 0.8),
            ("hard", -0.2, 0.5),
            ("slow", -0.3, 0.4),
            ("late", -0.3, 0.6),
            ("laggy", -0.4, 0.4),
            ("broken", -0.4, 0.4),
            ("distracting", -0.3, 0.4),
            ("distracted", -0.3, 0.4),
            ("noisy", -0.3, 0.4),
            ("tired", -0.4, 0.7),
            ("problem", -0.3, 0.3),
            ("problems", -0.3, 0.3),
            ("issue", -0.2, 0.2),
            ("issues", -0.2, 0.2),
            ("lack", -0.3, 0.3),
            ("lacking", -0.3, 0.3),
            ("waste", -0.5, 0.5),
            ("failed", -0.5, 0.4),
            ("negative", -0.3, 0.4),
        ];

        for (word, polarity, subjectivity) in positive_words.iter().chain(negative_words.iter()) {
            words.insert(
                word.to_string(),
                LexiconEntry {
                    polarity: *polarity,
                    subjectivity: *subjectivity,
                },
            );
        }

        let negations = [
            "not", "no", "never", "neither", "nor", "nothing", "none", "nobody", "cannot",
            "cant", "dont", "doesnt", "didnt", "isnt", "arent", "wasnt", "werent", "wont",
            "wouldnt", "shouldnt", "couldnt", "hardly", "barely", "without",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let mut intensifiers = HashMap::new();
        intensifiers.insert("very".to_string(), 1.3);
        intensifiers.insert("really".to_string(), 1.3);
        intensifiers.insert("so".to_string(), 1.2);
        intensifiers.insert("too".to_string(), 1.2);
        intensifiers.insert("super".to_string(), 1.3);
        intensifiers.insert("highly".to_string(), 1.3);
        intensifiers.insert("extremely".to_string(), 1.5);
        intensifiers.insert("incredibly".to_string(), 1.5);
        intensifiers.insert("absolutely".to_string(), 1.5);
        intensifiers.insert("totally".to_string(), 1.4);
        intensifiers.insert("quite".to_string(), 1.1);
        intensifiers.insert("fairly".to_string(), 0.9);
        intensifiers.insert("rather".to_string(), 0.9);
        intensifiers.insert("somewhat".to_string(), 0.7);
        intensifiers.insert("slightly".to_string(), 0.5);

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Scores for a word, if it is in the lexicon
    pub fn get_entry(&self, word: &str) -> Option<LexiconEntry> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Check if a word is a negation
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word.to_lowercase())
    }

    /// Get intensifier multiplier
    pub fn get_intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(&word.to_lowercase()).copied()
    }

    /// Add or replace a word
    pub fn add_word(&mut self, word: &str, polarity: f64, subjectivity: f64) {
        self.words.insert(
            word.to_lowercase(),
            LexiconEntry {
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: subjectivity.clamp(0.0, 1.0),
            },
        );
    }

    /// Number of scored words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
