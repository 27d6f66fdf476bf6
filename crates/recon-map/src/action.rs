//! Keyword-based action classification.

use recon_model::{Action, MatchOptions};
use tracing::trace;

use crate::fuzzy::{extract_one, ratio};

/// Words signalling a decrease.
pub const RESTAR_KEYWORDS: &[&str] = &[
    "descontar",
    "quitar",
    "restar",
    "devolver",
    "mermar",
    "error",
    "bajar",
    "sacar",
    "descantar",
    "descuenten",
    "diferencia",
    "anular",
];

/// Words signalling an increase.
pub const SUMAR_KEYWORDS: &[&str] = &[
    "agregar",
    "adicionar",
    "sumar",
    "aumentar",
    "ingresar",
    "reposicion",
    "boni",
    "extra",
    "mas",
];

/// Keyword sets in evaluation order. For a token that scores equally on both
/// sets, the later set wins.
const KEYWORD_SETS: [(Action, &[&str]); 2] =
    [(Action::Restar, RESTAR_KEYWORDS), (Action::Sumar, SUMAR_KEYWORDS)];

/// The token that decided the classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvidence {
    pub action: Action,
    pub token: String,
    pub keyword: &'static str,
    pub score: f64,
}

/// Scores residual comment words against the keyword sets.
#[derive(Debug, Clone, Copy)]
pub struct ActionClassifier {
    threshold: f64,
    min_token_len: usize,
}

impl Default for ActionClassifier {
    fn default() -> Self {
        Self::new(&MatchOptions::default())
    }
}

impl ActionClassifier {
    pub fn new(options: &MatchOptions) -> Self {
        Self {
            threshold: options.action_threshold,
            min_token_len: options.min_token_len,
        }
    }

    pub fn classify(&self, text: &str) -> Action {
        self.evidence(text)
            .map(|evidence| evidence.action)
            .unwrap_or(Action::Neutro)
    }

    /// Scan tokens left to right. A candidate becomes the winner when its score
    /// is above the threshold and at least the best score so far, so later
    /// tokens win ties.
    pub fn evidence(&self, text: &str) -> Option<ActionEvidence> {
        let mut best_score = 0.0_f64;
        let mut winner: Option<ActionEvidence> = None;

        for token in text.split_whitespace() {
            if token.chars().count() < self.min_token_len {
                continue;
            }
            for (action, keywords) in KEYWORD_SETS {
                let Some(best) = extract_one(token, keywords, ratio) else {
                    continue;
                };
                if best.score > self.threshold && best.score >= best_score {
                    trace!(%action, keyword = best.choice, score = best.score, "action candidate");
                    best_score = best.score;
                    winner = Some(ActionEvidence {
                        action,
                        token: token.to_string(),
                        keyword: keywords[best.index],
                        score: best.score,
                    });
                }
            }
        }
        winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_without_keywords() {
        let classifier = ActionClassifier::default();
        assert_eq!(classifier.classify("pedido normal de la tienda"), Action::Neutro);
        assert_eq!(classifier.classify(""), Action::Neutro);
    }

    #[test]
    fn exact_keywords() {
        let classifier = ActionClassifier::default();
        assert_eq!(classifier.classify("favor descontar 10"), Action::Restar);
        assert_eq!(classifier.classify("agregar 5 cajas"), Action::Sumar);
    }

    #[test]
    fn tolerates_typos() {
        let classifier = ActionClassifier::default();
        // "descontr" vs "descontar": 2 * 8 / 17
        assert_eq!(classifier.classify("descontr 4"), Action::Restar);
    }

    #[test]
    fn rightmost_tie_wins() {
        let classifier = ActionClassifier::default();
        let evidence = classifier
            .evidence("agregar 20 extra luego error 10")
            .unwrap();
        assert_eq!(evidence.action, Action::Restar);
        assert_eq!(evidence.token, "error");
        assert_eq!(evidence.keyword, "error");
    }

    #[test]
    fn weaker_later_match_does_not_override() {
        let classifier = ActionClassifier::default();
        // "descontr" scores ~94 for RESTAR, below the exact SUMAR hit before it.
        assert_eq!(classifier.classify("agregar descontr"), Action::Sumar);
    }

    #[test]
    fn short_tokens_are_ignored() {
        let classifier = ActionClassifier::default();
        let options = MatchOptions {
            min_token_len: 4,
            ..MatchOptions::default()
        };
        assert_eq!(classifier.classify("mas"), Action::Sumar);
        assert_eq!(ActionClassifier::new(&options).classify("mas"), Action::Neutro);
    }
}
