use thiserror::Error;

/// Convenient result alias for the Wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a place name could not be found in the waymap.
    #[error("unknown place name: {name}{}", format_suggestions(.suggestions))]
    UnknownPlace {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two places.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when an edge carries a negative weight. The cheapest-route
    /// search assumes non-negative costs, so these are rejected at build time.
    #[error("negative {field} weight {value} on edge {start} -> {end}")]
    NegativeWeight {
        start: String,
        end: String,
        field: &'static str,
        value: f64,
    },

    /// Raised when a map file could not be parsed as a list of edge records.
    #[error("failed to parse map file: {0}")]
    MapParse(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
