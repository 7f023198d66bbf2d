use crate::env::SearchPath;

pub const DEFAULT_PROMPT: &str = "wish> ";
pub const DEFAULT_PATH: &[&str] = &["/bin"];

/// Startup settings for an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Written before every read in interactive mode.
    pub prompt: String,
    /// Search path in effect until the first `path` command.
    pub initial_path: Vec<String>,
}

impl Config {
    pub fn search_path(&self) -> SearchPath {
        SearchPath::new(&self.initial_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            initial_path: DEFAULT_PATH.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dir_names;

    #[test]
    fn default_searches_bin_only() {
        let config = Config::default();
        assert_eq!(config.prompt, "wish> ");
        assert_eq!(dir_names(&config.search_path()), ["/bin"]);
    }
}
