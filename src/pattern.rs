use super::*;

#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    source: String,
    backend: fancy_regex::Regex,
}

impl Pattern {
    pub(crate) fn new(pattern: &str) -> Result<Self> {
        PatternBuilder::new(pattern).build()
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    // A value the backend cannot decide (backtrack limit) counts as no match.
    pub(crate) fn is_match(&self, input: &str) -> bool {
        self.backend.is_match(input).unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PatternBuilder {
    pattern: String,
    case_insensitive: bool,
}

impl PatternBuilder {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            case_insensitive: false,
        }
    }

    pub(crate) fn case_insensitive(&mut self, enabled: bool) -> &mut Self {
        self.case_insensitive = enabled;
        self
    }

    pub(crate) fn build(&self) -> Result<Pattern> {
        let mut builder = fancy_regex::RegexBuilder::new(&self.pattern);
        builder.case_insensitive(self.case_insensitive);
        let backend = builder.build().map_err(|err| Error::Pattern {
            pattern: self.pattern.clone(),
            message: err.to_string(),
        })?;
        Ok(Pattern {
            source: self.pattern.clone(),
            backend,
        })
    }
}
