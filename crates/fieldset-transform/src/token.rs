//! Regex tokenizer for keyword, tag, and search-term strings

use crate::transform::{Transform, TransformResult};
use fieldset_core::value::display;
use fieldset_core::{Concern, Context, TransformOptions};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Applied to each token body after its prefix is removed
pub type Normalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Shape of native values when prefix groups are configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grouping {
    /// An object keyed by prefix, every configured group present
    #[default]
    Keyed,
    /// One array per configured group, in group order
    Positional,
    /// `[prefix, token]` pairs in input order; unprefixed tokens pair with null
    Flat,
}

/// Splits strings into tokens, honoring quotes and optional prefixes.
///
/// Tokens are separated by any of the `separators` characters. A token
/// wrapped in one of the `quotes` characters may contain separators. When
/// `groups` is non-empty each token is classified by its prefix; the empty
/// group collects unprefixed tokens and must be present for them to be
/// accepted.
#[derive(Clone)]
pub struct Token {
    options: TransformOptions,
    separators: String,
    quotes: Option<String>,
    groups: Vec<String>,
    grouping: Grouping,
    normalize: Option<Normalizer>,
    sort: bool,
    unique: bool,
    regex: OnceLock<Result<Regex, regex::Error>>,
}

impl Default for Token {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}

impl Token {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            separators: " \t".to_string(),
            quotes: Some("\"'".to_string()),
            groups: Vec::new(),
            grouping: Grouping::default(),
            normalize: None,
            sort: false,
            unique: false,
            regex: OnceLock::new(),
        }
    }

    /// Free-form tags: comma or whitespace separated, lowercased, unquoted, unique
    pub fn tags() -> Self {
        Self::default()
            .separators(" \t,")
            .normalize(|token| {
                token
                    .to_lowercase()
                    .trim_matches(|c| matches!(c, '"' | ' ' | '\t' | '\n'))
                    .to_string()
            })
            .unique(true)
    }

    /// Search terms with optional `+` (required) and `-` (excluded) prefixes
    pub fn terms() -> Self {
        Self::default().groups(["", "+", "-"])
    }

    pub fn separators(mut self, separators: impl Into<String>) -> Self {
        self.separators = separators.into();
        self.regex = OnceLock::new();
        self
    }

    /// Quote characters; `None` disables quoting entirely
    pub fn quotes(mut self, quotes: Option<&str>) -> Self {
        self.quotes = quotes.map(str::to_string);
        self.regex = OnceLock::new();
        self
    }

    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self.regex = OnceLock::new();
        self
    }

    pub fn grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn normalize<F>(mut self, normalize: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalize = Some(Arc::new(normalize));
        self
    }

    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// The tokenizing expression built from the separators, quotes, and groups
    pub fn pattern(&self) -> String {
        let separators: String = self
            .separators
            .chars()
            .map(|c| regex::escape(&c.to_string()))
            .collect();

        let mut alternatives: Vec<String> = self
            .quotes
            .as_deref()
            .unwrap_or_default()
            .chars()
            .map(|quote| {
                let quote = regex::escape(&quote.to_string());
                format!("{quote}[^{quote}]+{quote}")
            })
            .collect();
        alternatives.push(format!("[^{separators}]+"));
        let body = alternatives.join("|");

        let prefixes: Vec<String> = self
            .groups
            .iter()
            .filter(|group| !group.is_empty())
            .map(|group| regex::escape(group))
            .collect();

        let token = if prefixes.is_empty() {
            body
        } else {
            format!("(?:{})?(?:{})", prefixes.join("|"), body)
        };

        format!("[\\s{separators}]*({token})[{separators}]*")
    }

    /// The compiled expression, built on first use
    pub fn regex(&self) -> TransformResult<&Regex> {
        self.regex
            .get_or_init(|| Regex::new(&self.pattern()))
            .as_ref()
            .map_err(|error| Concern::new("Invalid token pattern: {0}").arg(error.to_string()))
    }

    /// Split `token` into its group prefix and body
    fn split_prefix<'a>(&'a self, token: &'a str) -> (&'a str, &'a str) {
        self.groups
            .iter()
            .filter(|group| {
                !group.is_empty() && token.len() > group.len() && token.starts_with(group.as_str())
            })
            .max_by_key(|group| group.len())
            .map_or(("", token), |group| (group.as_str(), &token[group.len()..]))
    }

    fn normalized(&self, token: &str) -> String {
        match &self.normalize {
            Some(normalize) => normalize(token),
            None => token.to_string(),
        }
    }

    /// Apply the `unique` and `sort` settings to one list of tokens
    fn arrange(&self, tokens: Vec<String>) -> Vec<String> {
        let mut tokens = if self.unique {
            let mut seen = HashSet::new();
            tokens.into_iter().filter(|token| seen.insert(token.clone())).collect()
        } else {
            tokens
        };

        if self.sort {
            tokens.sort();
        }

        tokens
    }

    /// Tokenize `text` into `(prefix, body)` pairs in input order
    fn tokenize(&self, text: &str) -> TransformResult<Vec<(String, String)>> {
        let regex = self.regex()?;
        let mut pairs = Vec::new();

        for captures in regex.captures_iter(text) {
            let Some(raw) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };

            let (prefix, body) = if self.groups.is_empty() {
                ("", raw)
            } else {
                self.split_prefix(raw)
            };

            let unprefixed = self.groups.iter().any(String::is_empty);
            if !self.groups.is_empty() && prefix.is_empty() && !unprefixed {
                return Err(Concern::new("Unprefixed token {0!r} is not permitted.").arg(raw));
            }

            let body = self.normalized(body);
            if !body.is_empty() {
                pairs.push((prefix.to_string(), body));
            }
        }

        Ok(pairs)
    }

    fn bucket(&self, pairs: &[(String, String)], group: &str) -> Vec<String> {
        let tokens = pairs
            .iter()
            .filter(|(prefix, _)| prefix == group)
            .map(|(_, token)| token.clone())
            .collect();
        self.arrange(tokens)
    }

    /// Quote a token that would otherwise be split apart
    fn sanitize(&self, token: &str) -> String {
        let Some(quote) = self.quotes.as_deref().and_then(|quotes| quotes.chars().next()) else {
            return token.to_string();
        };

        if token.chars().any(|c| self.separators.contains(c)) && !token.starts_with(quote) {
            format!("{quote}{token}{quote}")
        } else {
            token.to_string()
        }
    }

    fn join(&self, tokens: Vec<String>) -> String {
        let separator = self.separators.chars().next().unwrap_or(' ');
        tokens.join(&separator.to_string())
    }

    fn token_list(value: &Value) -> Vec<String> {
        match value {
            Value::Array(items) => items.iter().map(display).collect(),
            Value::Null => Vec::new(),
            other => vec![display(other)],
        }
    }

    fn foreign_keyed(&self, map: &Map<String, Value>) -> Vec<String> {
        let mut keys: Vec<&str> = self
            .groups
            .iter()
            .map(String::as_str)
            .filter(|group| map.contains_key(*group))
            .collect();
        keys.extend(
            map.keys()
                .map(String::as_str)
                .filter(|key| !self.groups.iter().any(|group| group.as_str() == *key)),
        );

        let mut rendered = Vec::new();
        for prefix in keys {
            let tokens = map.get(prefix).map(Self::token_list).unwrap_or_default();
            let tokens: Vec<String> = tokens.iter().map(|token| self.sanitize(token)).collect();
            let arranged = self.arrange(tokens);
            rendered.extend(arranged.into_iter().map(|token| format!("{prefix}{token}")));
        }
        rendered
    }

    fn foreign_list(&self, items: &[Value]) -> TransformResult<Vec<String>> {
        if self.groups.is_empty() || self.grouping == Grouping::Keyed {
            let tokens = items.iter().map(|item| self.sanitize(&display(item))).collect();
            return Ok(self.arrange(tokens));
        }

        match self.grouping {
            Grouping::Positional => {
                let mut rendered = Vec::new();
                for (group, tokens) in self.groups.iter().zip(items) {
                    let tokens = Self::token_list(tokens)
                        .iter()
                        .map(|token| self.sanitize(token))
                        .collect();
                    let arranged = self.arrange(tokens);
                    rendered.extend(arranged.into_iter().map(|token| format!("{group}{token}")));
                }
                Ok(rendered)
            }
            _ => items
                .iter()
                .map(|pair| match pair.as_array().map(Vec::as_slice) {
                    Some([prefix, token]) => {
                        let prefix = prefix.as_str().unwrap_or_default();
                        Ok(format!("{prefix}{}", self.sanitize(&display(token))))
                    }
                    _ => Err(Concern::new("Flat grouped values must be [prefix, token] pairs.")),
                })
                .collect(),
        }
    }
}

impl Transform for Token {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        let text = match value {
            Value::Null => return Ok(Value::Null),
            Value::String(text) => text,
            other => {
                let message = "Unable to tokenize {0!r}; expected a string.";
                return Err(Concern::new(message).arg(other));
            }
        };

        let pairs = self.tokenize(self.options.clean(&text))?;

        if self.groups.is_empty() {
            let tokens = self.arrange(pairs.into_iter().map(|(_, token)| token).collect());
            return Ok(Value::from(tokens));
        }

        Ok(match self.grouping {
            Grouping::Keyed => Value::Object(
                self.groups
                    .iter()
                    .map(|group| (group.clone(), Value::from(self.bucket(&pairs, group))))
                    .collect(),
            ),
            Grouping::Positional => Value::Array(
                self.groups
                    .iter()
                    .map(|group| Value::from(self.bucket(&pairs, group)))
                    .collect(),
            ),
            Grouping::Flat => {
                let mut pairs = pairs;
                if self.unique {
                    let mut seen = HashSet::new();
                    pairs.retain(|pair| seen.insert(pair.clone()));
                }
                if self.sort {
                    pairs.sort_by(|a, b| a.1.cmp(&b.1));
                }
                Value::Array(
                    pairs
                        .into_iter()
                        .map(|(prefix, token)| {
                            let prefix = if prefix.is_empty() {
                                Value::Null
                            } else {
                                Value::String(prefix)
                            };
                            Value::Array(vec![prefix, Value::String(token)])
                        })
                        .collect(),
                )
            }
        })
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        let rendered = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Object(map) if self.grouping == Grouping::Keyed => self.foreign_keyed(map),
            Value::Object(_) => {
                return Err(Concern::new("Only keyed groupings accept a mapping of tokens."));
            }
            Value::Array(items) => self.foreign_list(items)?,
            _ if self.grouping == Grouping::Keyed && !self.groups.is_empty() => {
                return Err(Concern::new("Grouped values must be passed as a mapping or an array."));
            }
            _ => return Err(Concern::new("Ungrouped values must be passed as an array.")),
        };

        Ok(Value::String(self.join(rendered)))
    }

    fn options(&self) -> &TransformOptions {
        &self.options
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("options", &self.options)
            .field("separators", &self.separators)
            .field("quotes", &self.quotes)
            .field("groups", &self.groups)
            .field("grouping", &self.grouping)
            .field("normalize", &self.normalize.is_some())
            .field("sort", &self.sort)
            .field("unique", &self.unique)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_pattern() {
        assert_eq!(Token::tags().pattern(), "[\\s \t,]*(\"[^\"]+\"|'[^']+'|[^ \t,]+)[ \t,]*");
    }

    #[test]
    fn test_term_pattern() {
        assert_eq!(
            Token::terms().pattern(),
            "[\\s \t]*((?:\\+|\\-)?(?:\"[^\"]+\"|'[^']+'|[^ \t]+))[ \t]*"
        );
    }

    #[test]
    fn test_pattern_cache_resets_on_change() {
        let token = Token::default();
        assert!(token.regex().unwrap().is_match("foo"));

        let token = token.separators(",");
        assert_eq!(token.regex().unwrap().as_str(), token.pattern());
    }

    #[test]
    fn test_tags_native() {
        let tags = Token::tags();
        assert_eq!(tags.native(Value::Null, None).unwrap(), Value::Null);
        assert_eq!(tags.native(json!(""), None).unwrap(), json!([]));
        assert_eq!(
            tags.native(json!("high altitude melting pandas"), None).unwrap(),
            json!(["high", "altitude", "melting", "pandas"])
        );
        assert_eq!(
            tags.native(json!("\"high altitude\" \"melting panda\""), None).unwrap(),
            json!(["high altitude", "melting panda"])
        );
        assert_eq!(
            tags.native(json!("Melting PANDAS"), None).unwrap(),
            json!(["melting", "pandas"])
        );
        assert_eq!(tags.native(json!("rust, Rust,cargo"), None).unwrap(), json!(["rust", "cargo"]));
    }

    #[test]
    fn test_tags_foreign() {
        let tags = Token::tags();
        assert_eq!(tags.foreign(Value::Null, None).unwrap(), Value::Null);
        assert_eq!(
            tags.foreign(json!(["high", "altitude"]), None).unwrap(),
            json!("high altitude")
        );
        assert_eq!(
            tags.foreign(json!(["high", "altitude", "melting pandas"]), None).unwrap(),
            json!("high altitude \"melting pandas\"")
        );
        assert!(tags.foreign(json!(""), None).is_err());
    }

    #[test]
    fn test_terms_native() {
        let terms = Token::terms();
        assert_eq!(
            terms.native(json!("animals +cat -dog +\"medical treatment\""), None).unwrap(),
            json!({
                "": ["animals"],
                "+": ["cat", "\"medical treatment\""],
                "-": ["dog"],
            })
        );
    }

    #[test]
    fn test_positional_grouping() {
        let token = Token::terms().grouping(Grouping::Positional);
        assert_eq!(
            token.native(json!("animal medicine +cat +\"kitty death\""), None).unwrap(),
            json!([["animal", "medicine"], ["cat", "\"kitty death\""], []])
        );
    }

    #[test]
    fn test_flat_grouping() {
        let token = Token::terms().grouping(Grouping::Flat);
        assert_eq!(
            token.native(json!("cat dog -leather"), None).unwrap(),
            json!([[null, "cat"], [null, "dog"], ["-", "leather"]])
        );
        assert_eq!(
            token.foreign(json!([[null, "cat"], ["-", "leather"]]), None).unwrap(),
            json!("cat -leather")
        );
        assert!(token.foreign(json!(["cat"]), None).is_err());
    }

    #[test]
    fn test_unprefixed_tokens_require_empty_group() {
        let token = Token::default().groups(["+", "-"]);
        assert!(token.native(json!("+cat"), None).is_ok());

        let concern = token.native(json!("+cat dog"), None).unwrap_err();
        assert_eq!(concern.render(), "Unprefixed token 'dog' is not permitted.");
    }

    #[test]
    fn test_sorted() {
        let token = Token::default()
            .separators(" \t,")
            .normalize(|s| s.to_lowercase().trim_matches('"').to_string())
            .sort(true);
        assert_eq!(token.native(json!("foo bar baz"), None).unwrap(), json!(["bar", "baz", "foo"]));
    }

    #[test]
    fn test_no_quotes() {
        let token = Token::default().quotes(None);
        assert_eq!(
            token.foreign(json!(["foo", "bar", "baz diz"]), None).unwrap(),
            json!("foo bar baz diz")
        );
    }

    #[test]
    fn test_keyed_foreign() {
        let token = Token::default().sort(true);
        assert_eq!(
            token.foreign(json!({"+": ["foo", "bar"], "-": ["baz"]}), None).unwrap(),
            json!("+bar +foo -baz")
        );
        assert!(token.foreign(json!("foo"), None).is_err());

        let terms = Token::terms();
        assert_eq!(
            terms
                .foreign(json!({"-": ["dog"], "": ["animals"], "+": ["medical treatment"]}), None)
                .unwrap(),
            json!("animals +\"medical treatment\" -dog")
        );
    }

    #[test]
    fn test_terms_round_trip() {
        let terms = Token::terms();
        let native = terms.native(json!("animals +cat -dog"), None).unwrap();
        assert_eq!(terms.foreign(native, None).unwrap(), json!("animals +cat -dog"));
    }
}
