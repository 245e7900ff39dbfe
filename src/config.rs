use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// What the CLI writes to stdout.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Block HTML only
    Html,
    /// Block HTML inside a comment card
    #[default]
    Comment,
    /// Rendered blocks as JSON
    Json,
}

impl OutputFormat {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Comment => "comment",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub escape: bool,
    pub no_tags: bool,
    pub perf: bool,
    pub format: Option<OutputFormat>,
    pub markup: Option<PathBuf>,
    pub author: Option<String>,
    pub avatar: Option<String>,
    pub date: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            escape: self.escape || other.escape,
            no_tags: self.no_tags || other.no_tags,
            perf: self.perf || other.perf,
            format: other.format.or(self.format),
            markup: other.markup.clone().or_else(|| self.markup.clone()),
            author: other.author.clone().or_else(|| self.author.clone()),
            avatar: other.avatar.clone().or_else(|| self.avatar.clone()),
            date: other.date.clone().or_else(|| self.date.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("commentmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("commentmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("commentmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("commentmark")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".commentmarkrc")
}

/// Flags whose value in a config file is the rest of the line, spaces included.
const LINE_VALUE_FLAGS: &[&str] = &["--markup", "--author", "--avatar", "--date", "--debug-log"];

fn line_tokens(line: &str) -> Vec<String> {
    let name = line
        .split(|c: char| c == '=' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    if LINE_VALUE_FLAGS.contains(&name) && line.len() > name.len() {
        // Skip the `=` or whitespace separating the flag from its value.
        let mut rest = line[name.len()..].chars();
        rest.next();
        let value = rest.as_str().trim();
        return vec![format!("{name}={value}")];
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# commentmark defaults (saved with --save)".to_string()];
    if flags.escape {
        lines.push("--escape".to_string());
    }
    if flags.no_tags {
        lines.push("--no-tags".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(format) = flags.format {
        lines.push(format!("--format {}", format.as_str()));
    }
    if let Some(markup) = &flags.markup {
        lines.push(format!("--markup {}", markup.display()));
    }
    if let Some(author) = &flags.author {
        lines.push(format!("--author {author}"));
    }
    if let Some(avatar) = &flags.avatar {
        lines.push(format!("--avatar {avatar}"));
    }
    if let Some(date) = &flags.date {
        lines.push(format!("--date {date}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from command-line style tokens.
///
/// Unknown tokens are skipped. Values are given as `--flag value` or
/// `--flag=value`; `--author` and `--date` also collect the following words
/// up to the next `--` flag.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--format" | "--markup" | "--author" | "--avatar" | "--date" | "--debug-log"
        );
        let value = if !takes_value {
            None
        } else if matches!(name, "--author" | "--date") {
            let trailing: Vec<&str> = tokens[i + 1..]
                .iter()
                .take_while(|t| !t.starts_with("--"))
                .map(String::as_str)
                .collect();
            i += trailing.len();
            let words: Vec<&str> = inline_value.as_deref().into_iter().chain(trailing).collect();
            (!words.is_empty()).then(|| words.join(" "))
        } else if inline_value.is_some() {
            inline_value
        } else {
            let next = tokens.get(i + 1).cloned();
            if next.is_some() {
                i += 1;
            }
            next
        };

        match name {
            "--escape" => flags.escape = true,
            "--no-tags" => flags.no_tags = true,
            "--perf" => flags.perf = true,
            "--format" => flags.format = value.as_deref().and_then(parse_format),
            "--markup" => flags.markup = value.map(PathBuf::from),
            "--author" => flags.author = value,
            "--avatar" => flags.avatar = value,
            "--date" => flags.date = value,
            "--debug-log" => flags.debug_log = value.map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s {
        "html" => Some(OutputFormat::Html),
        "comment" => Some(OutputFormat::Comment),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "commentmark",
            "--escape",
            "--no-tags",
            "--format",
            "json",
            "--markup=tags.json",
            "--debug-log",
            "serialize.log",
            "comment.json",
        ]);
        let flags = parse_flag_tokens(&args);
        assert!(flags.escape);
        assert!(flags.no_tags);
        assert!(!flags.perf);
        assert_eq!(flags.format, Some(OutputFormat::Json));
        assert_eq!(flags.markup, Some(PathBuf::from("tags.json")));
        assert_eq!(flags.debug_log, Some(PathBuf::from("serialize.log")));
    }

    #[test]
    fn test_parse_flag_tokens_collects_multi_word_values() {
        let args = tokens(&["--date", "MARCH", "7,", "2016", "--author", "Riccardo", "--perf"]);
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.date.as_deref(), Some("MARCH 7, 2016"));
        assert_eq!(flags.author.as_deref(), Some("Riccardo"));
        assert!(flags.perf);
    }

    #[test]
    fn test_parse_flag_tokens_ignores_unknown_format() {
        let flags = parse_flag_tokens(&tokens(&["--format", "pdf"]));
        assert_eq!(flags.format, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            escape: true,
            format: Some(OutputFormat::Html),
            author: Some("file".to_string()),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_tags: true,
            format: Some(OutputFormat::Json),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.escape);
        assert!(merged.no_tags);
        assert_eq!(merged.format, Some(OutputFormat::Json));
        assert_eq!(merged.author.as_deref(), Some("file"));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".commentmarkrc");
        let flags = ConfigFlags {
            escape: true,
            no_tags: true,
            perf: true,
            format: Some(OutputFormat::Html),
            markup: Some(PathBuf::from("markup.json")),
            author: Some("Ada Lovelace".to_string()),
            avatar: Some("//example.com/ada.png".to_string()),
            date: Some("MARCH 7, 2016".to_string()),
            debug_log: Some(PathBuf::from("serialize.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_save_load_keeps_values_with_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".commentmarkrc");
        let flags = ConfigFlags {
            format: Some(OutputFormat::Json),
            markup: Some(PathBuf::from("/tmp/my tables/markup.json")),
            author: Some("Jean --Luc".to_string()),
            avatar: Some("//example.com/my avatar.png".to_string()),
            debug_log: Some(PathBuf::from("logs dir/serialize.log")),
            ..ConfigFlags::default()
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_load_reads_equals_form_with_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".commentmarkrc");
        std::fs::write(&path, "--markup=/tmp/my tables/m.json\n--escape --no-tags\n").unwrap();

        let flags = load_config_flags(&path).unwrap();
        assert_eq!(flags.markup, Some(PathBuf::from("/tmp/my tables/m.json")));
        assert!(flags.escape);
        assert!(flags.no_tags);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
