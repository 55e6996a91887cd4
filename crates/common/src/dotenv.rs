//! Read-only `.env` support for configuration values.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed `.env` file.
#[derive(Debug, Clone, Default)]
pub struct DotenvFile {
    path: PathBuf,
    vars: HashMap<String, String>,
}

impl DotenvFile {
    /// Read a dotenv file. A missing file yields an empty set of variables.
    pub fn read(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                vars: HashMap::new(),
            });
        }

        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read dotenv file {}: {err}", path.display()))?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, String> {
        let mut seen_keys = HashSet::new();
        let mut vars = HashMap::new();

        for (index, line) in contents.lines().enumerate() {
            let parsed = parse_line(line).map_err(|err| {
                format!(
                    "Failed to parse dotenv file {} at line {}: {err}",
                    path.display(),
                    index + 1
                )
            })?;

            if let Some((key, value)) = parsed {
                if !seen_keys.insert(key.clone()) {
                    return Err(format!(
                        "Duplicate variable '{key}' in dotenv file {}",
                        path.display()
                    ));
                }
                vars.insert(key, value);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            vars,
        })
    }

    /// Path the variables were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value of a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// All variables.
    pub fn get_vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

/// Parse one line into `Some((key, value))`, or `None` for blank and comment lines.
fn parse_line(line: &str) -> Result<Option<(String, String)>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (export_stripped, has_export) = if let Some(stripped) = trimmed.strip_prefix("export ") {
        (stripped, true)
    } else {
        (trimmed, false)
    };

    let eq_index = export_stripped.find('=').ok_or_else(|| {
        if has_export {
            "Invalid dotenv line after export prefix".to_string()
        } else {
            "Invalid dotenv line, missing '='".to_string()
        }
    })?;

    if eq_index == 0 {
        return Err("Invalid dotenv line, missing key".to_string());
    }

    let before = export_stripped[..eq_index].chars().last();
    let after = export_stripped[eq_index + 1..].chars().next();
    if before.is_some_and(char::is_whitespace) || after.is_some_and(char::is_whitespace) {
        return Err("Whitespace around '=' is not allowed".to_string());
    }

    let key = &export_stripped[..eq_index];
    if !is_valid_key(key) {
        return Err(format!("Invalid dotenv variable name '{key}'"));
    }

    let mut value = export_stripped[eq_index + 1..].to_string();
    let quote = value.chars().next().filter(|ch| *ch == '"' || *ch == '\'');
    if let Some(quote) = quote {
        if !value.ends_with(quote) || value.len() == 1 {
            return Err("Invalid quoted value".to_string());
        }
        value = value[1..value.len() - 1].to_string();
    }

    Ok(Some((key.to_string(), value)))
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(contents: &str) -> Result<DotenvFile, String> {
        DotenvFile::parse(Path::new(".env"), contents)
    }

    #[test]
    fn test_parse_variants() {
        let dotenv = parse(
            "# comment\n\nAADGRAPH_CLIENT_ID=abc\nexport AADGRAPH_TENANT=\"contoso.com\"\nAADGRAPH_CLIENT_SECRET='s3cr=t'\n",
        )
        .unwrap();
        assert_eq!(dotenv.get("AADGRAPH_CLIENT_ID"), Some("abc"));
        assert_eq!(dotenv.get("AADGRAPH_TENANT"), Some("contoso.com"));
        assert_eq!(dotenv.get("AADGRAPH_CLIENT_SECRET"), Some("s3cr=t"));
        assert_eq!(dotenv.get_vars().len(), 3);
    }

    #[test]
    fn test_rejects_whitespace_around_equals() {
        let err = parse("KEY = value").unwrap_err();
        assert!(err.contains("line 1"));
        assert!(err.contains("Whitespace"));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = parse("A=1\nA=2").unwrap_err();
        assert!(err.contains("Duplicate variable 'A'"));
    }

    #[test]
    fn test_rejects_unterminated_quote() {
        assert!(parse("A=\"open").is_err());
        assert!(parse("A=\"").is_err());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let dotenv = DotenvFile::read(&temp_dir.path().join(".env")).unwrap();
        assert!(dotenv.get_vars().is_empty());
    }

    #[test]
    fn test_read_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "AADGRAPH_API_VERSION=1.5\n").unwrap();
        let dotenv = DotenvFile::read(&path).unwrap();
        assert_eq!(dotenv.get("AADGRAPH_API_VERSION"), Some("1.5"));
        assert_eq!(dotenv.path(), path.as_path());
    }
}
