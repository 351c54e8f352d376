use std::fs;
use std::path::Path;
use std::str::FromStr;
use log::info;

use super::error::ClassifierError;

/// Ordered category names, one per model output position.
///
/// Parsed from a list where every non-blank line reads `<index> <name>` and
/// the declared index equals the line's position among the non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    /// Builds a table directly from names in output order.
    ///
    /// # Errors
    /// - `LabelFile` if the list is empty or any name is blank
    pub fn new(names: Vec<impl Into<String>>) -> Result<Self, ClassifierError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ClassifierError::LabelFile("Label list is empty".into()));
        }
        if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(ClassifierError::LabelFile(format!("Label {} has an empty name", pos)));
        }
        Ok(Self { names })
    }

    /// Reads and parses a label file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ClassifierError::LabelFile(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let table: Self = contents.parse()?;
        info!("Loaded {} labels from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Iterates `(index, name)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}

impl FromStr for LabelTable {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut names = Vec::new();
        for (line_no, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (index, name) = line.split_once(char::is_whitespace).ok_or_else(|| {
                ClassifierError::LabelFile(format!(
                    "Line {}: expected '<index> <name>', found '{}'",
                    line_no + 1,
                    line
                ))
            })?;
            let index: usize = index.parse().map_err(|_| {
                ClassifierError::LabelFile(format!("Line {}: '{}' is not an index", line_no + 1, index))
            })?;
            if index != names.len() {
                return Err(ClassifierError::LabelFile(format!(
                    "Line {}: declared index {} but the label sits at position {}",
                    line_no + 1,
                    index,
                    names.len()
                )));
            }
            names.push(name.trim().to_string());
        }
        Self::new(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_teachable_machine_format() {
        let table: LabelTable = "0 Cardboard\n1 Glass\n2 Metal\n3 Plastic\n".parse().unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(0), Some("Cardboard"));
        assert_eq!(table.get(3), Some("Plastic"));
        assert_eq!(table.get(4), None);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let table: LabelTable = "\r\n0 glass\r\n\r\n1 food waste\r\n".parse().unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0, "glass"), (1, "food waste")]);
    }

    #[test]
    fn test_out_of_order_index_rejected() {
        let result = "0 glass\n2 metal\n".parse::<LabelTable>();
        assert!(matches!(result, Err(ClassifierError::LabelFile(_))));
    }

    #[test]
    fn test_missing_name_rejected() {
        assert!("0 glass\n1\n".parse::<LabelTable>().is_err());
        assert!("glass metal\n".parse::<LabelTable>().is_err());
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!("\n\n".parse::<LabelTable>().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.txt");
        std::fs::write(&path, "0 plastic\n1 metal\n").unwrap();
        let table = LabelTable::load(&path).unwrap();
        assert_eq!(table.get(1), Some("metal"));

        let missing = LabelTable::load(dir.path().join("nope.txt"));
        assert!(matches!(missing, Err(ClassifierError::LabelFile(_))));
    }
}
