use crate::domain::model::ImageSource;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SeeFoodError};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Terminal file chooser restricted to image extensions.
pub struct FilePicker {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl FilePicker {
    pub fn new(dir: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions.iter().map(|ext| ext.to_lowercase()).collect(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.images_dir(), config.image_extensions())
    }

    /// Applies the extension filter to a source chosen outside the picker.
    /// Remote sources are left to the decoder.
    pub fn check_source(&self, source: &ImageSource) -> Result<()> {
        match source {
            ImageSource::Local(path) if !self.accepts(path) => {
                Err(SeeFoodError::UnsupportedImage {
                    path: path.display().to_string(),
                    extensions: self.extensions.join("/"),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }

    /// Image files directly inside the picker directory, sorted by name.
    /// A missing directory simply has no candidates.
    pub fn candidates(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && self.accepts(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Asks for a number from the list or a path.
    ///
    /// Returns `None` when the user enters a blank line or input ends.
    pub fn prompt<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<Option<PathBuf>> {
        let candidates = self.candidates()?;

        writeln!(
            output,
            "Select an image ({}) from {}:",
            self.extensions.join(", "),
            self.dir.display()
        )?;
        for (i, path) in candidates.iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            writeln!(output, "  [{}] {}", i + 1, name)?;
        }

        loop {
            write!(output, "Enter a number or a path (blank to cancel): ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let choice = line.trim();
            if choice.is_empty() {
                return Ok(None);
            }

            if let Ok(n) = choice.parse::<usize>() {
                match n.checked_sub(1).and_then(|i| candidates.get(i)) {
                    Some(path) => return Ok(Some(fs::canonicalize(path)?)),
                    None => {
                        writeln!(output, "No image numbered {}.", n)?;
                        continue;
                    }
                }
            }

            let path = PathBuf::from(choice);
            if !path.is_file() {
                writeln!(output, "{} is not a file.", path.display())?;
            } else if !self.accepts(&path) {
                writeln!(
                    output,
                    "{} is not a {} image.",
                    path.display(),
                    self.extensions.join("/")
                )?;
            } else {
                return Ok(Some(fs::canonicalize(path)?));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn picker(dir: &Path) -> FilePicker {
        let exts = vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()];
        FilePicker::new(dir, &exts)
    }

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b_hotdog.JPG"), b"x").unwrap();
        fs::write(dir.path().join("a_salad.png"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        dir
    }

    #[test]
    fn test_candidates_filtered_and_sorted() {
        let dir = setup();
        let names: Vec<String> = picker(dir.path())
            .candidates()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a_salad.png", "b_hotdog.JPG"]);
    }

    #[test]
    fn test_missing_dir_has_no_candidates() {
        let dir = TempDir::new().unwrap();
        assert!(picker(&dir.path().join("images")).candidates().unwrap().is_empty());
    }

    #[test]
    fn test_select_by_number() {
        let dir = setup();
        let mut out = Vec::new();
        let chosen = picker(dir.path())
            .prompt(Cursor::new("2\n"), &mut out)
            .unwrap()
            .unwrap();

        assert_eq!(chosen, fs::canonicalize(dir.path().join("b_hotdog.JPG")).unwrap());
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("[1] a_salad.png"));
        assert!(!shown.contains("notes.txt"));
    }

    #[test]
    fn test_blank_line_cancels() {
        let dir = setup();
        let chosen = picker(dir.path()).prompt(Cursor::new("\n"), Vec::new()).unwrap();
        assert!(chosen.is_none());
    }

    #[test]
    fn test_end_of_input_cancels() {
        let dir = setup();
        let chosen = picker(dir.path()).prompt(Cursor::new(""), Vec::new()).unwrap();
        assert!(chosen.is_none());
    }

    #[test]
    fn test_invalid_choices_reprompt() {
        let dir = setup();
        let txt = dir.path().join("notes.txt");
        let input = format!("9\n{}\n1\n", txt.display());
        let mut out = Vec::new();

        let chosen = picker(dir.path())
            .prompt(Cursor::new(input), &mut out)
            .unwrap()
            .unwrap();

        assert!(chosen.ends_with("a_salad.png"));
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("No image numbered 9."));
        assert!(shown.contains("is not a jpg/jpeg/png image."));
    }

    #[test]
    fn test_check_source_filters_local_paths() {
        let dir = TempDir::new().unwrap();
        let picker = picker(dir.path());

        assert!(picker
            .check_source(&ImageSource::parse("photos/Lunch.JPEG"))
            .is_ok());
        assert!(picker
            .check_source(&ImageSource::parse("https://example.com/lunch.gif"))
            .is_ok());

        let err = picker
            .check_source(&ImageSource::parse("photos/lunch.gif"))
            .unwrap_err();
        assert!(matches!(err, SeeFoodError::UnsupportedImage { .. }));
        assert!(err.user_friendly_message().contains("jpg/jpeg/png"));
    }

    #[test]
    fn test_from_config_uses_picker_settings() {
        let dir = setup();
        let settings = crate::config::Settings {
            images_dir: dir.path().to_path_buf(),
            image_extensions: vec!["PNG".to_string()],
            ..Default::default()
        };

        let picker = FilePicker::from_config(&settings);
        let files = picker.candidates().unwrap();
        assert_eq!(files, vec![dir.path().join("a_salad.png")]);
    }

    #[test]
    fn test_select_by_path() {
        let dir = setup();
        let other = TempDir::new().unwrap();
        let path = other.path().join("lunch.jpeg");
        fs::write(&path, b"x").unwrap();

        let chosen = picker(dir.path())
            .prompt(Cursor::new(format!("{}\n", path.display())), Vec::new())
            .unwrap();
        assert_eq!(chosen, Some(fs::canonicalize(&path).unwrap()));
    }
}
