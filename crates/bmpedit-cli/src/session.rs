//! The interactive editor loop.
//!
//! A session keeps a current input file. Every filter decodes that file
//! afresh, so results never chain; the output goes to a file named at the
//! prompt and the current file stays the same until it is changed with
//! menu entry 11.

use std::io::{self, BufRead, Write};

use bmpedit_core::validate::{parse_enlarge_factor, parse_rotations, parse_scale};
use bmpedit_core::{read_bmp, write_bmp, Filter, FilterKind};

use crate::menu::{self, MenuSelection};
use crate::prompt::Console;

pub const BANNER: &str = "BMP Image Processing Application";

const INPUT_PROMPT: &str = "Enter input BMP filename: ";
const OUTPUT_PROMPT: &str = "Enter output BMP filename: ";
const SCALE_PROMPT: &str = "Enter scaling factor: ";
const ROTATIONS_PROMPT: &str = "Enter number of 90 degree rotations: ";
const X_SCALE_PROMPT: &str = "Enter X scale: ";
const Y_SCALE_PROMPT: &str = "Enter Y scale: ";

/// Whether the loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<R, W> {
    console: Console<R, W>,
    current_file: Option<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session; without `current_file` the user is asked for one first.
    pub fn new(console: Console<R, W>, current_file: Option<String>) -> Self {
        Self {
            console,
            current_file,
        }
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run until the user quits or input ends.
    ///
    /// Only I/O errors on the console itself are returned; failures to read,
    /// filter or write an image are reported to the user and the menu continues.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.console.output(), "{BANNER}")?;

        let mut current = match self.current_file.take() {
            Some(file) => file,
            None => match self.console.ask(INPUT_PROMPT)? {
                Some(file) => file,
                None => return Ok(()),
            },
        };

        loop {
            self.current_file = Some(current.clone());
            let selection = loop {
                menu::write_menu(self.console.output(), &current)?;
                let Some(line) = self.console.read_line()? else {
                    return Ok(());
                };
                match menu::parse_selection(&line) {
                    MenuSelection::Invalid => log::debug!("ignoring menu input {line:?}"),
                    selection => break selection,
                }
            };

            let flow = match selection {
                MenuSelection::Quit => Flow::Quit,
                MenuSelection::ChangeImage => {
                    writeln!(self.console.output(), "Change image selected")?;
                    match self.console.ask(INPUT_PROMPT)? {
                        Some(file) => {
                            current = file;
                            Flow::Continue
                        }
                        None => Flow::Quit,
                    }
                }
                MenuSelection::Filter(kind) => self.run_filter(kind, &current)?,
                MenuSelection::Invalid => Flow::Continue,
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn run_filter(&mut self, kind: FilterKind, input: &str) -> io::Result<Flow> {
        let out = self.console.output();
        writeln!(out)?;
        writeln!(out, "{} selected", menu::capitalize(kind.name()))?;

        let image = match read_bmp(input) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("decode of {input} failed: {err}");
                writeln!(self.console.output(), "Failed to read {input}: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        let Some(filter) = self.collect_parameters(kind)? else {
            return Ok(Flow::Quit);
        };

        let filtered = match filter.apply(&image) {
            Ok(filtered) => filtered,
            Err(err) => {
                writeln!(self.console.output(), "Failed to apply {kind}: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        let Some(output) = self.console.ask(OUTPUT_PROMPT)? else {
            return Ok(Flow::Quit);
        };
        let out = self.console.output();
        match write_bmp(&output, &filtered) {
            Ok(()) => writeln!(out, "Successfully applied {}!", kind.name())?,
            Err(err) => {
                log::warn!("encode to {output} failed: {err}");
                writeln!(out, "Failed to write {output}: {err}")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Prompt for whatever `kind` needs. `None` means input ended.
    fn collect_parameters(&mut self, kind: FilterKind) -> io::Result<Option<Filter>> {
        let console = &mut self.console;
        let filter = match kind {
            FilterKind::Vignette => Some(Filter::Vignette),
            FilterKind::Clarendon => console
                .ask_valid(SCALE_PROMPT, parse_scale)?
                .map(|scale| Filter::Clarendon { scale }),
            FilterKind::Grayscale => Some(Filter::Grayscale),
            FilterKind::Rotate90 => Some(Filter::Rotate90),
            FilterKind::RotateMultiple => console
                .ask_valid(ROTATIONS_PROMPT, parse_rotations)?
                .map(|rotations| Filter::RotateMultiple { rotations }),
            FilterKind::Enlarge => {
                let Some(x) = console.ask_valid(X_SCALE_PROMPT, parse_enlarge_factor)? else {
                    return Ok(None);
                };
                console
                    .ask_valid(Y_SCALE_PROMPT, parse_enlarge_factor)?
                    .map(|y| Filter::Enlarge { x, y })
            }
            FilterKind::HighContrast => Some(Filter::HighContrast),
            FilterKind::Lighten => console
                .ask_valid(SCALE_PROMPT, parse_scale)?
                .map(|scale| Filter::Lighten { scale }),
            FilterKind::Darken => console
                .ask_valid(SCALE_PROMPT, parse_scale)?
                .map(|scale| Filter::Darken { scale }),
            FilterKind::Posterize => Some(Filter::Posterize),
        };
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmpedit_core::{adjustments, transform, Image, Pixel};
    use std::io::Cursor;
    use std::path::Path;

    fn sample() -> Image {
        Image::from_rows(vec![
            vec![Pixel::RED, Pixel::GREEN, Pixel::new(120, 130, 140)],
            vec![Pixel::BLUE, Pixel::WHITE, Pixel::new(20, 40, 60)],
        ])
        .unwrap()
    }

    fn path_str(path: &Path) -> String {
        path.to_str().unwrap().to_string()
    }

    /// Run a session over `script` and return everything it printed.
    fn run_script(current: Option<String>, script: &str) -> (String, Option<String>) {
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut session = Session::new(console, current);
        session.run().unwrap();
        let file = session.current_file().map(str::to_string);
        let output = session.into_console().into_output();
        (String::from_utf8(output).unwrap(), file)
    }

    #[test]
    fn test_asks_for_input_when_not_given() {
        let (text, current) = run_script(None, "photo.bmp\nq\n");
        assert!(text.starts_with(BANNER));
        assert!(text.contains(INPUT_PROMPT));
        assert!(text.contains("11) Change image (current: photo.bmp)"));
        assert_eq!(current.as_deref(), Some("photo.bmp"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (text, _) = run_script(Some("a.bmp".into()), "");
        assert_eq!(text.matches("IMAGE PROCESSING MENU").count(), 1);

        let (text, _) = run_script(None, "");
        assert!(!text.contains("IMAGE PROCESSING MENU"));
    }

    #[test]
    fn test_invalid_selections_redisplay_menu() {
        let (text, _) = run_script(Some("a.bmp".into()), "abc\n0\n12\n\nQ\n");
        assert_eq!(text.matches("IMAGE PROCESSING MENU").count(), 4);
        assert!(!text.contains("selected"));
    }

    #[test]
    fn test_change_image() {
        let (text, current) = run_script(Some("a.bmp".into()), "11\nb.bmp\nq\n");
        assert!(text.contains("Change image selected"));
        assert!(text.contains("(current: b.bmp)"));
        assert_eq!(current.as_deref(), Some("b.bmp"));
    }

    #[test]
    fn test_grayscale_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("gray.bmp");
        write_bmp(&input, &sample()).unwrap();

        let script = format!("3\n{}\nq\n", path_str(&output));
        let (text, _) = run_script(Some(path_str(&input)), &script);

        assert!(text.contains("Greyscale selected"));
        assert!(text.contains(OUTPUT_PROMPT));
        assert!(text.contains("Successfully applied greyscale!"));
        assert_eq!(read_bmp(&output).unwrap(), adjustments::grayscale(&sample()));
    }

    #[test]
    fn test_filters_do_not_chain() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let first = dir.path().join("first.bmp");
        let second = dir.path().join("second.bmp");
        write_bmp(&input, &sample()).unwrap();

        let script = format!("4\n{}\n4\n{}\nq\n", path_str(&first), path_str(&second));
        run_script(Some(path_str(&input)), &script);

        let expected = transform::rotate_90(&sample());
        assert_eq!(read_bmp(&first).unwrap(), expected);
        assert_eq!(read_bmp(&second).unwrap(), expected);
    }

    #[test]
    fn test_parameter_prompts_retry() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("dark.bmp");
        write_bmp(&input, &sample()).unwrap();

        let script = format!("9\nabc\n0\n0.5 extra\n{}\nq\n", path_str(&output));
        let (text, _) = run_script(Some(path_str(&input)), &script);

        assert!(text.contains("Darken selected"));
        assert_eq!(text.matches(SCALE_PROMPT).count(), 3);
        assert_eq!(text.matches("Invalid input!").count(), 2);
        assert!(text.contains("Successfully applied darken!"));
        assert_eq!(read_bmp(&output).unwrap(), adjustments::darken(&sample(), 0.5));
    }

    #[test]
    fn test_enlarge_prompts_both_factors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("big.bmp");
        write_bmp(&input, &sample()).unwrap();

        let script = format!("6\n-2\n2\n3\n{}\nq\n", path_str(&output));
        let (text, _) = run_script(Some(path_str(&input)), &script);

        assert!(text.contains(X_SCALE_PROMPT));
        assert!(text.contains(Y_SCALE_PROMPT));
        assert_eq!(text.matches("Invalid input!").count(), 1);
        let out = read_bmp(&output).unwrap();
        assert_eq!(out.size(), (6, 6));
        assert_eq!(out, transform::enlarge(&sample(), 2, 3));
    }

    #[test]
    fn test_rotate_multiple() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("rot.bmp");
        write_bmp(&input, &sample()).unwrap();

        let script = format!("5\n2\n{}\nq\n", path_str(&output));
        let (text, _) = run_script(Some(path_str(&input)), &script);

        assert!(text.contains(ROTATIONS_PROMPT));
        assert!(text.contains("Successfully applied rotate multiple 90 degrees!"));
        assert_eq!(
            read_bmp(&output).unwrap(),
            transform::rotate(&sample(), 2).into_owned()
        );
    }

    #[test]
    fn test_unreadable_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bmp");

        let (text, _) = run_script(Some(path_str(&missing)), "1\nq\n");
        assert!(text.contains("Vignette selected"));
        assert!(text.contains("Failed to read"));
        assert!(!text.contains(OUTPUT_PROMPT));
        assert_eq!(text.matches("IMAGE PROCESSING MENU").count(), 2);
    }

    #[test]
    fn test_end_of_input_during_parameters_quits() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        write_bmp(&input, &sample()).unwrap();

        let (text, _) = run_script(Some(path_str(&input)), "8\n");
        assert!(text.contains("Lighten selected"));
        assert!(text.contains(SCALE_PROMPT));
        assert!(!text.contains(OUTPUT_PROMPT));
    }
}
