//! Interactive shell
//!
//! Each pass reloads the configured filters, lists the ones applicable to
//! the image, asks for a filter id and its parameter values, applies it and
//! writes the result. Reloading drops the values set on the previous pass.
//!
//! Input and output are generic so a session can be scripted.

use anyhow::{Context, Result};
use pipefx_core::ImageBuffer;
use pipefx_filters::{parse_value, FilterError, FilterId, FilterInstance, FilterRegistry};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Session settings resolved from the command line and config.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Input image, used in messages and generated output names.
    pub image_path: PathBuf,
    /// Comma-separated filter list loaded on every pass.
    pub filters: String,
    /// Filter id selected on the first pass without prompting.
    pub filter: Option<FilterId>,
    /// `(name, text)` assignments applied on the first pass.
    pub presets: Vec<(String, String)>,
    /// Fixed output file. Overwritten on every pass.
    pub output: Option<PathBuf>,
    /// Directory for generated output names.
    pub output_dir: PathBuf,
    /// Stop after the first pass.
    pub once: bool,
}

/// Runs the shell on stdin/stdout.
pub fn run(options: ShellOptions) -> Result<()> {
    trace!(image = %options.image_path.display(), filters = %options.filters, "shell::run");

    let image = super::load_image(&options.image_path)?;
    info!(
        width = image.width(),
        height = image.height(),
        translucent = image.is_translucent(),
        "image loaded"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(options, stdin.lock(), stdout.lock());
    let written = shell.run(&image)?;
    debug!(outputs = written.len(), "shell finished");
    Ok(())
}

/// Generated output file name: `<stem>_<filter>_<n>.png`.
pub fn output_name(stem: &str, filter_name: &str, n: usize) -> String {
    let slug: String = filter_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{stem}_{slug}_{n}.png")
}

pub struct Shell<R, W> {
    options: ShellOptions,
    input: R,
    out: W,
    counter: usize,
    exhausted: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(options: ShellOptions, input: R, out: W) -> Self {
        Self {
            options,
            input,
            out,
            counter: 0,
            exhausted: false,
        }
    }

    /// Runs passes until `q`, end of input or `--once`. Returns the files written.
    ///
    /// A filter that fails with a recoverable error is reported and the
    /// loop goes on; with `--once` it is returned as an error. Filter list
    /// errors always abort.
    pub fn run(&mut self, image: &ImageBuffer) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        let mut first_pass = true;

        loop {
            writeln!(self.out, "\nImage: {}\n", self.options.image_path.display())?;

            let mut registry = FilterRegistry::from_list(&self.options.filters)
                .context("Error loading available filters")?;
            let applicable: Vec<(FilterId, &'static str)> = registry
                .applicable(image)
                .map(|(id, f)| (id, f.name()))
                .collect();
            if applicable.is_empty() {
                writeln!(self.out, "No loaded filter applies to this image.")?;
                return Ok(written);
            }

            let preselected = if first_pass { self.options.filter } else { None };
            let Some(id) = self.select_filter(&registry, &applicable, preselected)? else {
                return Ok(written);
            };

            let filter = registry.get_mut(id)?;
            let name = filter.name();
            writeln!(self.out, "Selected filter: {name}\n")?;

            let preset: Vec<String> = if first_pass {
                apply_presets(filter, &self.options.presets)?
            } else {
                Vec::new()
            };
            self.prompt_parameters(filter, &preset)?;

            writeln!(self.out, "Processing image...")?;
            match filter.process(image) {
                Ok(result) => {
                    let path = self.output_path(name);
                    super::save_image(&path, &result)?;
                    info!(filter = name, path = %path.display(), "output written");
                    writeln!(self.out, "Output saved at {}", path.display())?;
                    written.push(path);
                }
                Err(e) if e.is_recoverable() && !self.options.once => {
                    warn!(filter = name, error = %e, "filter not applied");
                    writeln!(self.out, "Wrong argument error: {e}")?;
                }
                Err(e) => return Err(e).with_context(|| format!("Failed to apply {name}")),
            }

            if self.options.once || self.exhausted {
                return Ok(written);
            }
            first_pass = false;
        }
    }

    /// Picks a filter id, `None` when the user quits.
    fn select_filter(
        &mut self,
        registry: &FilterRegistry,
        applicable: &[(FilterId, &'static str)],
        preselected: Option<FilterId>,
    ) -> Result<Option<FilterId>> {
        if let Some(id) = preselected {
            if self.check_choice(registry, applicable, id)? {
                return Ok(Some(id));
            }
        }

        writeln!(self.out, "Available filters:\n")?;
        loop {
            for (id, name) in applicable {
                writeln!(self.out, " {id} {name}")?;
            }
            write!(self.out, "\nSelect a filter (q to quit): ")?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let choice = line.trim();
            if choice.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match choice.parse::<FilterId>() {
                Ok(id) => {
                    if self.check_choice(registry, applicable, id)? {
                        return Ok(Some(id));
                    }
                }
                Err(_) => writeln!(self.out, "Please select a filter number:\n")?,
            }
        }
    }

    fn check_choice(
        &mut self,
        registry: &FilterRegistry,
        applicable: &[(FilterId, &'static str)],
        id: FilterId,
    ) -> Result<bool> {
        if let Err(e) = registry.get(id) {
            writeln!(self.out, "{e}")?;
            return Ok(false);
        }
        if !applicable.iter().any(|(a, _)| *a == id) {
            writeln!(self.out, "The filter is not valid for this image.")?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Asks for every declared parameter not in `skip`.
    ///
    /// A blank line leaves the parameter unset. At end of input the
    /// remaining parameters are left unset too.
    fn prompt_parameters(&mut self, filter: &mut FilterInstance, skip: &[String]) -> Result<()> {
        let declared: Vec<_> = filter.parameters().collect();
        for (name, ty) in declared {
            if skip.iter().any(|s| s == name) {
                continue;
            }
            loop {
                writeln!(
                    self.out,
                    "   Type the '{name}' value ({ty}) and press return. \
                     Leave it blank to not choose a value for this parameter."
                )?;
                writeln!(self.out, "   Example: {}\n", ty.example())?;
                self.out.flush()?;

                let Some(line) = self.read_line()? else {
                    return Ok(());
                };
                if line.trim().is_empty() {
                    writeln!(
                        self.out,
                        "No value informed, will use default value if available.\n"
                    )?;
                    break;
                }
                match parse_value(ty, &line) {
                    Some(value) => {
                        writeln!(self.out, "Parsed value is: {value}\n")?;
                        filter.set_parameter(name, value)?;
                        break;
                    }
                    None => writeln!(self.out, "The value '{}' couldn't be parsed.\n", line.trim())?,
                }
            }
        }
        Ok(())
    }

    fn output_path(&mut self, filter_name: &str) -> PathBuf {
        if let Some(path) = &self.options.output {
            return path.clone();
        }
        let stem = self
            .options
            .image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        loop {
            self.counter += 1;
            let path = self
                .options
                .output_dir
                .join(output_name(stem, filter_name, self.counter));
            if !path.exists() {
                return path;
            }
        }
    }

    /// Next input line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.exhausted = true;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Applies `--set` assignments. Returns the names that were set.
fn apply_presets(filter: &mut FilterInstance, presets: &[(String, String)]) -> Result<Vec<String>> {
    let mut set = Vec::with_capacity(presets.len());
    for (name, text) in presets {
        let ty = filter
            .parameters()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| FilterError::ParameterName { name: name.clone() })
            .with_context(|| format!("--set {name}={text}"))?;
        let value = parse_value(ty, text)
            .with_context(|| format!("--set {name}={text}: expected {ty}, e.g. {}", ty.example()))?;
        filter.set_parameter(name, value)?;
        debug!(filter = filter.name(), name = %name, %value, "parameter preset");
        set.push(name.clone());
    }
    Ok(set)
}

/// Default output directory: the image's own directory.
pub fn image_dir(image_path: &Path) -> PathBuf {
    match image_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
