//! Interactive menu over a [`Store`].
//!
//! The shell reads answers line by line from any `BufRead` and writes
//! prompts and results to any `Write`, so sessions can be scripted in
//! tests. Every failure from the core is printed and the menu carries on;
//! the session ends on option 0 or when input runs out.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::codec::{self, LoadReport};
use crate::config::Settings;
use crate::error::StoreError;
use crate::query::{filter_by_continent, filter_by_range, search, statistics};
use crate::record::{Country, NumericField, parse_non_negative, validate_row};
use crate::sort::{SortKey, SortOrder, is_affirmative, sort_by};
use crate::store::{CountryUpdate, Store};

const MENU: &str = "
==== countries - menu ====
1) load dataset (CSV)
2) save dataset (CSV)
3) add country
4) update country (population/area)
5) search country by name
6) filter by continent
7) filter by population range
8) filter by area range
9) sort
10) show statistics
0) exit
";

enum Flow {
    Continue,
    Quit,
}

/// A menu-driven session.
pub struct Shell<R, W> {
    input: R,
    output: W,
    store: Store,
    dataset: PathBuf,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, settings: &Settings) -> Self {
        Self {
            input,
            output,
            store: Store::new(),
            dataset: settings.file.clone(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    /// Load the default dataset, then run the menu until exit or end of
    /// input.
    pub fn run(&mut self) -> io::Result<()> {
        match self.session() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                writeln!(self.output)?;
                Ok(())
            }
            other => other,
        }
    }

    fn session(&mut self) -> io::Result<()> {
        let dataset = self.dataset.clone();
        let count = self.load(&dataset)?;
        if count > 0 {
            writeln!(self.output, "loaded {count} countries from {}.", dataset.display())?;
        } else {
            writeln!(
                self.output,
                "empty dataset. add countries or load a CSV with option 1."
            )?;
        }

        loop {
            write!(self.output, "{MENU}")?;
            let choice = self.prompt_required("select an option: ")?;
            if let Flow::Quit = self.dispatch(&choice)? {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "1" => self.load_dataset()?,
            "2" => self.save_dataset()?,
            "3" => self.add_country()?,
            "4" => self.update_country()?,
            "5" => self.search_country()?,
            "6" => self.continent_filter()?,
            "7" => self.range_filter(NumericField::Population)?,
            "8" => self.range_filter(NumericField::Area)?,
            "9" => self.sort_countries()?,
            "10" => self.show_statistics()?,
            "0" => return self.exit(),
            _ => writeln!(self.output, "invalid option. try again.")?,
        }
        Ok(Flow::Continue)
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn load(&mut self, path: &Path) -> io::Result<usize> {
        let LoadReport {
            countries,
            diagnostics,
        } = codec::load(path);
        for diagnostic in &diagnostics {
            writeln!(self.output, "warning: {diagnostic}")?;
        }
        self.store.replace(countries);
        Ok(self.store.len())
    }

    fn load_dataset(&mut self) -> io::Result<()> {
        let path = PathBuf::from(self.prompt_required("CSV path to load: ")?);
        let count = self.load(&path)?;
        writeln!(self.output, "loaded {count} countries.")
    }

    /// Save the store to `path`. Returns whether the file was written.
    fn save_to(&mut self, path: &Path) -> io::Result<bool> {
        match codec::save(path, self.store.as_slice()) {
            Ok(()) => {
                writeln!(self.output, "dataset saved to {}.", path.display())?;
                Ok(true)
            }
            Err(e) => {
                self.error(e)?;
                Ok(false)
            }
        }
    }

    fn save_dataset(&mut self) -> io::Result<()> {
        let answer = self.prompt(&format!(
            "path to save the CSV (enter for '{}'): ",
            self.dataset.display()
        ))?;
        let path = if answer.is_empty() {
            self.dataset.clone()
        } else {
            PathBuf::from(answer)
        };
        self.save_to(&path)?;
        Ok(())
    }

    fn add_country(&mut self) -> io::Result<()> {
        let name = self.prompt_required("country name: ")?;
        if self.store.contains_name(&name) {
            return writeln!(
                self.output,
                "a country with that name already exists. use the update option to change it."
            );
        }
        let population = self.prompt_count("population (integer): ")?;
        let area = self.prompt_count("area in km² (integer): ")?;
        let continent = self.prompt_required("continent: ")?;

        let population = population.to_string();
        let area = area.to_string();
        let candidate = match validate_row([
            name.as_str(),
            population.as_str(),
            area.as_str(),
            continent.as_str(),
        ]) {
            Ok(country) => country,
            Err(e) => return self.error(e),
        };
        match self.store.add(candidate) {
            Ok(_) => writeln!(self.output, "country added."),
            Err(e) => self.error(e),
        }
    }

    fn update_country(&mut self) -> io::Result<()> {
        let needle = self.prompt_required("name of the country to update: ")?;
        let candidates: Vec<String> = self
            .store
            .matches(&needle)
            .iter()
            .map(|c| {
                format!(
                    "{} - population: {}, area: {} km²",
                    c.name, c.population, c.area
                )
            })
            .collect();
        if candidates.is_empty() {
            return self.error(StoreError::NotFound(needle));
        }

        let selection = if candidates.len() == 1 {
            1
        } else {
            writeln!(self.output, "countries found:")?;
            for (i, line) in candidates.iter().enumerate() {
                writeln!(self.output, "{}. {line}", i + 1)?;
            }
            let answer = self.prompt_count("select the number of the country to update: ")?;
            usize::try_from(answer).unwrap_or(usize::MAX)
        };
        if selection == 0 || selection > candidates.len() {
            return self.error(StoreError::InvalidSelection {
                selection,
                candidates: candidates.len(),
            });
        }

        writeln!(
            self.output,
            "updating {}. leave blank to keep the current value.",
            candidates[selection - 1]
        )?;
        let changes = CountryUpdate {
            population: self.prompt_optional_count("new population (enter to keep): ")?,
            area: self.prompt_optional_count("new area (enter to keep): ")?,
        };
        if changes.is_empty() {
            return writeln!(self.output, "nothing to update.");
        }
        match self.store.update(&needle, selection, changes) {
            Ok(_) => writeln!(self.output, "update finished."),
            Err(e) => self.error(e),
        }
    }

    fn search_country(&mut self) -> io::Result<()> {
        let needle = self.prompt_required("name or part of the name to search: ")?;
        let found = search(self.store.as_slice(), &needle);
        if found.is_empty() {
            return writeln!(self.output, "no matches found.");
        }
        for country in found {
            writeln!(self.output, "{}", describe(country))?;
        }
        Ok(())
    }

    fn continent_filter(&mut self) -> io::Result<()> {
        let continent = self.prompt_required("continent to filter: ")?;
        let found = filter_by_continent(self.store.as_slice(), &continent);
        if found.is_empty() {
            return writeln!(self.output, "no countries on that continent.");
        }
        for c in found {
            writeln!(
                self.output,
                "- {} ({}): population={}, area={}",
                c.name, c.continent, c.population, c.area
            )?;
        }
        Ok(())
    }

    fn range_filter(&mut self, field: NumericField) -> io::Result<()> {
        writeln!(
            self.output,
            "enter the {field} range as integers. leave blank for no limit."
        )?;
        let low = self.prompt("lower bound: ")?;
        let high = self.prompt("upper bound: ")?;

        let found = match filter_by_range(
            self.store.as_slice(),
            field,
            Some(low.as_str()),
            Some(high.as_str()),
        ) {
            Ok(found) => found,
            Err(e) => return self.error(e),
        };
        if found.is_empty() {
            return writeln!(self.output, "no countries in that range.");
        }
        for c in found {
            writeln!(self.output, "- {}: {field}={}", c.name, field.value_of(c))?;
        }
        Ok(())
    }

    fn sort_countries(&mut self) -> io::Result<()> {
        writeln!(self.output, "sort by: 1) name 2) population 3) area")?;
        let key = match self.prompt_required("choose (1/2/3): ")?.as_str() {
            "1" => SortKey::Name,
            "2" => SortKey::Population,
            "3" => SortKey::Area,
            _ => return writeln!(self.output, "invalid option."),
        };
        let order = SortOrder::from_answer(&self.prompt_required("ascending? (y/n): ")?);

        for country in sort_by(self.store.as_slice(), key, order) {
            writeln!(self.output, "{}", describe(country))?;
        }
        Ok(())
    }

    fn show_statistics(&mut self) -> io::Result<()> {
        let stats = match statistics(self.store.as_slice()) {
            Ok(stats) => stats,
            Err(e) => return self.error(e),
        };
        let out = &mut self.output;
        writeln!(
            out,
            "most populous country: {} ({})",
            stats.most_populous.name, stats.most_populous.population
        )?;
        writeln!(
            out,
            "least populous country: {} ({})",
            stats.least_populous.name, stats.least_populous.population
        )?;
        writeln!(out, "mean population: {:.2}", stats.mean_population)?;
        writeln!(out, "mean area: {:.2} km²", stats.mean_area)?;
        writeln!(out, "countries per continent:")?;
        for (continent, count) in &stats.per_continent {
            writeln!(out, "- {continent}: {count}")?;
        }
        Ok(())
    }

    fn exit(&mut self) -> io::Result<Flow> {
        let answer = self.prompt("save changes before exiting? (y/n): ")?;
        if is_affirmative(&answer) {
            let dataset = self.dataset.clone();
            if !self.save_to(&dataset)? {
                writeln!(
                    self.output,
                    "changes were not saved. use option 2 to save them elsewhere."
                )?;
                return Ok(Flow::Continue);
            }
        }
        writeln!(self.output, "bye!")?;
        Ok(Flow::Quit)
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    fn error(&mut self, err: impl Display) -> io::Result<()> {
        writeln!(self.output, "error: {err}")
    }

    /// Print `message` and read one trimmed line. End of input is reported
    /// as `UnexpectedEof`.
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        Ok(line.trim().to_string())
    }

    fn prompt_required(&mut self, message: &str) -> io::Result<String> {
        loop {
            let answer = self.prompt(message)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "empty values are not allowed. try again.")?;
        }
    }

    fn prompt_count(&mut self, message: &str) -> io::Result<u64> {
        loop {
            if let Some(value) = parse_non_negative(&self.prompt(message)?) {
                return Ok(value);
            }
            writeln!(self.output, "invalid value. enter a non-negative integer.")?;
        }
    }

    fn prompt_optional_count(&mut self, message: &str) -> io::Result<Option<u64>> {
        loop {
            let answer = self.prompt(message)?;
            if answer.is_empty() {
                return Ok(None);
            }
            if let Some(value) = parse_non_negative(&answer) {
                return Ok(Some(value));
            }
            writeln!(
                self.output,
                "invalid value. enter a non-negative integer or leave it blank."
            )?;
        }
    }
}

fn describe(c: &Country) -> String {
    format!(
        "- {}: population={}, area={} km², continent={}",
        c.name, c.population, c.area, c.continent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    const DATASET: &str = "nombre,poblacion,superficie,continente\n\
                           Spain,47,505,Europe\n\
                           Slovenia,2,20,Europe\n\
                           Slovakia,5,49,Europe\n\
                           Chad,17,1284,Africa\n";

    /// Run a scripted session against `dataset` (written to a temp file
    /// when given) and return the store and everything printed.
    fn run_session(dataset: Option<&str>, script: &str) -> (Store, String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paises.csv");
        if let Some(text) = dataset {
            fs::write(&path, text).unwrap();
        }
        let (store, out) = run_script(&path, script);
        (store, out, dir)
    }

    fn run_script(path: &Path, script: &str) -> (Store, String) {
        let settings = Settings::default().with_file(path);
        let mut output = Vec::new();
        let mut shell = Shell::new(Cursor::new(script.to_string()), &mut output, &settings);
        shell.run().unwrap();
        let store = shell.into_store();
        (store, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_startup_loads_default_dataset() {
        let (store, out, _dir) = run_session(Some(DATASET), "0\nn\n");
        assert_eq!(store.len(), 4);
        assert!(out.contains("loaded 4 countries from"));
        assert!(out.contains("bye!"));
    }

    #[test]
    fn test_startup_without_dataset_is_empty() {
        let (store, out, _dir) = run_session(None, "0\nn\n");
        assert!(store.is_empty());
        assert!(out.contains("empty dataset."));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (store, _out, dir) = run_session(Some(DATASET), "3\nMalta\n");
        assert_eq!(store.len(), 4);
        // Nothing was saved.
        let text = fs::read_to_string(dir.path().join("paises.csv")).unwrap();
        assert_eq!(text, DATASET);
    }

    #[test]
    fn test_invalid_menu_option() {
        let (_, out, _dir) = run_session(None, "42\n0\nn\n");
        assert!(out.contains("invalid option. try again."));
    }

    #[test]
    fn test_add_country_with_retries() {
        let script = "3\n  Costa   Rica \n\nabc\n5000000\n-1\n51100\n\nAmerica\n0\nn\n";
        let (store, out, _dir) = run_session(Some(DATASET), script);
        assert!(out.contains("empty values are not allowed"));
        assert!(out.contains("invalid value. enter a non-negative integer."));
        assert!(out.contains("country added."));
        let added = &store.as_slice()[4];
        assert_eq!(added.name, "Costa Rica");
        assert_eq!(added.population, 5_000_000);
        assert_eq!(added.area, 51_100);
        assert_eq!(added.continent, "America");
    }

    #[test]
    fn test_add_duplicate_is_rejected_early() {
        let (store, out, _dir) = run_session(Some(DATASET), "3\nSPAIN\n0\nn\n");
        assert_eq!(store.len(), 4);
        assert!(out.contains("already exists"));
    }

    #[test]
    fn test_update_with_selection() {
        let script = "4\nslov\n2\n6\n\n0\nn\n";
        let (store, out, _dir) = run_session(Some(DATASET), script);
        assert!(out.contains("1. Slovenia - population: 2, area: 20 km²"));
        assert!(out.contains("2. Slovakia - population: 5, area: 49 km²"));
        assert!(out.contains("update finished."));
        let slovakia = &store.as_slice()[2];
        assert_eq!(slovakia.population, 6);
        assert_eq!(slovakia.area, 49);
    }

    #[test]
    fn test_update_single_match_skips_selection() {
        let script = "4\nchad\n\n1300\n0\nn\n";
        let (store, _out, _dir) = run_session(Some(DATASET), script);
        let chad = &store.as_slice()[3];
        assert_eq!(chad.population, 17);
        assert_eq!(chad.area, 1300);
    }

    #[test]
    fn test_update_with_no_new_values_changes_nothing() {
        let script = "4\nchad\n\n\n0\nn\n";
        let (store, out, _dir) = run_session(Some(DATASET), script);
        assert!(out.contains("nothing to update."));
        assert!(!out.contains("update finished."));
        let chad = &store.as_slice()[3];
        assert_eq!(chad.population, 17);
        assert_eq!(chad.area, 1284);
    }

    #[test]
    fn test_update_not_found_and_bad_selection() {
        let script = "4\nxyz\n4\nslov\n3\n0\nn\n";
        let (_, out, _dir) = run_session(Some(DATASET), script);
        assert!(out.contains("error: no country name contains \"xyz\""));
        assert!(out.contains("error: selection 3 is out of range (1-2)"));
    }

    #[test]
    fn test_search_and_continent_filter() {
        let script = "5\nSL\n6\nafrica\n6\nasia\n0\nn\n";
        let (_, out, _dir) = run_session(Some(DATASET), script);
        assert!(out.contains("- Slovenia: population=2, area=20 km², continent=Europe"));
        assert!(out.contains("- Chad (Africa): population=17, area=1284"));
        assert!(out.contains("no countries on that continent."));
    }

    #[test]
    fn test_range_filter() {
        let script = "7\n3\n20\n8\nx\n\n0\nn\n";
        let (_, out, _dir) = run_session(Some(DATASET), script);
        assert!(out.contains("- Slovakia: population=5"));
        assert!(out.contains("- Chad: population=17"));
        assert!(!out.contains("- Spain: population"));
        assert!(out.contains("error: lower bound must be a non-negative integer"));
    }

    #[test]
    fn test_sort_non_affirmative_means_descending() {
        let script = "9\n2\nwhatever\n0\nn\n";
        let (_, out, _dir) = run_session(Some(DATASET), script);
        let spain = out.find("- Spain:").unwrap();
        let chad = out.find("- Chad:").unwrap();
        let slovenia = out.find("- Slovenia:").unwrap();
        assert!(spain < chad && chad < slovenia);
    }

    #[test]
    fn test_statistics_output() {
        let (_, out, _dir) = run_session(Some(DATASET), "10\n0\nn\n");
        assert!(out.contains("most populous country: Spain (47)"));
        assert!(out.contains("least populous country: Slovenia (2)"));
        assert!(out.contains("mean population: 17.75"));
        assert!(out.contains("mean area: 464.50 km²"));
        assert!(out.contains("- Europe: 3"));
        assert!(out.contains("- Africa: 1"));
    }

    #[test]
    fn test_statistics_on_empty_dataset() {
        let (_, out, _dir) = run_session(None, "10\n0\nn\n");
        assert!(out.contains("error: dataset is empty"));
    }

    #[test]
    fn test_load_reports_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let other = dir.path().join("bad.csv");
        fs::write(&other, "name,pop,area,cont\nPeru,1,1,America\n").unwrap();
        let script = format!("1\n{}\n0\nn\n", other.display());
        let (store, out, _dir) = run_session(Some(DATASET), &script);
        assert!(store.is_empty());
        assert!(out.contains("warning: invalid CSV header"));
        assert!(out.contains("loaded 0 countries."));
    }

    #[test]
    fn test_exit_with_save_writes_default_file() {
        let script = "3\nMalta\n1\n316\nEurope\n0\ny\n";
        let (_, out, dir) = run_session(Some(DATASET), script);
        assert!(out.contains("dataset saved to"));
        let text = fs::read_to_string(dir.path().join("paises.csv")).unwrap();
        assert!(text.ends_with("Malta,1,316,Europe\n"));
    }

    #[test]
    fn test_save_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("copy.csv");
        let script = format!("2\n{}\n0\nn\n", target.display());
        let (_, _out, _dir) = run_session(Some(DATASET), &script);
        assert_eq!(fs::read_to_string(&target).unwrap(), DATASET);
    }

    #[test]
    fn test_save_failure_is_reported_and_session_continues() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("copy.csv");
        let script = format!("2\n{}\n10\n0\nn\n", target.display());
        let (_, out, _dir) = run_session(Some(DATASET), &script);
        assert!(out.contains("error: cannot write"));
        assert!(out.contains("mean population"));
    }

    #[test]
    fn test_exit_save_failure_keeps_session_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("paises.csv");
        let rescue = dir.path().join("rescue.csv");
        let script = format!(
            "3\nMalta\n1\n316\nEurope\n0\ny\n10\n2\n{}\n0\nn\n",
            rescue.display()
        );
        let (store, out) = run_script(&path, &script);
        assert_eq!(store.len(), 1);
        assert!(out.contains("error: cannot write"));
        assert!(out.contains("changes were not saved. use option 2"));
        // The menu kept running after the failed save.
        assert!(out.contains("mean population: 1.00"));
        assert_eq!(out.matches("bye!").count(), 1);
        assert!(out.trim_end().ends_with("bye!"));
        let text = fs::read_to_string(&rescue).unwrap();
        assert!(text.ends_with("Malta,1,316,Europe\n"));
    }
}
