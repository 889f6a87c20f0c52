//! Configuration for a decider run or an enumerator run. Use [Config::builder]
//! or [Config::new_default]; the config is designed immutable, so
//! [Config::builder_from_config] copies an existing config to make changes.

use std::{fmt::Display, sync::LazyLock, time::SystemTime};

use hashbrown::HashMap;
use num_format::ToFormattedString;

use crate::toml::ConfigToml;

/// Number type for step counters that may exceed `u32::MAX` (e.g. the BB(5)
/// champion's 47 million steps comfortably fit `u32`, but larger machines
/// and the enumerator's cumulative counters use this alias to make a future
/// widening to `u64` a one-line change).
pub type StepBig = u64;
/// Number type for step counters used as loop bounds / collection indices,
/// never expected to exceed `u32`.
pub type StepSmall = u32;

pub const N_STATES_DEFAULT: usize = 5;
pub const N_SYMBOLS_DEFAULT: usize = 2;
const BATCH_SIZE_DEFAULT: usize = 200;
const TAPE_SIZE_LIMIT_CELLS_DEFAULT: u32 = 20_000;
const CPU_UTILIZATION_DEFAULT: usize = 100;
const MAX_PERIOD_DEFAULT: usize = 200_000;
const CONFIDENCE_LEVEL_DEFAULT: usize = 5;
const BOUNCER_MAX_DEGREE_DEFAULT: usize = 4;

/// Read config.toml only once.
pub static CONFIG_TOML: LazyLock<ConfigToml> = LazyLock::new(ConfigToml::read_toml);

/// Configuration for a single decider run or an enumerator sweep over
/// `(n_states, n_symbols)`.
#[derive(Debug, Clone)]
pub struct Config {
    n_states: usize,
    n_symbols: usize,
    /// Step budget for the outright-halt pre-check: if the machine has not
    /// halted after this many steps, hand it to the deciders.
    step_limit_decider_halt: StepBig,
    /// Step budget for the Cycler decider.
    step_limit_decider_cycler: StepSmall,
    /// Step budget for the Translated-Cycler decider.
    step_limit_decider_translated_cycler: StepSmall,
    /// Step budget for the Bouncer decider.
    step_limit_decider_bouncer: StepSmall,
    /// Cap on the period-doubling search in the (translated-)cycler.
    max_period: usize,
    /// Number of extra repeats required before accepting a polynomial fit
    /// (bouncer `confidenceLevel`).
    confidence_level: usize,
    /// Highest polynomial degree the bouncer attempts before giving up.
    bouncer_max_degree: usize,
    /// Tape size limit in cells; machines that grow the tape past this are
    /// abandoned as undecided rather than risk unbounded memory growth.
    tape_size_limit_cells: u32,
    /// Cap on the number of machines the enumerator will visit.
    machines_limit: u64,
    /// Enumerator batch size for progress reporting / file flushing.
    batch_size: usize,
    /// CPU utilization in percent; 0-150 allowed, see [crate::utils::num_cpus_percentage].
    cpu_utilization_percent: usize,
    /// Print step-by-step detail for the deciders/enumerator.
    verbose: bool,
    /// Additional config for callers embedding this library.
    config_key_value_pair: HashMap<String, String>,
    creation_time: SystemTime,
    use_local_time: bool,
}

impl Config {
    pub fn builder(n_states: usize, n_symbols: usize) -> ConfigBuilder {
        ConfigBuilder::new(n_states, n_symbols)
    }

    pub fn builder_from_config(config: &Config) -> ConfigBuilder {
        ConfigBuilder::new_config(config.clone())
    }

    /// Default values, mostly useful for testing. Prefer [Self::builder].
    pub fn new_default(n_states: usize, n_symbols: usize) -> Config {
        Self {
            n_states,
            n_symbols,
            step_limit_decider_halt: Self::step_limit_decider_halt_default(n_states),
            step_limit_decider_cycler: Self::step_limit_cycler_default(n_states),
            step_limit_decider_translated_cycler: Self::step_limit_translated_cycler_default(
                n_states,
            ),
            step_limit_decider_bouncer: Self::step_limit_bouncer_default(n_states),
            max_period: MAX_PERIOD_DEFAULT,
            confidence_level: CONFIDENCE_LEVEL_DEFAULT,
            bouncer_max_degree: BOUNCER_MAX_DEGREE_DEFAULT,
            tape_size_limit_cells: TAPE_SIZE_LIMIT_CELLS_DEFAULT,
            machines_limit: Self::enumerate_limit_default(n_states),
            batch_size: BATCH_SIZE_DEFAULT,
            cpu_utilization_percent: CPU_UTILIZATION_DEFAULT,
            verbose: false,
            config_key_value_pair: HashMap::new(),
            creation_time: SystemTime::now(),
            use_local_time: true,
        }
    }

    /// Step limit defaults for the outright-halt pre-check, scaled by `n_states`.
    pub fn step_limit_decider_halt_default(n_states: usize) -> StepBig {
        match n_states {
            1 => 10,
            2 => 20,
            3 => 120,
            4 => 110_000,
            5 => 50_000_000,
            _ => 10_000_000_000,
        }
    }

    /// Step limit defaults for the Cycler decider.
    pub fn step_limit_cycler_default(n_states: usize) -> StepSmall {
        match n_states {
            1 => 100,
            2 => 100,
            3 => 250,
            4 => 1_500,
            5 => 200_000,
            _ => 2_000_000,
        }
    }

    /// Step limit defaults for the Translated-Cycler decider.
    pub fn step_limit_translated_cycler_default(n_states: usize) -> StepSmall {
        match n_states {
            1 | 2 | 3 => 1_000,
            4 => 50_000,
            5 => 2_000_000,
            _ => 5_000_000,
        }
    }

    /// Step limit defaults for the Bouncer/Bell decider.
    pub fn step_limit_bouncer_default(n_states: usize) -> StepSmall {
        match n_states {
            1 | 2 | 3 => 1_000,
            4 => 50_000,
            5 => 2_000_000,
            _ => 5_000_000,
        }
    }

    /// Enumerator visit-count defaults, sized for a complete sweep at small
    /// `n_states` and a bounded sample at larger ones.
    pub fn enumerate_limit_default(n_states: usize) -> u64 {
        match n_states {
            1 | 2 => 10_000,
            3 => 5_000_000,
            4 => 200_000_000,
            _ => 350_000_000,
        }
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_symbols(&self) -> usize {
        self.n_symbols
    }

    pub fn step_limit_decider_halt(&self) -> StepBig {
        self.step_limit_decider_halt
    }

    pub fn step_limit_decider_cycler(&self) -> StepSmall {
        self.step_limit_decider_cycler
    }

    pub fn step_limit_decider_translated_cycler(&self) -> StepSmall {
        self.step_limit_decider_translated_cycler
    }

    pub fn step_limit_decider_bouncer(&self) -> StepSmall {
        self.step_limit_decider_bouncer
    }

    pub fn max_period(&self) -> usize {
        self.max_period
    }

    pub fn confidence_level(&self) -> usize {
        self.confidence_level
    }

    pub fn bouncer_max_degree(&self) -> usize {
        self.bouncer_max_degree
    }

    pub fn tape_size_limit_cells(&self) -> u32 {
        self.tape_size_limit_cells
    }

    pub fn machines_limit(&self) -> u64 {
        self.machines_limit
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn cpu_utilization_percent(&self) -> usize {
        self.cpu_utilization_percent
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn config_value(&self, key: &str) -> Option<&String> {
        self.config_key_value_pair.get(key)
    }

    pub fn config_toml(&self) -> &ConfigToml {
        &CONFIG_TOML
    }

    pub fn creation_time(&self) -> SystemTime {
        self.creation_time
    }

    pub fn use_local_time(&self) -> bool {
        self.use_local_time
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new_default(N_STATES_DEFAULT, N_SYMBOLS_DEFAULT)
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
    step_limit_decider_halt: Option<StepBig>,
    step_limit_decider_cycler: Option<StepSmall>,
    step_limit_decider_translated_cycler: Option<StepSmall>,
    step_limit_decider_bouncer: Option<StepSmall>,
    max_period: Option<usize>,
    confidence_level: Option<usize>,
    bouncer_max_degree: Option<usize>,
    tape_size_limit_cells: Option<u32>,
    machines_limit: Option<u64>,
    batch_size: Option<usize>,
    cpu_utilization_percent: Option<usize>,
    verbose: Option<bool>,
    config_key_value_pair: Option<HashMap<String, String>>,
    use_local_time: Option<bool>,
}

impl ConfigBuilder {
    fn new(n_states: usize, n_symbols: usize) -> Self {
        Self {
            config: Config::new_default(n_states, n_symbols),
            ..Default::default()
        }
    }

    fn new_config(config: Config) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn step_limit_decider_halt(mut self, step_limit: StepBig) -> Self {
        self.step_limit_decider_halt = Some(step_limit);
        self
    }

    pub fn step_limit_decider_cycler(mut self, step_limit: StepSmall) -> Self {
        self.step_limit_decider_cycler = Some(step_limit);
        self
    }

    pub fn step_limit_decider_translated_cycler(mut self, step_limit: StepSmall) -> Self {
        self.step_limit_decider_translated_cycler = Some(step_limit);
        self
    }

    pub fn step_limit_decider_bouncer(mut self, step_limit: StepSmall) -> Self {
        self.step_limit_decider_bouncer = Some(step_limit);
        self
    }

    pub fn max_period(mut self, max_period: usize) -> Self {
        self.max_period = Some(max_period);
        self
    }

    pub fn confidence_level(mut self, confidence_level: usize) -> Self {
        self.confidence_level = Some(confidence_level);
        self
    }

    pub fn bouncer_max_degree(mut self, degree: usize) -> Self {
        self.bouncer_max_degree = Some(degree);
        self
    }

    pub fn tape_size_limit_cells(mut self, cells: u32) -> Self {
        self.tape_size_limit_cells = Some(cells);
        self
    }

    pub fn machines_limit(mut self, limit: u64) -> Self {
        self.machines_limit = Some(limit);
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    pub fn cpu_utilization(mut self, percent: usize) -> Self {
        self.cpu_utilization_percent = Some(percent);
        self
    }

    pub fn verbose(mut self, value: bool) -> Self {
        self.verbose = Some(value);
        self
    }

    pub fn config_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_key_value_pair
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn use_local_time(mut self, value: bool) -> Self {
        self.use_local_time = Some(value);
        self
    }

    pub fn build(self) -> Config {
        Config {
            n_states: self.config.n_states,
            n_symbols: self.config.n_symbols,
            step_limit_decider_halt: self
                .step_limit_decider_halt
                .unwrap_or(self.config.step_limit_decider_halt),
            step_limit_decider_cycler: self
                .step_limit_decider_cycler
                .unwrap_or(self.config.step_limit_decider_cycler),
            step_limit_decider_translated_cycler: self
                .step_limit_decider_translated_cycler
                .unwrap_or(self.config.step_limit_decider_translated_cycler),
            step_limit_decider_bouncer: self
                .step_limit_decider_bouncer
                .unwrap_or(self.config.step_limit_decider_bouncer),
            max_period: self.max_period.unwrap_or(self.config.max_period),
            confidence_level: self
                .confidence_level
                .unwrap_or(self.config.confidence_level),
            bouncer_max_degree: self
                .bouncer_max_degree
                .unwrap_or(self.config.bouncer_max_degree),
            tape_size_limit_cells: self
                .tape_size_limit_cells
                .unwrap_or(self.config.tape_size_limit_cells),
            machines_limit: self.machines_limit.unwrap_or(self.config.machines_limit),
            batch_size: self.batch_size.unwrap_or(self.config.batch_size),
            cpu_utilization_percent: self
                .cpu_utilization_percent
                .unwrap_or(self.config.cpu_utilization_percent),
            verbose: self.verbose.unwrap_or(self.config.verbose),
            config_key_value_pair: self
                .config_key_value_pair
                .unwrap_or(self.config.config_key_value_pair),
            creation_time: SystemTime::now(),
            use_local_time: self.use_local_time.unwrap_or(self.config.use_local_time),
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let locale = user_locale();
        writeln!(
            f,
            "n_states: {}, n_symbols: {}",
            self.n_states, self.n_symbols
        )?;
        writeln!(
            f,
            "Step limits - Halt: {}, Cycler: {}, Translated-Cycler: {}, Bouncer: {}",
            self.step_limit_decider_halt.to_formatted_string(&locale),
            self.step_limit_decider_cycler.to_formatted_string(&locale),
            self.step_limit_decider_translated_cycler
                .to_formatted_string(&locale),
            self.step_limit_decider_bouncer
                .to_formatted_string(&locale),
        )?;
        writeln!(
            f,
            "Machines limit: {}, Batch size: {}",
            self.machines_limit.to_formatted_string(&locale),
            self.batch_size.to_formatted_string(&locale),
        )?;
        write!(f, "Created: {}", format_creation_time(self.creation_time, self.use_local_time))
    }
}

/// Formats a [`std::time::SystemTime`] as `YYYY-MM-DD HH:mm:ss`, in local or
/// UTC time depending on `use_local_time`.
fn format_creation_time(time: std::time::SystemTime, use_local_time: bool) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    if use_local_time {
        datetime
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

pub fn user_locale() -> num_format::Locale {
    num_format::Locale::en
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_only_requested_field() {
        let config = Config::builder(5, 2).step_limit_decider_cycler(42).build();
        assert_eq!(42, config.step_limit_decider_cycler());
        assert_eq!(
            Config::step_limit_bouncer_default(5),
            config.step_limit_decider_bouncer()
        );
    }

    #[test]
    fn display_includes_creation_time() {
        let config = Config::new_default(3, 2);
        assert!(config.to_string().contains("Created:"));
    }

    #[test]
    fn default_config_has_sane_limits() {
        let config = Config::new_default(5, 2);
        assert_eq!(5, config.n_states());
        assert_eq!(2, config.n_symbols());
        assert!(config.step_limit_decider_halt() > 0);
    }
}
