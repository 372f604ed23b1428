/// Profile directory configuration
///
/// Built like a connection config: start from [`DirectoryConfig::new`] and
/// chain setters, or read overrides from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Initial slot capacity of the underlying cache
    pub initial_capacity: usize,

    /// Purge dead entries after this many registrations (`None` disables)
    pub auto_sweep_every: Option<usize>,
}

impl DirectoryConfig {
    pub const CAPACITY_ENV: &'static str = "FIELDGUARD_CACHE_CAPACITY";
    pub const AUTO_SWEEP_ENV: &'static str = "FIELDGUARD_AUTO_SWEEP";

    pub fn new() -> Self {
        Self {
            initial_capacity: 16,
            auto_sweep_every: Some(64),
        }
    }

    /// Set the initial cache capacity
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sweep after every `every` registrations; `0` disables auto sweeping
    pub fn auto_sweep_every(mut self, every: usize) -> Self {
        self.auto_sweep_every = (every > 0).then_some(every);
        self
    }

    pub fn disable_auto_sweep(mut self) -> Self {
        self.auto_sweep_every = None;
        self
    }

    /// Defaults overridden by `FIELDGUARD_CACHE_CAPACITY` / `FIELDGUARD_AUTO_SWEEP`
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(Self::CAPACITY_ENV) {
            let capacity = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("{} must be a non-negative integer: {}", Self::CAPACITY_ENV, e))?;
            config = config.initial_capacity(capacity);
        }

        if let Some(raw) = lookup(Self::AUTO_SWEEP_ENV) {
            let every = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("{} must be a non-negative integer: {}", Self::AUTO_SWEEP_ENV, e))?;
            config = config.auto_sweep_every(every);
        }

        Ok(config)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
