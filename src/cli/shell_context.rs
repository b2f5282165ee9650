use crate::{
    cli::{commands, registry::CommandRegistry},
    config::{Config, ConfigManager},
    document::Document,
    errors::CliError,
    speller::AmountSpeller,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Mutable state threaded through every command handler.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    pub(crate) registry: CommandRegistry,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) speller: AmountSpeller,
    pub(crate) document: Option<Document>,
    pub(crate) last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::from_env()?;
        Self::with_config_manager(mode, manager)
    }

    pub fn with_config_manager(mode: CliMode, manager: ConfigManager) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let config = manager.load()?;
        let speller = AmountSpeller::from_config(&config);
        Ok(Self {
            mode,
            running: true,
            registry,
            config,
            config_manager: manager,
            speller,
            document: None,
            last_command: None,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn speller(&self) -> &AmountSpeller {
        &self.speller
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match &self.document {
            Some(doc) => format!("stock [{} {}]> ", doc.kind, doc.number),
            None => "stock> ".to_string(),
        }
    }

    /// Replaces the configuration, persists it and rebuilds the speller.
    pub(crate) fn apply_config(&mut self, config: Config) -> Result<(), CliError> {
        self.config_manager.save(&config)?;
        self.speller = AmountSpeller::from_config(&config);
        self.config = config;
        Ok(())
    }
}
