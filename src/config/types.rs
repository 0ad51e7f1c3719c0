use dccfs_files::{
    CommandCompiler, CommandEditor, EntityFactory, EntityKind, TypeRegistry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Extra extension registrations, merged over the built-in kinds
    #[serde(default)]
    pub registry: BTreeMap<String, EntityKind>,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditorConfig {
    /// Program name or path, resolved on PATH
    #[serde(default = "default_editor")]
    pub command: String,

    /// Arguments placed before the file path
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string())
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: default_editor(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// UI compiler override; `pyside2-uic` on PATH when unset
    #[serde(default)]
    pub uic_path: Option<PathBuf>,
}

impl Config {
    /// The built-in registry with this config's registrations merged in.
    pub fn type_registry(&self) -> dccfs_files::Result<TypeRegistry> {
        let mut registry = TypeRegistry::default();
        registry.register(self.registry.iter().map(|(key, kind)| (key, *kind)))?;
        Ok(registry)
    }

    pub fn build_factory(&self) -> dccfs_files::Result<EntityFactory> {
        Ok(EntityFactory::new(self.type_registry()?))
    }

    pub fn editor(&self) -> dccfs_files::Result<CommandEditor> {
        CommandEditor::discover(&self.editor.command, self.editor.args.clone())
    }

    pub fn ui_compiler(&self) -> dccfs_files::Result<CommandCompiler> {
        CommandCompiler::discover(self.tools.uic_path.as_deref())
    }
}
