use crate::buffer::LineBuffer;
use crate::command::CommandFactory;
use crate::config::ShellConfig;
use crate::error::TrieError;
use crate::trie::{CommandId, Trie};
use anyhow::{Context, Result};

/// Command table bound to the trie that resolves typed words to it.
///
/// Built once at startup, read-only afterwards.
pub struct Registry {
    trie: Trie,
    factories: Vec<Box<dyn CommandFactory>>,
    replaced: Vec<Replaced>,
}

/// A command word registered more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replaced {
    pub name: &'static str,
    pub previous: CommandId,
    pub current: CommandId,
}

impl Registry {
    /// Insert every factory's name under its position in `factories`.
    ///
    /// A name registered twice resolves to the later factory; a warning is
    /// printed to stderr.
    pub fn new(factories: Vec<Box<dyn CommandFactory>>, config: &ShellConfig) -> Result<Self> {
        let mut trie = Trie::with_limits(config.initial_capacity, config.max_word_len);
        let mut replaced = Vec::new();
        for (index, factory) in factories.iter().enumerate() {
            let name = factory.name();
            let id = CommandId::try_from(index).context("too many commands")?;
            let previous = trie
                .insert(id, name)
                .with_context(|| format!("can't register command `{}`", name))?;
            if let Some(previous) = previous {
                eprintln!(
                    "warning: command `{}` re-registered, id {} replaced by {}",
                    name, previous, id
                );
                replaced.push(Replaced {
                    name,
                    previous,
                    current: id,
                });
            }
        }
        Ok(Self {
            trie,
            factories,
            replaced,
        })
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Words whose earlier registration was overwritten, in insertion order.
    pub fn replaced(&self) -> &[Replaced] {
        &self.replaced
    }

    /// Command words in id order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.iter().map(|f| f.name())
    }

    /// Resolve the text in `line` to its factory.
    pub fn resolve(&self, line: &LineBuffer) -> Result<Option<&dyn CommandFactory>, TrieError> {
        let id = self.trie.lookup(line.as_bytes())?;
        Ok(id
            .and_then(|id| self.factories.get(id as usize))
            .map(|f| &**f))
    }

    /// Release the trie.
    pub fn destroy(&mut self) -> Result<(), TrieError> {
        self.trie.destroy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_factories;
    use crate::interpreter::Factory;
    use crate::builtin::{Hella, Hello};

    fn resolve_name(registry: &Registry, name: &str) -> Option<&'static str> {
        let line = LineBuffer::from_text(name, 64).unwrap();
        registry.resolve(&line).unwrap().map(|f| f.name())
    }

    #[test]
    fn test_registry_resolves_builtins() {
        let registry = Registry::new(builtin_factories(), &ShellConfig::default()).unwrap();
        for name in ["help", "commands", "hello", "hella", "trie", "exit"] {
            assert_eq!(resolve_name(&registry, name), Some(name));
        }
        assert!(registry.replaced().is_empty());
        assert_eq!(resolve_name(&registry, "hel"), None);
        assert_eq!(resolve_name(&registry, "quit"), None);
    }

    #[test]
    fn test_registry_last_registration_wins() {
        let factories: Vec<Box<dyn CommandFactory>> = vec![
            Box::new(Factory::<Hello>::default()),
            Box::new(Factory::<Hella>::default()),
            Box::new(Factory::<Hello>::default()),
        ];
        let registry = Registry::new(factories, &ShellConfig::default()).unwrap();

        let line = LineBuffer::from_text("hello", 8).unwrap();
        assert_eq!(registry.trie().lookup(line.as_bytes()).unwrap(), Some(2));
        assert_eq!(registry.names().count(), 3);
        assert_eq!(
            registry.replaced(),
            [Replaced {
                name: "hello",
                previous: 0,
                current: 2,
            }]
        );
    }

    #[test]
    fn test_registry_rejects_names_over_word_limit() {
        let config = ShellConfig {
            max_word_len: 5,
            ..ShellConfig::default()
        };
        assert!(Registry::new(builtin_factories(), &config).is_err());
    }

    #[test]
    fn test_registry_destroy_once() {
        let mut registry = Registry::new(builtin_factories(), &ShellConfig::default()).unwrap();
        assert!(registry.destroy().is_ok());
        assert!(registry.destroy().is_err());
    }
}
