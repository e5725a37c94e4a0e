//! Reference path resolver.

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::expr::Expr;
use crate::path::{PathExpression, PathResolver};
use crate::translate::TranslatorRegistry;

/// Resolves query receivers to stored field paths.
///
/// Registered translators are consulted first. Otherwise the parameter is
/// the root path, property access appends the property name, and method
/// calls are rejected.
#[derive(Debug, Clone)]
pub struct PathProvider {
    config: QueryConfig,
    registry: TranslatorRegistry,
}

impl PathProvider {
    /// Creates a provider, registering the time translators if configured.
    pub fn new(config: QueryConfig) -> Self {
        let registry = if config.time_translators {
            TranslatorRegistry::with_time_translators()
        } else {
            TranslatorRegistry::new()
        };
        Self { config, registry }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn registry(&self) -> &TranslatorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TranslatorRegistry {
        &mut self.registry
    }
}

impl Default for PathProvider {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl PathResolver for PathProvider {
    fn resolve(&self, expr: &Expr) -> Result<PathExpression> {
        if let Some(translator) = self.registry.lookup(expr) {
            return translator.translate(expr, self, &self.config.local_date_time_suffix);
        }

        match expr {
            Expr::Parameter { ty, .. } => Ok(PathExpression::root(ty.clone())),
            Expr::Member { target, name, ty } => Ok(self.resolve(target)?.child(name, ty.clone())),
            Expr::Call { .. } => Err(QueryError::unsupported(expr)),
            _ => Err(QueryError::NotAPath {
                expression: expr.to_string(),
            }),
        }
    }
}
