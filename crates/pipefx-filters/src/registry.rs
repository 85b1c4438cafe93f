//! Filter discovery by name.
//!
//! Two pieces:
//!
//! - [`FilterCatalog`] maps a stable type name (`"BlurFilter"`) to a factory
//!   building a fresh [`Execution`]. [`FilterCatalog::global()`] holds the
//!   built-in filters.
//! - [`FilterRegistry`] is the result of one load: the configured names
//!   resolved, instantiated and numbered from 1.
//!
//! Loading returns a new registry value; reloading means loading again and
//! dropping the old value, so ids always restart at 1.
//!
//! # Example
//!
//! ```rust
//! use pipefx_core::ImageBuffer;
//! use pipefx_filters::FilterRegistry;
//!
//! let registry = FilterRegistry::load(["BlurFilter", "RgbSplitFilter"]).unwrap();
//! assert_eq!(registry.get(1).unwrap().name(), "Blur");
//! assert_eq!(registry.get(2).unwrap().name(), "Rgb split");
//!
//! let translucent = ImageBuffer::new(8, 8).with_translucent(true);
//! let ids: Vec<_> = registry.applicable(&translucent).map(|(id, _)| id).collect();
//! assert_eq!(ids, [1]);
//! ```

use crate::filter::{Execution, FilterInstance};
use crate::filters::{BlurFilter, RgbSplitFilter};
use crate::{FilterError, FilterId, FilterResult};
use pipefx_core::ImageBuffer;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Builds a new, unconfigured filter implementation.
pub type FilterFactory = fn() -> Execution;

/// Name-to-factory table used to resolve configured filter names.
#[derive(Debug, Clone, Default)]
pub struct FilterCatalog {
    entries: Vec<(&'static str, FilterFactory)>,
}

impl FilterCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared catalog with the built-in filters.
    pub fn global() -> &'static FilterCatalog {
        static INSTANCE: OnceLock<FilterCatalog> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let mut catalog = FilterCatalog::new();
            catalog.register_builtin_filters();
            catalog
        })
    }

    /// Creates a catalog holding the built-in filters, open to more.
    pub fn builtin() -> Self {
        Self::global().clone()
    }

    fn register_builtin_filters(&mut self) {
        self.register("BlurFilter", || Execution::Copy(Box::new(BlurFilter)));
        self.register("RgbSplitFilter", || Execution::InPlace(Box::new(RgbSplitFilter)));
    }

    /// Registers `factory` under `type_name`, replacing any entry whose name
    /// matches case-insensitively.
    pub fn register(&mut self, type_name: &'static str, factory: FilterFactory) -> &mut Self {
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
        {
            Some(entry) => *entry = (type_name, factory),
            None => self.entries.push((type_name, factory)),
        }
        self
    }

    /// Looks up a type name, ignoring surrounding whitespace and ASCII case.
    pub fn resolve(&self, type_name: &str) -> Option<FilterFactory> {
        let type_name = type_name.trim();
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
            .map(|&(_, factory)| factory)
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Returns `true` if `type_name` resolves.
    pub fn contains(&self, type_name: &str) -> bool {
        self.resolve(type_name).is_some()
    }
}

/// Splits a comma-separated filter list into trimmed identifiers.
///
/// Empty segments are kept: they fail to resolve, as a misconfigured list should.
///
/// ```rust
/// use pipefx_filters::registry::split_filter_list;
///
/// assert_eq!(split_filter_list("BlurFilter, RgbSplitFilter"), ["BlurFilter", "RgbSplitFilter"]);
/// assert_eq!(split_filter_list(""), [""]);
/// ```
pub fn split_filter_list(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.trim().to_string()).collect()
}

/// Loaded filters, keyed by id.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<FilterId, FilterInstance>,
}

impl FilterRegistry {
    /// Resolves `names` against [`FilterCatalog::global()`].
    ///
    /// # Errors
    ///
    /// - [`FilterError::FilterNotFound`] for the first name that does not
    ///   resolve; nothing is loaded
    /// - [`FilterError::InvalidSchema`] if a filter declares a bad schema
    pub fn load<I, S>(names: I) -> FilterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::load_with(FilterCatalog::global(), names)
    }

    /// Resolves `names` against `catalog`, assigning ids 1, 2, ... in order.
    pub fn load_with<I, S>(catalog: &FilterCatalog, names: I) -> FilterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filters = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            let factory = catalog.resolve(name).ok_or_else(|| FilterError::FilterNotFound {
                name: name.to_string(),
            })?;
            let instance = FilterInstance::new(factory())?;
            let id = filters.len() + 1;
            trace!(id, name, filter = instance.name(), "filter loaded");
            filters.insert(id, instance);
        }
        debug!(count = filters.len(), "filters loaded");
        Ok(Self { filters })
    }

    /// Loads from a comma-separated list, see [`split_filter_list`].
    pub fn from_list(list: &str) -> FilterResult<Self> {
        Self::load(split_filter_list(list))
    }

    /// Returns the filter with `id`.
    pub fn get(&self, id: FilterId) -> FilterResult<&FilterInstance> {
        self.filters.get(&id).ok_or(FilterError::FilterIdNotFound { id })
    }

    /// Returns the filter with `id` for parameter assignment.
    pub fn get_mut(&mut self, id: FilterId) -> FilterResult<&mut FilterInstance> {
        self.filters
            .get_mut(&id)
            .ok_or(FilterError::FilterIdNotFound { id })
    }

    /// Filters whose applicability predicate accepts `image`, in id order.
    pub fn applicable<'a>(
        &'a self,
        image: &'a ImageBuffer,
    ) -> impl Iterator<Item = (FilterId, &'a FilterInstance)> + 'a {
        self.iter().filter(move |(_, f)| f.is_applicable(image))
    }

    /// All loaded filters in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterId, &FilterInstance)> + '_ {
        self.filters.iter().map(|(&id, f)| (id, f))
    }

    /// Number of loaded filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
