//! Fragment merging.
//!
//! `merge(base, fragment, strategy)` is pure and order-sensitive. The override
//! table, per field:
//!
//! | field | policy |
//! |---|---|
//! | `name`, `mode`, `devtool`, `output.*` | fragment wins when set |
//! | `entry`, `resolve.alias` | key union; fragment wins per key; base order kept |
//! | `resolve.extensions` | appended, duplicates dropped |
//! | `module.rules`, `plugins` | [`MergeStrategy`] |
//! | `devServer`, `optimization` | fragment replaces when set |
//!
//! Swapping the arguments changes loader and plugin execution order.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::fragment::{Fragment, ModuleOptions, Output, Resolve};

/// Placement of the fragment's entries in a merged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayStrategy {
    /// Base entries first, then the fragment's
    #[default]
    Append,
    /// Fragment entries first, then the base's
    Prepend,
}

/// Strategy for the two list-valued keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStrategy {
    pub rules: ArrayStrategy,
    pub plugins: ArrayStrategy,
}

impl MergeStrategy {
    /// Used to layer a variant fragment over the base configuration.
    pub const fn prepend_rules_and_plugins() -> Self {
        Self {
            rules: ArrayStrategy::Prepend,
            plugins: ArrayStrategy::Prepend,
        }
    }

    /// Used to layer profile fragments; same as `Default`.
    pub const fn append() -> Self {
        Self {
            rules: ArrayStrategy::Append,
            plugins: ArrayStrategy::Append,
        }
    }
}

/// Merge `fragment` over `base`.
pub fn merge(base: Fragment, fragment: Fragment, strategy: MergeStrategy) -> Fragment {
    // Destructured so that adding a field without a merge policy fails to compile.
    let Fragment {
        name,
        mode,
        entry,
        output,
        resolve,
        module,
        plugins,
        devtool,
        dev_server,
        optimization,
    } = fragment;

    Fragment {
        name: name.or(base.name),
        mode: mode.or(base.mode),
        entry: union(base.entry, entry),
        output: merge_output(base.output, output),
        resolve: merge_resolve(base.resolve, resolve),
        module: ModuleOptions {
            rules: combine(base.module.rules, module.rules, strategy.rules),
        },
        plugins: combine(base.plugins, plugins, strategy.plugins),
        devtool: devtool.or(base.devtool),
        dev_server: dev_server.or(base.dev_server),
        optimization: optimization.or(base.optimization),
    }
}

fn merge_output(base: Output, fragment: Output) -> Output {
    let Output {
        path,
        public_path,
        filename,
    } = fragment;

    Output {
        path: path.or(base.path),
        public_path: public_path.or(base.public_path),
        filename: filename.or(base.filename),
    }
}

fn merge_resolve(base: Resolve, fragment: Resolve) -> Resolve {
    let Resolve { extensions, alias } = fragment;

    let mut merged_extensions = base.extensions;
    for extension in extensions {
        if !merged_extensions.contains(&extension) {
            merged_extensions.push(extension);
        }
    }

    Resolve {
        extensions: merged_extensions,
        alias: union(base.alias, alias),
    }
}

fn union<K: Hash + Eq, V>(mut base: IndexMap<K, V>, fragment: IndexMap<K, V>) -> IndexMap<K, V> {
    // insert() on an existing key keeps its position
    for (key, value) in fragment {
        base.insert(key, value);
    }
    base
}

fn combine<T>(base: Vec<T>, fragment: Vec<T>, strategy: ArrayStrategy) -> Vec<T> {
    let (mut first, second) = match strategy {
        ArrayStrategy::Append => (base, fragment),
        ArrayStrategy::Prepend => (fragment, base),
    };
    first.extend(second);
    first
}
